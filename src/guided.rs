// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The guided practice engine: drives move-by-move play against one
//! opening's reference line.
//!
//! The learner controls one side (or both); the engine plays the reference
//! move for the other side after a short delay. A legal move that does not
//! match the reference line is accepted, flagged incorrect, and undone
//! after a visible delay so the learner can retry from the same index.

use std::cmp;
use std::time::{Duration, Instant};

use crate::corpus::OpeningRecord;
use crate::game::GameState;
use crate::rules::{BoardFrame, Color, MoveFlag, MoveSpec, Rules, Square};
use crate::timer::Scheduler;

/// Delay before the non-controlled side's reference move is auto-played.
const AUTO_REPLY_DELAY: Duration = Duration::from_millis(400);

/// How long an incorrect move stays on the board before it is undone.
const REVERT_DELAY: Duration = Duration::from_millis(500);

/// Which side(s) the learner plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SideAssignment {
    White,
    Black,
    BothSides,
}

impl SideAssignment {
    /// Whether the learner controls the given side to move.
    pub fn controls(self, color: Color) -> bool {
        match self {
            SideAssignment::White => color == Color::White,
            SideAssignment::Black => color == Color::Black,
            SideAssignment::BothSides => true,
        }
    }
}

/// Judgment of an accepted move against the reference line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Why a submission was rejected. Rejections never change engine state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The rules engine refused the move.
    Illegal,
    /// It is the auto-played side's turn.
    NotYourTurn,
    /// An incorrect move is still on the board awaiting its revert.
    RevertPending,
    /// The full reference line has been played.
    LineComplete,
}

/// A timed transition that fired during `tick`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The engine played the reference move for the non-controlled side.
    AutoPlayed(String),
    /// An incorrect move was undone; the learner may retry.
    Reverted,
    /// An auto-played move completed the line.
    Completed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    AutoReply,
    Revert,
}

/// Guided practice over a single opening record.
pub struct Guided<'a, R: Rules> {
    rules: R,
    opening: &'a OpeningRecord,
    side: SideAssignment,
    game: GameState<R::Position>,
    /// Snapshot of the position before an incorrect move, used to undo it.
    prior: Option<R::Position>,
    last_result: Option<Verdict>,
    timers: Scheduler<Task>,
}

impl<'a, R: Rules> Guided<'a, R> {
    pub fn new(
        rules: R,
        opening: &'a OpeningRecord,
        side: SideAssignment,
        now: Instant,
    ) -> Guided<'a, R> {
        let game = GameState::new(rules.initial());
        let mut guided = Guided {
            rules,
            opening,
            side,
            game,
            prior: None,
            last_result: None,
            timers: Scheduler::new(),
        };
        guided.schedule_auto_reply(now);
        guided
    }

    pub fn opening(&self) -> &OpeningRecord {
        self.opening
    }

    pub fn side(&self) -> SideAssignment {
        self.side
    }

    pub fn history(&self) -> &[String] {
        self.game.history()
    }

    pub fn fen(&self) -> String {
        self.rules.fen(self.game.position())
    }

    /// Index into the reference line of the next expected move.
    pub fn current_index(&self) -> usize {
        self.game.ply()
    }

    /// The reference move expected at the current index, if any remain.
    pub fn expected_next(&self) -> Option<&str> {
        self.opening
            .moves
            .get(self.game.ply())
            .map(String::as_str)
    }

    /// True once the whole reference line has been played. A pending
    /// incorrect move never counts as completion, even when it lands on the
    /// final index.
    pub fn is_complete(&self) -> bool {
        self.last_result != Some(Verdict::Incorrect)
            && !self.opening.moves.is_empty()
            && self.game.ply() >= self.opening.moves.len()
    }

    /// Completion percentage, clamped to 100.
    pub fn progress(&self) -> u32 {
        let n = self.opening.moves.len();
        if n == 0 {
            return 0;
        }

        cmp::min(100, (self.game.ply() * 100 / n) as u32)
    }

    /// Submits a learner move. Legal moves are judged against the reference
    /// line; an incorrect one is kept on the board and reverted when its
    /// delay elapses.
    pub fn submit(&mut self, spec: &MoveSpec, now: Instant) -> Result<Verdict, SubmitError> {
        if self.is_complete() {
            return Err(SubmitError::LineComplete);
        }

        if self.last_result == Some(Verdict::Incorrect) {
            return Err(SubmitError::RevertPending);
        }

        let turn = self.rules.side_to_move(self.game.position());
        if !self.side.controls(turn) {
            return Err(SubmitError::NotYourTurn);
        }

        let before = self.game.position().clone();
        let applied = self
            .rules
            .apply(self.game.position(), spec)
            .ok_or(SubmitError::Illegal)?;

        let correct = self.expected_next() == Some(applied.san.as_str());
        if correct {
            self.game.record(applied.position, applied.san);
            self.last_result = Some(Verdict::Correct);
            if self.is_complete() {
                debug!("reference line {} complete", self.opening.id);
                self.timers.invalidate();
            } else {
                self.schedule_auto_reply(now);
            }

            Ok(Verdict::Correct)
        } else {
            debug!(
                "wrong move {} at index {} of {} (expected {:?})",
                applied.san,
                self.game.ply(),
                self.opening.id,
                self.expected_next()
            );
            self.prior = Some(before);
            self.game.record(applied.position, applied.san);
            self.last_result = Some(Verdict::Incorrect);
            self.timers.schedule(now, REVERT_DELAY, Task::Revert);
            Ok(Verdict::Incorrect)
        }
    }

    /// Fires due timed work: auto-replies and incorrect-move reverts.
    pub fn tick(&mut self, now: Instant) -> Option<Event> {
        match self.timers.fire(now)? {
            Task::AutoReply => self.play_auto_reply(now),
            Task::Revert => {
                let prior = self.prior.take()?;
                self.game.rewind(prior);
                self.last_result = None;
                self.schedule_auto_reply(now);
                Some(Event::Reverted)
            }
        }
    }

    /// Deadline of the pending timed transition, if any, for hosts that
    /// sleep between ticks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.deadline()
    }

    /// Origin square of the expected move, when it is the learner's turn
    /// and a reference move remains.
    pub fn hint(&self) -> Option<Square> {
        if self.is_complete() || self.last_result == Some(Verdict::Incorrect) {
            return None;
        }

        let turn = self.rules.side_to_move(self.game.position());
        if !self.side.controls(turn) {
            return None;
        }

        let expected = self.expected_next()?;
        self.rules
            .legal_moves(self.game.position())
            .into_iter()
            .find(|m| m.san == expected)
            .map(|m| m.from)
    }

    /// Returns to the initial position, discarding history, the result
    /// flag, and any pending timed work.
    pub fn reset(&mut self, now: Instant) {
        self.timers.invalidate();
        self.game.reset(self.rules.initial());
        self.prior = None;
        self.last_result = None;
        self.schedule_auto_reply(now);
    }

    /// What the board surface should render right now.
    pub fn frame(&self, show_hint: bool) -> BoardFrame {
        let turn = self.rules.side_to_move(self.game.position());
        let interactive = !self.is_complete()
            && self.last_result != Some(Verdict::Incorrect)
            && self.side.controls(turn);

        BoardFrame {
            fen: self.fen(),
            interactive,
            hint: if show_hint { self.hint() } else { None },
            flag: match self.last_result {
                Some(Verdict::Correct) => MoveFlag::Correct,
                Some(Verdict::Incorrect) => MoveFlag::Incorrect,
                None => MoveFlag::Neutral,
            },
        }
    }

    fn play_auto_reply(&mut self, now: Instant) -> Option<Event> {
        let san = self.expected_next()?.to_owned();
        match self.rules.apply(self.game.position(), &MoveSpec::San(san.clone())) {
            Some(applied) => {
                self.game.record(applied.position, applied.san);
                if self.is_complete() {
                    Some(Event::Completed)
                } else {
                    self.schedule_auto_reply(now);
                    Some(Event::AutoPlayed(san))
                }
            }
            None => {
                // Corrupt reference data. Stop at the last good position
                // rather than crashing; the learner can still reset.
                error!(
                    "reference move {} of opening {} is not legal at {}",
                    san,
                    self.opening.id,
                    self.fen()
                );
                None
            }
        }
    }

    /// Schedules the reference move for the non-controlled side, unless the
    /// line is over, a revert is pending, or the learner is on move.
    fn schedule_auto_reply(&mut self, now: Instant) {
        if self.is_complete() || self.last_result == Some(Verdict::Incorrect) {
            return;
        }

        if self.expected_next().is_none() {
            return;
        }

        let turn = self.rules.side_to_move(self.game.position());
        if !self.side.controls(turn) {
            self.timers.schedule(now, AUTO_REPLY_DELAY, Task::AutoReply);
        }
    }
}
