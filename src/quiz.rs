// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The identification quiz engine: replays an opening's positions as a
//! timed animation, offers shuffled multiple-choice options, and keeps
//! running score.
//!
//! One question lives at a time. Answer submission is blocked only while
//! the animation is running; a learner who has watched part of a replay
//! may guess early once it stops.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::corpus::{Corpus, OpeningRecord};
use crate::rules::{BoardFrame, MoveFlag, MoveSpec, Rules};
use crate::timer::Scheduler;

/// Delay before playback begins after a question is generated or replayed.
const START_DELAY: Duration = Duration::from_millis(300);

/// Interval between animation frames once playback has begun.
const FRAME_INTERVAL: Duration = Duration::from_millis(600);

/// Number of options presented per question, the answer included.
const OPTION_COUNT: usize = 4;

/// Why an answer submission was refused. Refusals never touch the stats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectError {
    NoQuestion,
    Animating,
    AlreadyAnswered,
    InvalidOption,
}

/// Why a replay request was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    NoQuestion,
    Animating,
    AlreadyAnswered,
}

/// Running session score. The only state that outlives a question.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    correct: u32,
    total: u32,
    streak: u32,
}

impl Stats {
    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Length of the current trailing run of correct answers.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Percentage of questions answered correctly, rounded.
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }

        (self.correct * 100 + self.total / 2) / self.total
    }

    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Stats::default();
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    Start,
    Advance,
}

struct Question<'c> {
    answer: &'c OpeningRecord,
    options: Vec<&'c OpeningRecord>,
    /// FEN per frame: the initial position plus one entry per replayable
    /// move of the answer line.
    positions: Vec<String>,
    frame: usize,
    animating: bool,
    selected: Option<usize>,
}

/// The quiz engine. Holds at most one live question plus session stats.
pub struct Quiz<'c, R: Rules> {
    rules: R,
    corpus: &'c Corpus,
    stats: Stats,
    timers: Scheduler<Task>,
    question: Option<Question<'c>>,
}

impl<'c, R: Rules> Quiz<'c, R> {
    pub fn new(rules: R, corpus: &'c Corpus) -> Quiz<'c, R> {
        Quiz {
            rules,
            corpus,
            stats: Stats::default(),
            timers: Scheduler::new(),
            question: None,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Discards any current question (canceling its pending playback) and
    /// generates a new one: a random answer opening, three distinct
    /// distractors, and the precomputed position sequence for the answer.
    ///
    /// The corpus must hold at least `OPTION_COUNT` records; a smaller
    /// corpus cannot fill a question's option list.
    pub fn next_question<G: Rng>(&mut self, rng: &mut G, now: Instant) {
        debug_assert!(
            self.corpus.len() >= OPTION_COUNT,
            "quiz corpus has too few openings to fill a question"
        );
        self.timers.invalidate();

        let answer = self
            .corpus
            .records()
            .choose(rng)
            .expect("corpus is never empty");
        let distractors: Vec<&'c OpeningRecord> = self
            .corpus
            .records()
            .iter()
            .filter(|record| record.id != answer.id)
            .collect();
        let mut options: Vec<&'c OpeningRecord> = distractors
            .choose_multiple(rng, OPTION_COUNT - 1)
            .cloned()
            .collect();
        options.push(answer);
        options.shuffle(rng);

        self.question = Some(Question {
            answer,
            options,
            positions: self.replay_positions(answer),
            frame: 0,
            animating: true,
            selected: None,
        });
        self.timers.schedule(now, START_DELAY, Task::Start);
        debug!("quiz question generated: answer {}", answer.id);
    }

    /// Fires due playback work: the start delay and frame advances.
    pub fn tick(&mut self, now: Instant) {
        match self.timers.fire(now) {
            Some(Task::Start) => {
                self.timers.schedule(now, FRAME_INTERVAL, Task::Advance);
            }
            Some(Task::Advance) => {
                if let Some(q) = self.question.as_mut() {
                    if q.frame + 1 < q.positions.len() {
                        q.frame += 1;
                        self.timers.schedule(now, FRAME_INTERVAL, Task::Advance);
                    } else {
                        q.animating = false;
                    }
                }
            }
            None => {}
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.deadline()
    }

    /// Restarts playback from the first frame. Allowed only when the
    /// animation has stopped and no answer has been submitted.
    pub fn replay(&mut self, now: Instant) -> Result<(), ReplayError> {
        let q = self.question.as_mut().ok_or(ReplayError::NoQuestion)?;
        if q.animating {
            return Err(ReplayError::Animating);
        }

        if q.selected.is_some() {
            return Err(ReplayError::AlreadyAnswered);
        }

        q.frame = 0;
        q.animating = true;
        self.timers.schedule(now, START_DELAY, Task::Start);
        Ok(())
    }

    /// Submits an answer by option index. Returns whether it was correct.
    /// Refused while animating or once already answered; refusals do not
    /// alter the stats.
    pub fn select(&mut self, option: usize) -> Result<bool, SelectError> {
        let q = self.question.as_mut().ok_or(SelectError::NoQuestion)?;
        if q.animating {
            return Err(SelectError::Animating);
        }

        if q.selected.is_some() {
            return Err(SelectError::AlreadyAnswered);
        }

        if option >= q.options.len() {
            return Err(SelectError::InvalidOption);
        }

        q.selected = Some(option);
        let correct = q.options[option].id == q.answer.id;
        self.stats.record(correct);
        Ok(correct)
    }

    /// The shuffled options for the current question.
    pub fn options(&self) -> &[&'c OpeningRecord] {
        match &self.question {
            Some(q) => &q.options,
            None => &[],
        }
    }

    /// The answer opening of the current question.
    pub fn answer(&self) -> Option<&'c OpeningRecord> {
        self.question.as_ref().map(|q| q.answer)
    }

    pub fn is_animating(&self) -> bool {
        self.question.as_ref().map_or(false, |q| q.animating)
    }

    pub fn answered(&self) -> bool {
        self.question.as_ref().map_or(false, |q| q.selected.is_some())
    }

    /// SAN moves revealed by playback so far.
    pub fn played_moves(&self) -> &[String] {
        match &self.question {
            Some(q) => &q.answer.moves[..q.frame.min(q.answer.moves.len())],
            None => &[],
        }
    }

    /// FEN of the current animation frame, or the initial position when no
    /// question is live.
    pub fn fen(&self) -> String {
        match &self.question {
            Some(q) => q.positions[q.frame].clone(),
            None => self.rules.fen(&self.rules.initial()),
        }
    }

    /// What the board surface should render right now. The quiz board is
    /// never interactive; the flag reflects the submitted answer.
    pub fn frame(&self) -> BoardFrame {
        let flag = match &self.question {
            Some(q) => match q.selected {
                Some(option) if q.options[option].id == q.answer.id => MoveFlag::Correct,
                Some(_) => MoveFlag::Incorrect,
                None => MoveFlag::Neutral,
            },
            None => MoveFlag::Neutral,
        };

        BoardFrame {
            fen: self.fen(),
            interactive: false,
            hint: None,
            flag,
        }
    }

    /// Replays the record's line from the initial position, collecting one
    /// FEN per position. A move the rules engine refuses means the stored
    /// line is corrupt: replay stops at the last good position and the
    /// corruption is reported, never fabricated around.
    fn replay_positions(&self, record: &OpeningRecord) -> Vec<String> {
        let mut pos = self.rules.initial();
        let mut positions = vec![self.rules.fen(&pos)];
        for san in &record.moves {
            match self.rules.apply(&pos, &MoveSpec::San(san.clone())) {
                Some(applied) => {
                    pos = applied.position;
                    positions.push(self.rules.fen(&pos));
                }
                None => {
                    error!(
                        "opening {} has an unplayable reference move {} at {}",
                        record.id,
                        san,
                        self.rules.fen(&pos)
                    );
                    break;
                }
            }
        }

        positions
    }
}
