// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The open-play matching engine: tracks a freely played game and
//! classifies it against the whole corpus after every move.
//!
//! The candidate set is recomputed from the move history on every query
//! rather than maintained incrementally. The recomputation is cheap at
//! corpus scale and keeps "candidates are a pure function of the history"
//! trivially true; only the terminal classification is stored, so that
//! further submissions can be refused.

use crate::corpus::{Corpus, OpeningRecord};
use crate::game::GameState;
use crate::rules::{BoardFrame, MoveFlag, MoveSpec, Rules};

/// Why a submission was rejected. Rejections never change engine state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The rules engine refused the move.
    Illegal,
    /// The game already reached a terminal classification.
    Ended,
}

/// Classification of the game so far against the corpus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The history is a strict prefix of at least one corpus line, or no
    /// moves have been played yet.
    InProgress,
    /// The history equals a corpus line and no line extends it further.
    Matched,
    /// The history is a prefix of no corpus line.
    OffBook,
}

/// A candidate line the game could still become, with the move it requires
/// next.
#[derive(Clone, Debug)]
pub struct Continuation<'c> {
    pub record: &'c OpeningRecord,
    pub next_move: &'c str,
    pub remaining: usize,
}

/// The candidate view for display: exact matches and extendable lines,
/// sorted by line length ascending.
#[derive(Clone, Debug)]
pub struct MatchReport<'c> {
    pub classification: Classification,
    pub matched: Option<&'c OpeningRecord>,
    pub exact: Vec<&'c OpeningRecord>,
    pub extendable: Vec<Continuation<'c>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EndState {
    Matched(usize),
    OffBook,
}

/// Open-play matching over a full corpus.
pub struct OpenPlay<'c, R: Rules> {
    rules: R,
    corpus: &'c Corpus,
    game: GameState<R::Position>,
    ended: Option<EndState>,
}

impl<'c, R: Rules> OpenPlay<'c, R> {
    pub fn new(rules: R, corpus: &'c Corpus) -> OpenPlay<'c, R> {
        let game = GameState::new(rules.initial());
        OpenPlay {
            rules,
            corpus,
            game,
            ended: None,
        }
    }

    pub fn history(&self) -> &[String] {
        self.game.history()
    }

    pub fn fen(&self) -> String {
        self.rules.fen(self.game.position())
    }

    pub fn classification(&self) -> Classification {
        match self.ended {
            None => Classification::InProgress,
            Some(EndState::Matched(_)) => Classification::Matched,
            Some(EndState::OffBook) => Classification::OffBook,
        }
    }

    /// The opening the game ended on, once classified `Matched`.
    pub fn matched(&self) -> Option<&'c OpeningRecord> {
        match self.ended {
            Some(EndState::Matched(index)) => self.corpus.records().get(index),
            _ => None,
        }
    }

    /// Applies a move and reclassifies the game against the corpus. Open
    /// play has no timed behavior, so there is nothing to tick.
    pub fn submit(&mut self, spec: &MoveSpec) -> Result<Classification, SubmitError> {
        if self.ended.is_some() {
            return Err(SubmitError::Ended);
        }

        let applied = self
            .rules
            .apply(self.game.position(), spec)
            .ok_or(SubmitError::Illegal)?;
        self.game.record(applied.position, applied.san);
        self.reclassify();
        Ok(self.classification())
    }

    /// Clears history and classification. Zero moves played is
    /// `InProgress` with an empty candidate view, not off-book.
    pub fn reset(&mut self) {
        self.game.reset(self.rules.initial());
        self.ended = None;
    }

    /// Recomputes the candidate view from the current history.
    pub fn report(&self) -> MatchReport<'c> {
        let history = self.game.history();
        let mut candidates: Vec<&'c OpeningRecord> = Vec::new();
        if !history.is_empty() {
            candidates = self
                .corpus
                .records()
                .iter()
                .filter(|record| record.continues(history))
                .collect();
            candidates.sort_by_key(|record| record.moves.len());
        }

        let mut exact = Vec::new();
        let mut extendable = Vec::new();
        for record in candidates {
            if record.moves.len() == history.len() {
                exact.push(record);
            } else {
                extendable.push(Continuation {
                    record,
                    next_move: record.moves[history.len()].as_str(),
                    remaining: record.moves.len() - history.len(),
                });
            }
        }

        MatchReport {
            classification: self.classification(),
            matched: self.matched(),
            exact,
            extendable,
        }
    }

    /// What the board surface should render right now.
    pub fn frame(&self) -> BoardFrame {
        BoardFrame {
            fen: self.fen(),
            interactive: self.ended.is_none(),
            hint: None,
            flag: match self.classification() {
                Classification::Matched => MoveFlag::Correct,
                Classification::OffBook => MoveFlag::Incorrect,
                Classification::InProgress => MoveFlag::Neutral,
            },
        }
    }

    fn reclassify(&mut self) {
        let history = self.game.history();
        let mut first_exact = None;
        let mut any_extendable = false;
        let mut any = false;
        for (index, record) in self.corpus.records().iter().enumerate() {
            if !record.continues(history) {
                continue;
            }

            any = true;
            if record.moves.len() == history.len() {
                if first_exact.is_none() {
                    first_exact = Some(index);
                }
            } else {
                any_extendable = true;
            }
        }

        if !any {
            debug!("history {:?} matches no corpus line", history);
            self.ended = Some(EndState::OffBook);
        } else if let (Some(index), false) = (first_exact, any_extendable) {
            debug!(
                "history {:?} matched corpus line {}",
                history,
                self.corpus.records()[index].id
            );
            self.ended = Some(EndState::Matched(index));
        }
    }
}
