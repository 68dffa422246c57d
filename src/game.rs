// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// The mutable board state owned by an engine: an opaque adapter position
/// plus the SAN history that produced it.
///
/// Invariant: `position` is always the result of replaying `history` from
/// the initial position through the rules adapter. Every mutation here
/// updates both together so the two cannot drift.
#[derive(Clone, Debug)]
pub struct GameState<P: Clone> {
    position: P,
    history: Vec<String>,
}

impl<P: Clone> GameState<P> {
    pub fn new(initial: P) -> GameState<P> {
        GameState {
            position: initial,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of half-moves played.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Commits an applied move: the position after it and its SAN.
    pub fn record(&mut self, position: P, san: String) {
        self.position = position;
        self.history.push(san);
    }

    /// Undoes the most recent move, restoring the caller-held snapshot of
    /// the position before it.
    pub fn rewind(&mut self, position: P) {
        self.position = position;
        self.history.pop();
    }

    pub fn reset(&mut self, initial: P) {
        self.position = initial;
        self.history.clear();
    }
}
