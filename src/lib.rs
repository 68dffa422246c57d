// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core logic for a chess opening trainer: guided move-by-move practice,
//! live prefix-matching of a free game against a corpus of named openings,
//! and a timed identification quiz. Chess rules themselves (legality, SAN,
//! FEN) are delegated to an external engine behind the [`Rules`] trait.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod corpus;
pub mod game;
pub mod guided;
pub mod openplay;
pub mod quiz;
pub mod rules;
pub mod scripted;
mod timer;

pub use corpus::{Corpus, CorpusError, OpeningRecord};
pub use game::GameState;
pub use guided::{Guided, SideAssignment, Verdict};
pub use openplay::{Classification, MatchReport, OpenPlay};
pub use quiz::{Quiz, Stats};
pub use rules::{Applied, BoardFrame, Color, LegalMove, MoveFlag, MoveSpec, PieceKind, Rules, Square};
pub use scripted::{ScriptedMove, ScriptedRules};
