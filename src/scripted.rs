// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A deterministic [`Rules`] implementation backed by scripted move lines.
//!
//! `ScriptedRules` is not a chess engine: it knows nothing about legality
//! beyond membership in the lines it was built from. A position is the path
//! of SAN moves taken from the root, and the legal moves in a position are
//! exactly the scripted continuations of that path. The test suites and the
//! demo binary drive the trainer engines through it; real hosts bind a real
//! rules engine instead.

use crate::corpus::Corpus;
use crate::rules::{Applied, Color, LegalMove, MoveSpec, Rules, Square};

/// One scripted half-move: the SAN the adapter reports and the squares it
/// claims the move occupies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedMove {
    san: String,
    from: Square,
    to: Square,
}

impl ScriptedMove {
    pub fn new(san: &str, from: Square, to: Square) -> ScriptedMove {
        ScriptedMove {
            san: san.to_owned(),
            from,
            to,
        }
    }

    /// Builds a scripted move from bare SAN. The destination is read from
    /// the trailing square in the SAN text; the origin is reported as the
    /// destination, since bare SAN does not carry one. Scripts that
    /// exercise hint lookups should use `new` with real squares.
    pub fn san_only(san: &str) -> ScriptedMove {
        let to = trailing_square(san).unwrap_or(Square::new(0, 0).unwrap());
        ScriptedMove {
            san: san.to_owned(),
            from: to,
            to,
        }
    }

    pub fn san(&self) -> &str {
        &self.san
    }
}

fn trailing_square(san: &str) -> Option<Square> {
    let bytes = san.as_bytes();
    for i in (1..bytes.len()).rev() {
        if let (b'a'..=b'h', b'1'..=b'8') = (bytes[i - 1], bytes[i]) {
            return Square::new(bytes[i - 1] - b'a', bytes[i] - b'1');
        }
    }

    None
}

#[derive(Clone, Debug, Default)]
struct Node {
    children: Vec<(ScriptedMove, Node)>,
}

impl Node {
    fn child(&self, san: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(mov, _)| mov.san == san)
            .map(|(_, node)| node)
    }
}

/// A scripted position: the SAN path taken from the starting position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedPosition {
    path: Vec<String>,
}

/// The scripted rules adapter: a trie of move lines.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRules {
    root: Node,
}

impl ScriptedRules {
    pub fn new() -> ScriptedRules {
        ScriptedRules::default()
    }

    /// Adds one scripted line, sharing prefixes with existing lines.
    pub fn with_line(mut self, line: Vec<ScriptedMove>) -> ScriptedRules {
        let mut cursor = &mut self.root;
        for mov in line {
            let index = match cursor.children.iter().position(|(m, _)| m.san == mov.san) {
                Some(index) => index,
                None => {
                    cursor.children.push((mov, Node::default()));
                    cursor.children.len() - 1
                }
            };
            cursor = &mut cursor.children[index].1;
        }

        self
    }

    /// Adds a line of bare SAN moves (see [`ScriptedMove::san_only`]).
    pub fn with_sans(self, sans: &[&str]) -> ScriptedRules {
        self.with_line(sans.iter().map(|&s| ScriptedMove::san_only(s)).collect())
    }

    /// Builds an adapter scripted with every line in the corpus. The
    /// resulting "board" can play exactly the corpus lines, which is all
    /// the demo binary needs.
    pub fn from_corpus(corpus: &Corpus) -> ScriptedRules {
        let mut rules = ScriptedRules::new();
        for record in corpus.records() {
            let line = record
                .moves
                .iter()
                .map(|san| ScriptedMove::san_only(san))
                .collect();
            rules = rules.with_line(line);
        }

        rules
    }

    fn node_at(&self, pos: &ScriptedPosition) -> Option<&Node> {
        let mut cursor = &self.root;
        for san in &pos.path {
            cursor = cursor.child(san)?;
        }

        Some(cursor)
    }
}

impl Rules for ScriptedRules {
    type Position = ScriptedPosition;

    fn initial(&self) -> ScriptedPosition {
        ScriptedPosition { path: Vec::new() }
    }

    fn apply(&self, pos: &ScriptedPosition, spec: &MoveSpec) -> Option<Applied<ScriptedPosition>> {
        let node = self.node_at(pos)?;
        let (mov, _) = node.children.iter().find(|(mov, _)| match spec {
            MoveSpec::San(san) => &mov.san == san,
            MoveSpec::Coords {
                from,
                to,
                promotion,
            } => {
                let promotes = match promotion {
                    Some(kind) => mov.san.contains(&format!("={}", kind.letter())),
                    None => !mov.san.contains('='),
                };
                mov.from == *from && mov.to == *to && promotes
            }
        })?;

        let mut path = pos.path.clone();
        path.push(mov.san.clone());
        Some(Applied {
            position: ScriptedPosition { path },
            san: mov.san.clone(),
        })
    }

    fn legal_moves(&self, pos: &ScriptedPosition) -> Vec<LegalMove> {
        match self.node_at(pos) {
            Some(node) => node
                .children
                .iter()
                .map(|(mov, _)| LegalMove {
                    san: mov.san.clone(),
                    from: mov.from,
                    to: mov.to,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    fn fen(&self, pos: &ScriptedPosition) -> String {
        // Not a real FEN, but deterministic and injective over scripted
        // positions, which is all the engines require of the encoding.
        if pos.path.is_empty() {
            "startpos".to_owned()
        } else {
            pos.path.join(" ")
        }
    }

    fn side_to_move(&self, pos: &ScriptedPosition) -> Color {
        if pos.path.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
