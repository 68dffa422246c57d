// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `rules` module defines the contract between the trainer core and an
//! external chess rules engine. The core never reasons about legality,
//! check, or notation itself; it submits a [`MoveSpec`] to a [`Rules`]
//! implementation and works exclusively with the SAN string and opaque
//! position the implementation hands back.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A side of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// A piece kind, used to disambiguate promotions in coordinate move specs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The upper-case SAN letter for this piece kind.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Possible errors that can arise when parsing a string into a `Square`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SquareParseError {
    UnexpectedLength,
    InvalidFile,
    InvalidRank,
}

/// A board square, addressed by zero-based file and rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Square, SquareParseError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError::UnexpectedLength);
        }

        let file = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a',
            _ => return Err(SquareParseError::InvalidFile),
        };
        let rank = match bytes[1] {
            b @ b'1'..=b'8' => b - b'1',
            _ => return Err(SquareParseError::InvalidRank),
        };

        Ok(Square { file, rank })
    }
}

/// A move submitted to the rules engine: either a SAN string (reference
/// lines are stored this way) or a coordinate pair coming off a board
/// surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveSpec {
    San(String),
    Coords {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

impl MoveSpec {
    pub fn san(s: &str) -> MoveSpec {
        MoveSpec::San(s.to_owned())
    }

    pub fn coords(from: Square, to: Square) -> MoveSpec {
        MoveSpec::Coords {
            from,
            to,
            promotion: None,
        }
    }
}

/// A legal move reported by the rules engine for a given position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub san: String,
    pub from: Square,
    pub to: Square,
}

/// The result of successfully applying a move: the new position and the SAN
/// notation the rules engine derived for the move.
#[derive(Clone, Debug)]
pub struct Applied<P> {
    pub position: P,
    pub san: String,
}

/// Adapter over an external chess rules engine.
///
/// Implementations must be deterministic and must treat positions as
/// immutable values: `apply` either returns a brand-new position or `None`
/// for an illegal move, never mutating its input.
pub trait Rules {
    type Position: Clone;

    /// The standard starting position.
    fn initial(&self) -> Self::Position;

    /// Applies a move to a position, yielding the new position and the SAN
    /// for the move, or `None` if the move is illegal.
    fn apply(&self, pos: &Self::Position, spec: &MoveSpec) -> Option<Applied<Self::Position>>;

    /// All legal moves in the given position.
    fn legal_moves(&self, pos: &Self::Position) -> Vec<LegalMove>;

    /// FEN encoding of the given position.
    fn fen(&self, pos: &Self::Position) -> String;

    /// The side to move in the given position.
    fn side_to_move(&self, pos: &Self::Position) -> Color;
}

/// Transient feedback for the most recent move, rendered by the board
/// surface as a brief flash.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveFlag {
    Correct,
    Incorrect,
    Neutral,
}

/// What an engine exposes to the board rendering surface on each render
/// tick.
#[derive(Clone, Debug)]
pub struct BoardFrame {
    pub fen: String,
    pub interactive: bool,
    pub hint: Option<Square>,
    pub flag: MoveFlag,
}

#[cfg(test)]
mod tests {
    use super::{Color, Square, SquareParseError};

    #[test]
    fn square_parse_display_round_trip() {
        for name in &["a1", "e4", "h8", "c7"] {
            let sq: Square = name.parse().unwrap();
            assert_eq!(*name, sq.to_string());
        }
    }

    #[test]
    fn square_parse_rejects_garbage() {
        assert_eq!(Err(SquareParseError::UnexpectedLength), "e44".parse::<Square>());
        assert_eq!(Err(SquareParseError::InvalidFile), "i4".parse::<Square>());
        assert_eq!(Err(SquareParseError::InvalidRank), "e9".parse::<Square>());
    }

    #[test]
    fn color_toggle() {
        assert_eq!(Color::Black, Color::White.toggle());
        assert_eq!(Color::White, Color::Black.toggle());
    }
}
