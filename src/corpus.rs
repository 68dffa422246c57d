// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The opening corpus: a read-only, ordered list of named opening lines,
//! loaded once at startup and never mutated. The built-in corpus is
//! embedded in the binary; hosts can substitute their own list via
//! [`Corpus::from_records`].

use std::fmt::Write;

/// A single named opening line. `moves` is the canonical SAN sequence from
/// the starting position and is never empty.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OpeningRecord {
    pub id: String,
    pub name: String,
    pub eco: String,
    pub description: String,
    pub moves: Vec<String>,
}

impl OpeningRecord {
    /// Whether `history` is a prefix of this record's line. Length is
    /// checked before elementwise comparison.
    pub fn continues(&self, history: &[String]) -> bool {
        history.len() <= self.moves.len()
            && history.iter().zip(self.moves.iter()).all(|(a, b)| a == b)
    }

    /// This record's full line in numbered notation, e.g. `1. e4 e5 2. Nf3`.
    pub fn numbered_moves(&self) -> String {
        numbered(&self.moves)
    }
}

/// Renders a SAN sequence in numbered notation.
pub fn numbered(moves: &[String]) -> String {
    let mut out = String::new();
    for (i, mov) in moves.iter().enumerate() {
        if i % 2 == 0 {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{}. ", i / 2 + 1);
        } else {
            out.push(' ');
        }
        out.push_str(mov);
    }

    out
}

/// Possible errors that can arise when validating a list of opening
/// records. Payloads are indices into the offending list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CorpusError {
    NoRecords,
    EmptyLine(usize),
    DuplicateId(usize),
}

/// An immutable, ordered collection of opening records. Order is
/// significant: it is the tie-break for exact matches in open play.
#[derive(Clone, Debug, PartialEq)]
pub struct Corpus {
    records: Vec<OpeningRecord>,
}

#[derive(Deserialize)]
struct CorpusFile {
    openings: Vec<OpeningRecord>,
}

lazy_static! {
    static ref BUILTIN: Corpus = {
        let file: CorpusFile = serde_json::from_str(include_str!("../data/openings.json"))
            .expect("embedded opening corpus is not valid JSON");
        Corpus::from_records(file.openings).expect("embedded opening corpus failed validation")
    };
}

impl Corpus {
    /// Validates and wraps a list of records: the list must be non-empty,
    /// every line must be non-empty, and ids must be unique.
    pub fn from_records(records: Vec<OpeningRecord>) -> Result<Corpus, CorpusError> {
        if records.is_empty() {
            return Err(CorpusError::NoRecords);
        }

        for (i, record) in records.iter().enumerate() {
            if record.moves.is_empty() {
                return Err(CorpusError::EmptyLine(i));
            }

            if records[..i].iter().any(|other| other.id == record.id) {
                return Err(CorpusError::DuplicateId(i));
            }
        }

        Ok(Corpus { records })
    }

    /// The corpus embedded in the binary.
    pub fn builtin() -> &'static Corpus {
        &BUILTIN
    }

    pub fn records(&self) -> &[OpeningRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&OpeningRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{numbered, Corpus, CorpusError, OpeningRecord};

    fn record(id: &str, moves: &[&str]) -> OpeningRecord {
        OpeningRecord {
            id: id.to_owned(),
            name: id.to_owned(),
            eco: "A00".to_owned(),
            description: String::new(),
            moves: moves.iter().map(|&m| m.to_owned()).collect(),
        }
    }

    #[test]
    fn builtin_corpus_is_well_formed() {
        let corpus = Corpus::builtin();
        assert!(!corpus.is_empty());
        for record in corpus.records() {
            assert!(!record.moves.is_empty(), "{} has no moves", record.id);
            assert!(!record.eco.is_empty(), "{} has no ECO code", record.id);
        }
    }

    #[test]
    fn builtin_corpus_lookup_by_id() {
        let corpus = Corpus::builtin();
        let ruy = corpus.get("ruy-lopez").unwrap();
        assert_eq!("C60", ruy.eco);
        assert_eq!(None, corpus.get("nonexistent"));
    }

    #[test]
    fn validation_rejects_bad_input() {
        assert_eq!(Err(CorpusError::NoRecords), Corpus::from_records(vec![]));
        assert_eq!(
            Err(CorpusError::EmptyLine(1)),
            Corpus::from_records(vec![record("a", &["e4"]), record("b", &[])])
        );
        assert_eq!(
            Err(CorpusError::DuplicateId(1)),
            Corpus::from_records(vec![record("a", &["e4"]), record("a", &["d4"])])
        );
    }

    #[test]
    fn prefix_check() {
        let rec = record("a", &["e4", "e5", "Nf3"]);
        let sans = |moves: &[&str]| -> Vec<String> { moves.iter().map(|&m| m.to_owned()).collect() };

        assert!(rec.continues(&sans(&[])));
        assert!(rec.continues(&sans(&["e4", "e5"])));
        assert!(rec.continues(&sans(&["e4", "e5", "Nf3"])));
        assert!(!rec.continues(&sans(&["e4", "c5"])));
        assert!(!rec.continues(&sans(&["e4", "e5", "Nf3", "Nc6"])));
    }

    #[test]
    fn numbered_notation() {
        let rec = record("a", &["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!("1. e4 e5 2. Nf3 Nc6 3. Bb5", rec.numbered_moves());
        assert_eq!("", numbered(&[]));
        assert_eq!("1. e4", numbered(&["e4".to_owned()]));
    }
}
