// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::time::{Duration, Instant};

use repertoire::guided::{Event, SubmitError};
use repertoire::{
    Guided, MoveSpec, OpeningRecord, Rules, ScriptedMove, ScriptedRules, SideAssignment, Square,
    Verdict,
};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn mv(san: &str, from: &str, to: &str) -> ScriptedMove {
    ScriptedMove::new(san, sq(from), sq(to))
}

fn ruy_lopez() -> OpeningRecord {
    OpeningRecord {
        id: "ruy-lopez".to_owned(),
        name: "Ruy Lopez".to_owned(),
        eco: "C60".to_owned(),
        description: String::new(),
        moves: vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]
            .into_iter()
            .map(str::to_owned)
            .collect(),
    }
}

/// The reference line plus a legal-but-wrong branch at white's first and
/// third moves.
fn rules() -> ScriptedRules {
    ScriptedRules::new()
        .with_line(vec![
            mv("e4", "e2", "e4"),
            mv("e5", "e7", "e5"),
            mv("Nf3", "g1", "f3"),
            mv("Nc6", "b8", "c6"),
            mv("Bb5", "f1", "b5"),
        ])
        .with_line(vec![
            mv("e4", "e2", "e4"),
            mv("e5", "e7", "e5"),
            mv("Bc4", "f1", "c4"),
        ])
        .with_line(vec![
            mv("e4", "e2", "e4"),
            mv("e5", "e7", "e5"),
            mv("Nf3", "g1", "f3"),
            mv("Nc6", "b8", "c6"),
            mv("d4", "d2", "d4"),
        ])
        .with_line(vec![mv("d4", "d2", "d4")])
}

fn tick_due(guided: &mut Guided<ScriptedRules>) -> Option<Event> {
    let deadline = guided.next_deadline().expect("expected a pending task");
    guided.tick(deadline)
}

#[test]
fn exact_play_completes_at_line_end_and_never_before() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    assert_eq!(Ok(Verdict::Correct), guided.submit(&MoveSpec::san("e4"), now));
    assert_eq!(Some(Event::AutoPlayed("e5".to_owned())), tick_due(&mut guided));
    assert_eq!(Ok(Verdict::Correct), guided.submit(&MoveSpec::san("Nf3"), now));
    assert_eq!(Some(Event::AutoPlayed("Nc6".to_owned())), tick_due(&mut guided));

    assert!(!guided.is_complete());
    assert_eq!(80, guided.progress());

    assert_eq!(Ok(Verdict::Correct), guided.submit(&MoveSpec::san("Bb5"), now));
    assert!(guided.is_complete());
    assert_eq!(5, guided.current_index());
    assert_eq!(100, guided.progress());
    assert_eq!(None, guided.next_deadline());

    assert_eq!(
        Err(SubmitError::LineComplete),
        guided.submit(&MoveSpec::san("e4"), now)
    );
}

#[test]
fn incorrect_move_reverts_to_presubmission_state() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("e4"), now).unwrap();
    tick_due(&mut guided);
    let fen_before = guided.fen();
    assert_eq!(2, guided.history().len());

    // Bc4 is legal here but the line wants Nf3.
    assert_eq!(Ok(Verdict::Incorrect), guided.submit(&MoveSpec::san("Bc4"), now));
    assert_eq!(3, guided.history().len());
    assert_ne!(fen_before, guided.fen());
    assert!(!guided.frame(false).interactive);

    assert_eq!(Some(Event::Reverted), tick_due(&mut guided));
    assert_eq!(2, guided.history().len());
    assert_eq!(fen_before, guided.fen());

    // Same index is retryable.
    assert_eq!(Ok(Verdict::Correct), guided.submit(&MoveSpec::san("Nf3"), now));
}

#[test]
fn wrong_final_move_does_not_complete_the_line() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("e4"), now).unwrap();
    tick_due(&mut guided);
    guided.submit(&MoveSpec::san("Nf3"), now).unwrap();
    tick_due(&mut guided);

    // History reaches full length with an incorrect move on the board, but
    // that is not completion.
    assert_eq!(Ok(Verdict::Incorrect), guided.submit(&MoveSpec::san("d4"), now));
    assert_eq!(5, guided.current_index());
    assert!(!guided.is_complete());

    tick_due(&mut guided);
    assert!(!guided.is_complete());
    assert_eq!(4, guided.current_index());
}

#[test]
fn submissions_rejected_while_revert_is_pending() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("d4"), now).unwrap();
    assert_eq!(
        Err(SubmitError::RevertPending),
        guided.submit(&MoveSpec::san("e4"), now)
    );
    assert_eq!(1, guided.history().len());
}

#[test]
fn illegal_move_is_rejected_without_state_change() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);
    let fen_before = guided.fen();

    assert_eq!(
        Err(SubmitError::Illegal),
        guided.submit(&MoveSpec::san("h4"), now)
    );
    assert!(guided.history().is_empty());
    assert_eq!(fen_before, guided.fen());
    assert_eq!(None, guided.next_deadline());
}

#[test]
fn auto_reply_waits_for_its_delay() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("e4"), now).unwrap();
    let deadline = guided.next_deadline().unwrap();
    assert_eq!(None, guided.tick(deadline - Duration::from_millis(1)));
    assert_eq!(1, guided.history().len());
    assert!(guided.tick(deadline).is_some());
    assert_eq!(2, guided.history().len());
}

#[test]
fn black_assignment_auto_plays_the_first_move() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::Black, now);

    assert_eq!(
        Err(SubmitError::NotYourTurn),
        guided.submit(&MoveSpec::san("e4"), now)
    );
    assert_eq!(Some(Event::AutoPlayed("e4".to_owned())), tick_due(&mut guided));
    assert_eq!(Ok(Verdict::Correct), guided.submit(&MoveSpec::san("e5"), now));
}

#[test]
fn hint_points_at_the_expected_origin_square() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut white = Guided::new(rules(), &opening, SideAssignment::White, now);
    assert_eq!(Some(sq("e2")), white.hint());

    // Not the learner's turn while the auto-reply is pending.
    white.submit(&MoveSpec::san("e4"), now).unwrap();
    assert_eq!(None, white.hint());

    let black = Guided::new(rules(), &opening, SideAssignment::Black, now);
    assert_eq!(None, black.hint());
}

#[test]
fn both_sides_mode_has_no_auto_replies_and_always_hints() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::BothSides, now);

    assert_eq!(None, guided.next_deadline());
    assert_eq!(Some(sq("e2")), guided.hint());

    guided.submit(&MoveSpec::san("e4"), now).unwrap();
    assert_eq!(None, guided.next_deadline());
    assert_eq!(Some(sq("e7")), guided.hint());

    guided.submit(&MoveSpec::san("e5"), now).unwrap();
    guided.submit(&MoveSpec::san("Nf3"), now).unwrap();
    guided.submit(&MoveSpec::san("Nc6"), now).unwrap();
    guided.submit(&MoveSpec::san("Bb5"), now).unwrap();
    assert!(guided.is_complete());
}

#[test]
fn reset_discards_pending_revert() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("d4"), now).unwrap();
    let stale_deadline = guided.next_deadline().unwrap();
    guided.reset(now);

    // The revert scheduled before the reset must never fire.
    assert_eq!(None, guided.tick(stale_deadline + Duration::from_secs(1)));
    assert!(guided.history().is_empty());
    assert_eq!(Some(sq("e2")), guided.hint());
}

#[test]
fn reset_is_idempotent() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("e4"), now).unwrap();
    tick_due(&mut guided);

    guided.reset(now);
    let fen_once = guided.fen();
    let progress_once = guided.progress();

    guided.reset(now);
    assert_eq!(fen_once, guided.fen());
    assert_eq!(progress_once, guided.progress());
    assert!(guided.history().is_empty());
    assert_eq!(None, guided.next_deadline());
}

#[test]
fn history_replay_reproduces_the_engine_position() {
    let now = Instant::now();
    let opening = ruy_lopez();
    let mut guided = Guided::new(rules(), &opening, SideAssignment::White, now);

    guided.submit(&MoveSpec::san("e4"), now).unwrap();
    tick_due(&mut guided);
    guided.submit(&MoveSpec::san("Nf3"), now).unwrap();
    tick_due(&mut guided);

    let replayer = rules();
    let mut pos = replayer.initial();
    for san in guided.history() {
        pos = replayer
            .apply(&pos, &MoveSpec::San(san.clone()))
            .unwrap()
            .position;
    }

    assert_eq!(replayer.fen(&pos), guided.fen());
}
