// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::process;
use std::thread;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use rand::{thread_rng, Rng};

use repertoire::corpus::numbered;
use repertoire::{
    Classification, Corpus, Guided, MoveSpec, OpenPlay, Quiz, ScriptedRules, SideAssignment,
};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .subcommand(SubCommand::with_name("list").about("List the built-in opening corpus"))
        .subcommand(
            SubCommand::with_name("drill")
                .about("Auto-play a guided practice session for one opening")
                .arg(
                    Arg::with_name("ID")
                        .help("Opening id (see `list`)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("side")
                        .help("Side to drive: white, black, or both")
                        .long("--side")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("classify")
                .about("Classify a SAN move sequence against the corpus")
                .arg(
                    Arg::with_name("MOVES")
                        .help("SAN moves in order")
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("quiz").about("Play one identification quiz question"),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("drill") {
        run_drill(matches);
    }

    if let Some(matches) = matches.subcommand_matches("classify") {
        run_classify(matches);
    }

    if matches.subcommand_matches("quiz").is_some() {
        run_quiz();
    }

    run_list();
}

fn run_list() -> ! {
    for record in Corpus::builtin().records() {
        println!(
            "{:24} {}  {} ({} moves)",
            record.id,
            record.eco,
            record.name,
            record.moves.len()
        );
        println!("{:24} {}", "", record.numbered_moves());
    }

    process::exit(0);
}

fn run_drill(matches: &ArgMatches) -> ! {
    let corpus = Corpus::builtin();
    let id = matches.value_of("ID").unwrap();
    let opening = match corpus.get(id) {
        Some(opening) => opening,
        None => {
            println!("unknown opening id: {}", id);
            process::exit(1);
        }
    };

    let side = match matches.value_of("side").unwrap_or("white") {
        "white" => SideAssignment::White,
        "black" => SideAssignment::Black,
        "both" => SideAssignment::BothSides,
        other => {
            println!("unknown side: {}", other);
            process::exit(1);
        }
    };

    println!("{} ({}) as {:?}", opening.name, opening.eco, side);
    let rules = ScriptedRules::from_corpus(corpus);
    let mut guided = Guided::new(rules, opening, side, Instant::now());
    while !guided.is_complete() {
        let frame = guided.frame(false);
        if frame.interactive {
            // The drill drives the learner's side with the reference move.
            let expected = guided.expected_next().unwrap().to_owned();
            guided
                .submit(&MoveSpec::san(&expected), Instant::now())
                .unwrap();
            println!("  you    {:6} [{}%]", expected, guided.progress());
        } else if let Some(deadline) = guided.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }

            if let Some(event) = guided.tick(Instant::now()) {
                println!("  engine {:?} [{}%]", event, guided.progress());
            }
        } else {
            break;
        }
    }

    println!("line complete: {}", guided.opening().numbered_moves());
    process::exit(0);
}

fn run_classify(matches: &ArgMatches) -> ! {
    let corpus = Corpus::builtin();
    let moves: Vec<&str> = matches.values_of("MOVES").unwrap().collect();

    // Script the submitted line too, so the adapter can play it even when
    // it leaves the corpus.
    let rules = ScriptedRules::from_corpus(corpus).with_sans(&moves);
    let mut play = OpenPlay::new(rules, corpus);
    for mov in &moves {
        match play.submit(&MoveSpec::san(mov)) {
            Ok(_) => {}
            Err(err) => {
                println!("move {} rejected: {:?}", mov, err);
                process::exit(1);
            }
        }
    }

    let report = play.report();
    match report.classification {
        Classification::Matched => {
            let matched = report.matched.unwrap();
            println!("matched: {} ({})", matched.name, matched.eco);
        }
        Classification::OffBook => println!("off book: no opening matches this sequence"),
        Classification::InProgress => {
            for record in &report.exact {
                println!("exact:      {} ({})", record.name, record.eco);
            }
            for cont in &report.extendable {
                println!(
                    "extendable: {} ({}) next {} ({} to go)",
                    cont.record.name, cont.record.eco, cont.next_move, cont.remaining
                );
            }
        }
    }

    process::exit(0);
}

fn run_quiz() -> ! {
    let corpus = Corpus::builtin();
    let mut rng = thread_rng();
    let mut quiz = Quiz::new(ScriptedRules::from_corpus(corpus), corpus);
    quiz.next_question(&mut rng, Instant::now());

    println!("watch the line:");
    while quiz.is_animating() {
        match quiz.next_deadline() {
            Some(deadline) => {
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }

                quiz.tick(Instant::now());
            }
            None => break,
        }
    }

    println!("  {}", numbered(quiz.played_moves()));
    println!("which opening is this?");
    for (i, option) in quiz.options().iter().enumerate() {
        println!("  {}. {} ({})", i + 1, option.name, option.eco);
    }

    let pick = rng.gen_range(0, quiz.options().len());
    let correct = quiz.select(pick).unwrap();
    let answer = quiz.answer().unwrap();
    println!("guessed {}: {}", pick + 1, if correct { "correct" } else { "wrong" });
    println!("it was the {} ({})", answer.name, answer.eco);
    let stats = quiz.stats();
    println!(
        "score {}/{} streak {} accuracy {}%",
        stats.correct(),
        stats.total(),
        stats.streak(),
        stats.accuracy()
    );
    process::exit(0);
}
