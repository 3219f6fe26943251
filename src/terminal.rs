/*
terminal.rs

Copyright 2026 The Math Buster contributors

This file is part of Math Buster.

Math Buster is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Math Buster is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Math Buster. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Line-oriented terminal front-end.
//!
//! A background thread reads the standard input and the [`ThreadClock`] sends its ticks. Both go
//! through the same channel, and the main loop processes the messages one at a time, so that a
//! tick never happens in the middle of an answer submission.

use clap::ValueEnum;
use log::{debug, warn};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use crate::cli_options::{Mode, Options};
use crate::clock::ThreadClock;
use crate::controller::{GameEvent, SessionController};
use crate::difficulty::Difficulty;
use crate::game::{Game, GameState};
use crate::highscores::{self, Leaderboard, LeaderboardFilter};
use crate::player_input::{self, PlayerName};
use crate::saver::highscores::{ScoreStore, StoreOutcome};
use crate::saver::storage::{FileStorage, MemoryStorage, Storage};

/// Width of the countdown bar, in characters.
const BAR_WIDTH: usize = 20;

/// Messages for the main loop.
enum Input {
    Tick(u64),
    Line(String),
    Closed,
}

/// Run the front-end with the given options.
pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let storage: Box<dyn Storage> = match options.data_dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };
    let store: Arc<ScoreStore> = Arc::new(ScoreStore::new(storage));

    match options.mode {
        Mode::Scores(filter) => {
            print_scoreboards(&store, filter);
            Ok(())
        }
        Mode::Play(difficulty) => play(difficulty, store),
    }
}

/// Print the scoreboards that the filter selects.
fn print_scoreboards(store: &ScoreStore, filter: LeaderboardFilter) {
    let (boards, warnings) = store.load_all();
    for w in warnings {
        eprintln!("Warning: {w}");
    }
    for board in highscores::filter(&boards, filter) {
        print_board(board);
    }
}

fn print_board(board: &Leaderboard) {
    println!("{}", board.title());
    if board.is_empty() {
        println!("   No scores yet");
    }
    for (i, r) in board.top.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} {:>5}  {}",
            i + 1,
            r.player_name,
            r.score,
            r.formatted_date()
        );
    }
}

/// Read the standard input from a background thread.
fn spawn_reader(sender: async_channel::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(l) => {
                    if sender.send_blocking(Input::Line(l)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("Cannot read the standard input: {e}");
                    break;
                }
            }
        }
        let _ = sender.send_blocking(Input::Closed);
    });
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

/// Ask the player for a difficulty level. Return None if the input is closed.
fn ask_difficulty(receiver: &async_channel::Receiver<Input>) -> Option<Difficulty> {
    println!("Choose a level:");
    for (i, d) in Difficulty::ALL.iter().enumerate() {
        println!("  {}) {d}", i + 1);
    }
    loop {
        prompt("> ");
        match receiver.recv_blocking().ok()? {
            Input::Line(text) => {
                let choice: Option<Difficulty> = text
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(Difficulty::from_repr)
                    .or_else(|| Difficulty::from_str(text.trim(), true).ok());
                match choice {
                    Some(d) => return Some(d),
                    None => println!("Type 1, 2, or 3"),
                }
            }
            Input::Closed => return None,
            Input::Tick(_) => (),
        }
    }
}

/// Return the countdown bar for the game, such as `[#####---------------]`.
fn countdown_bar(game: &Game) -> String {
    let done: usize = ((game.progress() * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(done), "-".repeat(BAR_WIDTH - done))
}

/// Print a notification from the controller.
fn render(event: &GameEvent, game: &Game) {
    match event {
        GameEvent::StateChanged(GameState::Playing) => {
            println!("\n{} game: {}s, good luck!", game.difficulty(), game.total_time());
        }
        GameEvent::StateChanged(state) => debug!("Game is {state}"),
        GameEvent::ScoreChanged(score) => println!("Score: {score}"),
        GameEvent::TimeChanged(seconds) => {
            if seconds % 10 == 0 || *seconds <= 5 {
                println!("\n00:{seconds:02} {}", countdown_bar(game));
            }
        }
        GameEvent::ProblemChanged(Some(text)) => prompt(&format!("{text} ")),
        GameEvent::ProblemChanged(None) => (),
        GameEvent::GameOver(score) => {
            println!("\nGame is over! Your score: {score}");
            prompt("Enter your name to save your score (empty to skip): ");
        }
    }
}

fn report_save(outcome: &StoreOutcome) {
    for w in &outcome.warnings {
        eprintln!("Warning: {w}");
    }
    match outcome.rank {
        Some(rank) => println!("You are number {rank} on the scoreboard!"),
        None => println!("Your score did not make it to the scoreboard."),
    }
    print_board(&outcome.bucket);
}

/// Play games until the player quits.
fn play(difficulty: Option<Difficulty>, store: Arc<ScoreStore>) -> Result<(), Box<dyn Error>> {
    let (input_sender, input) = async_channel::unbounded::<Input>();
    spawn_reader(input_sender.clone());

    let difficulty: Difficulty = match difficulty {
        Some(d) => d,
        None => match ask_difficulty(&input) {
            Some(d) => d,
            None => return Ok(()),
        },
    };

    let (event_sender, events) = async_channel::unbounded::<GameEvent>();
    let clock: ThreadClock<Input> = ThreadClock::new(input_sender, Input::Tick);
    let mut controller: SessionController =
        SessionController::new(difficulty, store, event_sender, Box::new(clock));

    println!("Type your answer and press Enter.");
    println!("Commands: :r [level] restart, :p pause or resume, :s scoreboard, :q quit");
    controller.start()?;

    let mut paused: bool = false;
    let mut awaiting_name: bool = false;
    loop {
        while let Ok(event) = events.try_recv() {
            if matches!(event, GameEvent::GameOver(_)) {
                awaiting_name = true;
            }
            render(&event, controller.game());
        }

        let text: String = match input.recv_blocking() {
            Ok(Input::Tick(generation)) => {
                controller.on_tick(generation);
                continue;
            }
            Ok(Input::Line(text)) => text,
            Ok(Input::Closed) | Err(_) => break,
        };
        let text: &str = text.trim();

        if let Some(command) = text.strip_prefix(':') {
            let mut words = command.split_whitespace();
            match words.next() {
                Some("q") => break,
                Some("r") => {
                    let level: Difficulty = match words.next() {
                        Some(w) => match Difficulty::from_str(w, true) {
                            Ok(d) => d,
                            Err(_) => {
                                println!("Unknown level {w}");
                                continue;
                            }
                        },
                        None => controller.game().difficulty(),
                    };
                    paused = false;
                    awaiting_name = false;
                    controller.restart(level);
                }
                Some("p") => {
                    if paused {
                        paused = !controller.resume();
                        println!("Resumed");
                    } else if controller.game().state() == GameState::Playing {
                        controller.stop();
                        paused = true;
                        println!("Paused, type :p to resume");
                    }
                }
                Some("s") => {
                    let outcome: StoreOutcome = controller.scoreboard();
                    for w in &outcome.warnings {
                        eprintln!("Warning: {w}");
                    }
                    print_board(&outcome.bucket);
                }
                _ => println!("Unknown command {text}"),
            }
            continue;
        }

        if awaiting_name {
            match player_input::parse_player_name(text) {
                PlayerName::Given(name) => match controller.save_score(&name) {
                    Ok(outcome) => report_save(&outcome),
                    Err(e) => println!("Score not saved: {e}"),
                },
                PlayerName::Skipped => println!("Score not saved"),
                PlayerName::Number => {
                    println!("The game is over, {text} was not counted");
                    prompt("Enter your name to save your score (empty to skip): ");
                    continue;
                }
            }
            awaiting_name = false;
            println!("Type :r to play again or :q to quit");
            continue;
        }

        if paused {
            println!("Paused, type :p to resume");
            continue;
        }

        match player_input::parse_answer(text) {
            Ok(value) => {
                let expected: Option<f64> =
                    controller.game().problem().map(|p| p.expected_result);
                match controller.submit_answer(value) {
                    Ok(true) => println!("Correct!"),
                    Ok(false) => {
                        if let Some(v) = expected {
                            println!("Wrong, the answer was {v}");
                        }
                    }
                    Err(e) => {
                        debug!("Answer ignored: {e}");
                        println!("Type :r to play again or :q to quit");
                    }
                }
            }
            Err(e) => println!("{e}"),
        }
    }
    controller.stop();
    Ok(())
}
