/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! A [`Game`] goes through three states:
//!
//! * [`GameState::Idle`]: the game is created but the countdown is not running.
//! * [`GameState::Playing`]: the countdown is running and the player submits answers.
//! * [`GameState::Finished`]: the countdown reached zero. Only the final score can be read.
//!
//! The [`Game`] object does not own a timer. The [`crate::controller`] module calls
//! [`Game::tick`] every second.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::fmt;

use crate::difficulty::Difficulty;
use crate::generator::{self, Problem};

/// Life cycle of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Playing,
    Finished,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameState::Idle => write!(f, "idle"),
            GameState::Playing => write!(f, "playing"),
            GameState::Finished => write!(f, "finished"),
        }
    }
}

/// Operations that depend on the state of the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    SubmitAnswer,
    Tick,
    Finish,
    SaveScore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Start => write!(f, "start"),
            Action::SubmitAnswer => write!(f, "submit an answer"),
            Action::Tick => write!(f, "tick"),
            Action::Finish => write!(f, "finish"),
            Action::SaveScore => write!(f, "save the score"),
        }
    }
}

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The operation is not allowed in the current state.
    InvalidTransition { state: GameState, action: Action },

    /// The score cannot be saved without a player name.
    EmptyPlayerName,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::InvalidTransition { state, action } => {
                write!(f, "cannot {action} while the game is {state}")
            }
            GameError::EmptyPlayerName => write!(f, "the player name is empty"),
        }
    }
}

impl Error for GameError {}

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct Game {
    /// Sum of the points earned so far.
    score: u32,

    /// Seconds left before the end of the game.
    remaining_time: u32,

    /// Difficulty level, which does not change during the game.
    difficulty: Difficulty,

    /// Problem that the player has to solve.
    problem: Problem,

    /// Current state.
    state: GameState,

    /// Random number generator for the problems.
    rng: StdRng,
}

impl Game {
    /// Create a [`Game`] object in the [`GameState::Idle`] state.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_os_rng())
    }

    /// Create a [`Game`] object that draws its problems from the given generator.
    pub fn with_rng(difficulty: Difficulty, mut rng: StdRng) -> Self {
        let problem: Problem = generator::generate(difficulty, &mut rng);
        Self {
            score: 0,
            remaining_time: difficulty.time_budget(),
            difficulty,
            problem,
            state: GameState::Idle,
            rng,
        }
    }

    fn invalid(&self, action: Action) -> GameError {
        GameError::InvalidTransition {
            state: self.state,
            action,
        }
    }

    /// Start the game.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Idle {
            return Err(self.invalid(Action::Start));
        }
        self.state = GameState::Playing;
        debug!("Game started ({})", self.difficulty);
        Ok(())
    }

    /// Verify the player's answer and move to the next problem.
    ///
    /// Return whether the answer is correct.
    /// The answer must be exactly equal to the expected result: there is no tolerance.
    pub fn submit_answer(&mut self, value: f64) -> Result<bool, GameError> {
        if self.state != GameState::Playing {
            return Err(self.invalid(Action::SubmitAnswer));
        }
        let correct: bool = value == self.problem.expected_result;
        if correct {
            self.score += self.difficulty.weight();
        }
        debug!(
            "Answer {value} for {} {}: score = {}",
            self.problem,
            if correct { "correct" } else { "wrong" },
            self.score
        );
        self.problem = generator::generate(self.difficulty, &mut self.rng);
        Ok(correct)
    }

    /// Remove one second from the countdown.
    ///
    /// Return whether that tick ended the game.
    pub fn tick(&mut self) -> Result<bool, GameError> {
        if self.state != GameState::Playing {
            return Err(self.invalid(Action::Tick));
        }
        self.remaining_time = self.remaining_time.saturating_sub(1);
        if self.remaining_time == 0 {
            return self.finish();
        }
        Ok(false)
    }

    /// End the game.
    ///
    /// Return whether the game was still in progress. Finishing a finished game has no effect.
    pub fn finish(&mut self) -> Result<bool, GameError> {
        match self.state {
            GameState::Idle => Err(self.invalid(Action::Finish)),
            GameState::Playing => {
                self.state = GameState::Finished;
                debug!("Game over: score = {}", self.score);
                Ok(true)
            }
            GameState::Finished => Ok(false),
        }
    }

    /// Throw away the current game and start a new one at the given level.
    pub fn restart(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.score = 0;
        self.remaining_time = difficulty.time_budget();
        self.problem = generator::generate(difficulty, &mut self.rng);
        self.state = GameState::Playing;
        debug!("Game restarted ({difficulty})");
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Return the problem to solve, or None when the game is over.
    pub fn problem(&self) -> Option<&Problem> {
        match self.state {
            GameState::Finished => None,
            _ => Some(&self.problem),
        }
    }

    /// Return the text of the problem to solve, or None when the game is over.
    pub fn problem_text(&self) -> Option<String> {
        self.problem().map(Problem::text)
    }

    /// Length of the countdown for the level, in seconds.
    pub fn total_time(&self) -> u32 {
        self.difficulty.time_budget()
    }

    /// Elapsed fraction of the countdown, between 0.0 and 1.0.
    pub fn progress(&self) -> f32 {
        let total: u32 = self.total_time();
        (total - self.remaining_time) as f32 / total as f32
    }

    #[cfg(test)]
    pub(crate) fn set_problem(&mut self, problem: Problem) {
        self.problem = problem;
    }
}
