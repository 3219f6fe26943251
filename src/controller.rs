/*
controller.rs

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

//! Drive a game session.
//!
//! The [`SessionController`] owns the [`Game`] and its countdown [`Clock`].
//! The front-end calls the controller for every player action and every clock tick, always from
//! the same loop, and renders the [`GameEvent`] notifications that the controller sends.
//!
//! At most one timer is running per controller. Starting, restarting, or stopping the session
//! cancels the previous timer, and the ticks that the cancelled timer may still deliver are
//! ignored.

use log::debug;
use std::sync::Arc;

use crate::clock::Clock;
use crate::difficulty::Difficulty;
use crate::game::{Action, Game, GameError, GameState};
use crate::highscores::ScoreRecord;
use crate::saver::highscores::{ScoreStore, StoreOutcome};

/// Notifications for the front-end.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StateChanged(GameState),
    ScoreChanged(u32),
    TimeChanged(u32),

    /// Text of the new problem, or None when the game is over.
    ProblemChanged(Option<String>),

    /// Final score.
    GameOver(u32),
}

/// Object that runs a game session.
pub struct SessionController {
    game: Game,
    clock: Box<dyn Clock>,
    events: async_channel::Sender<GameEvent>,
    store: Arc<ScoreStore>,

    /// Generation of the current timer. Incremented each time the timer is scheduled or
    /// cancelled.
    generation: u64,

    /// Whether the timer is running.
    timer_active: bool,
}

impl SessionController {
    /// Create a [`SessionController`] object for a new game at the given level.
    ///
    /// The game does not start before [`SessionController::start`] is called.
    pub fn new(
        difficulty: Difficulty,
        store: Arc<ScoreStore>,
        events: async_channel::Sender<GameEvent>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self::with_game(Game::new(difficulty), store, events, clock)
    }

    /// Create a [`SessionController`] object for the provided [`Game`] object.
    pub fn with_game(
        game: Game,
        store: Arc<ScoreStore>,
        events: async_channel::Sender<GameEvent>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            game,
            clock,
            events,
            store,
            generation: 0,
            timer_active: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Generation of the running timer, or None if no timer is running.
    pub fn timer_generation(&self) -> Option<u64> {
        self.timer_active.then_some(self.generation)
    }

    fn emit(&self, event: GameEvent) {
        if let Err(e) = self.events.try_send(event) {
            debug!("Notification dropped: {e}");
        }
    }

    fn notify_all(&self) {
        self.emit(GameEvent::StateChanged(self.game.state()));
        self.emit(GameEvent::ScoreChanged(self.game.score()));
        self.emit(GameEvent::TimeChanged(self.game.remaining_time()));
        self.emit(GameEvent::ProblemChanged(self.game.problem_text()));
    }

    fn schedule_timer(&mut self) {
        self.cancel_timer();
        self.generation += 1;
        self.timer_active = true;
        self.clock.schedule(self.generation);
    }

    fn cancel_timer(&mut self) {
        if self.timer_active {
            self.clock.cancel();
            self.timer_active = false;
            self.generation += 1;
        }
    }

    /// Start the game and its countdown.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.game.start()?;
        self.schedule_timer();
        self.notify_all();
        Ok(())
    }

    /// Submit the player's answer. Return whether the answer is correct.
    pub fn submit_answer(&mut self, value: f64) -> Result<bool, GameError> {
        let correct: bool = self.game.submit_answer(value)?;
        if correct {
            self.emit(GameEvent::ScoreChanged(self.game.score()));
        }
        self.emit(GameEvent::ProblemChanged(self.game.problem_text()));
        Ok(correct)
    }

    /// Process a tick from the clock.
    ///
    /// Return whether the tick was applied. Ticks from a cancelled timer are ignored.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if self.timer_generation() != Some(generation) {
            debug!("Ignoring tick from timer {generation}");
            return false;
        }
        match self.game.tick() {
            Ok(finished) => {
                self.emit(GameEvent::TimeChanged(self.game.remaining_time()));
                if finished {
                    self.game_over();
                }
                true
            }
            Err(e) => {
                debug!("Ignoring tick: {e}");
                self.cancel_timer();
                false
            }
        }
    }

    fn game_over(&mut self) {
        self.cancel_timer();
        self.emit(GameEvent::StateChanged(self.game.state()));
        self.emit(GameEvent::ProblemChanged(None));
        self.emit(GameEvent::GameOver(self.game.score()));
    }

    /// Throw away the current game and start a new one.
    pub fn restart(&mut self, difficulty: Difficulty) {
        self.cancel_timer();
        self.game.restart(difficulty);
        self.schedule_timer();
        self.notify_all();
    }

    /// Stop the countdown, for example when the game is not visible anymore.
    pub fn stop(&mut self) {
        self.cancel_timer();
    }

    /// Restart the countdown after [`SessionController::stop`].
    ///
    /// Return whether the countdown is running again. Nothing happens if the game is not in
    /// progress or if the countdown is already running.
    pub fn resume(&mut self) -> bool {
        if self.game.state() != GameState::Playing {
            return false;
        }
        if !self.timer_active {
            self.schedule_timer();
        }
        true
    }

    /// Save the final score under the given player name.
    pub fn save_score(&self, player_name: &str) -> Result<StoreOutcome, GameError> {
        if self.game.state() != GameState::Finished {
            return Err(GameError::InvalidTransition {
                state: self.game.state(),
                action: Action::SaveScore,
            });
        }
        let name: &str = player_name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        let difficulty: Difficulty = self.game.difficulty();
        let record: ScoreRecord = ScoreRecord::new(name, self.game.score(), difficulty);
        Ok(self.store.append(difficulty, record))
    }

    /// Read the scoreboard of the current level.
    pub fn scoreboard(&self) -> StoreOutcome {
        self.store.load(self.game.difficulty())
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Operator, Problem};
    use crate::saver::storage::MemoryStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Call {
        Schedule(u64),
        Cancel,
    }

    /// Clock that only records the calls. The tests deliver the ticks themselves.
    struct ManualClock(Rc<RefCell<Vec<Call>>>);

    impl Clock for ManualClock {
        fn schedule(&mut self, generation: u64) {
            self.0.borrow_mut().push(Call::Schedule(generation));
        }

        fn cancel(&mut self) {
            self.0.borrow_mut().push(Call::Cancel);
        }
    }

    struct Fixture {
        controller: SessionController,
        events: async_channel::Receiver<GameEvent>,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl Fixture {
        fn new(difficulty: Difficulty) -> Self {
            let (sender, events) = async_channel::unbounded();
            let calls: Rc<RefCell<Vec<Call>>> = Rc::default();
            let store = Arc::new(ScoreStore::new(Box::new(MemoryStorage::new())));
            let game = Game::with_rng(difficulty, StdRng::seed_from_u64(11));
            let controller = SessionController::with_game(
                game,
                store,
                sender,
                Box::new(ManualClock(Rc::clone(&calls))),
            );
            Self {
                controller,
                events,
                calls,
            }
        }

        fn drain(&self) -> Vec<GameEvent> {
            std::iter::from_fn(|| self.events.try_recv().ok()).collect()
        }

        fn tick(&mut self) -> bool {
            let generation = self.controller.timer_generation().unwrap_or(0);
            self.controller.on_tick(generation)
        }

        fn answer(&self) -> f64 {
            self.controller.game().problem().unwrap().expected_result
        }
    }

    #[test]
    fn start_schedules_and_notifies() {
        let mut f = Fixture::new(Difficulty::Easy);
        f.controller.start().unwrap();
        assert_eq!(*f.calls.borrow(), [Call::Schedule(1)]);
        let problem = f.controller.game().problem_text();
        assert_eq!(
            f.drain(),
            [
                GameEvent::StateChanged(GameState::Playing),
                GameEvent::ScoreChanged(0),
                GameEvent::TimeChanged(30),
                GameEvent::ProblemChanged(problem),
            ]
        );
        assert!(f.controller.start().is_err());
        assert_eq!(f.calls.borrow().len(), 1);
    }

    #[test]
    fn submission_notifies_score_only_when_correct() {
        let mut f = Fixture::new(Difficulty::Medium);
        f.controller.start().unwrap();
        f.drain();

        let value = f.answer();
        assert_eq!(f.controller.submit_answer(value), Ok(true));
        let events = f.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::ScoreChanged(2));
        assert!(matches!(events[1], GameEvent::ProblemChanged(Some(_))));

        let value = f.answer() + 1.0;
        assert_eq!(f.controller.submit_answer(value), Ok(false));
        let events = f.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::ProblemChanged(Some(_))));
    }

    #[test]
    fn submission_before_start_is_rejected() {
        let mut f = Fixture::new(Difficulty::Easy);
        assert!(f.controller.submit_answer(1.0).is_err());
        assert!(f.drain().is_empty());
    }

    #[test]
    fn easy_game_from_start_to_game_over() {
        let mut f = Fixture::new(Difficulty::Easy);
        f.controller.start().unwrap();
        f.controller
            .game
            .set_problem(Problem::new(7, Operator::Subtract, 3));
        assert_eq!(f.controller.submit_answer(4.0), Ok(true));
        assert_eq!(f.controller.game().score(), 1);
        f.drain();

        for _ in 0..30 {
            assert!(f.tick());
        }
        let events = f.drain();
        assert_eq!(events[0], GameEvent::TimeChanged(29));
        assert_eq!(
            events[events.len() - 4..],
            [
                GameEvent::TimeChanged(0),
                GameEvent::StateChanged(GameState::Finished),
                GameEvent::ProblemChanged(None),
                GameEvent::GameOver(1),
            ]
        );
        assert_eq!(f.controller.timer_generation(), None);

        // The cancelled timer may still deliver a tick
        assert!(!f.controller.on_tick(1));
        assert!(!f.tick());
        assert!(f.drain().is_empty());
        assert_eq!(f.controller.game().remaining_time(), 0);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut f = Fixture::new(Difficulty::Hard);
        f.controller.start().unwrap();
        assert!(!f.controller.on_tick(99));
        assert_eq!(f.controller.game().remaining_time(), 60);
        assert!(f.controller.on_tick(1));
        assert_eq!(f.controller.game().remaining_time(), 59);
    }

    #[test]
    fn restart_replaces_the_timer() {
        let mut f = Fixture::new(Difficulty::Easy);
        f.controller.start().unwrap();
        f.tick();
        let value = f.answer();
        f.controller.submit_answer(value).unwrap();
        f.drain();

        f.controller.restart(Difficulty::Hard);
        assert_eq!(
            *f.calls.borrow(),
            [Call::Schedule(1), Call::Cancel, Call::Schedule(3)]
        );
        assert!(!f.controller.on_tick(1));
        let game = f.controller.game();
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.score(), 0);
        assert_eq!(game.remaining_time(), 60);
        let events = f.drain();
        assert_eq!(events[0], GameEvent::StateChanged(GameState::Playing));
        assert_eq!(events[2], GameEvent::TimeChanged(60));
    }

    #[test]
    fn restart_after_game_over() {
        let mut f = Fixture::new(Difficulty::Easy);
        f.controller.start().unwrap();
        while f.tick() {}
        assert_eq!(f.controller.game().state(), GameState::Finished);
        f.controller.restart(Difficulty::Easy);
        assert_eq!(f.controller.game().state(), GameState::Playing);
        assert!(f.tick());
    }

    #[test]
    fn stop_and_resume() {
        let mut f = Fixture::new(Difficulty::Easy);
        f.controller.start().unwrap();
        f.controller.stop();
        assert_eq!(f.controller.timer_generation(), None);
        assert!(!f.controller.on_tick(1));
        assert!(f.controller.resume());
        assert_eq!(f.controller.timer_generation(), Some(3));
        assert!(f.controller.resume());
        assert_eq!(
            *f.calls.borrow(),
            [Call::Schedule(1), Call::Cancel, Call::Schedule(3)]
        );
    }

    #[test]
    fn drop_cancels_the_timer() {
        let f = Fixture::new(Difficulty::Easy);
        let calls = Rc::clone(&f.calls);
        let mut controller = f.controller;
        controller.start().unwrap();
        drop(controller);
        assert_eq!(*calls.borrow(), [Call::Schedule(1), Call::Cancel]);
    }

    #[test]
    fn save_score_after_game_over() {
        let mut f = Fixture::new(Difficulty::Medium);
        assert!(f.controller.save_score("Ann").is_err());
        f.controller.start().unwrap();
        let value = f.answer();
        f.controller.submit_answer(value).unwrap();
        while f.tick() {}

        assert_eq!(
            f.controller.save_score("   ").unwrap_err(),
            GameError::EmptyPlayerName
        );
        let outcome = f.controller.save_score(" Ann ").unwrap();
        assert_eq!(outcome.rank, Some(1));
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.bucket.top[0].player_name, "Ann");
        assert_eq!(outcome.bucket.top[0].score, 2);
        assert_eq!(outcome.bucket.top[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn closed_receiver_does_not_break_the_game() {
        let mut f = Fixture::new(Difficulty::Easy);
        f.events.close();
        f.controller.start().unwrap();
        assert!(f.tick());
    }
}
