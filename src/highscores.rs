/*
highscores.rs

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

//! Manage high scores for the difficulty levels.
//!
//! Each difficulty level has its own [`Leaderboard`], which keeps the [`BOARD_SIZE`] best
//! scores sorted from the highest to the lowest.
//! See the [`crate::saver::highscores`] module that saves and restores the [`Leaderboard`]
//! objects.

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Number of entries per scoreboard (number of top scores to keep).
pub const BOARD_SIZE: usize = 10;

/// Object that represent a score.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Name that the player entered at the end of the game.
    pub player_name: String,

    /// Final score of the game.
    pub score: u32,

    /// Difficulty level of the game.
    pub difficulty: Difficulty,

    /// Completion timestamp, which is used to display the date and time in the scoreboard.
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    /// Create a [`ScoreRecord`] object timestamped now.
    pub fn new(player_name: &str, score: u32, difficulty: Difficulty) -> Self {
        Self {
            player_name: player_name.to_string(),
            score,
            difficulty,
            timestamp: Utc::now(),
        }
    }

    /// Return the completion date in the local time zone.
    pub fn formatted_date(&self) -> String {
        let dt: DateTime<Local> = DateTime::from(self.timestamp);
        format!("{}", dt.format("%c"))
    }
}

/// Sorted list of the top scores for a difficulty level.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    /// Difficulty level of the scores.
    pub difficulty: Difficulty,

    /// Sorted list of the top scores.
    /// The number of scores in this list is controlled by the [`BOARD_SIZE`] constant.
    pub top: Vec<ScoreRecord>,
}

impl Leaderboard {
    /// Create an empty [`Leaderboard`] object.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            top: Vec::with_capacity(BOARD_SIZE),
        }
    }

    /// Create a [`Leaderboard`] object from a list of scores in any order.
    ///
    /// The scores are sorted and the list is truncated to [`BOARD_SIZE`] entries.
    pub fn from_records(difficulty: Difficulty, mut records: Vec<ScoreRecord>) -> Self {
        // `sort_by` is stable: equal scores keep their relative order
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(BOARD_SIZE);
        Self {
            difficulty,
            top: records,
        }
    }

    /// Add a score to the scoreboard and return the position in the board, or None if the
    /// score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    /// A new score goes after the existing scores that are equal to it.
    pub fn add_score(&mut self, record: ScoreRecord) -> Option<usize> {
        let index: usize = self
            .top
            .iter()
            .position(|s| record.score > s.score)
            .unwrap_or(self.top.len());
        if index >= BOARD_SIZE {
            return None;
        }
        self.top.insert(index, record);
        self.top.truncate(BOARD_SIZE);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Section title in the scoreboard.
    pub fn title(&self) -> &'static str {
        self.difficulty.display_name()
    }
}

/// Selection of scoreboards to display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum LeaderboardFilter {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
}

impl LeaderboardFilter {
    /// Whether the scoreboard for the given level is selected.
    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            LeaderboardFilter::All => true,
            LeaderboardFilter::Easy => difficulty == Difficulty::Easy,
            LeaderboardFilter::Medium => difficulty == Difficulty::Medium,
            LeaderboardFilter::Hard => difficulty == Difficulty::Hard,
        }
    }
}

/// Return the scoreboards that the filter selects, in the order of the given list.
pub fn filter(boards: &[Leaderboard], selection: LeaderboardFilter) -> Vec<&Leaderboard> {
    boards
        .iter()
        .filter(|b| selection.matches(b.difficulty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u32) -> ScoreRecord {
        ScoreRecord::new(name, score, Difficulty::Hard)
    }

    fn scores(board: &Leaderboard) -> Vec<u32> {
        board.top.iter().map(|r| r.score).collect()
    }

    #[test]
    fn scores_are_kept_sorted() {
        let mut board = Leaderboard::new(Difficulty::Hard);
        assert_eq!(board.add_score(record("a", 5)), Some(1));
        assert_eq!(board.add_score(record("b", 9)), Some(1));
        assert_eq!(board.add_score(record("c", 7)), Some(2));
        assert_eq!(scores(&board), [9, 7, 5]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut board = Leaderboard::new(Difficulty::Hard);
        board.add_score(record("first", 4));
        board.add_score(record("second", 4));
        assert_eq!(board.add_score(record("third", 4)), Some(3));
        let names: Vec<&str> = board.top.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn board_keeps_the_top_ten() {
        let mut board = Leaderboard::new(Difficulty::Hard);
        for score in [3, 14, 1, 15, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9] {
            board.add_score(record("p", score));
        }
        assert_eq!(board.top.len(), BOARD_SIZE);
        assert_eq!(scores(&board), [15, 14, 9, 9, 9, 8, 7, 6, 5, 5]);
    }

    #[test]
    fn new_score_evicts_the_last_place() {
        let mut board = Leaderboard::new(Difficulty::Hard);
        for score in (10..=50).rev().step_by(4) {
            board.add_score(record("p", score));
        }
        assert_eq!(scores(&board), [50, 46, 42, 38, 34, 30, 26, 22, 18, 14]);
        assert_eq!(board.add_score(record("new", 30)), Some(7));
        assert_eq!(board.top.len(), BOARD_SIZE);
        assert_eq!(scores(&board), [50, 46, 42, 38, 34, 30, 30, 26, 22, 18]);
    }

    #[test]
    fn low_score_does_not_make_a_full_board() {
        let mut board = Leaderboard::new(Difficulty::Hard);
        for _ in 0..BOARD_SIZE {
            board.add_score(record("p", 10));
        }
        assert_eq!(board.add_score(record("late", 10)), None);
        assert_eq!(board.add_score(record("low", 1)), None);
        assert!(board.top.iter().all(|r| r.player_name == "p"));
    }

    #[test]
    fn from_records_sorts_and_truncates() {
        let records: Vec<ScoreRecord> = (0..12).map(|s| record(&format!("p{s}"), s % 5)).collect();
        let board = Leaderboard::from_records(Difficulty::Hard, records);
        assert_eq!(scores(&board), [4, 4, 3, 3, 2, 2, 1, 1, 1, 0]);
        assert_eq!(board.top[0].player_name, "p4");
        assert_eq!(board.top[1].player_name, "p9");
    }

    #[test]
    fn filter_selects_boards() {
        let boards: Vec<Leaderboard> = Difficulty::ALL.into_iter().map(Leaderboard::new).collect();
        let all = filter(&boards, LeaderboardFilter::All);
        let titles: Vec<&str> = all.iter().map(|b| b.title()).collect();
        assert_eq!(titles, ["Easy", "Medium", "Hard"]);

        let medium = filter(&boards, LeaderboardFilter::Medium);
        assert_eq!(medium.len(), 1);
        assert_eq!(medium[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn record_json_field_names() {
        let json = serde_json::to_value(record("Ann", 12)).unwrap();
        assert_eq!(json["playerName"], "Ann");
        assert_eq!(json["score"], 12);
        assert_eq!(json["difficulty"], "hard");
        assert!(json["timestamp"].is_string());
    }
}
