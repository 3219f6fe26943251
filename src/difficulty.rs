/*
difficulty.rs

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

//! Difficulty levels and their gameplay constants.
//!
//! Every level defines the range of the operands, the time the player gets for a game, the number
//! of points each correct answer earns, and the key under which the scoreboard is stored.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use strum_macros::FromRepr;

/// Game difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Difficulty {
    /// All the levels, from the easiest to the hardest.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Range of the operands.
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Difficulty::Easy => 0..=9,
            Difficulty::Medium => 10..=99,
            Difficulty::Hard => 100..=999,
        }
    }

    /// Number of points for each correct answer.
    pub fn weight(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Length of the countdown, in seconds.
    pub fn time_budget(self) -> u32 {
        match self {
            Difficulty::Easy => 30,
            Difficulty::Medium => 45,
            Difficulty::Hard => 60,
        }
    }

    /// Key of the scoreboard bucket for the level.
    pub fn storage_key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easyUserScore",
            Difficulty::Medium => "mediumUserScore",
            Difficulty::Hard => "hardUserScore",
        }
    }

    /// Label shown to the player.
    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
        assert_eq!(Difficulty::from_repr(2), Some(Difficulty::Hard));
    }

    #[test]
    fn ranges_grow_and_do_not_overlap() {
        for pair in Difficulty::ALL.windows(2) {
            let (low, high) = (pair[0].range(), pair[1].range());
            assert!(low.end() < high.start());
            assert!(low.end() - low.start() < high.end() - high.start());
        }
    }

    #[test]
    fn easy_constants() {
        let d = Difficulty::Easy;
        assert_eq!(d.range(), 0..=9);
        assert_eq!(d.weight(), 1);
        assert_eq!(d.time_budget(), 30);
        assert_eq!(d.storage_key(), "easyUserScore");
        assert_eq!(d.to_string(), "Easy");
    }

    #[test]
    fn storage_keys_are_distinct() {
        let keys: Vec<&str> = Difficulty::ALL.iter().map(|d| d.storage_key()).collect();
        assert_eq!(keys, ["easyUserScore", "mediumUserScore", "hardUserScore"]);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
