/*
saver.rs

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

//! Save and restore the scoreboards.
//!
//! [`storage::Storage`] is a small key-value interface. Math Buster stores one value per
//! difficulty level, under the key that [`crate::difficulty::Difficulty::storage_key`] returns.
//! [`highscores::ScoreStore`] reads and writes the [`crate::highscores::Leaderboard`] objects
//! through that interface.

pub mod highscores;
pub mod storage;
