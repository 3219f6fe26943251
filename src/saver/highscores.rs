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

//! Save and restore the scoreboards.
//!
//! The saved value for a difficulty level is the list of its [`ScoreRecord`] objects in JSON
//! format, serialized by using [`serde`].
//!
//! Storage errors never prevent the game from continuing. A scoreboard that cannot be read is
//! returned empty, and a scoreboard that cannot be written is still returned to the caller.
//! In both cases, the error is reported in [`StoreOutcome::warnings`].

use log::{debug, warn};
use std::error::Error;
use std::fmt;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::difficulty::Difficulty;
use crate::highscores::{Leaderboard, ScoreRecord};
use crate::saver::storage::Storage;

/// Type of errors.
#[derive(Debug)]
pub enum StoreError {
    /// The saved scoreboard is not valid JSON or does not contain score records.
    Decode(Difficulty, serde_json::Error),

    /// The scoreboard cannot be serialized.
    Encode(Difficulty, serde_json::Error),

    /// The storage cannot be read or written.
    Io(Difficulty, io::Error),

    /// The record is for another level than the scoreboard.
    WrongLevel {
        board: Difficulty,
        record: Difficulty,
    },

    /// The record has no player name.
    EmptyName(Difficulty),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Decode(d, e) => write!(f, "cannot read the {d} scoreboard: {e}"),
            StoreError::Encode(d, e) => write!(f, "cannot encode the {d} scoreboard: {e}"),
            StoreError::Io(d, e) => write!(f, "cannot access the {d} scoreboard: {e}"),
            StoreError::WrongLevel { board, record } => {
                write!(f, "a {record} score cannot go to the {board} scoreboard")
            }
            StoreError::EmptyName(d) => {
                write!(f, "the {d} scoreboard does not accept scores without a name")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Decode(_, e) | StoreError::Encode(_, e) => Some(e),
            StoreError::Io(_, e) => Some(e),
            StoreError::WrongLevel { .. } | StoreError::EmptyName(_) => None,
        }
    }
}

/// Result of a scoreboard operation.
#[derive(Debug)]
pub struct StoreOutcome {
    /// The scoreboard, as read or as updated.
    pub bucket: Leaderboard,

    /// Position of the added score (starting at 1), or None if the score did not make it to
    /// the board. Always None for [`ScoreStore::load`].
    pub rank: Option<usize>,

    /// Errors that occurred while accessing the storage, or the reason why
    /// [`ScoreStore::append`] rejected the record.
    pub warnings: Vec<StoreError>,
}

/// Object to save and restore the scoreboards.
pub struct ScoreStore {
    /// The lock serializes the read-update-write sequence of [`ScoreStore::append`].
    storage: Mutex<Box<dyn Storage>>,
}

impl ScoreStore {
    /// Create a [`ScoreStore`] object that uses the given storage.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Storage>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the scoreboard of the given level.
    fn read(storage: &dyn Storage, difficulty: Difficulty) -> Result<Leaderboard, StoreError> {
        let data: Option<Vec<u8>> = storage
            .read(difficulty.storage_key())
            .map_err(|e| StoreError::Io(difficulty, e))?;
        match data {
            Some(d) => {
                let records: Vec<ScoreRecord> =
                    serde_json::from_slice(&d).map_err(|e| StoreError::Decode(difficulty, e))?;
                Ok(Leaderboard::from_records(difficulty, records))
            }
            None => {
                debug!("No saved {difficulty} scoreboard");
                Ok(Leaderboard::new(difficulty))
            }
        }
    }

    /// Retrieve the scoreboard for the given level.
    ///
    /// An empty scoreboard is returned when nothing is saved yet or when the saved data cannot
    /// be read.
    pub fn load(&self, difficulty: Difficulty) -> StoreOutcome {
        let storage = self.lock();
        match Self::read(&**storage, difficulty) {
            Ok(bucket) => StoreOutcome {
                bucket,
                rank: None,
                warnings: Vec::new(),
            },
            Err(error) => {
                warn!("{error}");
                StoreOutcome {
                    bucket: Leaderboard::new(difficulty),
                    rank: None,
                    warnings: vec![error],
                }
            }
        }
    }

    /// Retrieve the scoreboards for all the levels, from the easiest to the hardest.
    pub fn load_all(&self) -> (Vec<Leaderboard>, Vec<StoreError>) {
        let mut boards: Vec<Leaderboard> = Vec::with_capacity(Difficulty::ALL.len());
        let mut warnings: Vec<StoreError> = Vec::new();
        for difficulty in Difficulty::ALL {
            let outcome: StoreOutcome = self.load(difficulty);
            boards.push(outcome.bucket);
            warnings.extend(outcome.warnings);
        }
        (boards, warnings)
    }

    /// Check that the record can go to the scoreboard of the given level.
    fn validate(difficulty: Difficulty, record: &ScoreRecord) -> Result<(), StoreError> {
        if record.difficulty != difficulty {
            return Err(StoreError::WrongLevel {
                board: difficulty,
                record: record.difficulty,
            });
        }
        if record.player_name.trim().is_empty() {
            return Err(StoreError::EmptyName(difficulty));
        }
        Ok(())
    }

    /// Add a score to the scoreboard of the given level and save the scoreboard.
    ///
    /// The updated scoreboard is returned even if it cannot be saved.
    /// A record for another level or without a player name is rejected: the scoreboard is
    /// returned unchanged, with a None rank and the reason in the warnings.
    pub fn append(&self, difficulty: Difficulty, record: ScoreRecord) -> StoreOutcome {
        if let Err(error) = Self::validate(difficulty, &record) {
            warn!("{error}");
            let mut outcome: StoreOutcome = self.load(difficulty);
            outcome.warnings.push(error);
            return outcome;
        }

        let mut storage = self.lock();
        let mut warnings: Vec<StoreError> = Vec::new();

        let mut bucket: Leaderboard = match Self::read(&**storage, difficulty) {
            Ok(b) => b,
            Err(error) => {
                // The unreadable data is replaced by the new scoreboard
                warn!("{error}");
                warnings.push(error);
                Leaderboard::new(difficulty)
            }
        };
        let rank: Option<usize> = bucket.add_score(record);
        debug!("New {difficulty} score at position {rank:?}");

        let result: Result<(), StoreError> = serde_json::to_vec(&bucket.top)
            .map_err(|e| StoreError::Encode(difficulty, e))
            .and_then(|data| {
                storage
                    .write(difficulty.storage_key(), &data)
                    .map_err(|e| StoreError::Io(difficulty, e))
            });
        if let Err(error) = result {
            warn!("{error}");
            warnings.push(error);
        }

        StoreOutcome {
            bucket,
            rank,
            warnings,
        }
    }
}
