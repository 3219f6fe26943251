/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! List the difficulty levels:
//!
//! ```
//! $ math-buster --ls
//! Easy     0..=9      30s  1 point
//! Medium   10..=99    45s  2 points
//! Hard     100..=999  60s  3 points
//! ```
//!
//! Play at the medium level:
//!
//! ```
//! $ math-buster -f medium
//! ```
//!
//! Print the scoreboard of the hard level:
//!
//! ```
//! $ math-buster --scores hard
//! ```

use clap::Parser;
use env_logger::Env;
use log::{LevelFilter, debug, warn};
use std::path::PathBuf;

use crate::difficulty::Difficulty;
use crate::highscores::LeaderboardFilter;

/// Directory name under the user data directory.
const APP_DIR: &str = "math-buster";

/// Timed arithmetic quiz.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// List the difficulty levels
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Difficulty level. The level is asked when this option is not provided
    #[arg(value_enum, short = 'f', long)]
    difficulty: Option<Difficulty>,

    /// Print the scoreboards and exit
    #[arg(value_enum, short, long, num_args = 0..=1, default_missing_value = "all")]
    scores: Option<LeaderboardFilter>,

    /// Directory where the scoreboards are saved
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Keep the scores in memory only
    #[arg(long, default_value_t = false, conflicts_with = "data_dir")]
    memory: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// What the program must do.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Play a game. The level is asked if None.
    Play(Option<Difficulty>),

    /// Print the selected scoreboards.
    Scores(LeaderboardFilter),
}

/// Options for the terminal front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub mode: Mode,

    /// Directory for the scoreboards, or None to keep them in memory.
    pub data_dir: Option<PathBuf>,
}

/// Return the directory for the scoreboards, or None to keep them in memory.
///
/// The `--data-dir` option overrides the default directory, which is `math-buster` under
/// `user_data_dir`, the data directory of the platform. When the platform has no such
/// directory, the scoreboards are kept in memory.
fn resolve_data_dir(
    data_dir: Option<PathBuf>,
    memory: bool,
    user_data_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if memory {
        return None;
    }
    if data_dir.is_some() {
        return data_dir;
    }
    match user_data_dir {
        Some(dir) => Some(dir.join(APP_DIR)),
        None => {
            warn!("No user data directory, the scores are not saved");
            None
        }
    }
}

/// Print the difficulty levels and their parameters.
fn list_levels() {
    for d in Difficulty::ALL {
        let range = d.range();
        let weight: u32 = d.weight();
        println!(
            "{:<8} {:<10} {:>2}s  {} point{}",
            d.display_name(),
            format!("{}..={}", range.start(), range.end()),
            d.time_budget(),
            weight,
            if weight > 1 { "s" } else { "" }
        );
    }
}

/// Parse and process command-line options.
///
/// Return None when there is nothing more to do.
pub fn parse() -> Option<Options> {
    let args: Args = Args::parse();

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if args.ls {
        list_levels();
        return None;
    }

    let data_dir: Option<PathBuf> =
        resolve_data_dir(args.data_dir, args.memory, dirs::data_dir());
    debug!("Scoreboard directory: {data_dir:?}");

    let mode: Mode = match args.scores {
        Some(filter) => Mode::Scores(filter),
        None => Mode::Play(args.difficulty),
    };
    Some(Options { mode, data_dir })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn scores_without_value_selects_all() {
        let args = Args::try_parse_from(["math-buster", "--scores"]).unwrap();
        assert_eq!(args.scores, Some(LeaderboardFilter::All));
        let args = Args::try_parse_from(["math-buster", "-s", "hard"]).unwrap();
        assert_eq!(args.scores, Some(LeaderboardFilter::Hard));
    }

    #[test]
    fn difficulty_option() {
        let args = Args::try_parse_from(["math-buster", "-f", "medium"]).unwrap();
        assert_eq!(args.difficulty, Some(Difficulty::Medium));
        assert!(Args::try_parse_from(["math-buster", "-f", "extreme"]).is_err());
    }

    #[test]
    fn memory_conflicts_with_data_dir() {
        assert!(Args::try_parse_from(["math-buster", "--memory", "--data-dir", "/tmp"]).is_err());
    }

    #[test]
    fn data_dir_option_overrides_the_default() {
        let args = Args::try_parse_from(["math-buster", "--data-dir", "/srv/scores"]).unwrap();
        assert_eq!(
            resolve_data_dir(args.data_dir, args.memory, Some(PathBuf::from("/home/ann/data"))),
            Some(PathBuf::from("/srv/scores"))
        );
    }

    #[test]
    fn default_data_dir_is_under_the_user_data_dir() {
        assert_eq!(
            resolve_data_dir(None, false, Some(PathBuf::from("/home/ann/data"))),
            Some(PathBuf::from("/home/ann/data/math-buster"))
        );
        assert_eq!(resolve_data_dir(None, false, None), None);
    }

    #[test]
    fn memory_option_disables_the_data_dir() {
        let args = Args::try_parse_from(["math-buster", "--memory"]).unwrap();
        assert_eq!(
            resolve_data_dir(args.data_dir, args.memory, Some(PathBuf::from("/home/ann/data"))),
            None
        );
    }
}
