/*
player_input.rs

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

//! Validate what the player types before it reaches the game.

use std::error::Error;
use std::fmt;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// Nothing was typed.
    Empty,

    /// The text is not a number.
    NotANumber(String),
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnswerError::Empty => write!(f, "the answer is empty"),
            AnswerError::NotANumber(text) => write!(f, "\"{text}\" is not a number"),
        }
    }
}

impl Error for AnswerError {}

/// Convert the text that the player typed into an answer.
///
/// A comma is accepted as the decimal separator. Infinite and NaN values are rejected.
pub fn parse_answer(text: &str) -> Result<f64, AnswerError> {
    let text: &str = text.trim();
    if text.is_empty() {
        return Err(AnswerError::Empty);
    }
    match text.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AnswerError::NotANumber(text.to_string())),
    }
}

/// What the player typed at the name prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerName {
    /// Nothing was typed: the score is not saved.
    Skipped,

    /// Name to save with the score.
    Given(String),

    /// A number, most likely an answer typed after the time ran out.
    Number,
}

/// Interpret the text that the player typed at the name prompt.
pub fn parse_player_name(text: &str) -> PlayerName {
    let name: &str = text.trim();
    if name.is_empty() {
        PlayerName::Skipped
    } else if parse_answer(name).is_ok() {
        PlayerName::Number
    } else {
        PlayerName::Given(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_accepted() {
        assert_eq!(parse_answer("4"), Ok(4.0));
        assert_eq!(parse_answer(" -12 \n"), Ok(-12.0));
        assert_eq!(parse_answer("3.5"), Ok(3.5));
        assert_eq!(parse_answer("0,25"), Ok(0.25));
    }

    #[test]
    fn empty_answer_is_rejected() {
        assert_eq!(parse_answer(""), Err(AnswerError::Empty));
        assert_eq!(parse_answer("   "), Err(AnswerError::Empty));
    }

    #[test]
    fn text_is_rejected() {
        assert_eq!(
            parse_answer("four"),
            Err(AnswerError::NotANumber("four".to_string()))
        );
        assert!(parse_answer("inf").is_err());
        assert!(parse_answer("NaN").is_err());
        assert!(parse_answer("1.2.3").is_err());
    }

    #[test]
    fn player_names() {
        assert_eq!(
            parse_player_name("  Ann \n"),
            PlayerName::Given("Ann".to_string())
        );
        assert_eq!(parse_player_name("R2D2"), PlayerName::Given("R2D2".to_string()));
        assert_eq!(parse_player_name(" "), PlayerName::Skipped);
    }

    #[test]
    fn late_answer_is_not_a_name() {
        assert_eq!(parse_player_name("42"), PlayerName::Number);
        assert_eq!(parse_player_name(" -3,5 "), PlayerName::Number);
    }
}
