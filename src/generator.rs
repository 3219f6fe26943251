/*
generator.rs

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

//! Generate random arithmetic problems.
//!
//! A [`Problem`] is made of two operands drawn from the range of the [`Difficulty`] level, an
//! [`Operator`], and the expected result.
//! The result is computed with floating-point arithmetic so that divisions give the exact
//! quotient and not a truncated integer.
//!
//! Two rules constrain the second operand:
//!
//! * For divisions, the second operand is never zero.
//! * For subtractions, the second operand is never greater than the first one, so that the
//!   result is never negative.

use log::debug;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

use crate::difficulty::Difficulty;

/// Arithmetic operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All the operators. The generator picks one of them uniformly.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Symbol used in the problem text.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply the operator to the two operands.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
        }
    }
}

/// A generated problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub operand_a: u32,
    pub operator: Operator,
    pub operand_b: u32,

    /// Result of `operand_a operator operand_b`.
    pub expected_result: f64,
}

impl Problem {
    /// Build a problem and compute its result.
    pub fn new(operand_a: u32, operator: Operator, operand_b: u32) -> Self {
        Self {
            operand_a,
            operator,
            operand_b,
            expected_result: operator.apply(f64::from(operand_a), f64::from(operand_b)),
        }
    }

    /// Text shown to the player, such as `7 - 3 =`.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} =",
            self.operand_a,
            self.operator.symbol(),
            self.operand_b
        )
    }
}

/// Generate a random problem for the given difficulty level.
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Problem {
    let range: RangeInclusive<u32> = difficulty.range();
    let operand_a: u32 = rng.random_range(range.clone());
    let operator: Operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];

    let mut start: u32 = *range.start();
    let mut end: u32 = *range.end();
    match operator {
        Operator::Divide if start == 0 => start = 1,
        // operand_a is always in the range, so the interval is never empty
        Operator::Subtract => end = end.min(operand_a),
        _ => (),
    }

    let operand_b: u32 = loop {
        let b: u32 = rng.random_range(start..=end);
        if operator != Operator::Divide || b != 0 {
            break b;
        }
        debug!("Zero divisor drawn, drawing again");
    };

    Problem::new(operand_a, operator, operand_b)
}
