/*
clock.rs

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

//! Countdown clock.
//!
//! A [`Clock`] does not call the game directly. It produces tick messages that the front-end
//! receives in the same loop as the player input, and then passes to
//! [`crate::controller::SessionController::on_tick`].
//! Each tick carries the generation number it was scheduled with, so that the controller can
//! drop the ticks of a timer that it has already cancelled.

use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Interval between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic timer.
pub trait Clock {
    /// Start sending ticks tagged with `generation`. Any running timer is cancelled first.
    fn schedule(&mut self, generation: u64);

    /// Stop sending ticks.
    fn cancel(&mut self);
}

/// Clock that sends its ticks from a background thread.
///
/// The ticks go through an [`async_channel::Sender`]. The `wrap` function converts the
/// generation number into the message type of the channel.
pub struct ThreadClock<T> {
    sender: async_channel::Sender<T>,
    wrap: fn(u64) -> T,
    period: Duration,

    /// Flag of the running timer thread. Clearing it stops the thread.
    running: Option<Arc<AtomicBool>>,
}

impl<T: Send + 'static> ThreadClock<T> {
    /// Create a [`ThreadClock`] object that ticks every [`TICK_PERIOD`].
    pub fn new(sender: async_channel::Sender<T>, wrap: fn(u64) -> T) -> Self {
        Self::with_period(sender, wrap, TICK_PERIOD)
    }

    /// Create a [`ThreadClock`] object with a custom period.
    pub fn with_period(
        sender: async_channel::Sender<T>,
        wrap: fn(u64) -> T,
        period: Duration,
    ) -> Self {
        Self {
            sender,
            wrap,
            period,
            running: None,
        }
    }
}

impl<T: Send + 'static> Clock for ThreadClock<T> {
    fn schedule(&mut self, generation: u64) {
        self.cancel();

        let running: Arc<AtomicBool> = Arc::new(AtomicBool::new(true));
        let flag: Arc<AtomicBool> = Arc::clone(&running);
        let sender: async_channel::Sender<T> = self.sender.clone();
        let wrap: fn(u64) -> T = self.wrap;
        let period: Duration = self.period;

        thread::spawn(move || {
            loop {
                thread::sleep(period);
                if !flag.load(Ordering::Acquire) {
                    break;
                }
                if sender.send_blocking(wrap(generation)).is_err() {
                    // Nobody listens anymore
                    break;
                }
            }
            debug!("Timer {generation} stopped");
        });
        self.running = Some(running);
        debug!("Timer {generation} scheduled");
    }

    fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            running.store(false, Ordering::Release);
        }
    }
}

impl<T> Drop for ThreadClock<T> {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.store(false, Ordering::Release);
        }
    }
}
