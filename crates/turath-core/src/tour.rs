// Copyright 2026 Turath Desktop Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The guided-tour player: a timer-driven walk through the filtered list.
//!
//! The sequence is a snapshot of the filtered keys taken when the tour
//! opens; filter changes while the tour is running do not reorder it. The
//! timer is poll-driven — the UI loop calls [`TourPlayer::poll`] every frame
//! and steps when the configured interval has elapsed — so ticks can never
//! overlap and closing the tour trivially cancels the timer.

use std::time::{Duration, Instant};

/// Tour player states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourState {
    #[default]
    Closed,
    OpenPaused,
    OpenPlaying,
}

/// Plays the current filtered list one building at a time.
#[derive(Debug)]
pub struct TourPlayer {
    sequence: Vec<String>,
    index: usize,
    state: TourState,
    interval: Duration,
    next_step_at: Option<Instant>,
}

impl TourPlayer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            sequence: Vec::new(),
            index: 0,
            state: TourState::Closed,
            interval,
            next_step_at: None,
        }
    }

    /// Change the step interval. Takes effect from the next scheduled step.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Open the tour over a snapshot of keys, paused on the first item.
    ///
    /// An empty snapshot opens an empty tour that never steps.
    pub fn open(&mut self, snapshot: Vec<String>) -> Option<&str> {
        self.sequence = snapshot;
        self.index = 0;
        self.state = TourState::OpenPaused;
        self.next_step_at = None;
        self.current()
    }

    /// Open the tour positioned on `key` (falling back to the first item
    /// when the key is not in the snapshot).
    pub fn open_at(&mut self, snapshot: Vec<String>, key: &str) -> Option<&str> {
        let start = snapshot.iter().position(|k| k == key).unwrap_or(0);
        self.open(snapshot);
        self.index = start.min(self.sequence.len().saturating_sub(1));
        self.current()
    }

    /// Start the repeating timer. The current item stays displayed; the
    /// first automatic advance happens one interval from `now`.
    pub fn play(&mut self, now: Instant) {
        if self.state == TourState::Closed || self.sequence.is_empty() {
            return;
        }
        self.state = TourState::OpenPlaying;
        self.next_step_at = Some(now + self.interval);
    }

    /// Cancel the timer without moving.
    pub fn pause(&mut self) {
        if self.state == TourState::OpenPlaying {
            self.state = TourState::OpenPaused;
        }
        self.next_step_at = None;
    }

    /// Manual step forward (wraps). Cancels the timer.
    pub fn next(&mut self) -> Option<&str> {
        self.step(1)
    }

    /// Manual step backward (wraps). Cancels the timer.
    pub fn prev(&mut self) -> Option<&str> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<&str> {
        if self.state == TourState::Closed || self.sequence.is_empty() {
            return None;
        }
        self.pause();
        let len = self.sequence.len() as isize;
        self.index = ((self.index as isize + delta).rem_euclid(len)) as usize;
        self.current()
    }

    /// Advance automatically if playing and the interval has elapsed.
    /// Returns the key to display when a step fired.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        if self.state != TourState::OpenPlaying || self.sequence.is_empty() {
            return None;
        }
        let due = self.next_step_at?;
        if now < due {
            return None;
        }
        self.index = (self.index + 1) % self.sequence.len();
        self.next_step_at = Some(now + self.interval);
        self.current()
    }

    /// Cancel the timer and discard the sequence.
    pub fn close(&mut self) {
        self.sequence.clear();
        self.index = 0;
        self.state = TourState::Closed;
        self.next_step_at = None;
    }

    #[must_use]
    pub fn state(&self) -> TourState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != TourState::Closed
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == TourState::OpenPlaying
    }

    /// Key of the item currently displayed.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.sequence.get(self.index).map(String::as_str)
    }

    /// (current index, sequence length) for the progress display.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.state == TourState::Closed || self.sequence.is_empty() {
            None
        } else {
            Some((self.index, self.sequence.len()))
        }
    }
}
