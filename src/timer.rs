// Copyright 2026 The repertoire developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Cancelable deferred work for the trainer engines.
//!
//! Every timed behavior in the crate (auto-replies, incorrect-move reverts,
//! quiz playback) is a single pending task owned by one engine and polled
//! via `fire`. Tasks are stamped with an epoch token; `invalidate` bumps the
//! epoch, so a task scheduled before an engine reset can never fire after
//! it, even if its deadline has passed.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Pending<K> {
    kind: K,
    due: Instant,
    token: u64,
}

/// A single-slot scheduler. Scheduling a new task replaces any pending one;
/// the owning engine never needs more than one deferred action at a time.
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    epoch: u64,
    pending: Option<Pending<K>>,
}

impl<K> Scheduler<K> {
    pub fn new() -> Scheduler<K> {
        Scheduler {
            epoch: 0,
            pending: None,
        }
    }

    /// Schedules `kind` to fire once `delay` has elapsed past `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, kind: K) {
        self.pending = Some(Pending {
            kind,
            due: now + delay,
            token: self.epoch,
        });
    }

    /// Cancels the pending task and invalidates its token, so that a task
    /// handle observed before this call can never fire after it.
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = None;
    }

    /// Takes the pending task if its deadline has passed and it was
    /// scheduled under the current epoch.
    pub fn fire(&mut self, now: Instant) -> Option<K> {
        match &self.pending {
            Some(p) if p.due <= now && p.token == self.epoch => {
                self.pending.take().map(|p| p.kind)
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
