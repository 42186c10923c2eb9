//! Counting limiter for parser processes

use std::sync::{Condvar, Mutex, PoisonError};

/// Bounds the number of parser processes alive at once
#[derive(Debug)]
pub struct SpawnLimiter {
    in_flight: Mutex<usize>,
    released: Condvar,
    max: usize,
}

impl SpawnLimiter {
    /// Create a limiter allowing `max` concurrent processes (at least one)
    pub fn new(max: usize) -> Self {
        Self {
            in_flight: Mutex::new(0),
            released: Condvar::new(),
            max: max.max(1),
        }
    }

    /// Block until a slot is free and take it
    pub fn acquire(&self) -> SpawnPermit<'_> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        while *in_flight >= self.max {
            in_flight = self
                .released
                .wait(in_flight)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *in_flight += 1;
        SpawnPermit { limiter: self }
    }

    /// Processes currently holding a slot
    pub fn in_flight(&self) -> usize {
        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Configured maximum
    pub fn max(&self) -> usize {
        self.max
    }

    fn release(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        *in_flight = in_flight.saturating_sub(1);
        self.released.notify_one();
    }
}

/// A held slot; released on drop
#[derive(Debug)]
pub struct SpawnPermit<'a> {
    limiter: &'a SpawnLimiter,
}

impl Drop for SpawnPermit<'_> {
    fn drop(&mut self) {
        self.limiter.release();
    }
}
