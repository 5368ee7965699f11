//! Counting permit pool bounding how many sync tasks run at once.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct PoolState {
    in_use: usize,
    high_water: usize,
}

/// A fixed number of execution slots.
///
/// `acquire` blocks while every slot is taken. Slots are handed out as
/// [`Permit`] guards and returned when the guard is dropped, which also
/// happens while unwinding from a panicking task.
#[derive(Debug)]
pub struct PermitPool {
    capacity: usize,
    state: Mutex<PoolState>,
    released: Condvar,
}

/// One held execution slot. Released on drop, exactly once.
#[derive(Debug)]
pub struct Permit<'a> {
    pool: &'a PermitPool,
}

impl PermitPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(PoolState::default()),
            released: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take a slot, waiting until one is free.
    pub fn acquire(&self) -> Result<Permit<'_>> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig {
                message: "permit pool has no slots".to_string(),
            });
        }

        let mut state = self.lock()?;
        while state.in_use >= self.capacity {
            state = self
                .released
                .wait(state)
                .map_err(|_| poisoned("waiting for a sync slot"))?;
        }
        state.in_use += 1;
        state.high_water = state.high_water.max(state.in_use);

        Ok(Permit { pool: self })
    }

    /// Number of slots currently held.
    pub fn in_use(&self) -> Result<usize> {
        Ok(self.lock()?.in_use)
    }

    /// The largest number of slots held at the same time so far.
    pub fn high_water_mark(&self) -> Result<usize> {
        Ok(self.lock()?.high_water)
    }

    fn lock(&self) -> Result<MutexGuard<'_, PoolState>> {
        self.state
            .lock()
            .map_err(|_| poisoned("permit pool state"))
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        // The counter is only touched under this lock and never while
        // panicking, so a poisoned guard still holds a consistent count.
        let mut state = self
            .pool
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.in_use -= 1;
        drop(state);
        self.pool.released.notify_one();
    }
}

fn poisoned(context: &str) -> Error {
    Error::LockPoisoned {
        context: context.to_string(),
    }
}
