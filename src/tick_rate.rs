//! High tick rate requests
//!
//! A running effect asks the scheduler to tick as fast as possible by holding
//! a [`TickRateRequest`]. The scheduler only looks at the number of
//! outstanding requests in the shared [`TickRateCounter`].
//!
//! The counter is protected by a critical section, so requests may be taken
//! and released from interrupt context as well.

use core::cell::Cell;

use critical_section::Mutex;

/// Global counter for firmware that drives a single scheduler.
pub static TICK_RATE: TickRateCounter = TickRateCounter::new();

/// Counts outstanding high tick rate requests.
pub struct TickRateCounter {
    inner: Mutex<Cell<u32>>,
}

impl TickRateCounter {
    /// Create a counter with no outstanding requests.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(0)),
        }
    }

    /// Number of requests currently held.
    pub fn outstanding(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Returns true if anyone asked for the highest tick rate.
    pub fn is_high(&self) -> bool {
        self.outstanding() > 0
    }

    fn increment(&self) {
        critical_section::with(|cs| {
            let count = self.inner.borrow(cs);
            count.set(count.get().saturating_add(1));
        });
    }

    fn decrement(&self) {
        critical_section::with(|cs| {
            let count = self.inner.borrow(cs);
            count.set(count.get().saturating_sub(1));
        });
    }
}

impl Default for TickRateCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// One unit of the shared tick rate counter.
///
/// Holds at most one unit at a time: repeated `acquire` or `release` calls
/// are no-ops. The unit is given back when the request is dropped.
pub struct TickRateRequest<'a> {
    counter: &'a TickRateCounter,
    held: bool,
}

impl<'a> TickRateRequest<'a> {
    /// Create a request that does not hold a unit yet.
    pub const fn new(counter: &'a TickRateCounter) -> Self {
        Self {
            counter,
            held: false,
        }
    }

    pub fn acquire(&mut self) {
        if !self.held {
            self.counter.increment();
            self.held = true;
        }
    }

    pub fn release(&mut self) {
        if self.held {
            self.counter.decrement();
            self.held = false;
        }
    }

    pub const fn is_held(&self) -> bool {
        self.held
    }
}

impl Drop for TickRateRequest<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
