//! Platform abstraction layer
//!
//! The loop driver never polls a "running" flag. It asks a scheduler for the
//! next tick while it wants one, and cancels the request on pause or game
//! over. The browser build backs this with `requestAnimationFrame`; native
//! runs and tests use [`ManualScheduler`].

/// Single-threaded tick source
pub trait TickScheduler {
    /// Deliver one more tick to the driver
    fn request_tick(&mut self);
    /// Drop any outstanding request
    fn cancel_tick(&mut self);
}

/// Scheduler driven by hand: the caller checks for a pending request and
/// delivers the tick itself.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the outstanding request, if any
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests made over the scheduler's lifetime
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn cancel_tick(&mut self) {
        if self.pending {
            self.cancelled += 1;
        }
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler() {
        let mut s = ManualScheduler::new();
        assert!(!s.take_request());
        s.request_tick();
        assert!(s.is_pending());
        assert!(s.take_request());
        assert!(!s.take_request());

        s.request_tick();
        s.cancel_tick();
        s.cancel_tick();
        assert!(!s.is_pending());
        assert_eq!(s.requested(), 2);
        assert_eq!(s.cancelled(), 1);
    }
}
