//! GC Timer - Timing Utilities

use std::time::{Duration, Instant};

/// GcTimer - timer for measuring a collection cycle
#[derive(Debug, Clone, Copy)]
pub struct GcTimer {
    start: Instant,
}

impl GcTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for GcTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_monotonic() {
        let timer = GcTimer::new();
        let first = timer.elapsed();
        let second = timer.elapsed();
        assert!(second >= first);
    }
}
