use std::time::Instant;

/// A monotonic game clock measuring milliseconds since the session started.
///
/// All command timestamps and motion deadlines are expressed in this clock's
/// milliseconds, so simulated time in tests is just an integer.
#[derive(Debug, Copy, Clone)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    /// Starts the clock.
    pub fn start() -> Self {
        Clock {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock started.
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn clock_is_monotonic() {
        let clock = Clock::start();
        let a = clock.now_ms();
        sleep(Duration::from_millis(2));
        let b = clock.now_ms();
        assert!(b >= a + 1);
    }
}
