use std::time::Instant;

/// Wall-clock source for a surface's animation time.
///
/// Each surface owns its own clock; elapsed time restarts from zero on
/// retry so a reconstructed scene animates from its initial pose.
#[derive(Debug)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds since the clock started (or was last restarted).
    pub fn elapsed(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }

    pub fn restart(&mut self) {
        self.origin = Instant::now();
    }

    /// Register for per-frame ticks. Ticking a surface is only legal while
    /// the returned guard is alive; dropping it revokes the registration.
    pub fn subscribe(&self) -> Subscription {
        Subscription(())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard tying frame updates to the surface's mounted lifetime.
/// A tick attempted after this guard is dropped must be a no-op.
#[derive(Debug)]
pub struct Subscription(());

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!("frame subscription revoked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn restart_rewinds_to_zero() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.elapsed() > 0.0);
        clock.restart();
        assert!(clock.elapsed() < 0.005);
    }
}
