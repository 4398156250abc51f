//! Deferred, cancellable timer for the settle delay.
//!
//! The timer carries the token it was armed with; whoever consumes the fired
//! token decides whether it is still current. Time advances only through
//! `advance(dt)`, matching the fixed-tick model of the rest of the core.

#[derive(Copy, Clone, Debug, PartialEq)]
struct Pending {
    token: u32,
    remaining: f32,
}

#[derive(Clone, Debug, Default)]
pub struct SettleTimer {
    pending: Option<Pending>,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer. A previously pending token is replaced.
    pub fn arm(&mut self, token: u32, delay_secs: f32) {
        self.pending = Some(Pending {
            token,
            remaining: delay_secs.max(0.0),
        });
    }

    /// Drop the pending callback without firing it.
    pub fn cancel(&mut self) -> Option<u32> {
        self.pending.take().map(|p| p.token)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Seconds left before firing, if armed.
    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|p| p.remaining)
    }

    /// Advance by `dt` seconds; returns the token once the delay has elapsed.
    /// Negative or non-finite `dt` does not move time.
    pub fn advance(&mut self, dt: f32) -> Option<u32> {
        let pending = self.pending.as_mut()?;
        if dt.is_finite() && dt > 0.0 {
            pending.remaining -= dt;
        }
        if pending.remaining <= 0.0 {
            return self.pending.take().map(|p| p.token);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut t = SettleTimer::new();
        t.arm(7, 0.3);
        assert_eq!(t.advance(0.1), None);
        assert_eq!(t.advance(0.1), None);
        assert_eq!(t.advance(0.15), Some(7));
        assert_eq!(t.advance(1.0), None);
        assert!(!t.is_pending());
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut t = SettleTimer::new();
        t.arm(1, 0.0);
        assert_eq!(t.advance(0.0), Some(1));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut t = SettleTimer::new();
        t.arm(3, 0.3);
        assert_eq!(t.cancel(), Some(3));
        assert_eq!(t.advance(1.0), None);
    }

    #[test]
    fn bogus_dt_does_not_advance() {
        let mut t = SettleTimer::new();
        t.arm(2, 0.3);
        assert_eq!(t.advance(-1.0), None);
        assert_eq!(t.advance(f32::NAN), None);
        assert_eq!(t.remaining(), Some(0.3));
    }
}
