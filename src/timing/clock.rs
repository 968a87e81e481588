//! Zeitquellen
//!
//! Produktiv läuft [`SystemClock`]; Tests verwenden [`TickClock`], deren
//! Zeit nur bei explizitem Vorstellen weiterläuft.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Monotone Zeitquelle
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Uhr der Tokio-Runtime; folgt im pausierten Testbetrieb der virtuellen Zeit
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Virtuelle Uhr für deterministische Tests
#[derive(Debug)]
pub struct TickClock {
    anchor: Instant,
    elapsed: Mutex<Duration>,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Stellt die Uhr um `step` vor
    pub fn advance(&self, step: Duration) {
        *self.elapsed.lock() += step;
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickClock {
    fn now(&self) -> Instant {
        self.anchor + *self.elapsed.lock()
    }
}

// ============================================================================
// TESTS
// ============================================================================
