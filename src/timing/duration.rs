//! Anzeige der Gesprächsdauer
//!
//! Die Dauer wird bei jedem Tick neu als `now - established_at` berechnet.
//! Es wird nichts aufsummiert, verpasste Ticks verursachen also keine Drift.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct DurationClock;

impl DurationClock {
    /// Verstrichene Zeit seit dem Verbindungsaufbau
    pub fn elapsed(now: Instant, established_at: Instant) -> Duration {
        now.saturating_duration_since(established_at)
    }

    /// `M:SS` unter einer Stunde, sonst `H:MM:SS`
    pub fn label(now: Instant, established_at: Instant) -> String {
        Self::format(Self::elapsed(now, established_at))
    }

    pub fn format(elapsed: Duration) -> String {
        let total = elapsed.as_secs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }

    /// Nächste volle Sekunde relativ zum Verbindungsaufbau
    pub fn next_tick(now: Instant, established_at: Instant) -> Instant {
        let elapsed = Self::elapsed(now, established_at);
        established_at + Duration::from_secs(elapsed.as_secs() + 1)
    }
}

// ============================================================================
// TESTS
// ============================================================================
