//! Kooperativer Timer auf der UI-Schleife
//!
//! Der Timer feuert nicht selbst: die Schleife fragt `poll()` ab. Nach
//! `cancel()` kann ein bereits fälliger Termin nicht mehr feuern.

use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct CooperativeTimer {
    deadline: Option<Instant>,
    fired: u64,
    cancelled: u64,
}

impl CooperativeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt den nächsten Termin (ersetzt einen bestehenden)
    pub fn arm_at(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    /// Gibt `true` zurück wenn der Timer aktiv war
    pub fn cancel(&mut self) -> bool {
        if self.deadline.take().is_some() {
            self.cancelled += 1;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Einmaliges Feuern, wenn der Termin erreicht ist; danach ist der
    /// Timer entwaffnet und muss neu gesetzt werden
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    pub fn cancel_count(&self) -> u64 {
        self.cancelled
    }
}

// ============================================================================
// TESTS
// ============================================================================
