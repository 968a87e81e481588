//! Power-Save Scope
//!
//! Hält höchstens einen Display-Sleep-Inhibitor pro Panel. Ein
//! fehlgeschlagener Erwerb wird nur protokolliert; der Anruf läuft weiter.

use thiserror::Error;

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug)]
pub enum PowerSaveError {
    #[error("Display sleep inhibition is not available on this host")]
    Unavailable,

    #[error("Inhibitor backend error: {0}")]
    Backend(String),
}

// ============================================================================
// INHIBITOR
// ============================================================================

/// Token eines gehaltenen Inhibitors; nicht klonbar
#[derive(Debug, PartialEq, Eq)]
pub struct InhibitorHandle {
    cookie: u32,
}

impl InhibitorHandle {
    pub fn new(cookie: u32) -> Self {
        Self { cookie }
    }

    pub fn cookie(&self) -> u32 {
        self.cookie
    }
}

/// Betriebssystem-Schnittstelle zum Verhindern des Display-Sleeps
pub trait DisplaySleepInhibitor: Send {
    fn acquire(&mut self, reason: &str) -> Result<InhibitorHandle, PowerSaveError>;
    fn release(&mut self, handle: InhibitorHandle) -> Result<(), PowerSaveError>;
}

/// Inhibitor für Hosts ohne Unterstützung
#[derive(Debug, Default)]
pub struct NoopInhibitor;

impl DisplaySleepInhibitor for NoopInhibitor {
    fn acquire(&mut self, _reason: &str) -> Result<InhibitorHandle, PowerSaveError> {
        Err(PowerSaveError::Unavailable)
    }

    fn release(&mut self, _handle: InhibitorHandle) -> Result<(), PowerSaveError> {
        Ok(())
    }
}

// ============================================================================
// SCOPE
// ============================================================================

pub struct PowerSaveScope {
    inhibitor: Box<dyn DisplaySleepInhibitor>,
    handle: Option<InhibitorHandle>,
    reason: String,
}

impl PowerSaveScope {
    pub fn new(inhibitor: Box<dyn DisplaySleepInhibitor>, reason: impl Into<String>) -> Self {
        Self {
            inhibitor,
            handle: None,
            reason: reason.into(),
        }
    }

    pub fn is_held(&self) -> bool {
        self.handle.is_some()
    }

    /// Erwirbt den Inhibitor, falls noch keiner gehalten wird
    pub fn acquire(&mut self) {
        if self.handle.is_some() {
            return;
        }
        match self.inhibitor.acquire(&self.reason) {
            Ok(handle) => {
                tracing::debug!("Display sleep inhibited (cookie {})", handle.cookie());
                self.handle = Some(handle);
            }
            Err(e) => {
                tracing::warn!("Failed to inhibit display sleep: {}", e);
            }
        }
    }

    /// Gibt einen gehaltenen Inhibitor frei; ohne Handle ein No-op
    pub fn release(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let cookie = handle.cookie();
        match self.inhibitor.release(handle) {
            Ok(()) => tracing::debug!("Display sleep inhibition released (cookie {})", cookie),
            Err(e) => tracing::warn!("Failed to release display sleep inhibitor: {}", e),
        }
    }
}

impl Drop for PowerSaveScope {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PowerSaveScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSaveScope")
            .field("held", &self.is_held())
            .field("reason", &self.reason)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingInhibitor;

    #[test]
    fn test_acquire_is_idempotent() {
        let inhibitor = RecordingInhibitor::new();
        let mut scope = PowerSaveScope::new(Box::new(inhibitor.clone()), "call");

        scope.acquire();
        scope.acquire();
        assert!(scope.is_held());
        assert_eq!(inhibitor.acquired(), 1);

        scope.release();
        scope.release();
        assert_eq!(inhibitor.released(), 1);
    }

    #[test]
    fn test_failure_degrades_silently() {
        let inhibitor = RecordingInhibitor::failing();
        let mut scope = PowerSaveScope::new(Box::new(inhibitor.clone()), "call");

        scope.acquire();
        assert!(!scope.is_held());
        scope.release();
        assert_eq!(inhibitor.released(), 0);
    }

    #[test]
    fn test_drop_releases() {
        let inhibitor = RecordingInhibitor::new();
        {
            let mut scope = PowerSaveScope::new(Box::new(inhibitor.clone()), "call");
            scope.acquire();
        }
        assert_eq!(inhibitor.acquired(), 1);
        assert_eq!(inhibitor.released(), 1);
    }

    #[test]
    fn test_noop_inhibitor_is_unavailable() {
        let mut scope = PowerSaveScope::new(Box::new(NoopInhibitor), "call");
        scope.acquire();
        assert!(!scope.is_held());
    }
}
