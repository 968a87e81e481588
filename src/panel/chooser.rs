//! Fähigkeit für den Bildschirm-Quellen-Dialog
//!
//! Der Dialog hält eine Referenz auf die Fähigkeit, nicht auf das Panel.
//! Über das [`ChooserLifetime`]-Token erfährt er, wann er keine Auswahl
//! mehr anbieten darf.

use crate::window::SurfaceHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lebensdauer einer Dialog-Sitzung, gebunden an das Panel
#[derive(Debug, Clone)]
pub struct ChooserLifetime {
    alive: Arc<AtomicBool>,
}

impl ChooserLifetime {
    pub(crate) fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub(crate) fn end(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

/// Was der Quellen-Dialog vom Panel braucht
pub trait ScreenSourceChooserDelegate {
    /// Elternfläche für den Dialog; `None` nach der Zerstörung
    fn chooser_parent(&self) -> Option<SurfaceHandle>;
    /// Zuletzt gewählte Quelle zur Vorauswahl
    fn chooser_active_device_id(&self) -> Option<String>;
    fn chooser_active_with_audio(&self) -> bool;
    /// Backend kann Bildschirm und Audio gemeinsam aufnehmen
    fn chooser_with_audio_supported(&self) -> bool;
    /// Token der aktuellen Sitzung; endet mit `stop_choosing` oder dem Panel
    fn chooser_lifetime(&mut self) -> ChooserLifetime;
    fn accept_source(&mut self, device_id: String, with_audio: bool);
    fn stop_choosing(&mut self);
}

/// Plattform-Unterstützung für Bildschirm + Audio
pub fn platform_supports_screencast_audio() -> bool {
    cfg!(windows)
}

// ============================================================================
// TESTS
// ============================================================================
