//! Call Panel - Fenster-Controller für Audio/Video-Anrufe
//!
//! Das Panel zeigt einen laufenden Anruf an und hält sein Layout aktuell:
//! - Zustandsmaschine vom Call-Zustand zum primären Aktions-Button
//! - Zustandslose LayoutEngine (Video mit Seitenverhältnis, Safe-Area, Overlays)
//! - Abbrechbare Übergänge zwischen UI-Modi
//! - Driftfreie Anzeige der Anrufdauer
//! - Display-Sleep-Inhibitor für die Dauer eines Established-Anrufs
//!
//! Anruf und Fenster sind externe Kollaboratoren ([`call::CallSession`],
//! [`window::PanelWindow`]). Mit dem Feature `tauri-window` gibt es einen
//! Adapter für Tauri-Webviews, mit `dbus-inhibit` einen freedesktop-Inhibitor.

pub mod animation;
pub mod call;
pub mod config;
pub mod layout;
pub mod panel;
pub mod power;
pub mod timing;
pub mod window;

#[cfg(test)]
mod test_support;

pub use call::{CallEvent, CallSession, CallState, CallType, UiMode};
pub use config::{ConfigError, PanelConfig};
pub use panel::{panel_channel, run_panel, CallPanelController, PanelAction, PanelMessage};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

// ============================================================================
// LOGGING
// ============================================================================

/// Standard-Filter, wenn `RUST_LOG` nicht gesetzt ist
pub const DEFAULT_LOG_FILTER: &str = "call_panel=debug";

static TRACING: OnceCell<()> = OnceCell::new();

/// Initialisiert das Logging einmal pro Prozess
///
/// Ist bereits ein globaler Subscriber gesetzt (z.B. von der Host-App),
/// bleibt dieser aktiv.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
        {
            tracing::info!("Call panel logging initialized");
        }
    });
}

// ============================================================================
// TESTS
// ============================================================================
