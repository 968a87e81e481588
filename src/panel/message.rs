//! Nachrichten an den UI-Kontext des Panels
//!
//! Alles, was von außen kommt (Call-Events, Fenster-Events, Button-Klicks,
//! Auswahl im Quellen-Dialog), läuft als [`PanelMessage`] durch einen Kanal
//! und wird auf dem UI-Kontext nacheinander abgearbeitet.

use crate::call::CallEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

pub type PanelSender = mpsc::UnboundedSender<PanelMessage>;
pub type PanelReceiver = mpsc::UnboundedReceiver<PanelMessage>;

/// Erstellt den UI-Kanal eines Panels
pub fn panel_channel() -> (PanelSender, PanelReceiver) {
    mpsc::unbounded_channel()
}

/// Button-Aktionen des Panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAction {
    /// Annehmen, Auflegen oder erneut Anrufen, je nach Modus
    Primary,
    Decline,
    Cancel,
    ToggleMute,
    ToggleCamera,
    ToggleScreencast,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelMessage {
    /// Event eines gebundenen Anrufs; `epoch` identifiziert die Bindung
    Call { epoch: u64, event: CallEvent },
    /// Events der Bindung `epoch` gingen verloren
    Lagged { epoch: u64 },
    Resized,
    FullScreen(bool),
    Action(PanelAction),
    SourceChosen {
        device_id: String,
        with_audio: bool,
    },
    ChooserClosed,
    /// Benutzer schließt das Fenster
    CloseRequested,
    /// Panel wird zerstört
    Close,
}
