//! Ein gezeichneter Zustand des Panels
//!
//! Der Frame trägt die Geometrie eines Layout-Durchlaufs plus alle Texte
//! und Flags, die das Fenster zum Zeichnen braucht.

use super::preview::VideoSinkId;
use crate::call::{CallState, UiMode};
use crate::layout::PanelSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelFrame {
    pub snapshot: PanelSnapshot,
    pub name: String,
    pub status: String,
    pub mode: UiMode,
    pub primary_label: String,
    /// Ausschlag des Ripples um das Profilbild (0.0 - 1.0)
    pub outer_ripple: f32,
    pub muted: bool,
    pub camera_active: bool,
    pub screen_sharing: bool,
    pub remote_audio_muted: bool,
    pub fingerprint: Option<String>,
    pub outgoing_sink: Option<VideoSinkId>,
    pub fullscreen: bool,
    pub chooser_open: bool,
}

/// Statuszeile für einen Zustand
///
/// `duration` ist das Label der Anrufdauer und wird nur im Zustand
/// Established angezeigt.
pub fn status_text(state: Option<&CallState>, duration: Option<&str>) -> String {
    let Some(state) = state else {
        return String::new();
    };

    let text = match state {
        CallState::Starting | CallState::WaitingInit | CallState::WaitingInitAck => {
            "Connecting..."
        }
        CallState::Requesting => "Requesting...",
        CallState::Waiting => "Waiting...",
        CallState::Ringing => "Ringing...",
        CallState::WaitingIncoming => "Incoming call",
        CallState::ExchangingKeys => "Exchanging encryption keys...",
        CallState::WaitingUserConfirmation => "Waiting for confirmation...",
        CallState::Established => return duration.unwrap_or("0:00").to_string(),
        CallState::Busy => "Line busy",
        CallState::Failed | CallState::FailedHangingUp => "Failed to connect",
        CallState::Rejected => "Call declined",
        CallState::HangingUp => "Hanging up...",
        CallState::Ended => "Call ended",
        CallState::EndedByOtherDevice => "Answered on another device",
        CallState::Unknown(_) => "",
    };
    text.to_string()
}

// ============================================================================
// TESTS
// ============================================================================
