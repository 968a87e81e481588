//! Call-Zustand und Kollaborator-Vertrag
//!
//! Der eigentliche Anruf (Verhandlung, Verschlüsselung, Konnektivität)
//! lebt außerhalb des Panels. Hier steht nur, was das Panel davon sieht:
//! einen Zustands-Stream und ein paar Request-Einstiegspunkte.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tokio::sync::broadcast;
use uuid::Uuid;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Eindeutige ID eines Anrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CALL STATE
// ============================================================================

/// Phase eines Anrufs, gesetzt vom Call-Kollaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallState {
    Starting,
    WaitingInit,
    WaitingInitAck,
    /// Ausgehender Anruf, Server wird angefragt
    Requesting,
    Waiting,
    /// Gegenseite klingelt
    Ringing,
    /// Eingehender Anruf wartet auf Annahme
    WaitingIncoming,
    ExchangingKeys,
    WaitingUserConfirmation,
    /// Medien fließen in beide Richtungen
    Established,
    /// Gegenseite besetzt
    Busy,
    Failed,
    /// Abgelehnt bevor angenommen wurde
    Rejected,
    HangingUp,
    FailedHangingUp,
    Ended,
    EndedByOtherDevice,
    /// Unbekannter (zukünftiger) Zustand
    Unknown(u16),
}

impl CallState {
    /// Endzustand: der Anruf ist vorbei, es gibt keine Aktion mehr
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CallState::FailedHangingUp
                | CallState::Ended
                | CallState::EndedByOtherDevice
                | CallState::Unknown(_)
        )
    }

    pub fn is_established(&self) -> bool {
        matches!(self, CallState::Established)
    }

    /// Vor dem Verbindungsaufbau (lokale Vorschau gehört in den Body)
    pub fn is_pre_connect(&self) -> bool {
        matches!(
            self,
            CallState::Starting
                | CallState::WaitingInit
                | CallState::WaitingInitAck
                | CallState::Requesting
                | CallState::Waiting
                | CallState::Ringing
                | CallState::WaitingIncoming
                | CallState::WaitingUserConfirmation
                | CallState::Busy
                | CallState::Rejected
        )
    }
}

/// Art des Anrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
    Voice,
    Video,
}

// ============================================================================
// UI MODE
// ============================================================================

/// Variante des primären Aktions-Buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiMode {
    Answer,
    Hangup,
    Redial,
    None,
}

impl UiMode {
    /// Leitet den Modus ausschließlich aus dem letzten Zustand ab.
    ///
    /// Kein Anruf oder ein Endzustand ergibt `None`.
    pub fn from_state(state: Option<&CallState>) -> Self {
        let Some(state) = state else {
            return UiMode::None;
        };
        match state {
            CallState::WaitingIncoming => UiMode::Answer,
            CallState::Starting
            | CallState::WaitingInit
            | CallState::WaitingInitAck
            | CallState::Requesting
            | CallState::Waiting
            | CallState::Ringing
            | CallState::ExchangingKeys
            | CallState::WaitingUserConfirmation
            | CallState::Established
            | CallState::HangingUp => UiMode::Hangup,
            CallState::Busy | CallState::Failed | CallState::Rejected => UiMode::Redial,
            CallState::FailedHangingUp
            | CallState::Ended
            | CallState::EndedByOtherDevice
            | CallState::Unknown(_) => UiMode::None,
        }
    }

    /// Beschriftung unter dem primären Button
    pub fn label(&self) -> &'static str {
        match self {
            UiMode::Answer => "Accept",
            UiMode::Hangup => "End call",
            UiMode::Redial => "Call again",
            UiMode::None => "",
        }
    }
}

// ============================================================================
// VIDEO METADATA
// ============================================================================

/// Größe eines eingehenden Video-Frames, beide Dimensionen > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    width: u32,
    height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Events die vom Call-Kollaborator ausgelöst werden
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    StateChanged { state: CallState, at: Instant },
    /// Video der Gegenseite verfügbar (mit Frame-Größe) oder weg
    RemoteVideo { frame: Option<FrameSize> },
    /// Eigene Kamera an/aus
    LocalVideo { active: bool },
    RemoteAudioMuted(bool),
    /// Schlüssel-Fingerprint für die Ende-zu-Ende-Verifikation
    Fingerprint(Option<String>),
    ScreenSharing {
        device_id: Option<String>,
        with_audio: bool,
    },
}

// ============================================================================
// CALL SESSION
// ============================================================================

/// Schnittstelle zum laufenden Anruf
///
/// Implementierungen liefern Events auf beliebigen Threads; das Panel
/// marshallt sie über [`CallSubscription`](super::CallSubscription) in
/// seinen eigenen Kontext.
pub trait CallSession: Send + Sync {
    fn id(&self) -> CallId;
    fn call_type(&self) -> CallType;
    fn peer_name(&self) -> String;
    fn state(&self) -> CallState;
    /// Monotoner Zeitpunkt, an dem der Anruf Established erreicht hat
    fn established_at(&self) -> Option<Instant>;
    fn subscribe(&self) -> broadcast::Receiver<CallEvent>;

    fn is_muted(&self) -> bool;
    fn is_camera_active(&self) -> bool;
    fn remote_frame(&self) -> Option<FrameSize>;
    fn screen_sharing_device(&self) -> Option<String>;
    fn screen_sharing_with_audio(&self) -> bool;
    fn is_remote_audio_muted(&self) -> bool;
    /// Schlüssel-Fingerprint, sobald bekannt
    fn fingerprint(&self) -> Option<String>;
    /// Audio-Level der Gegenseite (0.0 - 1.0)
    fn audio_level(&self) -> f32;

    fn answer(&self);
    fn hangup(&self);
    fn redial(&self);
    fn set_muted(&self, muted: bool);
    fn toggle_camera(&self);
    /// `None` beendet die Bildschirmfreigabe
    fn toggle_screen_sharing(&self, device_id: Option<String>, with_audio: bool);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_mode_mapping() {
        assert_eq!(UiMode::from_state(None), UiMode::None);
        assert_eq!(
            UiMode::from_state(Some(&CallState::WaitingIncoming)),
            UiMode::Answer
        );
        assert_eq!(UiMode::from_state(Some(&CallState::Ringing)), UiMode::Hangup);
        assert_eq!(
            UiMode::from_state(Some(&CallState::Established)),
            UiMode::Hangup
        );
        assert_eq!(UiMode::from_state(Some(&CallState::Busy)), UiMode::Redial);
        assert_eq!(UiMode::from_state(Some(&CallState::Failed)), UiMode::Redial);
        assert_eq!(UiMode::from_state(Some(&CallState::Rejected)), UiMode::Redial);
        assert_eq!(UiMode::from_state(Some(&CallState::Ended)), UiMode::None);
    }

    #[test]
    fn test_unknown_state_shows_no_action() {
        let state = CallState::Unknown(4711);
        assert_eq!(UiMode::from_state(Some(&state)), UiMode::None);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_ui_mode_has_no_history() {
        // Gleicher Zustand zweimal hintereinander ergibt dasselbe
        let first = UiMode::from_state(Some(&CallState::Busy));
        let second = UiMode::from_state(Some(&CallState::Busy));
        assert_eq!(first, second);
    }

    #[test]
    fn test_none_iff_absent_or_terminal() {
        let all = [
            CallState::Starting,
            CallState::WaitingInit,
            CallState::WaitingInitAck,
            CallState::Requesting,
            CallState::Waiting,
            CallState::Ringing,
            CallState::WaitingIncoming,
            CallState::ExchangingKeys,
            CallState::WaitingUserConfirmation,
            CallState::Established,
            CallState::Busy,
            CallState::Failed,
            CallState::Rejected,
            CallState::HangingUp,
            CallState::FailedHangingUp,
            CallState::Ended,
            CallState::EndedByOtherDevice,
            CallState::Unknown(0),
        ];
        for state in all {
            let none = UiMode::from_state(Some(&state)) == UiMode::None;
            assert_eq!(none, state.is_terminal(), "{:?}", state);
        }
    }

    #[test]
    fn test_frame_size_rejects_zero() {
        assert!(FrameSize::new(0, 720).is_none());
        assert!(FrameSize::new(1280, 0).is_none());
        let frame = FrameSize::new(1280, 720).unwrap();
        assert!((frame.aspect() - 1280.0 / 720.0).abs() < 1e-6);
    }
}
