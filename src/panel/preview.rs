//! Platzierung der eigenen Video-Vorschau
//!
//! Der Video-Sink wird einmal pro Anruf erzeugt und danach nur zwischen
//! Body und Bubble verschoben, nie neu aufgebaut.

use crate::call::CallState;
use crate::layout::OutgoingPlacement;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle des Sinks, an den die lokale Kamera rendert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoSinkId(pub Uuid);

#[derive(Debug)]
pub struct OutgoingPreview {
    sink: Option<VideoSinkId>,
    placement: OutgoingPlacement,
    created: u64,
    transfers: u64,
}

impl OutgoingPreview {
    pub fn new() -> Self {
        Self {
            sink: None,
            placement: OutgoingPlacement::Hidden,
            created: 0,
            transfers: 0,
        }
    }

    /// Vor dem Verbindungsaufbau füllt die Vorschau den Body
    pub fn placement_for(state: Option<&CallState>, camera_active: bool) -> OutgoingPlacement {
        match state {
            Some(_) if !camera_active => OutgoingPlacement::Hidden,
            Some(state) if state.is_pre_connect() => OutgoingPlacement::InBody,
            Some(_) => OutgoingPlacement::Bubble,
            None => OutgoingPlacement::Hidden,
        }
    }

    /// Verschiebt den Sink; gibt `true` zurück wenn sich etwas geändert hat
    pub fn place(&mut self, placement: OutgoingPlacement) -> bool {
        if placement == self.placement {
            return false;
        }

        if placement != OutgoingPlacement::Hidden {
            if self.sink.is_none() {
                self.sink = Some(VideoSinkId(Uuid::new_v4()));
                self.created += 1;
            } else if self.placement != OutgoingPlacement::Hidden {
                self.transfers += 1;
            }
        }

        tracing::debug!("Outgoing preview {:?} -> {:?}", self.placement, placement);
        self.placement = placement;
        true
    }

    /// Gibt den Sink frei (neuer Anruf)
    pub fn reset(&mut self) {
        self.sink = None;
        self.placement = OutgoingPlacement::Hidden;
    }

    pub fn placement(&self) -> OutgoingPlacement {
        self.placement
    }

    /// Sichtbarer Sink, `None` solange die Vorschau versteckt ist
    pub fn visible_sink(&self) -> Option<VideoSinkId> {
        match self.placement {
            OutgoingPlacement::Hidden => None,
            _ => self.sink,
        }
    }

    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn transfer_count(&self) -> u64 {
        self.transfers
    }
}

impl Default for OutgoingPreview {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_follows_connect_boundary() {
        assert_eq!(
            OutgoingPreview::placement_for(Some(&CallState::Ringing), true),
            OutgoingPlacement::InBody
        );
        assert_eq!(
            OutgoingPreview::placement_for(Some(&CallState::Established), true),
            OutgoingPlacement::Bubble
        );
        assert_eq!(
            OutgoingPreview::placement_for(Some(&CallState::Established), false),
            OutgoingPlacement::Hidden
        );
        assert_eq!(
            OutgoingPreview::placement_for(None, true),
            OutgoingPlacement::Hidden
        );
    }

    #[test]
    fn test_sink_is_transferred_not_rebuilt() {
        let mut preview = OutgoingPreview::new();
        assert!(preview.place(OutgoingPlacement::InBody));
        let sink = preview.visible_sink();
        assert!(sink.is_some());

        assert!(preview.place(OutgoingPlacement::Bubble));
        assert_eq!(preview.visible_sink(), sink);
        assert_eq!(preview.created_count(), 1);
        assert_eq!(preview.transfer_count(), 1);

        // Verstecken und wieder zeigen behält denselben Sink
        preview.place(OutgoingPlacement::Hidden);
        assert_eq!(preview.visible_sink(), None);
        preview.place(OutgoingPlacement::Bubble);
        assert_eq!(preview.visible_sink(), sink);
        assert_eq!(preview.created_count(), 1);
    }

    #[test]
    fn test_same_placement_is_noop() {
        let mut preview = OutgoingPreview::new();
        assert!(!preview.place(OutgoingPlacement::Hidden));
        preview.place(OutgoingPlacement::Bubble);
        assert!(!preview.place(OutgoingPlacement::Bubble));
        assert_eq!(preview.transfer_count(), 0);
    }

    #[test]
    fn test_reset_drops_sink() {
        let mut preview = OutgoingPreview::new();
        preview.place(OutgoingPlacement::Bubble);
        let first = preview.visible_sink();

        preview.reset();
        preview.place(OutgoingPlacement::Bubble);
        assert_ne!(preview.visible_sink(), first);
        assert_eq!(preview.created_count(), 2);
    }
}
