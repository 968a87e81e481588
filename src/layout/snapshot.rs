//! Vollständig aufgelöste Geometrie eines Layout-Durchlaufs

use super::geometry::{lerp, Rect};
use serde::{Deserialize, Serialize};

/// Position und Deckkraft eines Widgets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WidgetGeometry {
    pub rect: Rect,
    pub opacity: f32,
}

impl WidgetGeometry {
    pub const fn new(rect: Rect, opacity: f32) -> Self {
        Self { rect, opacity }
    }

    pub const fn visible(rect: Rect) -> Self {
        Self::new(rect, 1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn lerp(&self, to: &WidgetGeometry, t: f32) -> Self {
        Self::new(self.rect.lerp(&to.rect, t), lerp(self.opacity, to.opacity, t))
    }

    fn faded(&self, factor: f32) -> Self {
        Self::new(self.rect, self.opacity * factor)
    }
}

/// Ein optionales Widget blendet beim Erscheinen ein und beim Verschwinden aus
fn lerp_optional(
    from: Option<&WidgetGeometry>,
    to: Option<&WidgetGeometry>,
    t: f32,
) -> Option<WidgetGeometry> {
    match (from, to) {
        (Some(from), Some(to)) => Some(from.lerp(to, t)),
        (None, Some(to)) => Some(to.faded(t)),
        (Some(from), None) if t < 1.0 => Some(from.faded(1.0 - t)),
        _ => None,
    }
}

/// Video-Rechtecke haben keine Deckkraft; sie springen an den Rändern
fn lerp_rect(from: Option<&Rect>, to: Option<&Rect>, t: f32) -> Option<Rect> {
    match (from, to) {
        (Some(from), Some(to)) => Some(from.lerp(to, t)),
        (None, to) => to.copied(),
        (Some(from), None) if t < 1.0 => Some(*from),
        _ => None,
    }
}

/// Geometrie aller Widgets des Call-Panels
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub name: WidgetGeometry,
    pub status: WidgetGeometry,
    pub userpic: WidgetGeometry,

    pub screencast: WidgetGeometry,
    pub camera: WidgetGeometry,
    pub mute: WidgetGeometry,

    /// Annehmen / Auflegen / Erneut anrufen
    pub primary: WidgetGeometry,
    pub decline: WidgetGeometry,
    pub cancel: WidgetGeometry,

    pub fingerprint: Option<WidgetGeometry>,
    pub remote_audio_mute: Option<WidgetGeometry>,

    pub bottom_shadow: WidgetGeometry,
    pub incoming_video: Option<Rect>,
    pub outgoing_video: Option<Rect>,
    pub outgoing_in_body: bool,
}

impl PanelSnapshot {
    /// Interpoliert jedes Widget einzeln zwischen zwei Snapshots
    pub fn lerp(from: &PanelSnapshot, to: &PanelSnapshot, t: f32) -> PanelSnapshot {
        let t = t.clamp(0.0, 1.0);
        PanelSnapshot {
            name: from.name.lerp(&to.name, t),
            status: from.status.lerp(&to.status, t),
            userpic: from.userpic.lerp(&to.userpic, t),
            screencast: from.screencast.lerp(&to.screencast, t),
            camera: from.camera.lerp(&to.camera, t),
            mute: from.mute.lerp(&to.mute, t),
            primary: from.primary.lerp(&to.primary, t),
            decline: from.decline.lerp(&to.decline, t),
            cancel: from.cancel.lerp(&to.cancel, t),
            fingerprint: lerp_optional(from.fingerprint.as_ref(), to.fingerprint.as_ref(), t),
            remote_audio_mute: lerp_optional(
                from.remote_audio_mute.as_ref(),
                to.remote_audio_mute.as_ref(),
                t,
            ),
            bottom_shadow: from.bottom_shadow.lerp(&to.bottom_shadow, t),
            incoming_video: lerp_rect(from.incoming_video.as_ref(), to.incoming_video.as_ref(), t),
            outgoing_video: lerp_rect(from.outgoing_video.as_ref(), to.outgoing_video.as_ref(), t),
            outgoing_in_body: if t < 1.0 {
                from.outgoing_in_body
            } else {
                to.outgoing_in_body
            },
        }
    }

    /// Alle vorhandenen Widgets (ohne Video-Flächen)
    pub fn widgets_mut(&mut self) -> impl Iterator<Item = &mut WidgetGeometry> + '_ {
        [
            &mut self.name,
            &mut self.status,
            &mut self.userpic,
            &mut self.screencast,
            &mut self.camera,
            &mut self.mute,
            &mut self.primary,
            &mut self.decline,
            &mut self.cancel,
            &mut self.bottom_shadow,
        ]
        .into_iter()
        .chain(self.fingerprint.as_mut())
        .chain(self.remote_audio_mute.as_mut())
    }

    /// Alle vorhandenen Rechtecke, für Bounds-Prüfungen
    pub fn rects(&self) -> Vec<Rect> {
        let mut rects = vec![
            self.name.rect,
            self.status.rect,
            self.userpic.rect,
            self.screencast.rect,
            self.camera.rect,
            self.mute.rect,
            self.primary.rect,
            self.decline.rect,
            self.cancel.rect,
            self.bottom_shadow.rect,
        ];
        rects.extend(self.fingerprint.map(|w| w.rect));
        rects.extend(self.remote_audio_mute.map(|w| w.rect));
        rects.extend(self.incoming_video);
        rects.extend(self.outgoing_video);
        rects
    }
}

// ============================================================================
// TESTS
// ============================================================================
