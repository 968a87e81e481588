//! Layout Engine
//!
//! Reine Funktion von Fenstergröße, Call-Typ, Modus-Übergang, Video-Metadaten
//! und sichtbaren Overlays auf einen [`PanelSnapshot`]. Kein Zustand,
//! keine Seiteneffekte: gleiche Eingaben ergeben bitgleiche Ausgaben.

use super::geometry::{lerp, Insets, Rect, Size};
use super::snapshot::{PanelSnapshot, WidgetGeometry};
use super::style::PanelStyle;
use crate::animation::Easing;
use crate::call::{CallType, FrameSize, UiMode};
use serde::{Deserialize, Serialize};

const FALLBACK_ASPECT: f32 = 16.0 / 9.0;

// ============================================================================
// INPUT TYPES
// ============================================================================

/// Gewichte der Aktions-Buttons für einen Modus
///
/// `secondary_slot` ist die Breite des Ablehnen/Abbrechen-Platzes
/// (0 = zu, 1 = offen), die übrigen Felder sind Deckkräfte.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionPose {
    pub secondary_slot: f32,
    pub primary: f32,
    pub decline: f32,
    pub cancel: f32,
}

impl ActionPose {
    pub fn of(mode: UiMode) -> Self {
        match mode {
            UiMode::Answer => Self::new(1.0, 1.0, 1.0, 0.0),
            UiMode::Redial => Self::new(1.0, 1.0, 0.0, 1.0),
            UiMode::Hangup => Self::new(0.0, 1.0, 0.0, 0.0),
            UiMode::None => Self::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    const fn new(secondary_slot: f32, primary: f32, decline: f32, cancel: f32) -> Self {
        Self {
            secondary_slot,
            primary,
            decline,
            cancel,
        }
    }

    pub fn lerp(&self, to: &ActionPose, t: f32) -> Self {
        Self::new(
            lerp(self.secondary_slot, to.secondary_slot, t),
            lerp(self.primary, to.primary, t),
            lerp(self.decline, to.decline, t),
            lerp(self.cancel, to.cancel, t),
        )
    }
}

/// Übergang der Aktions-Buttons von einer Pose zu einem Ziel-Modus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeBlend {
    pub from: ActionPose,
    pub to: UiMode,
    /// Linearer Fortschritt 0-1
    pub progress: f32,
}

impl ModeBlend {
    /// Abgeschlossener Übergang: nur der Ziel-Modus zählt
    pub fn settled(mode: UiMode) -> Self {
        Self {
            from: ActionPose::of(mode),
            to: mode,
            progress: 1.0,
        }
    }

    pub fn pose(&self, easing: Easing) -> ActionPose {
        self.from
            .lerp(&ActionPose::of(self.to), easing.apply(self.progress))
    }
}

/// Platzierung der eigenen Video-Vorschau
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutgoingPlacement {
    Hidden,
    /// Vorschau füllt den Body (vor dem Verbindungsaufbau)
    InBody,
    /// Kleine Bubble in einer Ecke
    Bubble,
}

/// Sichtbare Overlay-Widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlaySet {
    pub fingerprint: bool,
    pub remote_audio_mute: bool,
}

/// Abstand der Vorschau-Bubble zur oberen rechten Ecke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleAnchor {
    pub margin: Insets,
}

/// Alle Eingaben eines Layout-Durchlaufs
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInput {
    pub window: Size,
    pub call_type: CallType,
    pub mode: ModeBlend,
    pub incoming_frame: Option<FrameSize>,
    pub outgoing: OutgoingPlacement,
    pub fullscreen: bool,
    pub title_controls: bool,
    /// Nur im Vollbild wirksam
    pub safe_area: Insets,
    pub overlays: OverlaySet,
}

// ============================================================================
// LAYOUT ENGINE
// ============================================================================

struct ButtonRow {
    screencast: Rect,
    camera: Rect,
    secondary: Rect,
    primary: Rect,
    mute: Rect,
    top: f32,
}

/// Berechnet die Geometrie des Panels
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    style: PanelStyle,
    easing: Easing,
}

impl LayoutEngine {
    pub fn new(style: PanelStyle, easing: Easing) -> Self {
        Self { style, easing }
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    /// Snapshot für die Eingaben; `None` bei einem Fenster ohne Fläche
    pub fn compute(&self, input: &LayoutInput) -> Option<PanelSnapshot> {
        if input.window.is_empty() {
            return None;
        }

        let st = &self.style;
        let bounds = Rect::from_size(input.window);
        let content = bounds.inset(self.content_insets(input));

        // Name und Status oben, über die volle Breite zentriert
        let label_width = (content.width - 2.0 * st.side_padding).max(0.0);
        let name = Rect::new(
            content.x + st.side_padding,
            content.y + st.name_top,
            label_width,
            st.name_height,
        );
        let status = Rect::new(
            name.x,
            name.bottom() + st.status_skip,
            label_width,
            st.status_height,
        );

        let pose = input.mode.pose(self.easing);
        let row = self.button_row(&content, &pose);

        let body_top = status.bottom() + st.body_skip;
        let body_bottom = (row.top - st.button_skip).max(body_top);
        let body = Rect::new(content.x, body_top, content.width, body_bottom - body_top);

        let outgoing_in_body = input.outgoing == OutgoingPlacement::InBody;
        let incoming_video = (!outgoing_in_body
            && (input.call_type == CallType::Video || input.incoming_frame.is_some()))
        .then(|| self.fit_frame(&body, input.incoming_frame));
        let outgoing_video = match input.outgoing {
            OutgoingPlacement::Hidden => None,
            OutgoingPlacement::InBody => Some(self.fit_frame(&body, None)),
            OutgoingPlacement::Bubble => Some(self.bubble_rect(&content, input.overlays)),
        };
        let video_shown = incoming_video.is_some() || outgoing_in_body;

        let userpic_side = st.userpic_size.min(body.width).min(body.height).max(0.0);
        let userpic = Rect::new(
            body.center_x() - userpic_side / 2.0,
            body.center_y() - userpic_side / 2.0,
            userpic_side,
            userpic_side,
        );

        let fingerprint = input.overlays.fingerprint.then(|| {
            WidgetGeometry::visible(Rect::new(
                content.right() - st.fingerprint_margin - st.fingerprint_width,
                content.y + st.fingerprint_margin,
                st.fingerprint_width,
                st.fingerprint_height,
            ))
        });
        let remote_audio_mute = input.overlays.remote_audio_mute.then(|| {
            let width = st.remote_mute_width.min(content.width);
            WidgetGeometry::visible(Rect::new(
                content.center_x() - width / 2.0,
                row.top - st.remote_mute_skip - st.remote_mute_height,
                width,
                st.remote_mute_height,
            ))
        });

        let shadow_height = st.bottom_shadow_height.min(content.height);
        let bottom_shadow = Rect::new(
            content.x,
            content.bottom() - shadow_height,
            content.width,
            shadow_height,
        );

        let snapshot = PanelSnapshot {
            name: WidgetGeometry::visible(name),
            status: WidgetGeometry::visible(status),
            userpic: WidgetGeometry::new(userpic, if video_shown { 0.0 } else { 1.0 }),
            screencast: WidgetGeometry::new(row.screencast, pose.primary),
            camera: WidgetGeometry::new(row.camera, pose.primary),
            mute: WidgetGeometry::new(row.mute, pose.primary),
            primary: WidgetGeometry::new(row.primary, pose.primary),
            decline: WidgetGeometry::new(row.secondary, pose.decline),
            cancel: WidgetGeometry::new(row.secondary, pose.cancel),
            fingerprint,
            remote_audio_mute,
            bottom_shadow: WidgetGeometry::new(bottom_shadow, if video_shown { 1.0 } else { 0.0 }),
            incoming_video,
            outgoing_video,
            outgoing_in_body,
        };

        Some(Self::constrain(snapshot, &bounds))
    }

    /// Größtes zentriertes Rechteck mit dem Seitenverhältnis des Frames
    ///
    /// Der Rest der Fläche bleibt als Letterbox/Pillarbox frei.
    pub fn fit_frame(&self, area: &Rect, frame: Option<FrameSize>) -> Rect {
        let aspect = frame
            .map(|f| f.aspect())
            .unwrap_or(self.style.default_aspect);
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            FALLBACK_ASPECT
        };

        if area.width <= 0.0 || area.height <= 0.0 {
            return Rect::new(area.center_x(), area.center_y(), 0.0, 0.0);
        }

        let (width, height) = if area.width / area.height > aspect {
            // Pillarbox: volle Höhe
            (area.height * aspect, area.height)
        } else {
            // Letterbox: volle Breite
            (area.width, area.width / aspect)
        };

        Rect::new(
            area.center_x() - width / 2.0,
            area.center_y() - height / 2.0,
            width,
            height,
        )
    }

    /// Abstand der Bubble, abhängig von den Overlays
    pub fn bubble_anchor(&self, overlays: OverlaySet) -> BubbleAnchor {
        let st = &self.style;
        let top = if overlays.fingerprint {
            st.fingerprint_margin + st.fingerprint_height + st.bubble_margin
        } else {
            st.bubble_margin
        };
        BubbleAnchor {
            margin: Insets::new(st.bubble_margin, top, st.bubble_margin, st.bubble_margin),
        }
    }

    fn bubble_rect(&self, content: &Rect, overlays: OverlaySet) -> Rect {
        let st = &self.style;
        let (width, height) = (st.bubble_width, st.bubble_height);
        let margin = self.bubble_anchor(overlays).margin;
        let x = content.right() - margin.right - width;
        let y = content.y + margin.top;
        Rect::new(x, y, width, height)
    }

    fn content_insets(&self, input: &LayoutInput) -> Insets {
        let safe = if input.fullscreen {
            input.safe_area
        } else {
            Insets::default()
        };
        // Vollbild und eigene Titel-Controls schließen sich aus
        let title = if input.title_controls && !input.fullscreen {
            self.style.title_controls_height
        } else {
            0.0
        };
        Insets::new(safe.left, safe.top + title, safe.right, safe.bottom)
    }

    /// Screencast - Kamera - Ablehnen/Abbrechen - Primär - Stumm
    ///
    /// Der Ablehnen-Platz schrumpft mit der Pose, die folgenden Buttons
    /// rücken nach; Größen bleiben konstant.
    fn button_row(&self, content: &Rect, pose: &ActionPose) -> ButtonRow {
        let st = &self.style;
        let full = 5.0 * st.button_size + 4.0 * st.button_skip;
        let available = (content.width - 2.0 * st.side_padding).max(0.0);
        let scale = if full > available && full > 0.0 {
            available / full
        } else {
            1.0
        };
        let size = st.button_size * scale;
        let skip = st.button_skip * scale;
        let step = size + skip;

        let slot = pose.secondary_slot.clamp(0.0, 1.0);
        let width = size * (4.0 + slot) + skip * (3.0 + slot);
        let top = content.bottom() - st.buttons_bottom - size;
        let left = content.center_x() - width / 2.0;

        let at = |x: f32| Rect::new(x, top, size, size);
        ButtonRow {
            screencast: at(left),
            camera: at(left + step),
            secondary: at(left + 2.0 * step),
            primary: at(left + (2.0 + slot) * step),
            mute: at(left + (3.0 + slot) * step),
            top,
        }
    }

    /// Schiebt Widgets, die nicht mehr ins Fenster passen, hinein
    ///
    /// Widgets innerhalb des Fensters bleiben unverändert.
    pub fn clamp_to_window(&self, mut snapshot: PanelSnapshot, window: Size) -> PanelSnapshot {
        let bounds = Rect::from_size(window);
        let clamp = |rect: Rect| {
            if bounds.contains(&rect) {
                rect
            } else {
                rect.constrained_to(&bounds)
            }
        };
        for widget in snapshot.widgets_mut() {
            widget.rect = clamp(widget.rect);
        }
        snapshot.incoming_video = snapshot.incoming_video.map(clamp);
        snapshot.outgoing_video = snapshot.outgoing_video.map(clamp);
        snapshot
    }

    fn constrain(mut snapshot: PanelSnapshot, bounds: &Rect) -> PanelSnapshot {
        for widget in snapshot.widgets_mut() {
            widget.rect = widget.rect.constrained_to(bounds);
        }
        snapshot.incoming_video = snapshot.incoming_video.map(|r| r.constrained_to(bounds));
        snapshot.outgoing_video = snapshot.outgoing_video.map(|r| r.constrained_to(bounds));
        snapshot
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(PanelStyle::default(), Easing::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(width: f32, height: f32, mode: ModeBlend) -> LayoutInput {
        LayoutInput {
            window: Size::new(width, height),
            call_type: CallType::Video,
            mode,
            incoming_frame: FrameSize::new(1280, 720),
            outgoing: OutgoingPlacement::Bubble,
            fullscreen: false,
            title_controls: true,
            safe_area: Insets::default(),
            overlays: OverlaySet {
                fingerprint: true,
                remote_audio_mute: true,
            },
        }
    }

    #[test]
    fn test_zero_area_skips_layout() {
        let engine = LayoutEngine::default();
        let mut layout = input(0.0, 400.0, ModeBlend::settled(UiMode::Hangup));
        assert!(engine.compute(&layout).is_none());
        layout.window = Size::new(400.0, 0.0);
        assert!(engine.compute(&layout).is_none());
    }

    #[test]
    fn test_deterministic() {
        let engine = LayoutEngine::default();
        let blend = ModeBlend {
            from: ActionPose::of(UiMode::Answer),
            to: UiMode::Hangup,
            progress: 0.37,
        };
        let layout = input(640.0, 480.0, blend);
        let first = engine.compute(&layout).unwrap();
        let second = engine.compute(&layout).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.rects().iter().zip(second.rects().iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.width.to_bits(), b.width.to_bits());
        }
    }

    #[test]
    fn test_rects_inside_window() {
        let engine = LayoutEngine::default();
        let modes = [UiMode::Answer, UiMode::Hangup, UiMode::Redial, UiMode::None];
        for (width, height) in [(200.0, 200.0), (201.0, 640.0), (1920.0, 1080.0), (300.0, 200.0)] {
            for from in modes {
                for to in modes {
                    for progress in [0.0, 0.3, 0.5, 1.0] {
                        let blend = ModeBlend {
                            from: ActionPose::of(from),
                            to,
                            progress,
                        };
                        let mut layout = input(width, height, blend);
                        for fullscreen in [false, true] {
                            layout.fullscreen = fullscreen;
                            layout.safe_area = Insets::new(10.0, 40.0, 10.0, 20.0);
                            let snapshot = engine.compute(&layout).unwrap();
                            let bounds = Rect::new(0.0, 0.0, width, height);
                            for rect in snapshot.rects() {
                                assert!(bounds.contains(&rect), "{:?} outside {:?}", rect, bounds);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fit_frame_letterbox() {
        let engine = LayoutEngine::default();
        let body = Rect::new(0.0, 0.0, 400.0, 400.0);
        let rect = engine.fit_frame(&body, FrameSize::new(1280, 720));

        assert!((rect.width / rect.height - 1280.0 / 720.0).abs() < 1e-3);
        assert_eq!(rect.width, 400.0);
        // Letterbox: gleich viel Rand oben und unten
        assert!((rect.y - (400.0 - rect.bottom())).abs() < 1e-3);
        assert!(body.contains(&rect));
    }

    #[test]
    fn test_fit_frame_pillarbox() {
        let engine = LayoutEngine::default();
        let body = Rect::new(0.0, 0.0, 800.0, 300.0);
        let rect = engine.fit_frame(&body, FrameSize::new(720, 1280));
        assert_eq!(rect.height, 300.0);
        assert!((rect.x - (800.0 - rect.right())).abs() < 1e-3);
    }

    #[test]
    fn test_fit_frame_unknown_size_uses_default_aspect() {
        let engine = LayoutEngine::default();
        let rect = engine.fit_frame(&Rect::new(0.0, 0.0, 400.0, 400.0), None);
        assert!((rect.width / rect.height - 16.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_incoming_video_fits_body() {
        let engine = LayoutEngine::default();
        let snapshot = engine
            .compute(&input(400.0, 600.0, ModeBlend::settled(UiMode::Hangup)))
            .unwrap();
        let video = snapshot.incoming_video.unwrap();

        assert!((video.width / video.height - 1280.0 / 720.0).abs() < 1e-3);
        assert!(video.y >= snapshot.status.rect.bottom());
        assert!(video.bottom() <= snapshot.primary.rect.y);
        assert!((video.center_x() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_outgoing_preview_in_body_fits_body() {
        let engine = LayoutEngine::default();
        let mut layout = input(400.0, 600.0, ModeBlend::settled(UiMode::Answer));
        layout.outgoing = OutgoingPlacement::InBody;
        let snapshot = engine.compute(&layout).unwrap();
        let preview = snapshot.outgoing_video.unwrap();

        assert!(snapshot.incoming_video.is_none());
        assert!((preview.width / preview.height - 16.0 / 9.0).abs() < 1e-3);
        assert!(preview.y >= snapshot.status.rect.bottom());
        assert!(preview.bottom() <= snapshot.primary.rect.y);
    }

    #[test]
    fn test_clamp_to_window_moves_only_outside_widgets() {
        let engine = LayoutEngine::default();
        let snapshot = engine
            .compute(&input(640.0, 480.0, ModeBlend::settled(UiMode::Hangup)))
            .unwrap();

        assert_eq!(
            engine.clamp_to_window(snapshot.clone(), Size::new(640.0, 480.0)),
            snapshot
        );

        let clamped = engine.clamp_to_window(snapshot.clone(), Size::new(320.0, 240.0));
        let bounds = Rect::new(0.0, 0.0, 320.0, 240.0);
        for rect in clamped.rects() {
            assert!(bounds.contains(&rect), "{:?} outside {:?}", rect, bounds);
        }
        assert_eq!(clamped.name.rect.y, snapshot.name.rect.y);
    }

    #[test]
    fn test_answer_layout_shows_decline() {
        let engine = LayoutEngine::default();
        let snapshot = engine
            .compute(&input(640.0, 480.0, ModeBlend::settled(UiMode::Answer)))
            .unwrap();
        assert_eq!(snapshot.decline.opacity, 1.0);
        assert_eq!(snapshot.cancel.opacity, 0.0);
        assert!(snapshot.decline.rect.x < snapshot.primary.rect.x);
    }

    #[test]
    fn test_hangup_layout_single_control() {
        let engine = LayoutEngine::default();
        let snapshot = engine
            .compute(&input(640.0, 480.0, ModeBlend::settled(UiMode::Hangup)))
            .unwrap();
        assert_eq!(snapshot.decline.opacity, 0.0);
        assert_eq!(snapshot.cancel.opacity, 0.0);
        // Die verbleibenden vier Buttons stehen zentriert
        let center = (snapshot.screencast.rect.x + snapshot.mute.rect.right()) / 2.0;
        assert!((center - 320.0).abs() < 1e-3);
        assert_eq!(snapshot.decline.rect.x, snapshot.primary.rect.x);
    }

    #[test]
    fn test_transition_keeps_button_size() {
        let engine = LayoutEngine::default();
        let blend = ModeBlend {
            from: ActionPose::of(UiMode::Answer),
            to: UiMode::Hangup,
            progress: 0.5,
        };
        let mid = engine.compute(&input(640.0, 480.0, blend)).unwrap();
        let settled = engine
            .compute(&input(640.0, 480.0, ModeBlend::settled(UiMode::Hangup)))
            .unwrap();
        assert_eq!(mid.primary.rect.width, settled.primary.rect.width);
        assert!(mid.decline.opacity > 0.0 && mid.decline.opacity < 1.0);
    }

    #[test]
    fn test_bubble_avoids_fingerprint() {
        let engine = LayoutEngine::default();
        let plain = engine.bubble_anchor(OverlaySet::default());
        let shifted = engine.bubble_anchor(OverlaySet {
            fingerprint: true,
            remote_audio_mute: false,
        });
        assert!(shifted.margin.top > plain.margin.top);

        let snapshot = engine
            .compute(&input(800.0, 600.0, ModeBlend::settled(UiMode::Hangup)))
            .unwrap();
        let bubble = snapshot.outgoing_video.unwrap();
        let fingerprint = snapshot.fingerprint.unwrap().rect;
        assert!(bubble.y >= fingerprint.bottom());
    }

    #[test]
    fn test_fullscreen_ignores_title_controls() {
        let engine = LayoutEngine::default();
        let mut layout = input(640.0, 480.0, ModeBlend::settled(UiMode::Hangup));
        let windowed = engine.compute(&layout).unwrap();
        layout.fullscreen = true;
        let fullscreen = engine.compute(&layout).unwrap();
        assert!(fullscreen.name.rect.y < windowed.name.rect.y);
    }

    #[test]
    fn test_voice_call_shows_userpic() {
        let engine = LayoutEngine::default();
        let mut layout = input(640.0, 480.0, ModeBlend::settled(UiMode::Hangup));
        layout.call_type = CallType::Voice;
        layout.incoming_frame = None;
        layout.outgoing = OutgoingPlacement::Hidden;
        let snapshot = engine.compute(&layout).unwrap();
        assert!(snapshot.incoming_video.is_none());
        assert_eq!(snapshot.userpic.opacity, 1.0);
        assert_eq!(snapshot.bottom_shadow.opacity, 0.0);
    }
}
