//! Feste Layout-Metriken des Call-Panels

use serde::{Deserialize, Serialize};

/// Stil-Metriken in logischen Pixeln
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub side_padding: f32,
    pub title_controls_height: f32,

    pub name_top: f32,
    pub name_height: f32,
    pub status_skip: f32,
    pub status_height: f32,
    pub body_skip: f32,
    pub userpic_size: f32,

    pub button_size: f32,
    pub button_skip: f32,
    pub buttons_bottom: f32,
    pub bottom_shadow_height: f32,

    pub bubble_width: f32,
    pub bubble_height: f32,
    pub bubble_margin: f32,

    pub fingerprint_width: f32,
    pub fingerprint_height: f32,
    pub fingerprint_margin: f32,

    pub remote_mute_width: f32,
    pub remote_mute_height: f32,
    pub remote_mute_skip: f32,

    /// Seitenverhältnis solange keine Frame-Größe bekannt ist
    pub default_aspect: f32,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            side_padding: 16.0,
            title_controls_height: 32.0,
            name_top: 24.0,
            name_height: 28.0,
            status_skip: 4.0,
            status_height: 20.0,
            body_skip: 16.0,
            userpic_size: 120.0,
            button_size: 56.0,
            button_skip: 16.0,
            buttons_bottom: 24.0,
            bottom_shadow_height: 120.0,
            bubble_width: 120.0,
            bubble_height: 90.0,
            bubble_margin: 12.0,
            fingerprint_width: 84.0,
            fingerprint_height: 28.0,
            fingerprint_margin: 12.0,
            remote_mute_width: 180.0,
            remote_mute_height: 28.0,
            remote_mute_skip: 12.0,
            default_aspect: 16.0 / 9.0,
        }
    }
}
