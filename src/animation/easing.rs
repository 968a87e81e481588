//! Easing-Funktionen für Übergänge
//!
//! Beide Kurven sind monoton und stetig auf [0, 1].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Wendet die Kurve auf einen Fortschritt (0-1) an
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
