//! Geometrie-Grundtypen in logischen Pixeln

use serde::{Deserialize, Serialize};

/// Lineare Interpolation zwischen zwei Werten
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fenster mit Fläche 0 gilt als versteckt
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Rechteck um die Insets verkleinert, nie mit negativer Größe
    pub fn inset(&self, insets: Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0.0),
            (self.height - insets.top - insets.bottom).max(0.0),
        )
    }

    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 1e-3;
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// Verschiebt und verkleinert das Rechteck bis es in `bounds` liegt
    pub fn constrained_to(&self, bounds: &Rect) -> Self {
        let width = self.width.min(bounds.width).max(0.0);
        let height = self.height.min(bounds.height).max(0.0);
        let x = self.x.min(bounds.right() - width).max(bounds.x);
        let y = self.y.min(bounds.bottom() - height).max(bounds.y);
        Self::new(x, y, width, height)
    }

    pub fn lerp(&self, to: &Rect, t: f32) -> Self {
        Self::new(
            lerp(self.x, to.x, t),
            lerp(self.y, to.y, t),
            lerp(self.width, to.width, t),
            lerp(self.height, to.height, t),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
