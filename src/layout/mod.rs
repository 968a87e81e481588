//! Layout Module - Geometrie des Call-Panels
//!
//! Dieses Modul enthält:
//! - Geometrie-Grundtypen (Size, Rect, Insets)
//! - Den unveränderlichen PanelSnapshot
//! - Die zustandslose LayoutEngine

mod engine;
mod geometry;
mod snapshot;
mod style;

pub use engine::{
    ActionPose, BubbleAnchor, LayoutEngine, LayoutInput, ModeBlend, OutgoingPlacement,
    OverlaySet,
};
pub use geometry::{lerp, Insets, Rect, Size};
pub use snapshot::{PanelSnapshot, WidgetGeometry};
pub use style::PanelStyle;
