//! Animation Module - Übergänge zwischen UI-Modi
//!
//! Dieses Modul enthält:
//! - Easing-Kurven
//! - Den TransitionAnimator (abbrechbar, jederzeit auflösbar)

mod easing;
mod transition;

pub use easing::Easing;
pub use transition::TransitionAnimator;
