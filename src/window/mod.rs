//! Window Module - Vertrag zum Fenster-Kollaborator
//!
//! Das Panel malt nicht selbst. Es beschreibt jeden Layout-Durchlauf als
//! [`PanelFrame`](crate::panel::PanelFrame) und übergibt ihn dem Fenster,
//! zusammen mit den Fenster-Operationen (Vollbild, Anzeigen, Pinnen).

#[cfg(feature = "tauri-window")]
mod webview;

#[cfg(feature = "tauri-window")]
pub use webview::{bridge_events, TauriPanelWindow};

use crate::layout::{Insets, Size};
use crate::panel::PanelFrame;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Window backend error: {0}")]
    Backend(String),
}

/// Äußere Fenstergeometrie in Bildschirm-Koordinaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Handle der Zeichenfläche, Elternteil für den Quellen-Auswahldialog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(pub String);

/// Fenster-Operationen, die das Panel anfordert
///
/// Alle Aufrufe kommen aus dem UI-Kontext. Sichtbarkeits-Operationen
/// müssen idempotent sein.
pub trait PanelWindow {
    fn create(&mut self) -> Result<(), WindowError>;
    fn destroy(&mut self);

    /// Innere Größe in logischen Pixeln
    fn size(&self) -> Size;
    fn geometry(&self) -> WindowRect;
    fn set_geometry(&mut self, rect: WindowRect);
    fn set_fullscreen(&mut self, fullscreen: bool);

    fn show(&mut self);
    fn hide(&mut self);
    fn activate(&mut self);
    fn minimize(&mut self);
    fn restore(&mut self);
    fn is_visible(&self) -> bool;
    fn is_minimized(&self) -> bool;
    fn is_active(&self) -> bool;
    fn set_always_on_top(&mut self, pinned: bool);

    /// Plattform zeichnet eigene Titel-Controls (Schließen, Minimieren)
    fn has_custom_title_controls(&self) -> bool;
    fn set_title_controls_visible(&mut self, visible: bool);
    fn safe_area(&self) -> Insets;
    fn surface_handle(&self) -> SurfaceHandle;

    /// Übernimmt die Geometrien und fordert ein Neuzeichnen an
    fn present(&mut self, frame: &PanelFrame);
}
