//! Tauri Webview als Fenster-Kollaborator
//!
//! Die Fenster-Operationen gehen direkt an das `WebviewWindow`, jeder
//! Layout-Durchlauf wird als `panel:frame` Event ans Frontend gesendet,
//! das die Widgets zeichnet.

use super::{PanelWindow, SurfaceHandle, WindowError, WindowRect};
use crate::layout::{Insets, Size};
use crate::panel::{PanelAction, PanelFrame, PanelMessage, PanelSender};
use serde::Deserialize;
use tauri::{Emitter, Listener, PhysicalPosition, PhysicalSize, WebviewWindow, WindowEvent};

/// Auswahl im Quellen-Dialog des Frontends
#[derive(Debug, Deserialize)]
struct SourceChoice {
    device_id: Option<String>,
    with_audio: bool,
}

/// Leitet Fenster- und Frontend-Events in den UI-Kanal des Panels
pub fn bridge_events(window: &WebviewWindow, sender: &PanelSender) {
    let events = sender.clone();
    window.on_window_event(move |event| {
        let message = match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                PanelMessage::Resized
            }
            WindowEvent::CloseRequested { api, .. } => {
                // Das Panel entscheidet selbst, wann das Fenster geht
                api.prevent_close();
                PanelMessage::CloseRequested
            }
            _ => return,
        };
        let _ = events.send(message);
    });

    let actions = sender.clone();
    window.listen("panel:action", move |event| {
        match serde_json::from_str::<PanelAction>(event.payload()) {
            Ok(action) => {
                let _ = actions.send(PanelMessage::Action(action));
            }
            Err(e) => tracing::warn!("Invalid panel action from webview: {}", e),
        }
    });

    let fullscreen = sender.clone();
    window.listen("panel:fullscreen", move |event| {
        match serde_json::from_str::<bool>(event.payload()) {
            Ok(on) => {
                let _ = fullscreen.send(PanelMessage::FullScreen(on));
            }
            Err(e) => tracing::warn!("Invalid fullscreen request from webview: {}", e),
        }
    });

    let chooser = sender.clone();
    window.listen("panel:source", move |event| {
        let message = match serde_json::from_str::<SourceChoice>(event.payload()) {
            Ok(SourceChoice {
                device_id: Some(device_id),
                with_audio,
            }) => PanelMessage::SourceChosen {
                device_id,
                with_audio,
            },
            Ok(SourceChoice { device_id: None, .. }) => PanelMessage::ChooserClosed,
            Err(e) => {
                tracing::warn!("Invalid source choice from webview: {}", e);
                return;
            }
        };
        let _ = chooser.send(message);
    });
}

pub struct TauriPanelWindow {
    window: WebviewWindow,
    title_controls_visible: bool,
}

impl TauriPanelWindow {
    pub fn new(window: WebviewWindow) -> Self {
        Self {
            window,
            title_controls_visible: false,
        }
    }

    fn log_failure(operation: &str, result: tauri::Result<()>) {
        if let Err(e) = result {
            tracing::warn!("Window {} failed: {}", operation, e);
        }
    }
}

impl PanelWindow for TauriPanelWindow {
    fn create(&mut self) -> Result<(), WindowError> {
        // Das Webview-Fenster existiert bereits, es wird nur noch gezeigt
        self.window
            .show()
            .map_err(|e| WindowError::Backend(e.to_string()))
    }

    fn destroy(&mut self) {
        Self::log_failure("destroy", self.window.destroy());
    }

    fn size(&self) -> Size {
        let physical = self.window.inner_size().unwrap_or_default();
        let scale = self.window.scale_factor().unwrap_or(1.0);
        Size::new(
            (physical.width as f64 / scale) as f32,
            (physical.height as f64 / scale) as f32,
        )
    }

    fn geometry(&self) -> WindowRect {
        let position = self.window.outer_position().unwrap_or_default();
        let size = self.window.outer_size().unwrap_or_default();
        WindowRect::new(position.x, position.y, size.width, size.height)
    }

    fn set_geometry(&mut self, rect: WindowRect) {
        Self::log_failure(
            "set_position",
            self.window.set_position(PhysicalPosition::new(rect.x, rect.y)),
        );
        Self::log_failure(
            "set_size",
            self.window
                .set_size(PhysicalSize::new(rect.width, rect.height)),
        );
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        Self::log_failure("set_fullscreen", self.window.set_fullscreen(fullscreen));
    }

    fn show(&mut self) {
        Self::log_failure("show", self.window.show());
    }

    fn hide(&mut self) {
        Self::log_failure("hide", self.window.hide());
    }

    fn activate(&mut self) {
        Self::log_failure("set_focus", self.window.set_focus());
    }

    fn minimize(&mut self) {
        Self::log_failure("minimize", self.window.minimize());
    }

    fn restore(&mut self) {
        Self::log_failure("unminimize", self.window.unminimize());
    }

    fn is_visible(&self) -> bool {
        self.window.is_visible().unwrap_or(false)
    }

    fn is_minimized(&self) -> bool {
        self.window.is_minimized().unwrap_or(false)
    }

    fn is_active(&self) -> bool {
        self.window.is_focused().unwrap_or(false)
    }

    fn set_always_on_top(&mut self, pinned: bool) {
        Self::log_failure("set_always_on_top", self.window.set_always_on_top(pinned));
    }

    fn has_custom_title_controls(&self) -> bool {
        // Rahmenlose Fenster zeichnen ihre Titel-Controls im Frontend
        !self.window.is_decorated().unwrap_or(true)
    }

    fn set_title_controls_visible(&mut self, visible: bool) {
        if self.title_controls_visible == visible {
            return;
        }
        self.title_controls_visible = visible;
        Self::log_failure(
            "emit title controls",
            self.window.emit("panel:title_controls", visible),
        );
    }

    fn safe_area(&self) -> Insets {
        Insets::default()
    }

    fn surface_handle(&self) -> SurfaceHandle {
        SurfaceHandle(self.window.label().to_string())
    }

    fn present(&mut self, frame: &PanelFrame) {
        Self::log_failure("emit frame", self.window.emit("panel:frame", frame));
    }
}
