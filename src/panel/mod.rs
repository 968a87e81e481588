//! Panel Module - Call-Panel Controller
//!
//! Dieses Modul enthält:
//! - Den Controller mit Zustandsmaschine, Timern und Fenster-Operationen
//! - Den gezeichneten Frame samt Statuszeile
//! - Die Platzierung der eigenen Video-Vorschau
//! - Die Fähigkeit für den Bildschirm-Quellen-Dialog
//! - Den Async-Treiber auf dem UI-Kontext

mod chooser;
mod controller;
mod frame;
mod message;
mod preview;
mod runtime;

pub use chooser::{platform_supports_screencast_audio, ChooserLifetime, ScreenSourceChooserDelegate};
pub use controller::{CallPanelController, PanelDiagnostics};
pub use frame::{status_text, PanelFrame};
pub use message::{panel_channel, PanelAction, PanelMessage, PanelReceiver, PanelSender};
pub use preview::{OutgoingPreview, VideoSinkId};
pub use runtime::run_panel;
