//! Call Module - Vertrag zum Call-Kollaborator
//!
//! Dieses Modul enthält:
//! - Call-Zustände und die Ableitung des UI-Modus
//! - Events und Video-Metadaten
//! - Abonnements mit Weiterleitung in den UI-Kontext

mod state;
mod subscription;

pub use state::{CallEvent, CallId, CallSession, CallState, CallType, FrameSize, UiMode};
pub use subscription::CallSubscription;
