//! Power Module - Display-Sleep-Inhibitor
//!
//! Dieses Modul verwaltet:
//! - Den Power-Save Scope (höchstens ein Inhibitor pro Panel)
//! - Backends: No-op und freedesktop ScreenSaver (Feature `dbus-inhibit`)

#[cfg(feature = "dbus-inhibit")]
mod dbus;
mod scope;

#[cfg(feature = "dbus-inhibit")]
pub use dbus::DbusScreenSaverInhibitor;
pub use scope::{
    DisplaySleepInhibitor, InhibitorHandle, NoopInhibitor, PowerSaveError, PowerSaveScope,
};
