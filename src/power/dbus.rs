//! freedesktop ScreenSaver Inhibitor über D-Bus

use super::scope::{DisplaySleepInhibitor, InhibitorHandle, PowerSaveError};
use zbus::blocking::Connection;

const DESTINATION: &str = "org.freedesktop.ScreenSaver";
const PATH: &str = "/org/freedesktop/ScreenSaver";
const INTERFACE: &str = "org.freedesktop.ScreenSaver";

/// Inhibitor über `org.freedesktop.ScreenSaver.Inhibit`
pub struct DbusScreenSaverInhibitor {
    connection: Option<Connection>,
    application: String,
}

impl DbusScreenSaverInhibitor {
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            connection: None,
            application: application.into(),
        }
    }

    /// Session-Bus wird erst beim ersten Erwerb geöffnet
    fn connection(&mut self) -> Result<&Connection, PowerSaveError> {
        if self.connection.is_none() {
            let connection =
                Connection::session().map_err(|e| PowerSaveError::Backend(e.to_string()))?;
            self.connection = Some(connection);
        }
        self.connection.as_ref().ok_or(PowerSaveError::Unavailable)
    }
}

impl DisplaySleepInhibitor for DbusScreenSaverInhibitor {
    fn acquire(&mut self, reason: &str) -> Result<InhibitorHandle, PowerSaveError> {
        let application = self.application.clone();
        let reply = self
            .connection()?
            .call_method(
                Some(DESTINATION),
                PATH,
                Some(INTERFACE),
                "Inhibit",
                &(application.as_str(), reason),
            )
            .map_err(|e| PowerSaveError::Backend(e.to_string()))?;

        let cookie: u32 = reply
            .body()
            .deserialize()
            .map_err(|e| PowerSaveError::Backend(e.to_string()))?;

        Ok(InhibitorHandle::new(cookie))
    }

    fn release(&mut self, handle: InhibitorHandle) -> Result<(), PowerSaveError> {
        self.connection()?
            .call_method(
                Some(DESTINATION),
                PATH,
                Some(INTERFACE),
                "UnInhibit",
                &(handle.cookie(),),
            )
            .map_err(|e| PowerSaveError::Backend(e.to_string()))?;
        Ok(())
    }
}
