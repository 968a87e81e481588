//! Panel-Konfiguration
//!
//! Wird aus einer JSON-Datei geladen. Pfad: `CALL_PANEL_CONFIG` oder
//! `<config_dir>/panel.json`. Fehlende Felder bekommen Standardwerte.

use crate::animation::Easing;
use crate::layout::PanelStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Umgebungsvariable mit dem Pfad zur Konfigurationsdatei
pub const CONFIG_ENV: &str = "CALL_PANEL_CONFIG";

const CONFIG_FILE: &str = "panel.json";

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// PANEL CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub style: PanelStyle,
    pub easing: Easing,
    /// Dauer des Modus-Übergangs der Aktions-Buttons
    pub transition_ms: u64,
    pub duration_tick_ms: u64,
    /// Abtastrate für den Audio-Ripple um das Profilbild
    pub ripple_sample_ms: u64,
    pub frame_interval_ms: u64,
    /// Überschreibt die Plattform-Erkennung für Bildschirm + Audio
    pub screencast_audio: Option<bool>,
    pub inhibit_reason: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            style: PanelStyle::default(),
            easing: Easing::default(),
            transition_ms: 200,
            duration_tick_ms: 1000,
            ripple_sample_ms: 100,
            frame_interval_ms: 16,
            screencast_audio: None,
            inhibit_reason: "Call in progress".to_string(),
        }
    }
}

impl PanelConfig {
    /// Lädt die Konfiguration; ohne Datei gelten die Standardwerte
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            Some(path) => {
                tracing::debug!("No panel config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded panel config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Obergrenze zwischen zwei Aktualisierungen der Anrufdauer
    pub fn duration_tick(&self) -> Duration {
        Duration::from_millis(self.duration_tick_ms.max(1))
    }

    pub fn ripple_sample(&self) -> Duration {
        Duration::from_millis(self.ripple_sample_ms.max(1))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("com", "kaufm", "call-panel")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

// ============================================================================
// TESTS
// ============================================================================
