//! Error types for Bouncefield.
//!
//! Nothing here is fatal to the page: a failed tick faults one body,
//! a missing body is skipped, and only a missing container or unusable
//! settings prevent the simulation from being built at all.

use std::fmt;

/// Errors raised by a rendering surface when writing to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The element is no longer attached to the surface.
    Detached(String),
    /// The surface refused the write.
    Rejected { key: String, reason: String },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Detached(key) => write!(f, "Element '{}' is detached", key),
            SurfaceError::Rejected { key, reason } => {
                write!(f, "Surface rejected write to '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Errors that can occur while building or ticking the simulation.
#[derive(Debug)]
pub enum SimError {
    /// The container element could not be located.
    MissingContainer,
    /// A movable element could not be measured.
    MissingBody(String),
    /// Rendering a body failed.
    Surface(SurfaceError),
    /// Settings hold a value the simulation can't run with.
    Settings(SettingsError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MissingContainer => write!(f, "Container element not found"),
            SimError::MissingBody(key) => write!(f, "Movable element '{}' not found", key),
            SimError::Surface(e) => write!(f, "Render failed: {}", e),
            SimError::Settings(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Surface(e) => Some(e),
            SimError::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SurfaceError> for SimError {
    fn from(e: SurfaceError) -> Self {
        SimError::Surface(e)
    }
}

impl From<SettingsError> for SimError {
    fn from(e: SettingsError) -> Self {
        SimError::Settings(e)
    }
}

/// Errors that can occur while loading settings.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read the settings file.
    Io(std::io::Error),
    /// Settings file is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),
    /// Settings parsed but hold an unusable value.
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "Invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
