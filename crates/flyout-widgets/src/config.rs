#![forbid(unsafe_code)]

//! Per-flyout defaults as data.
//!
//! A [`FlyoutConfig`] carries the values a flyout starts with before any
//! property assignment or per-show override. With the `config` feature it can
//! be loaded from TOML or JSON:
//!
//! ```toml
//! placement = "autovertical"
//! alignment = "left"
//! menu = true
//! ```
//!
//! Loaders validate after parsing, so a file naming `cartesian` or `none`
//! is rejected rather than silently accepted.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use flyout_layout::{Alignment, DEFAULT_POPUP_OFFSET, PlacementMode};

/// Initial settings for a flyout instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FlyoutConfig {
    /// Default placement strategy.
    pub placement: PlacementMode,
    /// Default alignment along the perpendicular axis.
    pub alignment: Alignment,
    /// Menu-style focus: the flyout takes focus without a visible indicator.
    pub menu: bool,
    /// Sticky flyouts do not raise the light-dismiss surface.
    pub sticky: bool,
    /// Entrance transition travel, in pixels.
    pub popup_offset: f64,
}

impl Default for FlyoutConfig {
    fn default() -> Self {
        Self {
            placement: PlacementMode::Auto,
            alignment: Alignment::Center,
            menu: false,
            sticky: false,
            popup_offset: DEFAULT_POPUP_OFFSET,
        }
    }
}

impl FlyoutConfig {
    /// Defaults for menu-style flyouts.
    pub fn menu() -> Self {
        Self {
            menu: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_placement(mut self, placement: PlacementMode) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    #[must_use]
    pub fn with_popup_offset(mut self, offset: f64) -> Self {
        self.popup_offset = offset;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check every field. An empty list means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.placement.is_assignable() {
            errors.push(format!(
                "placement {:?} is only valid for point-based shows",
                self.placement.as_str()
            ));
        }

        if !self.alignment.is_assignable() {
            errors.push(format!(
                "alignment {:?} is only valid for point-based shows",
                self.alignment.as_str()
            ));
        }

        if !self.popup_offset.is_finite() || self.popup_offset < 0.0 {
            errors.push(format!(
                "popup_offset must be a finite value >= 0, got {}",
                self.popup_offset
            ));
        }

        errors
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a flyout configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
