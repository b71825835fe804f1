//! Capability configuration loading.
//!
//! Decodes a capability set from YAML or JSON. The document shape is:
//!
//! ```yaml
//! capabilities:
//!   V2_0:
//!     required: true
//!   V1_4_2: {}      # not required
//!   Experimental: ~ # not required
//! ```

use crate::capabilities::CapabilitySet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load capability config from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    Load {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Failed to parse {format} capability config{}: {reason}{}", .path.as_ref().map(|p| format!(" {}", p)).unwrap_or_default(), .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    Parse {
        format: &'static str,
        path: Option<String>,
        reason: String,
        hint: Option<String>,
    },

    #[error("Unsupported config format for {path}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    UnsupportedFormat { path: String, hint: Option<String> },
}

impl ConfigError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            ConfigError::Load { ref mut hint, .. } => *hint = hint_val,
            ConfigError::Parse { ref mut hint, .. } => *hint = hint_val,
            ConfigError::UnsupportedFormat { ref mut hint, .. } => *hint = hint_val,
        }
        self
    }

    /// Record the file an error came from, where the variant does not already.
    fn with_path(mut self, source: &Path) -> Self {
        if let ConfigError::Parse { ref mut path, .. } = self {
            *path = Some(source.display().to_string());
        }
        self
    }
}

/// Decoded capability configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitiesConfig {
    #[serde(default)]
    pub capabilities: CapabilitySet,
}

impl CapabilitiesConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            format: "YAML",
            path: None,
            reason: e.to_string(),
            hint: None,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            format: "JSON",
            path: None,
            reason: e.to_string(),
            hint: None,
        })
    }

    /// Load from a file, choosing the decoder by extension.
    ///
    /// `.json` is JSON; `.yaml`, `.yml` and extension-less files are YAML.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        let decode: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") | None => Self::from_yaml_str,
            Some(_) => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                    hint: None,
                }
                .with_hint("Use a .yaml, .yml or .json file"))
            }
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Load {
                path: path.display().to_string(),
                reason: e.to_string(),
                hint: None,
            }
            .with_hint("Check that the file exists and is readable")
        })?;

        let config = decode(&content).map_err(|e| e.with_path(path))?;

        tracing::debug!(
            path = %path.display(),
            capabilities = config.capabilities.len(),
            "loaded capability config"
        );
        Ok(config)
    }

    pub fn into_capability_set(self) -> CapabilitySet {
        self.capabilities
    }
}
