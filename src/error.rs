use crate::capabilities::CapabilityError;
use crate::config::ConfigError;
use thiserror::Error;

/// Unified error type for the capability registry.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Capability check failed: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether operator action on the binary or the configuration is needed,
    /// as opposed to fixing a malformed input.
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Error::Capability(_))
    }
}

