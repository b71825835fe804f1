//! Capability error types

/// Raised when the local binary cannot satisfy a capability set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("{provider_type} capability {capability} is required but not supported")]
    Unsupported {
        provider_type: String,
        capability: String,
    },
}

impl CapabilityError {
    /// Category label of the provider that rejected the capability.
    pub fn provider_type(&self) -> &str {
        match self {
            CapabilityError::Unsupported { provider_type, .. } => provider_type,
        }
    }

    /// Name of the unsupported capability.
    pub fn capability(&self) -> &str {
        match self {
            CapabilityError::Unsupported { capability, .. } => capability,
        }
    }
}
