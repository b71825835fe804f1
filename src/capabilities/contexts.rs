//! Built-in providers for each deployment context.
//!
//! Each provider hard-wires the capability names this release understands for
//! its context. A newer release adds names here; an older one simply lacks them.

use super::provider::CapabilityProvider;
use std::fmt;
use std::str::FromStr;

/// Label reported by [`ChannelProvider`].
pub const CHANNEL_TYPE_NAME: &str = "Channel";
/// Label reported by [`OrdererProvider`].
pub const ORDERER_TYPE_NAME: &str = "Orderer";
/// Label reported by [`ApplicationProvider`].
pub const APPLICATION_TYPE_NAME: &str = "Application";

/// Channel capabilities understood by this release.
pub const CHANNEL_CAPABILITIES: &[&str] = &["V1_1", "V1_3", "V1_4_2", "V1_4_3", "V2_0"];
/// Orderer capabilities understood by this release.
pub const ORDERER_CAPABILITIES: &[&str] = &["V1_1", "V1_4_2", "V2_0"];
/// Application capabilities understood by this release.
pub const APPLICATION_CAPABILITIES: &[&str] = &["V1_1", "V1_2", "V1_3", "V1_4_2", "V2_0"];

/// Channel-level capabilities of this binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelProvider;

impl CapabilityProvider for ChannelProvider {
    fn has_capability(&self, capability: &str) -> bool {
        CHANNEL_CAPABILITIES.contains(&capability)
    }
    fn provider_type(&self) -> &str {
        CHANNEL_TYPE_NAME
    }
}

/// Orderer capabilities of this binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdererProvider;

impl CapabilityProvider for OrdererProvider {
    fn has_capability(&self, capability: &str) -> bool {
        ORDERER_CAPABILITIES.contains(&capability)
    }
    fn provider_type(&self) -> &str {
        ORDERER_TYPE_NAME
    }
}

/// Application capabilities of this binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationProvider;

impl CapabilityProvider for ApplicationProvider {
    fn has_capability(&self, capability: &str) -> bool {
        APPLICATION_CAPABILITIES.contains(&capability)
    }
    fn provider_type(&self) -> &str {
        APPLICATION_TYPE_NAME
    }
}

/// Deployment context selector, parsed from `channel`, `orderer` or `application`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Channel,
    Orderer,
    Application,
}

impl Context {
    pub const ALL: [Context; 3] = [Context::Channel, Context::Orderer, Context::Application];

    /// Provider for this context's capability list.
    pub fn provider(&self) -> Box<dyn CapabilityProvider + Send + Sync> {
        match self {
            Self::Channel => Box::new(ChannelProvider),
            Self::Orderer => Box::new(OrdererProvider),
            Self::Application => Box::new(ApplicationProvider),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Orderer => "orderer",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "channel" => Ok(Self::Channel),
            "orderer" => Ok(Self::Orderer),
            "application" => Ok(Self::Application),
            other => Err(format!(
                "unknown context '{}' (expected channel, orderer or application)",
                other
            )),
        }
    }
}
