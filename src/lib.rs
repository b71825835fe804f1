//! # capability-registry
//!
//! 能力兼容性注册表：校验本地二进制是否支持网络约定的能力集合。
//!
//! Capability-compatibility registry. A binary declares which named protocol
//! features it understands through a [`CapabilityProvider`]; a configuration
//! declares which features a channel, orderer or application context needs
//! through a [`CapabilitySet`]. [`Registry::supported`] decides whether this
//! binary may take part.
//!
//! - A **required** capability the binary lacks is an error. The embedding
//!   system must refuse to process that context.
//! - An **optional** capability the binary lacks is reported to the
//!   registry's [`DiagnosticSink`] and otherwise ignored.
//!
//! The registry never decides which capabilities are enabled and never
//! mutates the set it is given.
//!
//! ## Quick Start
//!
//! ```rust
//! use capability_registry::{Capability, CapabilitySet, ChannelProvider, Registry};
//!
//! let capabilities: CapabilitySet = vec![
//!     ("V2_0", Capability::required()),
//!     ("Experimental", Capability::optional()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let registry = Registry::new(ChannelProvider, capabilities);
//! assert!(registry.supported().is_ok());
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`capabilities`] | Descriptors, capability sets, providers |
//! | [`registry`] | The compatibility check |
//! | [`diagnostics`] | Injectable sinks for advisory events |
//! | [`config`] | YAML/JSON capability configuration loading |
//! | [`error`] | Crate-level error aggregate |

pub mod capabilities;
pub mod config;
pub mod diagnostics;
pub mod registry;

// Re-export main types for convenience
pub use capabilities::{
    ApplicationProvider, Capability, CapabilityError, CapabilityProvider, CapabilitySet,
    ChannelProvider, Context, OrdererProvider, StaticProvider,
};
pub use config::{CapabilitiesConfig, ConfigError};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink};
pub use registry::{CapabilityStatus, Registry};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
