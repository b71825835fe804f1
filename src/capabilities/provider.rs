//! Capability providers.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Reports which capabilities the running binary understands.
///
/// Implementations must be total: an unknown name answers `false`, never
/// panics. Two builds of the same context differ only in the names for which
/// `has_capability` returns `true`.
pub trait CapabilityProvider {
    /// Whether this binary supports `capability`.
    fn has_capability(&self, capability: &str) -> bool;

    /// Category label used in error messages and diagnostics, e.g. `"Channel"`.
    /// Never empty.
    fn provider_type(&self) -> &str;
}

impl<P: CapabilityProvider + ?Sized> CapabilityProvider for &P {
    fn has_capability(&self, capability: &str) -> bool {
        (**self).has_capability(capability)
    }
    fn provider_type(&self) -> &str {
        (**self).provider_type()
    }
}

impl<P: CapabilityProvider + ?Sized> CapabilityProvider for Box<P> {
    fn has_capability(&self, capability: &str) -> bool {
        (**self).has_capability(capability)
    }
    fn provider_type(&self) -> &str {
        (**self).provider_type()
    }
}

impl<P: CapabilityProvider + ?Sized> CapabilityProvider for Arc<P> {
    fn has_capability(&self, capability: &str) -> bool {
        (**self).has_capability(capability)
    }
    fn provider_type(&self) -> &str {
        (**self).provider_type()
    }
}

/// Provider backed by a fixed list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProvider {
    provider_type: String,
    supported: BTreeSet<String>,
}

impl StaticProvider {
    /// `provider_type` must be non-empty; it names the provider in errors.
    pub fn new<I, S>(provider_type: impl Into<String>, supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider_type = provider_type.into();
        debug_assert!(!provider_type.is_empty(), "provider type label must not be empty");
        Self {
            provider_type,
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }

    /// Names this provider answers `true` for, in ascending order.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.supported.iter().map(String::as_str)
    }
}

impl CapabilityProvider for StaticProvider {
    fn has_capability(&self, capability: &str) -> bool {
        self.supported.contains(capability)
    }

    fn provider_type(&self) -> &str {
        &self.provider_type
    }
}
