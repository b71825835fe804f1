//! 能力注册表 — 校验配置声明的能力集合是否被本地二进制支持
//!
//! Capability registry that checks a configuration's capability set against
//! what the local binary supports. A missing required capability fails the
//! check; a missing optional one is reported to the diagnostics sink and
//! tolerated.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::capabilities::{CapabilityError, CapabilityProvider, CapabilitySet};
use crate::config::CapabilitiesConfig;
use crate::diagnostics::{self, DiagnosticEvent, DiagnosticSink};

/// Binds one provider to one capability set.
///
/// Both are fixed at construction. A changed capability set needs a new
/// registry; [`Registry::supported`] can be called any number of times, from
/// any number of threads, and always gives the same answer.
pub struct Registry<P> {
    provider: P,
    capabilities: CapabilitySet,
    sink: Arc<dyn DiagnosticSink>,
}

impl<P: CapabilityProvider> Registry<P> {
    /// Create a registry that reports diagnostics through `tracing`.
    pub fn new(provider: P, capabilities: impl Into<CapabilitySet>) -> Self {
        Self::with_sink(provider, capabilities, diagnostics::default_sink())
    }

    pub fn with_sink(
        provider: P,
        capabilities: impl Into<CapabilitySet>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            provider,
            capabilities: capabilities.into(),
            sink,
        }
    }

    /// Load a capability configuration file and bind it to `provider`.
    pub fn from_config_file(provider: P, path: impl AsRef<Path>) -> crate::Result<Self> {
        let config = CapabilitiesConfig::load_from_file(path)?;
        Ok(Self::new(provider, config.into_capability_set()))
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Check that every required capability is supported by this binary.
    ///
    /// Entries are visited in ascending name order. The first unsupported
    /// required capability ends the check, so when several are missing the
    /// error names the smallest one; use [`Registry::unsupported_required`]
    /// to list them all. Unsupported optional capabilities seen before that
    /// point, and the failing required one, are reported to the sink.
    pub fn supported(&self) -> Result<(), CapabilityError> {
        let provider_type = self.provider.provider_type();

        for (name, capability) in self.capabilities.iter() {
            if self.provider.has_capability(name) {
                continue;
            }

            if capability.required {
                self.sink.report(DiagnosticEvent::RequiredUnsupported {
                    provider_type: provider_type.to_string(),
                    capability: name.to_string(),
                });
                return Err(CapabilityError::Unsupported {
                    provider_type: provider_type.to_string(),
                    capability: name.to_string(),
                });
            }

            self.sink.report(DiagnosticEvent::OptionalUnsupported {
                provider_type: provider_type.to_string(),
                capability: name.to_string(),
            });
        }

        Ok(())
    }

    /// Every required capability this binary lacks, in ascending order.
    pub fn unsupported_required(&self) -> Vec<String> {
        self.capabilities
            .required_names()
            .filter(|name| !self.provider.has_capability(name))
            .map(String::from)
            .collect()
    }

    /// Per-capability status. Does not report anything to the sink.
    pub fn status_report(&self) -> BTreeMap<String, CapabilityStatus> {
        self.capabilities
            .iter()
            .map(|(name, capability)| {
                let status = if self.provider.has_capability(name) {
                    CapabilityStatus::Active {
                        required: capability.required,
                    }
                } else {
                    CapabilityStatus::Unsupported {
                        required: capability.required,
                    }
                };
                (name.to_string(), status)
            })
            .collect()
    }
}

impl<P: CapabilityProvider> fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("provider_type", &self.provider.provider_type())
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Status of a declared capability against the local binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    Active { required: bool },
    Unsupported { required: bool },
}

impl CapabilityStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CapabilityStatus::Active { .. })
    }

    /// Whether this status alone fails [`Registry::supported`].
    pub fn is_blocking(&self) -> bool {
        matches!(self, CapabilityStatus::Unsupported { required: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Capability, StaticProvider};
    use crate::diagnostics::InMemorySink;

    fn set(entries: &[(&str, bool)]) -> CapabilitySet {
        entries
            .iter()
            .map(|(name, required)| {
                let cap = if *required {
                    Capability::required()
                } else {
                    Capability::optional()
                };
                (*name, cap)
            })
            .collect()
    }

    #[test]
    fn test_supported_pass() {
        let provider = StaticProvider::new("Channel", ["V1_4_2", "V2_0"]);
        let registry = Registry::new(provider, set(&[("V2_0", true), ("V1_4_2", false)]));
        assert!(registry.supported().is_ok());
    }

    #[test]
    fn test_first_missing_required_in_name_order() {
        let provider = StaticProvider::new("Orderer", Vec::<String>::new());
        let registry = Registry::with_sink(
            provider,
            set(&[("C", true), ("A", false), ("B", true)]),
            Arc::new(InMemorySink::new()),
        );
        let err = registry.supported().unwrap_err();
        assert_eq!(err.capability(), "B");
        assert_eq!(err.provider_type(), "Orderer");
        assert_eq!(registry.unsupported_required(), vec!["B", "C"]);
    }

    #[test]
    fn test_optional_reported_before_failure() {
        let sink = Arc::new(InMemorySink::new());
        let provider = StaticProvider::new("Application", Vec::<String>::new());
        let registry = Registry::with_sink(
            provider,
            set(&[("A", false), ("B", true), ("C", false)]),
            sink.clone(),
        );
        assert!(registry.supported().is_err());
        // "C" sorts after the failing entry and is never visited.
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(!events[0].is_required());
        assert_eq!(events[0].capability(), "A");
        assert!(events[1].is_required());
        assert_eq!(events[1].capability(), "B");
        assert!(!sink.mentions("C"));
    }

    #[test]
    fn test_status_report() {
        let sink = Arc::new(InMemorySink::new());
        let provider = StaticProvider::new("Channel", ["A"]);
        let registry = Registry::with_sink(
            provider,
            set(&[("A", true), ("B", false), ("C", true)]),
            sink.clone(),
        );
        let report = registry.status_report();
        assert_eq!(report["A"], CapabilityStatus::Active { required: true });
        assert_eq!(report["B"], CapabilityStatus::Unsupported { required: false });
        assert!(report["C"].is_blocking());
        assert!(!report["B"].is_blocking());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_debug_names_provider_type() {
        let registry = Registry::new(StaticProvider::new("Channel", ["A"]), CapabilitySet::new());
        assert!(format!("{:?}", registry).contains("Channel"));
    }
}
