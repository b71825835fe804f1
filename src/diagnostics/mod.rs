//! 诊断模块：可注入的诊断事件接收器，不依赖进程级全局日志器。
//!
//! Diagnostics for capability checks.
//!
//! A registry never halts on an optional capability it does not understand; it
//! reports a [`DiagnosticEvent`] to the sink it was constructed with and moves
//! on. A required miss is reported the same way just before the check fails.
//! The sink is injected, so tests and embedders decide where events go.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`DiagnosticEvent`] | Typed diagnostic event |
//! | [`DiagnosticSink`] | Trait for diagnostic destinations |
//! | [`TracingSink`] | Default sink, forwards to `tracing` |
//! | [`NoopSink`] | Discards everything |
//! | [`InMemorySink`] | Records events, for tests and status pages |
//! | [`CompositeSink`] | Fans out to several sinks |

use std::fmt;
use std::sync::{Arc, RwLock};

/// Diagnostic emitted while checking a capability set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Declared, not required, and not supported by this binary.
    OptionalUnsupported {
        provider_type: String,
        capability: String,
    },
    /// Declared as required and not supported; the check fails on it.
    RequiredUnsupported {
        provider_type: String,
        capability: String,
    },
}

impl DiagnosticEvent {
    pub fn capability(&self) -> &str {
        match self {
            DiagnosticEvent::OptionalUnsupported { capability, .. }
            | DiagnosticEvent::RequiredUnsupported { capability, .. } => capability,
        }
    }

    pub fn provider_type(&self) -> &str {
        match self {
            DiagnosticEvent::OptionalUnsupported { provider_type, .. }
            | DiagnosticEvent::RequiredUnsupported { provider_type, .. } => provider_type,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, DiagnosticEvent::RequiredUnsupported { .. })
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::OptionalUnsupported {
                provider_type,
                capability,
            } => write!(
                f,
                "Found unknown {} capability {} but it is not required",
                provider_type, capability
            ),
            DiagnosticEvent::RequiredUnsupported {
                provider_type,
                capability,
            } => write!(
                f,
                "{} capability {} is required but not supported",
                provider_type, capability
            ),
        }
    }
}

/// Destination for diagnostic events.
///
/// Reporting cannot fail: a sink that loses an event must not change the
/// outcome of the check that produced it.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, event: DiagnosticEvent);
}

/// Forwards events to `tracing`: optional misses at debug, required at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, event: DiagnosticEvent) {
        if event.is_required() {
            tracing::warn!(
                provider_type = event.provider_type(),
                capability = event.capability(),
                "{}",
                event
            );
        } else {
            tracing::debug!(
                provider_type = event.provider_type(),
                capability = event.capability(),
                "{}",
                event
            );
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _: DiagnosticEvent) {}
}

/// In-memory sink for testing.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: RwLock<Vec<DiagnosticEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether any recorded event names `capability`.
    pub fn mentions(&self, capability: &str) -> bool {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|e| e.capability() == capability)
    }

    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for InMemorySink {
    fn report(&self, event: DiagnosticEvent) {
        self.events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

/// Composite sink for multiple destinations.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn DiagnosticSink>>,
}

impl CompositeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl DiagnosticSink for CompositeSink {
    fn report(&self, event: DiagnosticEvent) {
        for s in &self.sinks {
            s.report(event.clone());
        }
    }
}

/// Returns the default sink used by [`crate::Registry::new`].
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingSink)
}

/// Returns a no-op sink.
pub fn noop_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(NoopSink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str) -> DiagnosticEvent {
        DiagnosticEvent::OptionalUnsupported {
            provider_type: "Channel".to_string(),
            capability: name.to_string(),
        }
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            event("Experimental").to_string(),
            "Found unknown Channel capability Experimental but it is not required"
        );
    }

    #[test]
    fn test_required_event() {
        let required = DiagnosticEvent::RequiredUnsupported {
            provider_type: "Orderer".to_string(),
            capability: "V2_0".to_string(),
        };
        assert!(required.is_required());
        assert!(!event("V2_0").is_required());
        assert_eq!(required.capability(), "V2_0");
        assert_eq!(
            required.to_string(),
            "Orderer capability V2_0 is required but not supported"
        );
    }

    #[test]
    fn test_in_memory_sink() {
        let sink = InMemorySink::new();
        assert!(sink.is_empty());
        sink.report(event("A"));
        sink.report(event("B"));
        assert_eq!(sink.len(), 2);
        assert!(sink.mentions("B"));
        assert!(!sink.mentions("C"));
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_composite_sink_fans_out() {
        let first = Arc::new(InMemorySink::new());
        let second = Arc::new(InMemorySink::new());
        let composite = CompositeSink::new()
            .add_sink(first.clone())
            .add_sink(second.clone())
            .add_sink(noop_sink());
        composite.report(event("X"));
        assert_eq!(first.events(), vec![event("X")]);
        assert_eq!(second.events(), vec![event("X")]);
    }
}
