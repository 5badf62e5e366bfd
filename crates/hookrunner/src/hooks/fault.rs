//! Handler fault diagnostics.
//!
//! A failing handler never reaches the caller. Instead the runner builds a
//! [`HookFault`] and hands it to a [`FaultSink`].

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

use hookrunner_core::AppError;

use super::definitions::HookName;

/// What went wrong inside a handler.
#[derive(Debug, Clone)]
pub enum FaultKind {
    /// The handler returned an error.
    Failed(AppError),
    /// The handler panicked; holds the panic message.
    Panicked(String),
    /// The handler exceeded the configured timeout.
    TimedOut(Duration),
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "{err}"),
            Self::Panicked(message) => write!(f, "panicked: {message}"),
            Self::TimedOut(limit) => write!(f, "timed out after {}s", limit.as_secs_f64()),
        }
    }
}

/// A single handler failure.
#[derive(Debug, Clone)]
pub struct HookFault {
    /// Hook being invoked.
    pub hook: HookName,
    /// Plugin that registered the handler, if known.
    pub plugin_id: Option<String>,
    /// Failure detail.
    pub kind: FaultKind,
    /// When the failure was observed.
    pub occurred_at: DateTime<Utc>,
}

impl HookFault {
    /// Creates a fault stamped with the current time.
    pub fn new(hook: HookName, plugin_id: Option<&str>, kind: FaultKind) -> Self {
        Self {
            hook,
            plugin_id: plugin_id.map(str::to_string),
            kind,
            occurred_at: Utc::now(),
        }
    }
}

/// Receives handler faults.
pub trait FaultSink: Send + Sync + std::fmt::Debug {
    /// Records one fault. Must not panic.
    fn report(&self, fault: HookFault);
}

/// Default sink: one structured warning per fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFaultSink;

impl FaultSink for TracingFaultSink {
    fn report(&self, fault: HookFault) {
        warn!(
            hook = %fault.hook,
            plugin_id = %fault.plugin_id.as_deref().unwrap_or("unknown"),
            error = %fault.kind,
            "Hook handler failed, continuing without its result"
        );
    }
}

/// Sink that keeps every fault in memory, for hosts that surface them
/// later and for tests.
#[derive(Debug, Default)]
pub struct CollectingFaultSink {
    faults: Mutex<Vec<HookFault>>,
}

impl CollectingFaultSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded faults.
    pub fn faults(&self) -> Vec<HookFault> {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of recorded faults.
    pub fn len(&self) -> usize {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no faults were recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FaultSink for CollectingFaultSink {
    fn report(&self, fault: HookFault) {
        TracingFaultSink.report(fault.clone());
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(fault);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        let failed = FaultKind::Failed(AppError::plugin("bad input"));
        assert_eq!(failed.to_string(), "PLUGIN: bad input");

        let panicked = FaultKind::Panicked("index out of bounds".to_string());
        assert_eq!(panicked.to_string(), "panicked: index out of bounds");

        let timed_out = FaultKind::TimedOut(Duration::from_secs(2));
        assert_eq!(timed_out.to_string(), "timed out after 2s");
    }

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingFaultSink::new();
        sink.report(HookFault::new(
            HookName::PromptFooter,
            Some("first"),
            FaultKind::Panicked("a".into()),
        ));
        sink.report(HookFault::new(
            HookName::SandboxReady,
            None,
            FaultKind::Panicked("b".into()),
        ));

        let faults = sink.faults();
        assert_eq!(faults.len(), 2);
        assert_eq!(faults[0].plugin_id.as_deref(), Some("first"));
        assert_eq!(faults[1].hook, HookName::SandboxReady);
        assert!(faults[1].plugin_id.is_none());
    }
}
