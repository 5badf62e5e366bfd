//! Hook runner configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings that shape how the runner dispatches handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Upper bound on a single handler call, in seconds.
    ///
    /// Unset means no bound: a handler that never settles stalls the
    /// invocation that called it.
    #[serde(default)]
    pub handler_timeout_secs: Option<u64>,
    /// Emit an extra debug line for every handler invocation.
    #[serde(default)]
    pub trace_dispatch: bool,
    /// Plugin ids whose registrations are dropped when building a runner.
    #[serde(default)]
    pub disabled_plugins: Vec<String>,
}

impl RunnerConfig {
    /// Returns the per-handler timeout, if one is configured.
    ///
    /// A zero value is treated as unset.
    pub fn handler_timeout(&self) -> Option<Duration> {
        self.handler_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns whether the given plugin is disabled.
    pub fn is_plugin_disabled(&self, plugin_id: &str) -> bool {
        self.disabled_plugins.iter().any(|id| id == plugin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        let config = RunnerConfig::default();
        assert!(config.handler_timeout().is_none());
        assert!(!config.trace_dispatch);
    }

    #[test]
    fn test_zero_timeout_is_unset() {
        let config = RunnerConfig {
            handler_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.handler_timeout().is_none());
    }

    #[test]
    fn test_disabled_plugin_lookup() {
        let config = RunnerConfig {
            disabled_plugins: vec!["noisy".to_string()],
            ..Default::default()
        };
        assert!(config.is_plugin_disabled("noisy"));
        assert!(!config.is_plugin_disabled("quiet"));
    }
}
