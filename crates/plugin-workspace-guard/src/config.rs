//! Guard plugin configuration.

use serde::{Deserialize, Serialize};

/// Settings for [`WorkspaceGuardPlugin`](crate::WorkspaceGuardPlugin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Footer appended to system prompts. Empty disables the footer.
    #[serde(default = "default_footer")]
    pub footer: String,
    /// Tool names removed from every agent's tool list.
    #[serde(default)]
    pub denied_tools: Vec<String>,
    /// Agent ids that may never be launched as subagents.
    #[serde(default)]
    pub denied_agents: Vec<String>,
    /// Marker in a workspace root that suppresses bootstrap writes.
    #[serde(default = "default_lock_file")]
    pub lock_file: String,
    /// Marker written into sandbox workspaces once prepared.
    #[serde(default = "default_ready_marker")]
    pub ready_marker: String,
    /// Handler priority for every hook.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            footer: default_footer(),
            denied_tools: Vec::new(),
            denied_agents: Vec::new(),
            lock_file: default_lock_file(),
            ready_marker: default_ready_marker(),
            priority: default_priority(),
        }
    }
}

fn default_footer() -> String {
    "Stay inside the workspace directory.".to_string()
}

fn default_lock_file() -> String {
    "BOOTSTRAP.lock".to_string()
}

fn default_ready_marker() -> String {
    ".sandbox-ready".to_string()
}

fn default_priority() -> i32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.lock_file, "BOOTSTRAP.lock");
        assert_eq!(config.ready_marker, ".sandbox-ready");
        assert_eq!(config.priority, 100);
        assert!(config.denied_tools.is_empty());
    }
}
