//! Workspace guard plugin: bundles its handlers into a plugin export.

use std::sync::Arc;

use tracing;

use hookrunner::{PluginExport, PluginInfo, hook};

use crate::config::GuardConfig;
use crate::hooks::{
    BootstrapRecorder, BootstrapStats, ExistingFilesFilter, PolicyFooter, SandboxMarker,
    SubagentPolicy, ToolDenyList,
};

/// Plugin id used in diagnostics.
pub const PLUGIN_ID: &str = "workspace-guard";

/// Workspace guard plugin
#[derive(Debug)]
pub struct WorkspaceGuardPlugin {
    /// Plugin information
    info: PluginInfo,
    /// Plugin settings
    config: GuardConfig,
    /// Shared bootstrap counters
    stats: Arc<BootstrapStats>,
}

impl WorkspaceGuardPlugin {
    /// Create a new workspace guard plugin
    pub fn new(config: GuardConfig) -> Self {
        Self {
            info: PluginInfo::new(PLUGIN_ID, "Workspace Guard", env!("CARGO_PKG_VERSION"))
                .with_description("Bootstrap filtering, prompt policy and sandbox markers"),
            config,
            stats: Arc::new(BootstrapStats::default()),
        }
    }

    /// Build the export registering one handler per hook
    pub fn export(&self) -> PluginExport {
        let priority = self.config.priority;

        let export = PluginExport::new(self.info.clone())
            .on::<hook::ToolsFilter>(
                priority,
                Arc::new(ToolDenyList::new(self.config.denied_tools.clone())),
            )
            .on::<hook::PromptFooter>(priority, Arc::new(PolicyFooter::new(&self.config.footer)))
            .on::<hook::BootstrapBefore>(
                priority,
                Arc::new(ExistingFilesFilter::new(&self.config.lock_file)),
            )
            .on::<hook::BootstrapAfter>(
                priority,
                Arc::new(BootstrapRecorder::new(Arc::clone(&self.stats))),
            )
            .on::<hook::SubagentValidate>(
                priority,
                Arc::new(SubagentPolicy::new(self.config.denied_agents.clone())),
            )
            .on::<hook::SandboxReady>(
                priority,
                Arc::new(SandboxMarker::new(&self.config.ready_marker)),
            );

        tracing::info!(
            "Workspace guard hooks exported: {}",
            export
                .hooks()
                .iter()
                .map(|h| h.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        export
    }

    /// Get plugin info
    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    /// Get the bootstrap counters
    pub fn stats(&self) -> &Arc<BootstrapStats> {
        &self.stats
    }
}

impl Default for WorkspaceGuardPlugin {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}
