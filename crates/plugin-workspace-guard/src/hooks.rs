//! Hook implementations for the workspace guard plugin.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing;

use hookrunner::prelude::*;

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// bootstrap-before: keeps existing files intact and honours the lock marker.
#[derive(Debug)]
pub struct ExistingFilesFilter {
    /// Lock marker file name, relative to the workspace root.
    lock_file: String,
}

impl ExistingFilesFilter {
    /// Create a new bootstrap filter
    pub fn new(lock_file: impl Into<String>) -> Self {
        Self {
            lock_file: lock_file.into(),
        }
    }
}

#[async_trait]
impl HookHandler<BootstrapBeforeEvent, BootstrapBeforeOutput> for ExistingFilesFilter {
    async fn handle(&self, event: &BootstrapBeforeEvent) -> AppResult<BootstrapBeforeOutput> {
        let locked = path_exists(&event.workspace_dir.join(&self.lock_file)).await;
        if locked {
            tracing::info!(
                "Bootstrap lock present in '{}', skipping seed",
                event.workspace_dir.display()
            );
        }

        if event.is_new_workspace {
            return Ok(BootstrapBeforeOutput {
                files: None,
                skip: locked.then_some(true),
            });
        }

        let mut files = Vec::with_capacity(event.files.len());
        for file in &event.files {
            if path_exists(&file.path).await {
                tracing::debug!("Keeping existing bootstrap file '{}'", file.path.display());
            } else {
                files.push(file.clone());
            }
        }

        Ok(BootstrapBeforeOutput {
            files: Some(files),
            skip: locked.then_some(true),
        })
    }
}

/// Counters updated by [`BootstrapRecorder`].
#[derive(Debug, Default)]
pub struct BootstrapStats {
    runs: AtomicUsize,
    written: AtomicUsize,
    skipped: AtomicUsize,
}

impl BootstrapStats {
    /// Number of bootstrap runs observed.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::Relaxed)
    }

    /// Total files written across runs.
    pub fn written(&self) -> usize {
        self.written.load(Ordering::Relaxed)
    }

    /// Total files skipped across runs.
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
}

/// bootstrap-after: records what the host wrote.
#[derive(Debug)]
pub struct BootstrapRecorder {
    stats: Arc<BootstrapStats>,
}

impl BootstrapRecorder {
    /// Create a new recorder writing into `stats`
    pub fn new(stats: Arc<BootstrapStats>) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl HookHandler<BootstrapAfterEvent, ()> for BootstrapRecorder {
    async fn handle(&self, event: &BootstrapAfterEvent) -> AppResult<()> {
        self.stats.runs.fetch_add(1, Ordering::Relaxed);
        self.stats
            .written
            .fetch_add(event.files_written.len(), Ordering::Relaxed);
        self.stats
            .skipped
            .fetch_add(event.files_skipped.len(), Ordering::Relaxed);

        tracing::info!(
            "Bootstrap finished in '{}': {} written, {} skipped",
            event.workspace_dir.display(),
            event.files_written.len(),
            event.files_skipped.len()
        );
        Ok(())
    }
}

/// prompt-footer: appends the configured policy text.
#[derive(Debug)]
pub struct PolicyFooter {
    footer: String,
}

impl PolicyFooter {
    /// Create a new footer handler
    pub fn new(footer: impl Into<String>) -> Self {
        Self {
            footer: footer.into(),
        }
    }
}

#[async_trait]
impl HookHandler<PromptFooterEvent, PromptFooterOutput> for PolicyFooter {
    async fn handle(&self, event: &PromptFooterEvent) -> AppResult<PromptFooterOutput> {
        if event.prompt_mode == PromptMode::None || self.footer.is_empty() {
            return Ok(PromptFooterOutput::default());
        }
        // Already present, e.g. carried over from a parent prompt
        if event.current_prompt.contains(&self.footer) {
            return Ok(PromptFooterOutput::default());
        }
        Ok(PromptFooterOutput::append(self.footer.clone()))
    }
}

/// tools-filter: removes denied tools.
#[derive(Debug)]
pub struct ToolDenyList {
    denied: Vec<String>,
}

impl ToolDenyList {
    /// Create a new deny list
    pub fn new(denied: Vec<String>) -> Self {
        Self { denied }
    }
}

#[async_trait]
impl HookHandler<ToolsFilterEvent, ToolsFilterOutput> for ToolDenyList {
    async fn handle(&self, event: &ToolsFilterEvent) -> AppResult<ToolsFilterOutput> {
        if !event
            .tools
            .iter()
            .any(|tool| self.denied.contains(&tool.name))
        {
            return Ok(ToolsFilterOutput::default());
        }

        let tools = event
            .tools
            .iter()
            .filter(|tool| !self.denied.contains(&tool.name))
            .cloned()
            .collect();

        tracing::debug!("Removed denied tools for agent '{}'", event.agent_id);
        Ok(ToolsFilterOutput::replace(tools))
    }
}

/// subagent-validate: vetoes self-spawn and denied agents.
#[derive(Debug)]
pub struct SubagentPolicy {
    denied_agents: Vec<String>,
}

impl SubagentPolicy {
    /// Create a new subagent policy
    pub fn new(denied_agents: Vec<String>) -> Self {
        Self { denied_agents }
    }
}

#[async_trait]
impl HookHandler<SubagentValidateEvent, SubagentDecision> for SubagentPolicy {
    async fn handle(&self, event: &SubagentValidateEvent) -> AppResult<SubagentDecision> {
        if event.parent_agent_id.as_deref() == Some(event.agent_id.as_str()) {
            return Ok(SubagentDecision::block(format!(
                "Agent '{}' cannot launch itself as a subagent",
                event.agent_id
            )));
        }

        if self.denied_agents.contains(&event.agent_id) {
            tracing::warn!(
                "Subagent '{}' denied for session '{}'",
                event.agent_id,
                event.session_key
            );
            return Ok(SubagentDecision::block(format!(
                "Agent '{}' is not allowed to run as a subagent",
                event.agent_id
            )));
        }

        Ok(SubagentDecision::allow())
    }
}

/// sandbox-ready: writes the readiness marker into the agent workspace.
#[derive(Debug)]
pub struct SandboxMarker {
    marker: String,
}

impl SandboxMarker {
    /// Create a new marker writer
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

#[async_trait]
impl HookHandler<SandboxReadyEvent, ()> for SandboxMarker {
    async fn handle(&self, event: &SandboxReadyEvent) -> AppResult<()> {
        tokio::fs::create_dir_all(&event.agent_workspace_dir).await?;

        let path = event.agent_workspace_dir.join(&self.marker);
        let content = format!(
            "agent={}\nsession={}\nscope={}\n",
            event.agent_id, event.session_key, event.scope_key
        );
        tokio::fs::write(&path, content).await?;

        tracing::info!("Sandbox marker written to '{}'", path.display());
        Ok(())
    }
}
