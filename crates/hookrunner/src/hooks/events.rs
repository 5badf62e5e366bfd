//! Event and output types exchanged with hook handlers.
//!
//! Output types have all-optional fields: a handler that leaves a field as
//! `None` keeps the running value untouched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How much of the system prompt an agent receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    /// The complete prompt.
    #[default]
    Full,
    /// A trimmed prompt for subagents.
    Minimal,
    /// No system prompt sections beyond identity.
    None,
}

/// A tool offered to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name as seen by the model.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// JSON schema of the tool parameters.
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    /// Creates a tool with an empty description and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: serde_json::Value::Null,
        }
    }
}

/// A file seeded into a fresh workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapFile {
    /// File name, e.g. `AGENTS.md`.
    pub name: String,
    /// Destination path.
    pub path: PathBuf,
    /// File contents.
    #[serde(default)]
    pub content: String,
}

impl BootstrapFile {
    /// Creates a bootstrap file.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
        }
    }
}

// ── tools-filter ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsFilterEvent {
    pub agent_id: String,
    pub prompt_mode: PromptMode,
    pub tools: Vec<ToolSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsFilterOutput {
    #[serde(default)]
    pub tools: Option<Vec<ToolSpec>>,
}

impl ToolsFilterOutput {
    /// Replaces the tool list.
    pub fn replace(tools: Vec<ToolSpec>) -> Self {
        Self { tools: Some(tools) }
    }
}

// ── skills-filter ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsFilterEvent {
    pub agent_id: String,
    pub prompt_mode: PromptMode,
    pub skills_prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsFilterOutput {
    #[serde(default)]
    pub skills_prompt: Option<String>,
}

impl SkillsFilterOutput {
    /// Replaces the skills prompt.
    pub fn replace(skills_prompt: impl Into<String>) -> Self {
        Self {
            skills_prompt: Some(skills_prompt.into()),
        }
    }
}

// ── prompt-footer ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptFooterEvent {
    pub agent_id: String,
    pub prompt_mode: PromptMode,
    /// The prompt assembled so far.
    pub current_prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptFooterOutput {
    #[serde(default)]
    pub append: Option<String>,
}

impl PromptFooterOutput {
    /// Appends a fragment to the footer.
    pub fn append(text: impl Into<String>) -> Self {
        Self {
            append: Some(text.into()),
        }
    }
}

// ── bootstrap-before ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapBeforeEvent {
    pub workspace_dir: PathBuf,
    pub files: Vec<BootstrapFile>,
    pub is_new_workspace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootstrapBeforeOutput {
    #[serde(default)]
    pub files: Option<Vec<BootstrapFile>>,
    /// Ask the host not to write any files.
    #[serde(default)]
    pub skip: Option<bool>,
}

/// Folded outcome of `bootstrap-before`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapPlan {
    /// Files the host should write.
    pub files: Vec<BootstrapFile>,
    /// Set once any handler asked to skip; never cleared afterwards.
    pub skip: bool,
}

// ── bootstrap-after ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapAfterEvent {
    pub workspace_dir: PathBuf,
    pub files_written: Vec<PathBuf>,
    pub files_skipped: Vec<PathBuf>,
}

// ── subagent-validate ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubagentValidateEvent {
    pub agent_id: String,
    pub parent_agent_id: Option<String>,
    pub system_prompt: String,
    pub session_key: String,
}

/// A block/allow decision. The default allows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubagentDecision {
    #[serde(default)]
    pub block: bool,
    /// Human-readable reason shown when blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SubagentDecision {
    /// Allows the launch.
    pub fn allow() -> Self {
        Self::default()
    }

    /// Blocks the launch with a reason.
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            block: true,
            reason: Some(reason.into()),
        }
    }
}

// ── sandbox-ready ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxReadyEvent {
    pub workspace_dir: PathBuf,
    pub agent_workspace_dir: PathBuf,
    pub agent_id: String,
    pub session_key: String,
    pub scope_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_missing_fields_deserialize_to_none() {
        let output: BootstrapBeforeOutput = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(output, BootstrapBeforeOutput::default());

        let output: ToolsFilterOutput =
            serde_json::from_str(r#"{"unrelated": 1}"#).expect("deserialize");
        assert!(output.tools.is_none());
    }

    #[test]
    fn test_decision_defaults_to_allow() {
        let decision: SubagentDecision = serde_json::from_str("{}").expect("deserialize");
        assert!(!decision.block);
        assert_eq!(
            serde_json::to_value(SubagentDecision::allow()).expect("serialize"),
            serde_json::json!({"block": false})
        );
    }

    #[test]
    fn test_prompt_mode_serde() {
        let mode: PromptMode = serde_json::from_str("\"minimal\"").expect("deserialize");
        assert_eq!(mode, PromptMode::Minimal);
    }
}
