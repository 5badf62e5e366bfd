//! Hook names, execution models and the hook table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::HookHandler;

use super::events::{
    BootstrapAfterEvent, BootstrapBeforeEvent, BootstrapBeforeOutput, PromptFooterEvent,
    PromptFooterOutput, SandboxReadyEvent, SkillsFilterEvent, SkillsFilterOutput,
    SubagentDecision, SubagentValidateEvent, ToolsFilterEvent, ToolsFilterOutput,
};

/// How the runner folds the handlers of one hook into a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionModel {
    /// Handlers run in priority order, each seeing the value produced by
    /// the previous one.
    Modifying,
    /// Handlers run in priority order against the original event; their
    /// non-empty fragments are joined with newlines.
    Accumulating,
    /// Handlers run concurrently; the invocation settles once all have.
    FireAndForget,
    /// Handlers run in priority order until the first one blocks.
    Blocking,
    /// Handlers run strictly one after another with no result.
    StrictSequential,
}

impl ExecutionModel {
    /// Returns the string name of this model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modifying => "modifying",
            Self::Accumulating => "accumulating",
            Self::FireAndForget => "fire-and-forget",
            Self::Blocking => "blocking",
            Self::StrictSequential => "strict-sequential",
        }
    }
}

impl std::fmt::Display for ExecutionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type-level description of one hook: its name plus the event and output
/// types its handlers exchange.
///
/// Implemented by the marker types in [`hook`].
pub trait Hook: Send + Sync + 'static {
    /// The hook name.
    const NAME: HookName;
    /// Event passed to each handler.
    type Event: Clone + Send + Sync + 'static;
    /// Value returned by each handler. `Default` means "no result".
    type Output: Default + Send + 'static;

    /// Tags a handler with this hook.
    fn wrap(handler: Arc<dyn HookHandler<Self::Event, Self::Output>>) -> HandlerKind;

    /// Returns the handler if `kind` belongs to this hook.
    fn unwrap(kind: &HandlerKind) -> Option<&Arc<dyn HookHandler<Self::Event, Self::Output>>>;
}

declare_hooks! {
    /// Filters the tool list offered to an agent.
    ToolsFilter => "tools-filter", Modifying, ToolsFilterEvent => ToolsFilterOutput;
    /// Rewrites the skills section of the system prompt.
    SkillsFilter => "skills-filter", Modifying, SkillsFilterEvent => SkillsFilterOutput;
    /// Collects footer text appended to the system prompt.
    PromptFooter => "prompt-footer", Accumulating, PromptFooterEvent => PromptFooterOutput;
    /// Adjusts the files seeded into a workspace, or skips seeding.
    BootstrapBefore => "bootstrap-before", Modifying, BootstrapBeforeEvent => BootstrapBeforeOutput;
    /// Notifies that workspace seeding finished.
    BootstrapAfter => "bootstrap-after", FireAndForget, BootstrapAfterEvent => ();
    /// Decides whether a subagent may launch.
    SubagentValidate => "subagent-validate", Blocking, SubagentValidateEvent => SubagentDecision;
    /// Prepares a sandbox workspace before its container starts.
    SandboxReady => "sandbox-ready", StrictSequential, SandboxReadyEvent => ();
}

impl std::fmt::Display for HookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HookName {
    type Err = hookrunner_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| hookrunner_core::AppError::not_found(format!("Unknown hook '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_match_table() {
        assert_eq!(HookName::ToolsFilter.model(), ExecutionModel::Modifying);
        assert_eq!(HookName::SkillsFilter.model(), ExecutionModel::Modifying);
        assert_eq!(HookName::PromptFooter.model(), ExecutionModel::Accumulating);
        assert_eq!(HookName::BootstrapBefore.model(), ExecutionModel::Modifying);
        assert_eq!(HookName::BootstrapAfter.model(), ExecutionModel::FireAndForget);
        assert_eq!(HookName::SubagentValidate.model(), ExecutionModel::Blocking);
        assert_eq!(HookName::SandboxReady.model(), ExecutionModel::StrictSequential);
    }

    #[test]
    fn test_name_parse_and_display_agree() {
        for hook in HookName::ALL {
            let parsed: HookName = hook.to_string().parse().expect("should parse");
            assert_eq!(parsed, *hook);
        }
        assert!("before-launch".parse::<HookName>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_names() {
        let json = serde_json::to_string(&HookName::SubagentValidate).expect("serialize");
        assert_eq!(json, "\"subagent-validate\"");
        let parsed: HookName = serde_json::from_str("\"sandbox-ready\"").expect("deserialize");
        assert_eq!(parsed, HookName::SandboxReady);
    }

    #[test]
    fn test_marker_names() {
        assert_eq!(<hook::PromptFooter as Hook>::NAME, HookName::PromptFooter);
        assert_eq!(<hook::SandboxReady as Hook>::NAME, HookName::SandboxReady);
    }
}
