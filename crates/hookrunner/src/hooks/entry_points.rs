//! Typed entry points, one per hook.
//!
//! Each entry point returns the hook's identity result straight away when
//! nothing is registered for it, without building any per-handler state.

use super::definitions::{HookName, hook};
use super::events::{
    BootstrapAfterEvent, BootstrapBeforeEvent, BootstrapPlan, PromptFooterEvent,
    SandboxReadyEvent, SkillsFilterEvent, SubagentDecision, SubagentValidateEvent,
    ToolSpec, ToolsFilterEvent,
};
use super::runner::HookRunner;

impl HookRunner {
    /// `tools-filter`: returns the tool list after every handler had a go.
    pub async fn run_tools_filter(&self, event: ToolsFilterEvent) -> Vec<ToolSpec> {
        if !self.has_handlers(HookName::ToolsFilter) {
            return event.tools;
        }

        let ToolsFilterEvent {
            agent_id,
            prompt_mode,
            tools,
        } = event;

        self.run_modifying::<hook::ToolsFilter, _, _, _>(
            tools,
            |current| ToolsFilterEvent {
                agent_id: agent_id.clone(),
                prompt_mode,
                tools: current.clone(),
            },
            |current, output| {
                if let Some(tools) = output.tools {
                    *current = tools;
                }
            },
        )
        .await
    }

    /// `skills-filter`: returns the rewritten skills prompt.
    pub async fn run_skills_filter(&self, event: SkillsFilterEvent) -> String {
        if !self.has_handlers(HookName::SkillsFilter) {
            return event.skills_prompt;
        }

        let SkillsFilterEvent {
            agent_id,
            prompt_mode,
            skills_prompt,
        } = event;

        self.run_modifying::<hook::SkillsFilter, _, _, _>(
            skills_prompt,
            |current| SkillsFilterEvent {
                agent_id: agent_id.clone(),
                prompt_mode,
                skills_prompt: current.clone(),
            },
            |current, output| {
                if let Some(skills_prompt) = output.skills_prompt {
                    *current = skills_prompt;
                }
            },
        )
        .await
    }

    /// `prompt-footer`: returns the joined footer, or `""`.
    pub async fn run_prompt_footer(&self, event: PromptFooterEvent) -> String {
        if !self.has_handlers(HookName::PromptFooter) {
            return String::new();
        }

        self.run_accumulating::<hook::PromptFooter, _>(&event, |output| output.append)
            .await
    }

    /// `bootstrap-before`: returns the files to write and the skip flag.
    ///
    /// A handler asking to skip does not stop the chain; later handlers
    /// still receive and may rewrite the file list.
    pub async fn run_bootstrap_before(&self, event: BootstrapBeforeEvent) -> BootstrapPlan {
        if !self.has_handlers(HookName::BootstrapBefore) {
            return BootstrapPlan {
                files: event.files,
                skip: false,
            };
        }

        let BootstrapBeforeEvent {
            workspace_dir,
            files,
            is_new_workspace,
        } = event;

        self.run_modifying::<hook::BootstrapBefore, _, _, _>(
            BootstrapPlan { files, skip: false },
            |current| BootstrapBeforeEvent {
                workspace_dir: workspace_dir.clone(),
                files: current.files.clone(),
                is_new_workspace,
            },
            |current, output| {
                if let Some(files) = output.files {
                    current.files = files;
                }
                if output.skip == Some(true) {
                    current.skip = true;
                }
            },
        )
        .await
    }

    /// `bootstrap-after`: notifies every handler concurrently.
    pub async fn run_bootstrap_after(&self, event: BootstrapAfterEvent) {
        if !self.has_handlers(HookName::BootstrapAfter) {
            return;
        }

        self.run_fire_and_forget::<hook::BootstrapAfter>(&event)
            .await;
    }

    /// `subagent-validate`: the first blocking handler decides.
    pub async fn run_subagent_validate(&self, event: SubagentValidateEvent) -> SubagentDecision {
        if !self.has_handlers(HookName::SubagentValidate) {
            return SubagentDecision::allow();
        }

        self.run_blocking::<hook::SubagentValidate, _>(&event, |decision| decision.block)
            .await
            .unwrap_or_default()
    }

    /// `sandbox-ready`: runs every handler to completion, one at a time.
    pub async fn run_sandbox_ready(&self, event: SandboxReadyEvent) {
        if !self.has_handlers(HookName::SandboxReady) {
            return;
        }

        self.run_strict_sequential::<hook::SandboxReady>(&event)
            .await;
    }
}
