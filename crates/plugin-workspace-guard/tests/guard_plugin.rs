//! The guard plugin loaded through the plugin manager alongside a host
//! handler.

use std::sync::Arc;

use hookrunner::hooks::events::*;
use hookrunner::{CollectingFaultSink, HookName, PluginManager, Registration, hook};
use hookrunner_core::config::RunnerConfig;
use plugin_workspace_guard::{GuardConfig, WorkspaceGuardPlugin};

fn guard_config() -> GuardConfig {
    GuardConfig {
        denied_tools: vec!["exec".to_string()],
        denied_agents: vec!["intruder".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_guard_registers_every_hook() {
    let plugin = WorkspaceGuardPlugin::new(guard_config());
    let mut manager = PluginManager::default();
    manager.load(plugin.export()).expect("load");

    let runner = manager.build();
    for hook in [
        HookName::ToolsFilter,
        HookName::PromptFooter,
        HookName::BootstrapBefore,
        HookName::BootstrapAfter,
        HookName::SubagentValidate,
        HookName::SandboxReady,
    ] {
        assert_eq!(runner.registry().handler_count(hook), 1, "{hook}");
    }
    assert!(!runner.has_handlers(HookName::SkillsFilter));
    assert_eq!(
        runner.registry().plugin_ids(),
        vec!["workspace-guard".to_string()]
    );
}

#[tokio::test]
async fn test_guard_runs_before_lower_priority_host_handler() {
    let plugin = WorkspaceGuardPlugin::new(guard_config());
    let mut manager = PluginManager::default();
    manager.load(plugin.export()).expect("load");
    manager.register(Registration::from_fn::<hook::ToolsFilter, _, _>(
        0,
        |event: ToolsFilterEvent| async move {
            let mut tools = event.tools;
            tools.push(ToolSpec::new("host-tool"));
            Ok(ToolsFilterOutput::replace(tools))
        },
    ));
    manager.register(Registration::from_fn::<hook::PromptFooter, _, _>(
        0,
        |_| async { Ok(PromptFooterOutput::append("Host footer.")) },
    ));

    let runner = manager.build();

    let tools = runner
        .run_tools_filter(ToolsFilterEvent {
            agent_id: "main".to_string(),
            prompt_mode: PromptMode::Full,
            tools: vec![ToolSpec::new("read"), ToolSpec::new("exec")],
        })
        .await;
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["read", "host-tool"]);

    let footer = runner
        .run_prompt_footer(PromptFooterEvent {
            agent_id: "main".to_string(),
            prompt_mode: PromptMode::Full,
            current_prompt: String::new(),
        })
        .await;
    assert_eq!(
        footer,
        "Stay inside the workspace directory.\nHost footer."
    );
}

#[tokio::test]
async fn test_guard_bootstrap_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("AGENTS.md"), "existing").expect("write");

    let plugin = WorkspaceGuardPlugin::new(guard_config());
    let stats = Arc::clone(plugin.stats());
    let mut manager = PluginManager::default();
    manager.load(plugin.export()).expect("load");
    let runner = manager.build();

    let plan = runner
        .run_bootstrap_before(BootstrapBeforeEvent {
            workspace_dir: dir.path().to_path_buf(),
            files: vec![
                BootstrapFile::new("AGENTS.md", dir.path().join("AGENTS.md"), "seed"),
                BootstrapFile::new("TOOLS.md", dir.path().join("TOOLS.md"), "seed"),
            ],
            is_new_workspace: false,
        })
        .await;
    assert!(!plan.skip);
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].name, "TOOLS.md");

    runner
        .run_bootstrap_after(BootstrapAfterEvent {
            workspace_dir: dir.path().to_path_buf(),
            files_written: plan.files.iter().map(|f| f.path.clone()).collect(),
            files_skipped: vec![dir.path().join("AGENTS.md")],
        })
        .await;
    assert_eq!(stats.runs(), 1);
    assert_eq!(stats.written(), 1);
    assert_eq!(stats.skipped(), 1);

    std::fs::write(dir.path().join("BOOTSTRAP.lock"), "").expect("write lock");
    let plan = runner
        .run_bootstrap_before(BootstrapBeforeEvent {
            workspace_dir: dir.path().to_path_buf(),
            files: Vec::new(),
            is_new_workspace: true,
        })
        .await;
    assert!(plan.skip);
}

#[tokio::test]
async fn test_guard_vetoes_denied_subagent() {
    let plugin = WorkspaceGuardPlugin::new(guard_config());
    let mut manager = PluginManager::default();
    manager.load(plugin.export()).expect("load");
    let runner = manager.build();

    let event = |agent: &str| SubagentValidateEvent {
        agent_id: agent.to_string(),
        parent_agent_id: Some("main".to_string()),
        system_prompt: String::new(),
        session_key: "session-1".to_string(),
    };

    let decision = runner.run_subagent_validate(event("intruder")).await;
    assert!(decision.block);
    assert!(decision.reason.is_some());

    let decision = runner.run_subagent_validate(event("researcher")).await;
    assert_eq!(decision, SubagentDecision::allow());
}

#[tokio::test]
async fn test_sandbox_marker_failure_reported_as_fault() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A file where the agent workspace directory should go.
    let blocked = dir.path().join("agent");
    std::fs::write(&blocked, "not a directory").expect("write");

    let plugin = WorkspaceGuardPlugin::new(guard_config());
    let sink = Arc::new(CollectingFaultSink::new());
    let mut manager = PluginManager::new(RunnerConfig::default()).with_fault_sink(sink.clone());
    manager.load(plugin.export()).expect("load");
    let runner = manager.build();

    runner
        .run_sandbox_ready(SandboxReadyEvent {
            workspace_dir: dir.path().to_path_buf(),
            agent_workspace_dir: blocked,
            agent_id: "main".to_string(),
            session_key: "session-1".to_string(),
            scope_key: "agent".to_string(),
        })
        .await;

    let faults = sink.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].hook, HookName::SandboxReady);
    assert_eq!(faults[0].plugin_id.as_deref(), Some("workspace-guard"));
}

#[test]
fn test_disabled_guard_contributes_nothing() {
    let config = RunnerConfig {
        disabled_plugins: vec!["workspace-guard".to_string()],
        ..Default::default()
    };
    let mut manager = PluginManager::new(config);
    manager
        .load(WorkspaceGuardPlugin::default().export())
        .expect("disabled is not an error");

    let runner = manager.build();
    assert!(runner.registry().is_empty());
    assert!(runner.registry().plugin_ids().is_empty());
}
