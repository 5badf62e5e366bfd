//! Hook host: loads the bundled plugins and drives one agent run
//! through every hook.
//!
//! Stands in for the agent runtime: it builds the runner once at startup,
//! installs it in the global slot and calls each typed entry point the way
//! the runtime would.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use hookrunner::global;
use hookrunner::hooks::events::{
    BootstrapAfterEvent, BootstrapBeforeEvent, BootstrapFile, PromptFooterEvent, PromptMode,
    SandboxReadyEvent, SkillsFilterEvent, SubagentValidateEvent, ToolSpec, ToolsFilterEvent,
};
use hookrunner::{HookName, HookRunner, PluginManager};
use hookrunner_core::config::AppConfig;
use hookrunner_core::error::AppError;
use plugin_workspace_guard::{GuardConfig, WorkspaceGuardPlugin, plugin::PLUGIN_ID};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Host error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("HOOKRUNNER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Build the runner and drive one agent run through it
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting hook host v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Load plugins ─────────────────────────────────────
    let guard_config: GuardConfig = config.plugin_settings(PLUGIN_ID)?;
    let guard = WorkspaceGuardPlugin::new(guard_config);
    let stats = Arc::clone(guard.stats());

    let mut manager = PluginManager::new(config.runner.clone());
    manager.load(guard.export())?;

    // ── Step 2: Build and install the runner ─────────────────────
    let runner = Arc::new(manager.build());
    global::install(Arc::clone(&runner));

    let hooks: Vec<_> = runner
        .registry()
        .registered_hooks()
        .iter()
        .map(|hook| format!("{} ({})", hook, hook.model()))
        .collect();
    tracing::info!("Registered hooks: {}", hooks.join(", "));

    // ── Step 3: Drive an agent run ───────────────────────────────
    let workspace_dir = std::env::var("HOOKRUNNER_WORKSPACE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("hookhost-workspace"));
    tokio::fs::create_dir_all(&workspace_dir).await?;

    bootstrap_workspace(&runner, &workspace_dir).await?;
    build_prompt(&runner).await;

    let decision = runner
        .run_subagent_validate(SubagentValidateEvent {
            agent_id: "researcher".to_string(),
            parent_agent_id: Some("main".to_string()),
            system_prompt: "Research the task.".to_string(),
            session_key: "hookhost:main".to_string(),
        })
        .await;
    if decision.block {
        tracing::warn!(
            "Subagent launch blocked: {}",
            decision.reason.as_deref().unwrap_or("no reason given")
        );
    } else {
        tracing::info!("Subagent launch allowed");
    }

    if global::has_handlers(HookName::SandboxReady) {
        runner
            .run_sandbox_ready(SandboxReadyEvent {
                workspace_dir: workspace_dir.clone(),
                agent_workspace_dir: workspace_dir.join("agents").join("main"),
                agent_id: "main".to_string(),
                session_key: "hookhost:main".to_string(),
                scope_key: "agent".to_string(),
            })
            .await;
    }

    tracing::info!(
        "Bootstrap runs: {}, files written: {}, skipped: {}",
        stats.runs(),
        stats.written(),
        stats.skipped()
    );

    global::reset();
    tracing::info!("Hook host finished");
    Ok(())
}

/// Seed the workspace, honouring the bootstrap-before plan
async fn bootstrap_workspace(runner: &HookRunner, workspace_dir: &Path) -> Result<(), AppError> {
    let is_new_workspace = !tokio::fs::try_exists(workspace_dir.join("AGENTS.md")).await?;
    let files = vec![
        BootstrapFile::new(
            "AGENTS.md",
            workspace_dir.join("AGENTS.md"),
            "# Agents\n\nThe main agent works in this directory.\n",
        ),
        BootstrapFile::new(
            "TOOLS.md",
            workspace_dir.join("TOOLS.md"),
            "# Tools\n\nread, write, exec\n",
        ),
    ];

    let plan = runner
        .run_bootstrap_before(BootstrapBeforeEvent {
            workspace_dir: workspace_dir.to_path_buf(),
            files: files.clone(),
            is_new_workspace,
        })
        .await;

    if plan.skip {
        tracing::info!("Bootstrap skipped by plugin");
        return Ok(());
    }

    let mut written = Vec::new();
    for file in &plan.files {
        tokio::fs::write(&file.path, &file.content).await?;
        written.push(file.path.clone());
    }
    let skipped = files
        .iter()
        .filter(|file| !written.contains(&file.path))
        .map(|file| file.path.clone())
        .collect();

    runner
        .run_bootstrap_after(BootstrapAfterEvent {
            workspace_dir: workspace_dir.to_path_buf(),
            files_written: written,
            files_skipped: skipped,
        })
        .await;
    Ok(())
}

/// Assemble the system prompt pieces the plugins may shape
async fn build_prompt(runner: &HookRunner) {
    let tools = runner
        .run_tools_filter(ToolsFilterEvent {
            agent_id: "main".to_string(),
            prompt_mode: PromptMode::Full,
            tools: vec![
                ToolSpec::new("read"),
                ToolSpec::new("write"),
                ToolSpec::new("exec"),
            ],
        })
        .await;

    let skills = runner
        .run_skills_filter(SkillsFilterEvent {
            agent_id: "main".to_string(),
            prompt_mode: PromptMode::Full,
            skills_prompt: "## Skills\n- summarize".to_string(),
        })
        .await;

    let mut prompt = format!("You are the main agent.\n\n{}", skills);
    let footer = runner
        .run_prompt_footer(PromptFooterEvent {
            agent_id: "main".to_string(),
            prompt_mode: PromptMode::Full,
            current_prompt: prompt.clone(),
        })
        .await;
    if !footer.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(&footer);
    }

    tracing::info!(
        "Prompt built: {} tools [{}], {} chars",
        tools.len(),
        tools
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        prompt.len()
    );
}
