//! Workspace guard plugin.
//!
//! Contributes one handler to every hook the runner declares: it trims
//! bootstrap files that already exist, records bootstrap statistics,
//! appends a policy footer, removes denied tools, vetoes disallowed
//! subagents and drops a readiness marker into sandbox workspaces.

pub mod config;
pub mod hooks;
pub mod plugin;

pub use config::GuardConfig;
pub use plugin::WorkspaceGuardPlugin;
