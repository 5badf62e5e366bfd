//! # hookrunner
//!
//! Plugin hook runner. Provides:
//!
//! - A closed table of hook names, each bound to one execution model
//! - A registration store ordered by descending priority, stable on ties
//! - A runner that dispatches per model with per-handler failure isolation
//! - Typed entry points, one per hook, with a no-handler short-circuit
//! - Plugin exports and a manager that builds the runner from them
//! - A process-wide runner slot for the host's startup path

#[macro_use]
mod macros;

pub mod exports;
pub mod global;
pub mod hooks;
pub mod manager;
pub mod prelude;
pub mod traits;

pub use exports::{PluginExport, PluginInfo};
pub use hooks::definitions::{ExecutionModel, Hook, HookName, hook};
pub use hooks::fault::{CollectingFaultSink, FaultKind, FaultSink, HookFault, TracingFaultSink};
pub use hooks::registry::{HookRegistry, Registration};
pub use hooks::runner::HookRunner;
pub use manager::PluginManager;
pub use traits::{ClosureHandler, HookHandler};
