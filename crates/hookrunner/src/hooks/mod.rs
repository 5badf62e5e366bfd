//! Hook system: definitions, registry, runner, and typed entry points.

pub mod definitions;
pub mod entry_points;
pub mod events;
pub mod fault;
pub mod registry;
pub mod runner;

pub use definitions::{ExecutionModel, HandlerKind, Hook, HookName, hook};
pub use events::{
    BootstrapAfterEvent, BootstrapBeforeEvent, BootstrapBeforeOutput, BootstrapFile,
    BootstrapPlan, PromptFooterEvent, PromptFooterOutput, PromptMode, SandboxReadyEvent,
    SkillsFilterEvent, SkillsFilterOutput, SubagentDecision, SubagentValidateEvent, ToolSpec,
    ToolsFilterEvent, ToolsFilterOutput,
};
pub use fault::{CollectingFaultSink, FaultKind, FaultSink, HookFault, TracingFaultSink};
pub use registry::{HookRegistry, RegisteredHandler, Registration};
pub use runner::HookRunner;
