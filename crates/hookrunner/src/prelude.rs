//! Prelude for convenient imports in plugin crates.

pub use async_trait::async_trait;

pub use hookrunner_core::{AppError, AppResult};

pub use crate::exports::{PluginExport, PluginInfo};
pub use crate::hooks::definitions::{Hook, HookName, hook};
pub use crate::hooks::events::*;
pub use crate::hooks::registry::Registration;
pub use crate::hooks::runner::HookRunner;
pub use crate::traits::{ClosureHandler, HookHandler};
