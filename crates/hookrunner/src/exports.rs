//! Export helpers for building plugin registration bundles.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hookrunner_core::AppResult;

use crate::hooks::definitions::{Hook, HookName};
use crate::hooks::registry::Registration;
use crate::traits::HookHandler;

/// Metadata about a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier, used in fault diagnostics.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    #[serde(default)]
    pub description: String,
}

impl PluginInfo {
    /// Creates plugin metadata with an empty description.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A bundle describing a plugin and the handlers it contributes.
#[derive(Debug)]
pub struct PluginExport {
    /// Plugin metadata.
    pub info: PluginInfo,
    /// Handler registrations.
    pub registrations: Vec<Registration>,
}

impl PluginExport {
    /// Creates a new plugin export with no handlers.
    pub fn new(info: PluginInfo) -> Self {
        Self {
            info,
            registrations: Vec::new(),
        }
    }

    /// Adds a handler for hook `H`.
    pub fn on<H: Hook>(
        mut self,
        priority: i32,
        handler: Arc<dyn HookHandler<H::Event, H::Output>>,
    ) -> Self {
        self.registrations.push(Registration::new::<H>(priority, handler));
        self
    }

    /// Adds an async closure handler for hook `H`.
    pub fn on_fn<H, F, Fut>(mut self, priority: i32, handler: F) -> Self
    where
        H: Hook,
        F: Fn(H::Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<H::Output>> + Send + 'static,
    {
        self.registrations
            .push(Registration::from_fn::<H, _, _>(priority, handler));
        self
    }

    /// Returns the distinct hooks this export registers for.
    pub fn hooks(&self) -> Vec<HookName> {
        let mut hooks: Vec<HookName> = self
            .registrations
            .iter()
            .map(Registration::hook_name)
            .collect();
        hooks.sort();
        hooks.dedup();
        hooks
    }
}
