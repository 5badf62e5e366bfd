//! Hook registry: handler registrations indexed by hook name, kept in
//! descending priority order.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use hookrunner_core::AppResult;

use super::definitions::{HandlerKind, Hook, HookName};
use crate::traits::{ClosureHandler, HookHandler};

/// One handler registration.
#[derive(Debug)]
pub struct Registration {
    /// The handler, tagged with its hook.
    handler: HandlerKind,
    /// Priority (higher = earlier execution).
    priority: i32,
    /// Plugin that registered this handler.
    plugin_id: Option<String>,
}

impl Registration {
    /// Creates a registration for hook `H`.
    pub fn new<H: Hook>(priority: i32, handler: Arc<dyn HookHandler<H::Event, H::Output>>) -> Self {
        Self {
            handler: H::wrap(handler),
            priority,
            plugin_id: None,
        }
    }

    /// Creates a registration for hook `H` from an async closure.
    pub fn from_fn<H, F, Fut>(priority: i32, handler: F) -> Self
    where
        H: Hook,
        F: Fn(H::Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<H::Output>> + Send + 'static,
    {
        Self::new::<H>(priority, ClosureHandler::new(handler).into_arc())
    }

    /// Sets the originating plugin id.
    pub fn with_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_id = Some(plugin_id.into());
        self
    }

    /// Returns the hook this registration belongs to.
    pub fn hook_name(&self) -> HookName {
        self.handler.hook_name()
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the originating plugin id.
    pub fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }
}

/// A typed view of one registration, as returned by [`HookRegistry::query`].
pub struct RegisteredHandler<'a, H: Hook> {
    /// The handler.
    pub handler: &'a Arc<dyn HookHandler<H::Event, H::Output>>,
    /// Priority.
    pub priority: i32,
    /// Plugin that registered this handler.
    pub plugin_id: Option<&'a str>,
}

/// Registry of hook handlers organized by hook name.
///
/// Built once and then shared read-only by a runner. There is no removal:
/// a different set of registrations means a new registry.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook name → handlers, highest priority first.
    handlers: HashMap<HookName, Vec<Registration>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from registrations, in the order given.
    pub fn from_registrations(registrations: impl IntoIterator<Item = Registration>) -> Self {
        let mut registry = Self::new();
        for registration in registrations {
            registry.register(registration);
        }
        registry
    }

    /// Inserts a registration behind every entry of equal or higher priority.
    pub fn register(&mut self, registration: Registration) {
        let hook = registration.hook_name();
        let priority = registration.priority;
        let plugin_id = registration.plugin_id.clone();

        let entries = self.handlers.entry(hook).or_default();
        // After every entry of equal or higher priority: ties keep registration order
        let index = entries.partition_point(|e| e.priority >= priority);
        entries.insert(index, registration);

        debug!(
            hook = %hook,
            plugin_id = %plugin_id.as_deref().unwrap_or("unknown"),
            priority = priority,
            "Hook handler registered"
        );
    }

    /// Returns the handlers for hook `H`, highest priority first.
    pub fn query<H: Hook>(&self) -> Vec<RegisteredHandler<'_, H>> {
        self.entries(H::NAME)
            .iter()
            .filter_map(|entry| {
                H::unwrap(&entry.handler).map(|handler| RegisteredHandler {
                    handler,
                    priority: entry.priority,
                    plugin_id: entry.plugin_id.as_deref(),
                })
            })
            .collect()
    }

    /// Returns the raw registrations for a hook, highest priority first.
    pub fn entries(&self, hook: HookName) -> &[Registration] {
        self.handlers.get(&hook).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns whether any handlers are registered for a hook.
    pub fn has_handlers(&self, hook: HookName) -> bool {
        self.handler_count(hook) > 0
    }

    /// Returns the number of handlers registered for a hook.
    pub fn handler_count(&self, hook: HookName) -> usize {
        self.handlers.get(&hook).map(Vec::len).unwrap_or(0)
    }

    /// Returns every hook with at least one handler, in declaration order.
    pub fn registered_hooks(&self) -> Vec<HookName> {
        HookName::ALL
            .iter()
            .copied()
            .filter(|hook| self.has_handlers(*hook))
            .collect()
    }

    /// Returns the distinct plugin ids seen across all registrations.
    pub fn plugin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .handlers
            .values()
            .flatten()
            .filter_map(|entry| entry.plugin_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Returns the total number of registrations.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Returns whether the registry holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::definitions::hook;
    use crate::hooks::events::PromptFooterOutput;

    fn footer(priority: i32, plugin: &str) -> Registration {
        Registration::from_fn::<hook::PromptFooter, _, _>(priority, |_| async {
            Ok(PromptFooterOutput::default())
        })
        .with_plugin(plugin)
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let registry = HookRegistry::from_registrations([
            footer(0, "a"),
            footer(10, "high"),
            footer(0, "b"),
            footer(-5, "low"),
            footer(0, "c"),
        ]);

        let order: Vec<_> = registry
            .query::<hook::PromptFooter>()
            .iter()
            .map(|h| h.plugin_id.unwrap_or_default().to_string())
            .collect();
        assert_eq!(order, vec!["high", "a", "b", "c", "low"]);
    }

    #[test]
    fn test_incremental_register_lands_behind_equal_priorities() {
        let mut registry = HookRegistry::new();
        registry.register(footer(5, "first"));
        registry.register(footer(1, "tail"));
        registry.register(footer(5, "second"));
        registry.register(footer(9, "head"));
        registry.register(footer(1, "tail-2"));

        let order: Vec<_> = registry
            .entries(HookName::PromptFooter)
            .iter()
            .map(|entry| entry.plugin_id().unwrap_or_default().to_string())
            .collect();
        assert_eq!(order, vec!["head", "first", "second", "tail", "tail-2"]);
    }

    #[test]
    fn test_has_handlers_per_hook() {
        let registry = HookRegistry::from_registrations([footer(1, "a")]);
        assert!(registry.has_handlers(HookName::PromptFooter));
        assert!(!registry.has_handlers(HookName::ToolsFilter));
        assert_eq!(registry.handler_count(HookName::PromptFooter), 1);
        assert_eq!(registry.registered_hooks(), vec![HookName::PromptFooter]);
        assert!(registry.query::<hook::ToolsFilter>().is_empty());
    }

    #[test]
    fn test_plugin_ids_are_distinct() {
        let registry = HookRegistry::from_registrations([
            footer(1, "b"),
            footer(2, "a"),
            footer(3, "b"),
            Registration::from_fn::<hook::SandboxReady, _, _>(0, |_| async { Ok(()) }),
        ]);
        assert_eq!(registry.plugin_ids(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_empty_registry() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.registered_hooks().is_empty());
        assert!(registry.entries(HookName::SandboxReady).is_empty());
    }
}
