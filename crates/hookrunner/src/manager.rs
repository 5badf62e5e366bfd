//! Plugin manager: collects plugin exports and builds the hook runner.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use hookrunner_core::config::RunnerConfig;
use hookrunner_core::{AppError, AppResult};

use crate::exports::{PluginExport, PluginInfo};
use crate::hooks::fault::FaultSink;
use crate::hooks::registry::{HookRegistry, Registration};
use crate::hooks::runner::HookRunner;

/// Gathers registrations from plugins and turns them into a [`HookRunner`].
///
/// Loading order is registration order, which breaks priority ties.
#[derive(Debug)]
pub struct PluginManager {
    /// Runner settings, including the disabled plugin list.
    config: RunnerConfig,
    /// Loaded plugin metadata.
    plugins: Vec<PluginInfo>,
    /// Every plugin id offered so far, loaded or disabled.
    seen_ids: HashSet<String>,
    /// Accumulated registrations.
    registrations: Vec<Registration>,
    /// Fault sink handed to the runner.
    fault_sink: Option<Arc<dyn FaultSink>>,
}

impl PluginManager {
    /// Creates a new plugin manager.
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            plugins: Vec::new(),
            seen_ids: HashSet::new(),
            registrations: Vec::new(),
            fault_sink: None,
        }
    }

    /// Loads a plugin export.
    ///
    /// Every registration is stamped with the plugin id. Plugins listed in
    /// `disabled_plugins` are skipped without error, but their id still
    /// counts toward duplicate detection.
    pub fn load(&mut self, export: PluginExport) -> AppResult<()> {
        let PluginExport {
            info,
            registrations,
        } = export;

        if info.id.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Plugin '{}' has an empty id",
                info.name
            )));
        }

        if !self.seen_ids.insert(info.id.clone()) {
            return Err(AppError::conflict(format!(
                "Plugin '{}' is already loaded",
                info.id
            )));
        }

        if self.config.is_plugin_disabled(&info.id) {
            warn!(plugin_id = %info.id, "Plugin disabled by configuration, skipping");
            return Ok(());
        }

        let count = registrations.len();
        self.registrations.extend(
            registrations
                .into_iter()
                .map(|registration| registration.with_plugin(info.id.clone())),
        );

        info!(
            plugin_id = %info.id,
            name = %info.name,
            version = %info.version,
            handlers = count,
            "Plugin loaded"
        );

        self.plugins.push(info);
        Ok(())
    }

    /// Adds a registration owned by the host rather than a plugin.
    pub fn register(&mut self, registration: Registration) {
        self.registrations.push(registration);
    }

    /// Routes handler faults to `sink` instead of the tracing default.
    pub fn with_fault_sink(mut self, sink: Arc<dyn FaultSink>) -> Self {
        self.fault_sink = Some(sink);
        self
    }

    /// Returns the loaded plugins.
    pub fn plugins(&self) -> &[PluginInfo] {
        &self.plugins
    }

    /// Builds the runner. The registration set is fixed from here on.
    pub fn build(self) -> HookRunner {
        let registry = HookRegistry::from_registrations(self.registrations);

        info!(
            plugins = self.plugins.len(),
            registrations = registry.len(),
            "Hook runner built"
        );

        let runner = HookRunner::from_registry(registry, self.config);
        match self.fault_sink {
            Some(sink) => runner.with_fault_sink(sink),
            None => runner,
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookrunner_core::ErrorKind;

    use crate::hooks::definitions::{HookName, hook};

    fn export(id: &str) -> PluginExport {
        PluginExport::new(PluginInfo::new(id, id, "1.0.0"))
            .on_fn::<hook::SandboxReady, _, _>(0, |_| async { Ok(()) })
    }

    #[test]
    fn test_duplicate_plugin_rejected() {
        let mut manager = PluginManager::default();
        manager.load(export("guard")).expect("first load");

        let err = manager.load(export("guard")).expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(manager.plugins().len(), 1);
    }

    #[test]
    fn test_duplicate_disabled_plugin_rejected() {
        let config = RunnerConfig {
            disabled_plugins: vec!["legacy".to_string()],
            ..Default::default()
        };
        let mut manager = PluginManager::new(config);
        manager.load(export("legacy")).expect("skip is not an error");

        let err = manager.load(export("legacy")).expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(manager.plugins().is_empty());
    }

    #[test]
    fn test_blank_plugin_id_rejected() {
        let mut manager = PluginManager::default();
        let err = manager.load(export("  ")).expect_err("blank id");
        assert_eq!(err.kind, ErrorKind::Validation);

        manager.load(export("guard")).expect("load");
        assert_eq!(manager.plugins().len(), 1);
    }

    #[test]
    fn test_disabled_plugin_skipped() {
        let config = RunnerConfig {
            disabled_plugins: vec!["legacy".to_string()],
            ..Default::default()
        };
        let mut manager = PluginManager::new(config);
        manager.load(export("legacy")).expect("skip is not an error");
        manager.load(export("guard")).expect("load");

        let runner = manager.build();
        assert_eq!(runner.registry().plugin_ids(), vec!["guard".to_string()]);
        assert_eq!(runner.registry().handler_count(HookName::SandboxReady), 1);
    }

    #[test]
    fn test_registrations_stamped_with_plugin_id() {
        let mut manager = PluginManager::default();
        manager.load(export("guard")).expect("load");
        manager.register(Registration::from_fn::<hook::SandboxReady, _, _>(
            0,
            |_| async { Ok(()) },
        ));

        let runner = manager.build();
        let ids: Vec<_> = runner
            .registry()
            .entries(HookName::SandboxReady)
            .iter()
            .map(|entry| entry.plugin_id().map(str::to_string))
            .collect();
        assert_eq!(ids, vec![Some("guard".to_string()), None]);
    }
}
