//! Process-wide runner slot.
//!
//! Only the process boundary (the host's startup and reload paths) should
//! install a runner here. Library code takes a `&HookRunner` instead.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::hooks::definitions::HookName;
use crate::hooks::runner::HookRunner;

static CURRENT: RwLock<Option<Arc<HookRunner>>> = RwLock::new(None);

/// Installs `runner` as the current instance, returning the previous one.
pub fn install(runner: Arc<HookRunner>) -> Option<Arc<HookRunner>> {
    info!(
        registrations = runner.registry().len(),
        "Installing global hook runner"
    );
    CURRENT
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(runner)
}

/// Returns the current instance, if one is installed.
pub fn current() -> Option<Arc<HookRunner>> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Removes the current instance, returning it.
pub fn reset() -> Option<Arc<HookRunner>> {
    CURRENT
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// Returns whether the current instance has handlers for `hook`.
///
/// `false` when no runner is installed.
pub fn has_handlers(hook: HookName) -> bool {
    current().is_some_and(|runner| runner.has_handlers(hook))
}
