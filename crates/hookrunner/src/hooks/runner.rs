//! Hook runner: invokes registered handlers and folds their outcomes.
//!
//! Every hook is bound to one [`ExecutionModel`]:
//!
//! - `Modifying`: handlers run in priority order, each seeing the value the
//!   previous one produced. A failed handler leaves the value as it was.
//! - `Accumulating`: handlers see the original event; non-empty fragments
//!   are joined with `\n`.
//! - `FireAndForget`: handlers are polled concurrently on the calling task.
//!   The invocation settles once every handler has.
//! - `Blocking`: handlers run in priority order until one blocks.
//! - `StrictSequential`: handlers run one after another, no result.
//!
//! A handler fault (error, panic, or configured timeout) is reported to the
//! [`FaultSink`] and never reaches the caller.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use tracing::debug;

use hookrunner_core::config::RunnerConfig;

use super::definitions::{ExecutionModel, Hook, HookName};
use super::fault::{FaultKind, FaultSink, HookFault, TracingFaultSink};
use super::registry::{HookRegistry, RegisteredHandler, Registration};

/// Dispatches hook invocations to registered handlers.
#[derive(Debug, Clone)]
pub struct HookRunner {
    /// Hook registry, read-only for the runner's lifetime.
    registry: Arc<HookRegistry>,
    /// Dispatch settings.
    config: RunnerConfig,
    /// Destination for handler faults.
    faults: Arc<dyn FaultSink>,
}

impl HookRunner {
    /// Creates a runner over the given registrations.
    pub fn new(registrations: impl IntoIterator<Item = Registration>, config: RunnerConfig) -> Self {
        Self::from_registry(HookRegistry::from_registrations(registrations), config)
    }

    /// Creates a runner over an existing registry.
    pub fn from_registry(registry: HookRegistry, config: RunnerConfig) -> Self {
        debug!(
            registrations = registry.len(),
            hooks = registry.registered_hooks().len(),
            "Hook runner created"
        );

        Self {
            registry: Arc::new(registry),
            config,
            faults: Arc::new(TracingFaultSink),
        }
    }

    /// Creates a runner with no handlers.
    pub fn empty() -> Self {
        Self::from_registry(HookRegistry::new(), RunnerConfig::default())
    }

    /// Replaces the fault sink.
    pub fn with_fault_sink(mut self, sink: Arc<dyn FaultSink>) -> Self {
        self.faults = sink;
        self
    }

    /// Returns whether any handlers are registered for a hook.
    pub fn has_handlers(&self, hook: HookName) -> bool {
        self.registry.has_handlers(hook)
    }

    /// Returns the hook registry.
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Modifying model: threads `state` through every handler.
    ///
    /// `view` builds the event each handler receives from the current
    /// state; `merge` folds a handler's output back into the state.
    pub(crate) async fn run_modifying<H, S, V, M>(&self, mut state: S, view: V, mut merge: M) -> S
    where
        H: Hook,
        V: Fn(&S) -> H::Event,
        M: FnMut(&mut S, H::Output),
    {
        let handlers = self.dispatch_list::<H>(ExecutionModel::Modifying);

        for handler in &handlers {
            let event = view(&state);
            if let Some(output) = self.invoke(handler, &event).await {
                merge(&mut state, output);
            }
        }

        state
    }

    /// Accumulating model: joins every non-empty fragment with `\n`.
    pub(crate) async fn run_accumulating<H, F>(&self, event: &H::Event, fragment: F) -> String
    where
        H: Hook,
        F: Fn(H::Output) -> Option<String>,
    {
        let handlers = self.dispatch_list::<H>(ExecutionModel::Accumulating);
        let mut parts = Vec::new();

        for handler in &handlers {
            if let Some(part) = self.invoke(handler, event).await.and_then(&fragment) {
                if !part.is_empty() {
                    parts.push(part);
                }
            }
        }

        parts.join("\n")
    }

    /// Fire-and-forget model: polls every handler concurrently and waits
    /// for all of them to settle.
    pub(crate) async fn run_fire_and_forget<H: Hook>(&self, event: &H::Event) {
        let handlers = self.dispatch_list::<H>(ExecutionModel::FireAndForget);

        join_all(handlers.iter().map(|handler| self.invoke(handler, event))).await;
    }

    /// Blocking model: returns the first output `blocks` accepts.
    pub(crate) async fn run_blocking<H, B>(&self, event: &H::Event, blocks: B) -> Option<H::Output>
    where
        H: Hook,
        B: Fn(&H::Output) -> bool,
    {
        let handlers = self.dispatch_list::<H>(ExecutionModel::Blocking);

        for handler in &handlers {
            if let Some(output) = self.invoke(handler, event).await {
                if blocks(&output) {
                    debug!(
                        hook = %H::NAME,
                        plugin_id = %handler.plugin_id.unwrap_or("unknown"),
                        priority = handler.priority,
                        "Handler blocked, skipping remaining handlers"
                    );
                    return Some(output);
                }
            }
        }

        None
    }

    /// Strict-sequential model: each handler settles before the next starts.
    pub(crate) async fn run_strict_sequential<H: Hook>(&self, event: &H::Event) {
        let handlers = self.dispatch_list::<H>(ExecutionModel::StrictSequential);

        for handler in &handlers {
            self.invoke(handler, event).await;
        }
    }

    fn dispatch_list<H: Hook>(&self, model: ExecutionModel) -> Vec<RegisteredHandler<'_, H>> {
        debug_assert_eq!(H::NAME.model(), model, "hook dispatched under the wrong model");

        let handlers = self.registry.query::<H>();
        debug!(
            hook = %H::NAME,
            model = %model,
            handler_count = handlers.len(),
            "Dispatching hook"
        );
        handlers
    }

    /// Runs one handler, turning any fault into `None`.
    async fn invoke<H: Hook>(
        &self,
        handler: &RegisteredHandler<'_, H>,
        event: &H::Event,
    ) -> Option<H::Output> {
        if self.config.trace_dispatch {
            debug!(
                hook = %H::NAME,
                plugin_id = %handler.plugin_id.unwrap_or("unknown"),
                priority = handler.priority,
                "Invoking hook handler"
            );
        }

        // The call itself sits inside the guarded future so a panic raised
        // before the handler returns its future is caught as well.
        let call = AssertUnwindSafe(async { handler.handler.handle(event).await }).catch_unwind();

        let outcome = match self.config.handler_timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    self.report::<H>(handler, FaultKind::TimedOut(limit));
                    return None;
                }
            },
            None => call.await,
        };

        match outcome {
            Ok(Ok(output)) => Some(output),
            Ok(Err(err)) => {
                self.report::<H>(handler, FaultKind::Failed(err));
                None
            }
            Err(panic) => {
                self.report::<H>(handler, FaultKind::Panicked(panic_message(panic.as_ref())));
                None
            }
        }
    }

    fn report<H: Hook>(&self, handler: &RegisteredHandler<'_, H>, kind: FaultKind) {
        self.faults
            .report(HookFault::new(H::NAME, handler.plugin_id, kind));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let owned: Box<dyn Any + Send> = Box::new("owned".to_string());
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let borrowed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(borrowed.as_ref()), "static");

        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_empty_runner_has_no_handlers() {
        let runner = HookRunner::empty();
        for hook in HookName::ALL {
            assert!(!runner.has_handlers(*hook));
        }
    }
}
