//! Handler traits for plugin development.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use hookrunner_core::AppResult;

/// A handler for one hook, receiving that hook's event type `E` and
/// producing its output type `R`.
///
/// Returning `R::default()` means "no result" for the runner. Returning an
/// error or panicking is a handler fault: the runner reports it and
/// carries on as if the handler had returned nothing.
#[async_trait]
pub trait HookHandler<E, R>: Send + Sync
where
    E: Send + Sync + 'static,
    R: Send + 'static,
{
    /// Handles a hook invocation.
    async fn handle(&self, event: &E) -> AppResult<R>;
}

/// A closure-based hook handler for quick handler creation.
///
/// The closure receives its own copy of the event, so the returned future
/// can be `'static`.
pub struct ClosureHandler<E, R> {
    /// Handler function.
    handler: Arc<dyn Fn(E) -> BoxFuture<'static, AppResult<R>> + Send + Sync>,
}

impl<E, R> std::fmt::Debug for ClosureHandler<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl<E, R> ClosureHandler<E, R>
where
    E: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    /// Creates a handler from an async closure.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<R>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |event: E| -> BoxFuture<'static, AppResult<R>> {
                Box::pin(handler(event))
            }),
        }
    }

    /// Wraps this handler into an `Arc<dyn HookHandler>`.
    pub fn into_arc(self) -> Arc<dyn HookHandler<E, R>> {
        Arc::new(self)
    }
}

#[async_trait]
impl<E, R> HookHandler<E, R> for ClosureHandler<E, R>
where
    E: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    async fn handle(&self, event: &E) -> AppResult<R> {
        (self.handler)(event.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookrunner_core::AppError;

    #[tokio::test]
    async fn test_async_closure_receives_event() {
        let handler = ClosureHandler::new(|n: u32| async move { Ok(n * 2) });
        assert_eq!(handler.handle(&21).await.expect("handle"), 42);
    }

    #[tokio::test]
    async fn test_closure_error_passes_through() {
        let handler: ClosureHandler<u32, u32> =
            ClosureHandler::new(|_| async { Err(AppError::plugin("nope")) });
        let err = handler.handle(&1).await.expect_err("should fail");
        assert_eq!(err.message, "nope");
    }
}
