//! Convenience result type alias for the hook runner.

use crate::error::AppError;

/// A specialized `Result` type for hook runner operations.
///
/// Handlers return this as well, so plugin code can use `?` on anything
/// that converts into [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
