//! # hookrunner-core
//!
//! Core crate for the hook runner. Contains configuration schemas and the
//! unified error system shared by the engine, plugins, and the host.
//!
//! This crate has **no** internal dependencies on other hookrunner crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
