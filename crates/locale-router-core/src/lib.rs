//! # locale-router-core
//!
//! Core types, settings, and error types for the locale-router workspace.
//! This crate has no HTTP dependencies and provides the foundation the
//! routing crate is built on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Utility types ([`Params`], [`ParamValue`])
//! - [`settings`] - Router settings and route definitions
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{RouterError, RouterResult};
pub use settings::{RouteDefinition, Settings};
pub use utils::{ParamValue, Params};
