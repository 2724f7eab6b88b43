//! Utility types for the locale-router workspace.
//!
//! This module provides:
//! - [`Params`]: an insertion-ordered map of route and query parameters.
//! - [`ParamValue`]: a single value or a list of values.

mod params;

pub use params::{ParamValue, Params};
