//! Core error types for the locale-router workspace.
//!
//! [`RouterError`] covers registration failures, lookups of unknown routes,
//! URL generation failures, and configuration problems. "No route matches
//! this URL" is deliberately absent: matching reports that outcome through
//! an empty match result rather than an error.

use thiserror::Error;

/// The primary error type for the locale-router workspace.
///
/// Each variant maps to an HTTP status code via [`RouterError::status_code`],
/// so host integrations can turn a failed URL resolution into a response
/// without inspecting the variant themselves.
#[derive(Error, Debug)]
pub enum RouterError {
    // ── Registration ─────────────────────────────────────────────────

    /// A route with this name is already registered in the table.
    #[error("Duplicate route name: {0}")]
    DuplicateRouteName(String),

    // ── Lookup ───────────────────────────────────────────────────────

    /// No route with this name is registered (or not for the requested locale).
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    // ── URL generation ───────────────────────────────────────────────

    /// A required path parameter was not supplied to the URL builder.
    #[error("Missing parameter '{param}' for route '{route}'")]
    MissingParameter {
        /// The pattern the builder was compiled from.
        route: String,
        /// The name of the missing parameter.
        param: String,
    },

    /// A supplied parameter value cannot be substituted into its segment.
    #[error("Invalid value for parameter '{param}': {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        param: String,
        /// Why the value was rejected.
        reason: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A route pattern or route definition is malformed.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RouterError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `MissingParameter`, `InvalidParameter` -> 400
    /// - `RouteNotFound` -> 404
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } => 400,
            Self::RouteNotFound(_) => 404,
            Self::DuplicateRouteName(_)
            | Self::ImproperlyConfigured(_)
            | Self::ConfigurationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

/// A convenience type alias for `Result<T, RouterError>`.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_error_status_codes() {
        assert_eq!(RouterError::DuplicateRouteName("x".into()).status_code(), 500);
        assert_eq!(RouterError::RouteNotFound("x".into()).status_code(), 404);
        assert_eq!(
            RouterError::MissingParameter {
                route: "/en/a/:b".into(),
                param: "b".into(),
            }
            .status_code(),
            400
        );
        assert_eq!(
            RouterError::InvalidParameter {
                param: "id".into(),
                reason: "x".into(),
            }
            .status_code(),
            400
        );
        assert_eq!(RouterError::ImproperlyConfigured("x".into()).status_code(), 500);
        assert_eq!(RouterError::ConfigurationError("x".into()).status_code(), 500);
    }

    #[test]
    fn test_router_error_display() {
        let err = RouterError::RouteNotFound("blog".into());
        assert_eq!(err.to_string(), "Route not found: blog");

        let err = RouterError::MissingParameter {
            route: "/en/blog/:slug".into(),
            param: "slug".into(),
        };
        assert_eq!(
            err.to_string(),
            "Missing parameter 'slug' for route '/en/blog/:slug'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RouterError = io_err.into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("file missing"));
    }
}
