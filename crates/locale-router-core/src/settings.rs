//! Settings for the locale-router workspace.
//!
//! This module provides the [`Settings`] struct, which holds router
//! configuration, and [`RouteDefinition`], the canonical description of a
//! single named route. A route table can be registered by hand through
//! definitions or built declaratively from the `routes` list in settings.

use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};

/// The canonical description of one named route.
///
/// Every field except `name` is optional; the route table fills in the
/// defaults at registration time (the table's default locale, `/` + `name`
/// as the pattern, and the pattern skeleton as the page).
///
/// Definitions can be built with the chained setters, with the
/// [`positional`](RouteDefinition::positional) convenience constructor, or
/// deserialized from configuration. All forms produce the same value.
///
/// # Examples
///
/// ```
/// use locale_router_core::RouteDefinition;
///
/// let built = RouteDefinition::new("blog").locale("en").pattern("/blog/:slug");
/// let positional = RouteDefinition::positional("blog", Some("en"), Some("/blog/:slug"), None);
/// assert_eq!(built, positional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// The unique route name.
    pub name: String,
    /// The locale code; the table default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// The path template, without the locale prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// The view the route renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl RouteDefinition {
    /// Creates a definition with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: None,
            pattern: None,
            page: None,
        }
    }

    /// Builds a definition from positional arguments.
    pub fn positional(
        name: &str,
        locale: Option<&str>,
        pattern: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            locale: locale.map(String::from),
            pattern: pattern.map(String::from),
            page: page.map(String::from),
        }
    }

    /// Sets the locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the path template.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the page.
    #[must_use]
    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }
}

impl From<&str> for RouteDefinition {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RouteDefinition {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// The complete set of router settings.
///
/// # Examples
///
/// ```
/// use locale_router_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_locale, "en");
/// assert!(settings.routes.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,

    // ── Internationalization ─────────────────────────────────────────

    /// The locale used when a route definition omits one.
    pub default_locale: String,
    /// Locales the application serves. Empty means "any locale".
    pub locales: Vec<String>,

    // ── Routes ───────────────────────────────────────────────────────

    /// Route definitions, in registration order.
    pub routes: Vec<RouteDefinition>,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            default_locale: "en".to_string(),
            locales: Vec::new(),
            routes: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Checks that the locale configuration is coherent.
    ///
    /// The default locale must be non-empty, and when `locales` is set, the
    /// default locale and every route's explicit locale must be listed in it.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::ConfigurationError`] describing the first problem found.
    pub fn validate(&self) -> RouterResult<()> {
        if self.default_locale.trim().is_empty() {
            return Err(RouterError::ConfigurationError(
                "default_locale must not be empty".to_string(),
            ));
        }

        if self.locales.is_empty() {
            return Ok(());
        }

        if !self.locales.contains(&self.default_locale) {
            return Err(RouterError::ConfigurationError(format!(
                "default_locale '{}' is not listed in locales",
                self.default_locale
            )));
        }

        for route in &self.routes {
            if let Some(locale) = &route.locale {
                if !self.locales.contains(locale) {
                    return Err(RouterError::ConfigurationError(format!(
                        "route '{}' uses locale '{locale}' which is not listed in locales",
                        route.name
                    )));
                }
            }
        }

        Ok(())
    }
}
