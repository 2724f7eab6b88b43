//! The ordered route table and the matcher.
//!
//! [`Routes`] holds every registered [`Route`] in registration order together
//! with the default locale. Registration happens once at startup through
//! `&mut Routes`; afterwards the table is only read, so it can be shared
//! behind an `Arc` by any number of concurrent requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use locale_router_core::settings::{RouteDefinition, Settings};
use locale_router_core::utils::Params;
use locale_router_core::{RouterError, RouterResult};

use super::route::{Route, Urls};
use crate::dispatch::{Renderer, RequestHandler};
use crate::navigation::{Link, LinkRenderer, Navigator, RouteNavigator};
use crate::parsed_url::ParsedUrl;

/// Locale used when neither the caller nor the settings name one.
pub const DEFAULT_LOCALE: &str = "en";

/// Construction-time configuration for a [`Routes`] table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// The locale given to routes registered without one.
    pub locale: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// The result of matching a URL against a [`Routes`] table.
#[derive(Debug, Clone)]
pub struct MatchResult<'r> {
    /// The first route whose pattern accepted the path, if any.
    pub route: Option<&'r Route>,
    /// The URL's query parameters, overwritten by the extracted path
    /// parameters when a route matched.
    pub query: Params,
    /// The decomposed input URL.
    pub parsed_url: ParsedUrl,
}

impl MatchResult<'_> {
    /// Returns `true` if a route matched.
    pub const fn is_match(&self) -> bool {
        self.route.is_some()
    }
}

/// An ordered, locale-aware table of named routes.
///
/// # Examples
///
/// ```
/// use locale_router_core::RouteDefinition;
/// use locale_router_http::Routes;
///
/// let mut routes = Routes::new();
/// routes
///     .add(RouteDefinition::new("home").pattern(""))?
///     .add(RouteDefinition::new("post").pattern("/blog/:slug").page("/blog"))?;
///
/// let result = routes.match_url("/en/blog/hello?ref=mail");
/// assert_eq!(result.route.map(|r| r.name()), Some("post"));
/// assert_eq!(result.query.get_str("slug"), Some("hello"));
/// assert_eq!(result.query.get_str("ref"), Some("mail"));
/// # Ok::<(), locale_router_core::RouterError>(())
/// ```
pub struct Routes {
    default_locale: String,
    routes: Vec<Route>,
}

impl fmt::Debug for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routes")
            .field("default_locale", &self.default_locale)
            .field("routes", &self.routes.len())
            .finish()
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::new()
    }
}

impl Routes {
    /// Creates an empty table using [`DEFAULT_LOCALE`].
    pub fn new() -> Self {
        Self::with_config(RoutesConfig::default())
    }

    /// Creates an empty table from a [`RoutesConfig`].
    pub fn with_config(config: RoutesConfig) -> Self {
        Self {
            default_locale: config.locale,
            routes: Vec::new(),
        }
    }

    /// Creates an empty table whose routes default to `locale`.
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self::with_config(RoutesConfig {
            locale: locale.into(),
        })
    }

    /// Builds a table from declarative settings.
    ///
    /// The settings are validated first, then every route is registered in
    /// the order it appears.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::ConfigurationError`] for invalid settings and
    /// any registration error from [`add`](Self::add).
    pub fn from_settings(settings: &Settings) -> RouterResult<Self> {
        settings.validate()?;
        let mut routes = Self::with_locale(settings.default_locale.clone());
        for definition in &settings.routes {
            routes.add(definition.clone())?;
        }
        Ok(routes)
    }

    /// Registers a route at the end of the table.
    ///
    /// Returns `&mut Self` so registrations can be chained with `?`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::DuplicateRouteName`] if the name is already registered.
    ///   The table is left unchanged.
    /// - [`RouterError::ImproperlyConfigured`] if the name is empty or the
    ///   pattern does not compile.
    pub fn add(&mut self, definition: impl Into<RouteDefinition>) -> RouterResult<&mut Self> {
        let definition = definition.into();

        if self.get(&definition.name).is_some() {
            tracing::warn!(name = %definition.name, "Route name already registered");
            return Err(RouterError::DuplicateRouteName(definition.name));
        }

        let route = Route::new(definition, &self.default_locale)?;
        tracing::debug!(
            name = route.name(),
            locale = route.locale(),
            pattern = route.compiled().source(),
            page = route.page(),
            "Registered route"
        );
        self.routes.push(route);
        Ok(self)
    }

    /// Returns the route registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name() == name)
    }

    /// Returns the route registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::RouteNotFound`] if no route has that name.
    pub fn find_by_name(&self, name: &str) -> RouterResult<&Route> {
        self.get(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))
    }

    /// Looks up `name` and generates its URLs for `params`.
    ///
    /// When `locale` is given it must equal the route's locale.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::RouteNotFound`] for an unknown name or a
    /// mismatched locale, and any error from [`Route::get_urls`].
    pub fn find_and_get_urls(
        &self,
        name: &str,
        locale: Option<&str>,
        params: &Params,
    ) -> RouterResult<Urls> {
        let route = self.find_by_name(name)?;
        if let Some(locale) = locale {
            if locale != route.locale() {
                return Err(RouterError::RouteNotFound(format!(
                    "{name} (locale '{locale}')"
                )));
            }
        }
        route.get_urls(params)
    }

    /// Matches a raw URL against the table.
    ///
    /// Routes are tried in registration order and the first whose pattern
    /// accepts the pathname wins. Its path parameters overwrite same-named
    /// query parameters; query keys keep their positions and new path keys
    /// are appended. An optional path parameter that did not take part in
    /// the match leaves a same-named query value in place.
    ///
    /// No match is not an error: `route` is `None` and `query` holds the
    /// URL's own query parameters.
    pub fn match_url(&self, url: &str) -> MatchResult<'_> {
        let parsed_url = ParsedUrl::parse(url);
        let mut query = parsed_url.query.clone();

        for route in &self.routes {
            tracing::trace!(
                name = route.name(),
                pattern = route.compiled().source(),
                path = %parsed_url.pathname,
                "Trying route"
            );
            if let Some(params) = route.match_path(&parsed_url.pathname) {
                tracing::debug!(
                    name = route.name(),
                    path = %parsed_url.pathname,
                    "Matched route"
                );
                query.merge(params);
                return MatchResult {
                    route: Some(route),
                    query,
                    parsed_url,
                };
            }
        }

        tracing::debug!(path = %parsed_url.pathname, "No route matched");
        MatchResult {
            route: None,
            query,
            parsed_url,
        }
    }

    /// Returns the registered routes in order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the locale given to routes registered without one.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Returns a request dispatcher that renders matches through `renderer`.
    pub fn request_handler<R: Renderer>(&self, renderer: R) -> RequestHandler<'_, R> {
        RequestHandler::new(self, renderer)
    }

    /// Returns a link adapter that resolves route names for `renderer`.
    pub fn link<L: LinkRenderer>(&self, renderer: L) -> Link<'_, L> {
        Link::new(self, renderer)
    }

    /// Returns a navigation adapter that resolves route names for `navigator`.
    pub fn navigator<N: Navigator>(&self, navigator: N) -> RouteNavigator<'_, N> {
        RouteNavigator::new(self, navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locale_router_core::ParamValue;

    fn table() -> Routes {
        let mut routes = Routes::new();
        routes
            .add(RouteDefinition::new("a").locale("en").pattern("/a/:b/:c+"))
            .unwrap()
            .add(RouteDefinition::new("b").locale("en").pattern("/b/:b"))
            .unwrap()
            .add(RouteDefinition::new("home").locale("en").pattern(""))
            .unwrap();
        routes
    }

    #[test]
    fn test_new_uses_default_locale() {
        let routes = Routes::new();
        assert_eq!(routes.default_locale(), "en");
        assert!(routes.is_empty());
    }

    #[test]
    fn test_with_locale_applies_to_registration() {
        let mut routes = Routes::with_locale("fr");
        routes.add("about").unwrap();
        assert_eq!(routes.get("about").unwrap().locale(), "fr");
    }

    #[test]
    fn test_add_preserves_order() {
        let routes = table();
        let names: Vec<_> = routes.routes().iter().map(Route::name).collect();
        assert_eq!(names, ["a", "b", "home"]);
        assert_eq!(routes.len(), 3);
    }

    #[test]
    fn test_duplicate_name_rejected_across_locales() {
        let mut routes = table();
        let err = routes
            .add(RouteDefinition::new("a").locale("fr"))
            .unwrap_err();
        assert!(matches!(err, RouterError::DuplicateRouteName(ref name) if name == "a"));
        assert_eq!(routes.len(), 3);
    }

    #[test]
    fn test_find_by_name() {
        let routes = table();
        assert_eq!(routes.find_by_name("b").unwrap().name(), "b");
        assert!(matches!(
            routes.find_by_name("nope"),
            Err(RouterError::RouteNotFound(_))
        ));
    }

    #[test]
    fn test_find_and_get_urls_locale() {
        let routes = table();
        let params = Params::from([("b", "x")]);
        let urls = routes.find_and_get_urls("b", Some("en"), &params).unwrap();
        assert_eq!(urls.as_path, "/en/b/x");
        assert_eq!(urls.href, "/b?b=x");

        let urls = routes.find_and_get_urls("b", None, &params).unwrap();
        assert_eq!(urls.as_path, "/en/b/x");

        assert!(matches!(
            routes.find_and_get_urls("b", Some("de"), &params),
            Err(RouterError::RouteNotFound(_))
        ));
    }

    #[test]
    fn test_match_path_params_override_query() {
        let routes = table();
        let result = routes.match_url("/en/b/b?b=x&c=c");
        assert_eq!(result.route.map(Route::name), Some("b"));
        assert_eq!(
            serde_json::to_value(&result.query).unwrap(),
            serde_json::json!({"b": "b", "c": "c"})
        );
    }

    #[test]
    fn test_match_appends_new_path_keys() {
        let routes = table();
        let result = routes.match_url("/en/a/x/1/2?z=1");
        let keys: Vec<_> = result.query.keys().collect();
        assert_eq!(keys, ["z", "b", "c"]);
        assert_eq!(result.query.get("c"), Some(&ParamValue::from(vec!["1", "2"])));
    }

    #[test]
    fn test_match_homepage_only_locale_root() {
        let routes = table();
        assert_eq!(routes.match_url("/en").route.map(Route::name), Some("home"));
        assert_eq!(routes.match_url("/en/").route.map(Route::name), Some("home"));
        assert!(routes.match_url("/en/unknown").route.is_none());
        assert!(routes.match_url("/fr").route.is_none());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let routes = table();
        assert_eq!(routes.match_url("/EN/B/x").route.map(Route::name), Some("b"));
    }

    #[test]
    fn test_first_match_wins() {
        let mut routes = Routes::new();
        routes
            .add(RouteDefinition::new("first").pattern("/post/:id"))
            .unwrap()
            .add(RouteDefinition::new("second").pattern("/post/:slug"))
            .unwrap();
        let result = routes.match_url("/en/post/42");
        assert_eq!(result.route.map(Route::name), Some("first"));
        assert_eq!(result.query.get_str("id"), Some("42"));
        assert!(!result.query.contains_key("slug"));
    }

    #[test]
    fn test_no_match_keeps_query() {
        let routes = table();
        let result = routes.match_url("/nowhere?x=1");
        assert!(!result.is_match());
        assert_eq!(result.query, Params::from([("x", "1")]));
        assert_eq!(result.parsed_url.pathname, "/nowhere");
        assert_eq!(result.parsed_url.search, "?x=1");
    }

    #[test]
    fn test_absent_optional_keeps_query_value() {
        let mut routes = Routes::new();
        routes
            .add(RouteDefinition::new("list").pattern("/list/:page?"))
            .unwrap();
        let result = routes.match_url("/en/list?page=3");
        assert_eq!(result.route.map(Route::name), Some("list"));
        assert_eq!(result.query.get_str("page"), Some("3"));

        let result = routes.match_url("/en/list/7?page=3");
        assert_eq!(result.query.get_str("page"), Some("7"));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            default_locale: "de".to_string(),
            locales: vec!["de".to_string(), "en".to_string()],
            routes: vec![
                RouteDefinition::new("home").pattern(""),
                RouteDefinition::new("about").locale("en"),
            ],
            ..Settings::default()
        };
        let routes = Routes::from_settings(&settings).unwrap();
        assert_eq!(routes.default_locale(), "de");
        assert_eq!(routes.get("home").unwrap().locale(), "de");
        assert_eq!(routes.get("about").unwrap().locale(), "en");
    }

    #[test]
    fn test_from_settings_invalid() {
        let settings = Settings {
            default_locale: "fr".to_string(),
            locales: vec!["en".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            Routes::from_settings(&settings),
            Err(RouterError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_routes_config_default() {
        assert_eq!(RoutesConfig::default().locale, "en");
        let config: RoutesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_routes_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Routes>();
    }
}
