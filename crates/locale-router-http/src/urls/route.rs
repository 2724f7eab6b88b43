//! Named, locale-scoped routes and URL generation.
//!
//! A [`Route`] is created once at registration and never changes. Its
//! template is compiled against the locale-prefixed path (`/{locale}{pattern}`),
//! so the same route both recognises incoming paths and produces the pair of
//! URLs a link needs:
//!
//! - **as**: the pretty path the user sees, e.g. `/en/blog/hello?page=2`
//! - **href**: the canonical page URL carrying every parameter in the query,
//!   e.g. `/blog?slug=hello&page=2`

use std::fmt;

use serde::Serialize;

use locale_router_core::settings::RouteDefinition;
use locale_router_core::utils::Params;
use locale_router_core::{RouterError, RouterResult};

use super::pattern::{self, CompiledPattern};
use crate::query::to_query_string;

/// The pair of URLs generated for one route instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Urls {
    /// The pretty, locale-prefixed path.
    #[serde(rename = "as")]
    pub as_path: String,
    /// The canonical page URL with every parameter in its query string.
    pub href: String,
}

/// One named route in a route table.
pub struct Route {
    name: String,
    locale: String,
    pattern: String,
    page: String,
    compiled: CompiledPattern,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("locale", &self.locale)
            .field("pattern", &self.pattern)
            .field("page", &self.page)
            .field("regex", &self.compiled.regex().as_str())
            .finish()
    }
}

impl Route {
    /// Builds a route from its definition, filling in defaults.
    ///
    /// - The locale falls back to `default_locale`.
    /// - The pattern falls back to `/{name}`. A leading slash is normalized,
    ///   and an empty pattern (or `/`) is the homepage of the locale.
    /// - The page falls back to the pattern's literal skeleton. An explicit
    ///   page gets exactly one leading slash and loses a trailing `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::ImproperlyConfigured`] for an empty name or a
    /// pattern that does not compile.
    pub fn new(definition: RouteDefinition, default_locale: &str) -> RouterResult<Self> {
        let RouteDefinition {
            name,
            locale,
            pattern,
            page,
        } = definition;

        if name.trim().is_empty() {
            return Err(RouterError::ImproperlyConfigured(
                "Route name must not be empty".to_string(),
            ));
        }

        let locale = locale.unwrap_or_else(|| default_locale.to_string());
        let pattern = normalize_pattern(pattern.as_deref(), &name);
        let compiled = pattern::compile(&format!("/{locale}{pattern}"))?;
        let page = match page {
            Some(page) => normalize_page(&page),
            None => pattern::skeleton(&pattern)?,
        };

        Ok(Self {
            name,
            locale,
            pattern,
            page,
            compiled,
        })
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the locale code.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the normalized pattern without the locale prefix.
    ///
    /// The homepage pattern is the empty string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the page this route renders. Always starts with `/`.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Returns the compiled, locale-prefixed pattern.
    pub const fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }

    /// Returns `true` if this route is its locale's homepage.
    pub fn is_homepage(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Matches a URL path (no query string) and extracts its parameters.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        self.compiled.match_path(path)
    }

    /// Returns the pretty, locale-prefixed path for `params`.
    ///
    /// Parameters the pattern declares are substituted into the path; any
    /// others are appended as a query string.
    ///
    /// # Errors
    ///
    /// Propagates [`RouterError::MissingParameter`] and
    /// [`RouterError::InvalidParameter`] from the path builder.
    pub fn get_as(&self, params: &Params) -> RouterResult<String> {
        let (path_params, leftover): (Vec<_>, Vec<_>) = params
            .iter()
            .partition(|(key, _)| self.compiled.has_key(key));

        let path_params: Params = path_params
            .into_iter()
            .map(|(key, value)| (key, value.clone()))
            .collect();
        let path = self.compiled.build(&path_params)?;

        if leftover.is_empty() {
            return Ok(path);
        }

        let leftover: Params = leftover
            .into_iter()
            .map(|(key, value)| (key, value.clone()))
            .collect();
        Ok(format!("{path}?{}", to_query_string(&leftover)))
    }

    /// Returns the canonical page URL with every parameter in the query.
    ///
    /// The `?` is always present, even when `params` is empty.
    pub fn get_href(&self, params: &Params) -> String {
        format!("{}?{}", self.page, to_query_string(params))
    }

    /// Returns both URLs for `params`.
    ///
    /// # Examples
    ///
    /// ```
    /// use locale_router_core::{ParamValue, Params, RouteDefinition};
    /// use locale_router_http::urls::route::Route;
    ///
    /// let route = Route::new(
    ///     RouteDefinition::new("a").locale("en").pattern("/a/:b/:c+"),
    ///     "en",
    /// )
    /// .unwrap();
    ///
    /// let params = Params::from([
    ///     ("b", ParamValue::from("b")),
    ///     ("c", ParamValue::from(vec!["1", "2"])),
    ///     ("d", ParamValue::from("d")),
    /// ]);
    /// let urls = route.get_urls(&params).unwrap();
    /// assert_eq!(urls.as_path, "/en/a/b/1/2?d=d");
    /// assert_eq!(urls.href, "/a?b=b&c=1%2F2&d=d");
    /// ```
    ///
    /// # Errors
    ///
    /// See [`get_as`](Self::get_as).
    pub fn get_urls(&self, params: &Params) -> RouterResult<Urls> {
        Ok(Urls {
            as_path: self.get_as(params)?,
            href: self.get_href(params),
        })
    }
}

/// Normalizes a pattern to `""` (homepage) or `/segment...`.
fn normalize_pattern(pattern: Option<&str>, name: &str) -> String {
    match pattern {
        None => format!("/{name}"),
        Some(pattern) => {
            let trimmed = pattern.trim_start_matches('/');
            if trimmed.is_empty() {
                String::new()
            } else {
                format!("/{trimmed}")
            }
        }
    }
}

/// Normalizes a page to one leading slash, dropping a trailing `index` segment.
fn normalize_page(page: &str) -> String {
    let trimmed = page.trim_start_matches('/');
    let trimmed = if trimmed == "index" {
        ""
    } else {
        trimmed.strip_suffix("/index").unwrap_or(trimmed)
    };
    format!("/{trimmed}")
}
