//! # locale-router
//!
//! A declarative, locale-aware route table for server-rendered applications.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient access.
//! You can depend on `locale-router` to get everything, or depend on the
//! individual crates for finer-grained control.
//!
//! # Examples
//!
//! ```
//! use locale_router::prelude::*;
//!
//! let mut routes = Routes::new();
//! routes
//!     .add(RouteDefinition::new("home").pattern(""))?
//!     .add(RouteDefinition::new("post").locale("fr").pattern("/blog/:slug"))?;
//!
//! let urls = routes.find_and_get_urls("post", Some("fr"), &Params::from([("slug", "salut")]))?;
//! assert_eq!(urls.as_path, "/fr/blog/salut");
//! assert_eq!(urls.href, "/blog?slug=salut");
//!
//! let result = routes.match_url(&urls.as_path);
//! assert_eq!(result.route.map(|r| r.name()), Some("post"));
//! # Ok::<(), RouterError>(())
//! ```

/// Core types, settings, logging, and error types.
pub use locale_router_core as core;

/// Pattern compiler, route table, dispatch, and navigation adapters.
pub use locale_router_http as http;

// Third-party re-exports
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// The types most applications need.
pub mod prelude {
    pub use locale_router_core::logging::setup_logging;
    pub use locale_router_core::settings_loader;
    pub use locale_router_core::{
        ParamValue, Params, RouteDefinition, RouterError, RouterResult, Settings,
    };
    pub use locale_router_http::{
        Handler, HandlerContext, Link, LinkRenderer, MatchResult, Navigator, ParsedUrl, Renderer,
        RequestHandler, RequestUrl, Route, RouteNavigator, Routes, RoutesConfig, Urls,
    };
}
