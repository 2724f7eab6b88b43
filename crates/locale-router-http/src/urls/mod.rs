//! Named, locale-scoped routes.
//!
//! This module provides the route table and everything it is built from:
//!
//! - [`pattern`]: Path templates (`/blog/:slug`, `/docs/:path*`, `/post/:id(\d+)`)
//!   compiled into a matcher and a path builder
//! - [`route`]: One named route and its `as`/`href` URL generation
//! - [`table`]: The ordered route table and first-match-wins matching
//!
//! # Examples
//!
//! ```
//! use locale_router_core::{ParamValue, Params, RouteDefinition};
//! use locale_router_http::urls::table::Routes;
//!
//! let mut routes = Routes::new();
//! routes
//!     .add(RouteDefinition::new("home").pattern(""))?
//!     .add(RouteDefinition::new("docs").pattern("/docs/:path+"))?;
//!
//! // Forward matching
//! let result = routes.match_url("/en/docs/guide/intro?lang=rust");
//! assert_eq!(result.route.map(|r| r.name()), Some("docs"));
//! assert_eq!(
//!     result.query.get("path"),
//!     Some(&ParamValue::from(vec!["guide", "intro"]))
//! );
//!
//! // URL generation
//! let urls = routes.find_by_name("docs")?.get_urls(&result.query)?;
//! assert_eq!(urls.as_path, "/en/docs/guide/intro?lang=rust");
//! assert_eq!(urls.href, "/docs?lang=rust&path=guide%2Fintro");
//! # Ok::<(), locale_router_core::RouterError>(())
//! ```

pub mod pattern;
pub mod route;
pub mod table;
