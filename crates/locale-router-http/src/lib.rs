//! # locale-router-http
//!
//! The routing layer of locale-router. Registers named, locale-scoped routes,
//! matches incoming URLs against them, generates the pretty (`as`) and
//! canonical (`href`) URL for any route, and dispatches requests onto a host
//! framework's renderer.
//!
//! ## Modules
//!
//! - [`urls`] - Pattern compiler, routes, and the route table
//! - [`dispatch`] - Request dispatch through a host [`Renderer`](dispatch::Renderer)
//! - [`navigation`] - Link and programmatic-navigation adapters
//! - [`parsed_url`] - Decomposition of request URLs
//! - [`query`] - Query string parsing and percent-encoding

pub mod dispatch;
pub mod navigation;
pub mod parsed_url;
pub mod query;
pub mod urls;

pub use dispatch::{Handler, HandlerContext, Renderer, RequestHandler, RequestUrl};
pub use navigation::{Link, LinkRenderer, Navigator, RouteNavigator};
pub use parsed_url::ParsedUrl;
pub use urls::route::{Route, Urls};
pub use urls::table::{MatchResult, Routes, RoutesConfig};
