//! Request dispatch onto a host framework.
//!
//! A [`RequestHandler`] runs the matcher for each incoming request and hands
//! the result to the host:
//!
//! 1. a matched route with a custom [`Handler`] calls that handler,
//! 2. a matched route without one calls [`Renderer::render`] with the
//!    route's page and the merged query,
//! 3. no match calls [`Renderer::fallback`] with the already parsed URL.
//!
//! The host framework is abstracted behind [`Renderer`] and [`RequestUrl`],
//! so the dispatcher works with `http::Request` as well as plain URL strings.

use std::borrow::Cow;
use std::fmt;

use locale_router_core::logging::dispatch_span;
use locale_router_core::utils::Params;

use crate::parsed_url::ParsedUrl;
use crate::urls::route::Route;
use crate::urls::table::{MatchResult, Routes};

/// Anything a request URL can be read from.
pub trait RequestUrl {
    /// Returns the request target: an origin-relative path with its query
    /// string, or an absolute URL.
    fn request_url(&self) -> Cow<'_, str>;
}

impl<B> RequestUrl for http::Request<B> {
    fn request_url(&self) -> Cow<'_, str> {
        let uri = self.uri();
        if uri.scheme().is_some() {
            Cow::Owned(uri.to_string())
        } else {
            Cow::Borrowed(uri.path_and_query().map_or("/", http::uri::PathAndQuery::as_str))
        }
    }
}

impl RequestUrl for str {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl RequestUrl for String {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: RequestUrl + ?Sized> RequestUrl for &T {
    fn request_url(&self) -> Cow<'_, str> {
        (**self).request_url()
    }
}

/// The host framework's page renderer.
pub trait Renderer {
    /// The host's request type.
    type Request: RequestUrl;
    /// The host's response type (or response builder).
    type Response;
    /// What a dispatch returns.
    type Output;

    /// Renders `page` with the merged route and query parameters.
    fn render(
        &self,
        request: Self::Request,
        response: Self::Response,
        page: &str,
        query: &Params,
    ) -> Self::Output;

    /// Handles a request no route matched.
    fn fallback(
        &self,
        request: Self::Request,
        response: Self::Response,
        parsed_url: &ParsedUrl,
    ) -> Self::Output;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    type Request = R::Request;
    type Response = R::Response;
    type Output = R::Output;

    fn render(
        &self,
        request: Self::Request,
        response: Self::Response,
        page: &str,
        query: &Params,
    ) -> Self::Output {
        (**self).render(request, response, page, query)
    }

    fn fallback(
        &self,
        request: Self::Request,
        response: Self::Response,
        parsed_url: &ParsedUrl,
    ) -> Self::Output {
        (**self).fallback(request, response, parsed_url)
    }
}

/// Everything a custom [`Handler`] receives for a matched request.
pub struct HandlerContext<'r, Req, Res> {
    /// The host's request.
    pub request: Req,
    /// The host's response.
    pub response: Res,
    /// The matched route.
    pub route: &'r Route,
    /// The URL's query parameters overwritten by the route's path parameters.
    pub query: Params,
    /// The decomposed request URL.
    pub parsed_url: ParsedUrl,
}

impl<Req, Res> fmt::Debug for HandlerContext<'_, Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("route", &self.route.name())
            .field("query", &self.query)
            .field("parsed_url", &self.parsed_url)
            .finish_non_exhaustive()
    }
}

/// A custom handler that replaces [`Renderer::render`] for matched requests.
///
/// Implemented for every `Fn(HandlerContext<'r, Req, Res>) -> Out` closure.
pub trait Handler<'r, Req, Res, Out> {
    /// Handles a matched request.
    fn handle(&self, context: HandlerContext<'r, Req, Res>) -> Out;
}

impl<'r, F, Req, Res, Out> Handler<'r, Req, Res, Out> for F
where
    F: Fn(HandlerContext<'r, Req, Res>) -> Out,
{
    fn handle(&self, context: HandlerContext<'r, Req, Res>) -> Out {
        self(context)
    }
}

type BoxedHandler<'r, R> = Box<
    dyn Handler<'r, <R as Renderer>::Request, <R as Renderer>::Response, <R as Renderer>::Output>
        + Send
        + Sync
        + 'r,
>;

/// Dispatches requests through a [`Routes`] table onto a [`Renderer`].
///
/// Created by [`Routes::request_handler`].
///
/// # Examples
///
/// ```
/// use locale_router_core::{Params, RouteDefinition};
/// use locale_router_http::dispatch::Renderer;
/// use locale_router_http::{ParsedUrl, Routes};
///
/// struct Pages;
///
/// impl Renderer for Pages {
///     type Request = &'static str;
///     type Response = ();
///     type Output = String;
///
///     fn render(&self, _req: &'static str, _res: (), page: &str, query: &Params) -> String {
///         format!("render {page} with {} params", query.len())
///     }
///
///     fn fallback(&self, _req: &'static str, _res: (), parsed_url: &ParsedUrl) -> String {
///         format!("404 {}", parsed_url.pathname)
///     }
/// }
///
/// let mut routes = Routes::new();
/// routes.add(RouteDefinition::new("post").pattern("/blog/:slug").page("/blog"))?;
///
/// let handler = routes.request_handler(Pages);
/// assert_eq!(handler.handle("/en/blog/hello?x=1", ()), "render /blog with 2 params");
/// assert_eq!(handler.handle("/en/missing", ()), "404 /en/missing");
/// # Ok::<(), locale_router_core::RouterError>(())
/// ```
pub struct RequestHandler<'r, R: Renderer> {
    routes: &'r Routes,
    renderer: R,
    handler: Option<BoxedHandler<'r, R>>,
}

impl<R: Renderer> fmt::Debug for RequestHandler<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHandler")
            .field("routes", &self.routes)
            .field("custom_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

impl<'r, R: Renderer> RequestHandler<'r, R> {
    pub(crate) const fn new(routes: &'r Routes, renderer: R) -> Self {
        Self {
            routes,
            renderer,
            handler: None,
        }
    }

    /// Routes matched requests to `handler` instead of [`Renderer::render`].
    ///
    /// Unmatched requests still go to [`Renderer::fallback`].
    #[must_use]
    pub fn with_handler<H>(mut self, handler: H) -> Self
    where
        H: Handler<'r, R::Request, R::Response, R::Output> + Send + Sync + 'r,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Returns the renderer.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Matches the request URL and dispatches it.
    pub fn handle(&self, request: R::Request, response: R::Response) -> R::Output {
        let url = request.request_url().into_owned();
        let span = dispatch_span(&url);
        let _guard = span.enter();

        let MatchResult {
            route,
            query,
            parsed_url,
        } = self.routes.match_url(&url);

        match (route, &self.handler) {
            (Some(route), Some(handler)) => {
                tracing::debug!(name = route.name(), "Dispatching to custom handler");
                handler.handle(HandlerContext {
                    request,
                    response,
                    route,
                    query,
                    parsed_url,
                })
            }
            (Some(route), None) => {
                tracing::debug!(name = route.name(), page = route.page(), "Rendering page");
                self.renderer.render(request, response, route.page(), &query)
            }
            (None, _) => {
                tracing::debug!(path = %parsed_url.pathname, "Falling back to default handler");
                self.renderer.fallback(request, response, &parsed_url)
            }
        }
    }
}
