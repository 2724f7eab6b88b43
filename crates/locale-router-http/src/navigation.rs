//! Link and programmatic-navigation adapters.
//!
//! Both adapters only resolve a route name into its `(href, as)` pair and
//! forward the call to a host-supplied capability. Rendering and history
//! handling stay with the host.

use locale_router_core::utils::Params;
use locale_router_core::RouterResult;

use crate::urls::route::Urls;
use crate::urls::table::Routes;

/// Host capability that renders a navigation link.
pub trait LinkRenderer {
    /// Any extra properties the host's link accepts (class names, children, ...).
    type Props;
    /// What rendering a link produces.
    type Output;

    /// Renders a link to `href`, displayed to the user as `as_path`.
    fn render_link(&self, href: &str, as_path: &str, props: Self::Props) -> Self::Output;
}

impl<L: LinkRenderer + ?Sized> LinkRenderer for &L {
    type Props = L::Props;
    type Output = L::Output;

    fn render_link(&self, href: &str, as_path: &str, props: Self::Props) -> Self::Output {
        (**self).render_link(href, as_path, props)
    }
}

/// Resolves route names into links.
///
/// Created by [`Routes::link`].
///
/// # Examples
///
/// ```
/// use locale_router_core::{Params, RouteDefinition};
/// use locale_router_http::navigation::LinkRenderer;
/// use locale_router_http::Routes;
///
/// struct Anchor;
///
/// impl LinkRenderer for Anchor {
///     type Props = &'static str;
///     type Output = String;
///
///     fn render_link(&self, href: &str, as_path: &str, text: &'static str) -> String {
///         format!("<a href=\"{as_path}\" data-href=\"{href}\">{text}</a>")
///     }
/// }
///
/// let mut routes = Routes::new();
/// routes.add(RouteDefinition::new("post").pattern("/blog/:slug").page("/blog"))?;
///
/// let link = routes.link(Anchor);
/// let html = link.render("post", &Params::from([("slug", "hello")]), None, "Hello")?;
/// assert_eq!(html, "<a href=\"/en/blog/hello\" data-href=\"/blog?slug=hello\">Hello</a>");
/// # Ok::<(), locale_router_core::RouterError>(())
/// ```
#[derive(Debug)]
pub struct Link<'r, L> {
    routes: &'r Routes,
    renderer: L,
}

impl<'r, L: LinkRenderer> Link<'r, L> {
    pub(crate) const fn new(routes: &'r Routes, renderer: L) -> Self {
        Self { routes, renderer }
    }

    /// Renders a link to the named route.
    ///
    /// `props` is handed to the renderer untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::RouteNotFound`](locale_router_core::RouterError::RouteNotFound)
    /// for an unknown name or locale, and any URL generation error.
    pub fn render(
        &self,
        route: &str,
        params: &Params,
        locale: Option<&str>,
        props: L::Props,
    ) -> RouterResult<L::Output> {
        let Urls { as_path, href } = self.routes.find_and_get_urls(route, locale, params)?;
        Ok(self.renderer.render_link(&href, &as_path, props))
    }
}

/// Host capability for programmatic navigation.
pub trait Navigator {
    /// Options passed through to the host (scroll behavior, shallow routing, ...).
    type Options;
    /// What a navigation call returns.
    type Output;

    /// Navigates to `href`, showing `as_path`, and pushes a history entry.
    fn push(&self, href: &str, as_path: &str, options: Self::Options) -> Self::Output;

    /// Navigates to `href`, showing `as_path`, replacing the current entry.
    fn replace(&self, href: &str, as_path: &str, options: Self::Options) -> Self::Output;

    /// Prefetches the page behind `href`.
    fn prefetch(&self, href: &str, as_path: &str, options: Self::Options) -> Self::Output;
}

impl<N: Navigator + ?Sized> Navigator for &N {
    type Options = N::Options;
    type Output = N::Output;

    fn push(&self, href: &str, as_path: &str, options: Self::Options) -> Self::Output {
        (**self).push(href, as_path, options)
    }

    fn replace(&self, href: &str, as_path: &str, options: Self::Options) -> Self::Output {
        (**self).replace(href, as_path, options)
    }

    fn prefetch(&self, href: &str, as_path: &str, options: Self::Options) -> Self::Output {
        (**self).prefetch(href, as_path, options)
    }
}

/// Resolves route names before forwarding to a [`Navigator`].
///
/// Created by [`Routes::navigator`].
#[derive(Debug)]
pub struct RouteNavigator<'r, N> {
    routes: &'r Routes,
    navigator: N,
}

impl<'r, N: Navigator> RouteNavigator<'r, N> {
    pub(crate) const fn new(routes: &'r Routes, navigator: N) -> Self {
        Self { routes, navigator }
    }

    /// Returns the wrapped navigator.
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Pushes a history entry for the named route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::RouteNotFound`](locale_router_core::RouterError::RouteNotFound)
    /// for an unknown name or locale, and any URL generation error.
    pub fn push_route(
        &self,
        route: &str,
        params: &Params,
        locale: Option<&str>,
        options: N::Options,
    ) -> RouterResult<N::Output> {
        let urls = self.resolve(route, params, locale)?;
        Ok(self.navigator.push(&urls.href, &urls.as_path, options))
    }

    /// Replaces the current history entry with the named route.
    ///
    /// # Errors
    ///
    /// See [`push_route`](Self::push_route).
    pub fn replace_route(
        &self,
        route: &str,
        params: &Params,
        locale: Option<&str>,
        options: N::Options,
    ) -> RouterResult<N::Output> {
        let urls = self.resolve(route, params, locale)?;
        Ok(self.navigator.replace(&urls.href, &urls.as_path, options))
    }

    /// Prefetches the named route.
    ///
    /// # Errors
    ///
    /// See [`push_route`](Self::push_route).
    pub fn prefetch_route(
        &self,
        route: &str,
        params: &Params,
        locale: Option<&str>,
        options: N::Options,
    ) -> RouterResult<N::Output> {
        let urls = self.resolve(route, params, locale)?;
        Ok(self.navigator.prefetch(&urls.href, &urls.as_path, options))
    }

    fn resolve(&self, route: &str, params: &Params, locale: Option<&str>) -> RouterResult<Urls> {
        let urls = self.routes.find_and_get_urls(route, locale, params)?;
        tracing::debug!(route, href = %urls.href, as_path = %urls.as_path, "Navigating");
        Ok(urls)
    }
}
