//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the matching route for a request
//! - Compute the path forwarded upstream
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan; route tables are small
//! - Explicit no-match (`None`) rather than a silent default route

use http::Request;

use crate::config::schema::ProxyRoute;
use crate::routing::matcher::{AndMatcher, HostMatcher, Matcher, PathPrefixMatcher, RequestTarget};

/// Ordered proxy route table.
///
/// **Declaration order is the match priority.** Routes are scanned in the order
/// they appear in the configuration and the first one whose host and path prefix
/// both match wins. No longest-prefix reordering is done: a more specific route
/// (`/api/v2` before `/api`, or a host-bound route before a wildcard one) must be
/// declared first.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

#[derive(Debug)]
struct CompiledRoute {
    route: ProxyRoute,
    matcher: AndMatcher,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Position of the route in the table.
    pub index: usize,
    pub route: &'a ProxyRoute,
    /// Request path as it should be sent upstream.
    pub forward_path: String,
}

impl RouteTable {
    /// Compile routes, keeping their order.
    pub fn from_config(routes: &[ProxyRoute]) -> Self {
        let routes = routes
            .iter()
            .map(|route| {
                let mut matchers: Vec<Box<dyn Matcher>> = Vec::with_capacity(2);
                if let Some(host) = &route.host {
                    matchers.push(Box::new(HostMatcher::new(host.clone())));
                }
                matchers.push(Box::new(PathPrefixMatcher::new(route.path.clone())));

                CompiledRoute {
                    route: route.clone(),
                    matcher: AndMatcher::new(matchers),
                }
            })
            .collect();

        Self { routes }
    }

    /// Find the first route matching `host` and `path`.
    ///
    /// `None` means the request is not proxied; the caller serves htdocs or 404.
    pub fn find(&self, host: &str, path: &str) -> Option<RouteMatch<'_>> {
        self.find_target(&RequestTarget::new(host, path))
    }

    /// Same as [`find`](Self::find), reading host and path from a request.
    pub fn find_request<B>(&self, req: &Request<B>) -> Option<RouteMatch<'_>> {
        self.find_target(&RequestTarget::from_request(req))
    }

    fn find_target(&self, target: &RequestTarget<'_>) -> Option<RouteMatch<'_>> {
        let (index, compiled) = self
            .routes
            .iter()
            .enumerate()
            .find(|(_, c)| c.matcher.matches(target))?;

        tracing::trace!(
            host = target.host,
            path = target.path,
            route = index,
            "Route matched"
        );

        Some(RouteMatch {
            index,
            route: &compiled.route,
            forward_path: forward_path(&compiled.route, target.path),
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in match order.
    pub fn iter(&self) -> impl Iterator<Item = &ProxyRoute> {
        self.routes.iter().map(|c| &c.route)
    }
}

/// Path sent upstream. With `strip_path` the prefix is removed and the result
/// always starts with `/`.
fn forward_path(route: &ProxyRoute, path: &str) -> String {
    if !route.strip_path {
        return path.to_string();
    }

    let rest = &path[route.path.len()..];
    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    }
}
