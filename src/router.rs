//! Application router.
//!
//! Wraps a [`Registry`] of boxed handlers and turns lookup outcomes into
//! responses: the matched handler's output, `404 Not Found`, or
//! `405 Method Not Allowed` with an `Allow` header.

use std::sync::Arc;

use bytes::Bytes;
use http::header::ALLOW;
use http::{Method, StatusCode};
use tracing::debug;

use crate::error::RouteError;
use crate::handler::{Handler, RouteHandler, into_route_handler};
use crate::response::Response;
use crate::routing::{MatchResult, Registry};

/// The application router.
///
/// An owned value, built once at startup and handed to
/// [`Server::serve`](crate::Server::serve). Registration methods return
/// `self` so they chain:
///
/// ```rust,no_run
/// # use arbor::{Request, Response, Router};
/// # async fn get_user(_: Request) -> Response { Response::text("") }
/// # async fn create_user(_: Request) -> Response { Response::text("") }
/// # async fn validate_phone(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .get("/", || async { "home" })
///     .get("/users/:id", get_user)
///     .post("/users", create_user)
///     .get(r"/validate/phone/:|^\+?[1-9]\d{1,14}$|", validate_phone);
/// ```
pub struct Router {
    registry: Registry<RouteHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { registry: Registry::new() }
    }

    /// Registers a handler for a method + pattern pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics with the [`RouteError`] message if the route cannot be
    /// registered. Use [`Router::add`] to handle the error instead.
    pub fn on<T>(mut self, method: Method, pattern: &str, handler: impl Handler<T>) -> Self {
        if let Err(e) = self.add(method, pattern, handler) {
            panic!("{e}");
        }
        self
    }

    /// Fallible registration. On error the router is unchanged.
    pub fn add<T>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: impl Handler<T>,
    ) -> Result<&mut Self, RouteError> {
        self.registry
            .register(method, pattern, into_route_handler(handler))?;
        Ok(self)
    }

    pub fn get<T>(self, pattern: &str, handler: impl Handler<T>) -> Self {
        self.on(Method::GET, pattern, handler)
    }

    pub fn post<T>(self, pattern: &str, handler: impl Handler<T>) -> Self {
        self.on(Method::POST, pattern, handler)
    }

    pub fn put<T>(self, pattern: &str, handler: impl Handler<T>) -> Self {
        self.on(Method::PUT, pattern, handler)
    }

    pub fn patch<T>(self, pattern: &str, handler: impl Handler<T>) -> Self {
        self.on(Method::PATCH, pattern, handler)
    }

    pub fn delete<T>(self, pattern: &str, handler: impl Handler<T>) -> Self {
        self.on(Method::DELETE, pattern, handler)
    }

    /// Registered routes, for startup logging or introspection.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.registry
            .routes()
            .into_iter()
            .map(|route| (route.method(), route.pattern().as_str()))
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Routes one fully-read request and produces its response.
    ///
    /// This is the whole request path minus the network: the server calls it
    /// for every request, and tests can call it directly.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();

        let (handler, params) = match self.registry.lookup(&parts.method, parts.uri.path()) {
            MatchResult::Matched { route, params } => (Arc::clone(route.handler()), params.to_path_params()),
            MatchResult::MethodNotAllowed { allowed } => {
                debug!(method = %parts.method, path = parts.uri.path(), "method not allowed");
                return method_not_allowed(&allowed);
            }
            MatchResult::NotFound => {
                debug!(method = %parts.method, path = parts.uri.path(), "no route");
                return Response::status(StatusCode::NOT_FOUND);
            }
        };

        handler(parts, body, params).await
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let list = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW.as_str(), &list)
        .no_body()
}
