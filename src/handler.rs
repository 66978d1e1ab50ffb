//! Route handlers.
//!
//! A handler is an async function that either takes the [`Request`] or takes
//! nothing:
//!
//! ```rust,no_run
//! # use arbor::{Request, Router};
//! async fn health() -> &'static str { "ok" }
//! async fn show(req: Request) -> String { format!("user {}", req.param("id").unwrap_or("?")) }
//!
//! Router::new().get("/health", health).get("/users/:id", show);
//! ```
//!
//! At registration each handler is turned into a [`RouteHandler`], the single
//! callable type the trie stores. The router invokes it with the pieces a
//! lookup produces (request head, body, owned path parameters); the handler
//! assembles its own [`Request`] only if its shape asks for one.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::request::Parts;

use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::routing::PathParams;

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// What the route trie stores: one shared callable per route.
pub(crate) type RouteHandler = Arc<dyn Fn(Parts, Bytes, PathParams) -> BoxFuture + Send + Sync>;

/// Shape marker for `Fn(Request) -> Fut` handlers.
#[doc(hidden)]
pub struct WithRequest;

/// Shape marker for `Fn() -> Fut` handlers.
#[doc(hidden)]
pub struct NoArgs;

/// Implemented for every function or closure usable as a route handler.
///
/// `T` is a shape marker inferred at the call site; it lets one type accept
/// both `async fn(Request)` and `async fn()` without overlapping impls.
pub trait Handler<T>: Send + Sync + 'static {
    #[doc(hidden)]
    fn invoke(&self, head: Parts, body: Bytes, params: PathParams) -> BoxFuture;
}

impl<F, Fut, R> Handler<WithRequest> for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn invoke(&self, head: Parts, body: Bytes, params: PathParams) -> BoxFuture {
        let fut = self(Request::new(head, body, params));
        Box::pin(async move { fut.await.into_response() })
    }
}

impl<F, Fut, R> Handler<NoArgs> for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn invoke(&self, _head: Parts, _body: Bytes, _params: PathParams) -> BoxFuture {
        let fut = self();
        Box::pin(async move { fut.await.into_response() })
    }
}

pub(crate) fn into_route_handler<T, H: Handler<T>>(handler: H) -> RouteHandler {
    Arc::new(move |head: Parts, body: Bytes, params: PathParams| handler.invoke(head, body, params))
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::routing::{Params, ParamKey};

    fn head(uri: &str) -> Parts {
        http::Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    fn params(id: &'static str) -> PathParams {
        let mut params = Params::default();
        params.push(ParamKey::Name("id"), id.into());
        params.to_path_params()
    }

    #[tokio::test]
    async fn test_request_handler_sees_params_and_body() {
        let handler = into_route_handler(|req: Request| async move {
            format!("{} {}", req.param("id").unwrap_or("-"), String::from_utf8_lossy(req.body()))
        });
        let res = handler(head("/users/7"), Bytes::from_static(b"hi"), params("7")).await;
        assert_eq!(res.body().as_ref(), b"7 hi");
    }

    #[tokio::test]
    async fn test_no_arg_handler() {
        let handler = into_route_handler(|| async { StatusCode::NO_CONTENT });
        let res = handler(head("/"), Bytes::new(), PathParams::default()).await;
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_handler_is_shared_across_calls() {
        let handler = into_route_handler(|req: Request| async move { req.path().to_owned() });
        let other = Arc::clone(&handler);
        let (a, b) = tokio::join!(
            handler(head("/a"), Bytes::new(), PathParams::default()),
            other(head("/b"), Bytes::new(), PathParams::default()),
        );
        assert_eq!(a.body().as_ref(), b"/a");
        assert_eq!(b.body().as_ref(), b"/b");
    }
}
