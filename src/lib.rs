//! # arbor
//!
//! A minimal HTTP framework whose core is a segment-trie router.
//!
//! ## Route patterns
//!
//! | Pattern              | Matches                    | Read with               |
//! |----------------------|----------------------------|-------------------------|
//! | `/users`             | exactly `/users`           |                         |
//! | `/users/:id`         | `/users/42`, `/users/bob`  | `req.param("id")`       |
//! | `/v/:\|^[0-9]+$\|`   | `/v/42`, not `/v/4a`       | `req.regex_param(1)`    |
//!
//! Regex segments are anchored to the whole segment and addressed by their
//! 1-based position among the regex segments of their own pattern. The query
//! string never takes part in matching; read it with `req.query("q")`.
//!
//! Literal children beat the `:name` child, which beats regex children;
//! regex children are tried in registration order. The first accepting
//! child wins and the walk never backtracks. See [`routing`] for details.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use arbor::{Request, Response, Router, Server};
//! use http::StatusCode;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get("/users/:id/posts/:postId", get_post)
//!         .get(r"/validate/:|^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$|", validate_email)
//!         .post("/users", create_user);
//!
//!     Server::bind("0.0.0.0:3000").unwrap().serve(app).await.unwrap();
//! }
//!
//! async fn get_post(req: Request) -> Response {
//!     let user = req.param("id").unwrap_or_default();
//!     let post = req.param("postId").unwrap_or_default();
//!     Response::json(format!(r#"{{"userId":"{user}","postId":"{post}"}}"#))
//! }
//!
//! async fn validate_email(req: Request) -> Response {
//!     let email = req.regex_param(1).unwrap_or_default();
//!     Response::json(format!(r#"{{"valid":true,"email":"{email}"}}"#))
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(req.body().to_vec())
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod routing;

pub use error::{Error, RouteError};
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;

pub use http::{Method, StatusCode};
