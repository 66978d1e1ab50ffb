//! The benchmark application surface: plain, parameterised, query and
//! regex-constrained routes.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example app
//!
//! Try:
//!   curl http://localhost:3000/users/123/posts/456
//!   curl http://localhost:3000/product/123
//!   curl -X POST http://localhost:3000/product -d '{"name":"lamp"}'
//!   curl http://localhost:3000/user/John%20Doe
//!   curl 'http://localhost:3000/search?q=golang&limit=10'
//!   curl http://localhost:3000/validate/phone/+40712345678
//!   curl http://localhost:3000/validate/user/john_doe/email/john@example.com
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'
//!   curl -X DELETE http://localhost:3000/users    → 405, allow: POST

use arbor::{Request, Response, Router, Server, StatusCode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = Router::new()
        .get("/", index)
        .post("/product", create_product)
        .get("/product/:id", get_product)
        .get("/user/:id", get_user)
        .post("/users", create_user)
        .get("/users/:id/posts/:postId", get_post)
        .get("/search", search)
        .get(r"/validate/phone/:|^\+?[1-9]\d{1,14}$|", validate_phone)
        .get(r"/validate/:|^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$|", validate_email)
        .get(
            r"/validate/user/:|^[a-zA-Z0-9_]{3,20}$|/email/:|^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$|",
            validate_user_email,
        );

    let server = match Server::bind("0.0.0.0:3000") {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };
    if let Err(e) = server.serve(app).await {
        tracing::error!("server error: {e}");
    }
}

async fn index() -> &'static str {
    "Hello, arbor!"
}

// POST /product
async fn create_product(req: Request) -> Result<Response, (StatusCode, &'static str)> {
    if req.body().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Invalid JSON format"));
    }
    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .json(r#"{"message":"Product created successfully","product":{"id":12345}}"#))
}

// GET /product/:id
async fn get_product(req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    Response::json(format!(
        r#"{{"id":"{id}","product":{{"id":123,"name":"SampleProduct123","price":299.99,"category":"electronics","sku":"ABC12345","inStock":true}}}}"#
    ))
}

// GET /user/:id
async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    Response::json(format!(
        r#"{{"id":"{id}","user":{{"id":1,"name":"John Doe","email":"john@example.com"}}}}"#
    ))
}

// POST /users — arbor hands over the raw bytes; decoding is the app's business.
async fn create_user(req: Request) -> Result<Response, (StatusCode, &'static str)> {
    if req.body().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Invalid JSON"));
    }
    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/123")
        .json(req.body().to_vec()))
}

// GET /users/:id/posts/:postId
async fn get_post(req: Request) -> Response {
    let user = req.param("id").unwrap_or_default();
    let post = req.param("postId").unwrap_or_default();
    Response::json(format!(r#"{{"userId":"{user}","postId":"{post}"}}"#))
}

// GET /search?q=…&limit=…
async fn search(req: Request) -> Response {
    let query = req.query("q").unwrap_or_default();
    let limit = req.query("limit").unwrap_or_default();
    Response::json(format!(r#"{{"query":"{query}","limit":"{limit}"}}"#))
}

// GET /validate/phone/:|phone|
async fn validate_phone(req: Request) -> Response {
    let phone = req.regex_param(1).unwrap_or_default();
    Response::json(format!(r#"{{"valid":true,"phone":"{phone}"}}"#))
}

// GET /validate/:|email|
async fn validate_email(req: Request) -> Response {
    let email = req.regex_param(1).unwrap_or_default();
    Response::json(format!(r#"{{"valid":true,"email":"{email}"}}"#))
}

// GET /validate/user/:|username|/email/:|email|
//
// Lives under /validate rather than /user: `/user/:id` would claim the
// first segment and the regex route would never be reached.
async fn validate_user_email(req: Request) -> Response {
    let username = req.regex_param(1).unwrap_or_default();
    let email = req.regex_param(2).unwrap_or_default();
    Response::json(format!(
        r#"{{"valid":true,"username":"{username}","email":"{email}"}}"#
    ))
}
