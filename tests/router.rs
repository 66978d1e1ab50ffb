//! End-to-end tests through `Router::handle`, without a network.

use arbor::{Method, Request, Response, RouteError, Router, StatusCode};
use bytes::Bytes;

async fn echo_params(req: Request) -> Response {
    let named: Vec<String> = req
        .params()
        .named()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    let captures = req.params().captures().join(",");
    Response::text(format!("{}|{}", named.join("&"), captures))
}

async fn search(req: Request) -> Response {
    let q = req.query("q").unwrap_or_default();
    let limit = req.query("limit").unwrap_or_default();
    Response::text(format!("{q}:{limit}"))
}

async fn create(req: Request) -> Result<Response, (StatusCode, &'static str)> {
    if req.body().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Invalid JSON"));
    }
    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .json(req.body().to_vec()))
}

fn app() -> Router {
    Router::new()
        .get("/", || async { "root" })
        .get("/product/:id", echo_params)
        .get("/user/:id", echo_params)
        .get("/users/:id/posts/:postId", echo_params)
        .post("/users", create)
        .get("/search", search)
        .get(r"/validate/phone/:|^\+?[1-9]\d{1,14}$|", echo_params)
        .get(r"/validate/:|^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$|", echo_params)
        .get(
            r"/validate/user/:|^[a-zA-Z0-9_]{3,20}$|/email/:|^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$|",
            echo_params,
        )
}

fn request(method: Method, uri: &str, body: &'static [u8]) -> http::Request<Bytes> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::from_static(body))
        .unwrap()
}

async fn call(router: &Router, method: Method, uri: &str) -> Response {
    router.handle(request(method, uri, b"")).await
}

fn text(res: &Response) -> &str {
    std::str::from_utf8(res.body()).unwrap()
}

#[tokio::test]
async fn test_simple_get() {
    let res = call(&app(), Method::GET, "/").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(text(&res), "root");
}

#[tokio::test]
async fn test_single_and_multiple_params() {
    let app = app();
    let res = call(&app, Method::GET, "/user/123").await;
    assert_eq!(text(&res), "id=123|");

    let res = call(&app, Method::GET, "/users/123/posts/456").await;
    assert_eq!(text(&res), "id=123&postId=456|");
}

#[tokio::test]
async fn test_product_route() {
    let res = call(&app(), Method::GET, "/product/123").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(text(&res), "id=123|");
}

#[tokio::test]
async fn test_params_are_percent_decoded() {
    let app = app();
    let res = call(&app, Method::GET, "/user/John%20Doe").await;
    assert_eq!(text(&res), "id=John Doe|");

    let res = call(&app, Method::GET, "/validate/john%40example.com").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(text(&res), "|john@example.com");

    // An encoded slash stays inside its segment.
    let res = call(&app, Method::GET, "/user/a%2Fb").await;
    assert_eq!(text(&res), "id=a/b|");
}

#[tokio::test]
async fn test_query_does_not_affect_matching() {
    let res = call(&app(), Method::GET, "/search?q=golang&limit=10").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(text(&res), "golang:10");
}

#[tokio::test]
async fn test_regex_routes() {
    let app = app();

    let res = call(&app, Method::GET, "/validate/phone/+40712345678").await;
    assert_eq!(text(&res), "|+40712345678");

    let res = call(&app, Method::GET, "/validate/john@example.com").await;
    assert_eq!(text(&res), "|john@example.com");

    let res = call(&app, Method::GET, "/validate/user/john_doe/email/john@example.com").await;
    assert_eq!(text(&res), "|john_doe,john@example.com");
}

#[tokio::test]
async fn test_regex_mismatch_is_not_found() {
    let app = app();
    let res = call(&app, Method::GET, "/validate/phone/0123").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = call(&app, Method::GET, "/validate/not-an-email").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_with_body() {
    let app = app();
    let res = app
        .handle(request(Method::POST, "/users", br#"{"name":"Test User"}"#))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert_eq!(text(&res), r#"{"name":"Test User"}"#);

    let res = call(&app, Method::POST, "/users").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(text(&res), "Invalid JSON");
}

#[tokio::test]
async fn test_method_not_allowed_sets_allow_header() {
    let res = call(&app(), Method::DELETE, "/users").await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "POST");

    let res = call(&app(), Method::POST, "/user/1").await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET");
}

#[tokio::test]
async fn test_unknown_paths_are_not_found() {
    let app = app();
    for uri in ["/nope", "/user", "/users/1/posts", "/users/1/posts/2/3", "/%E6%97%A5"] {
        let res = call(&app, Method::GET, uri).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_trailing_slash_matches() {
    let res = call(&app(), Method::GET, "/user/7/").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(text(&res), "id=7|");
}

#[tokio::test]
async fn test_extension_method() {
    let purge = Method::from_bytes(b"PURGE").unwrap();
    let app = Router::new().on(purge.clone(), "/cache/:key", echo_params);
    let res = call(&app, purge, "/cache/home").await;
    assert_eq!(text(&res), "key=home|");
}

#[test]
fn test_add_reports_errors_and_keeps_router_usable() {
    let mut router = Router::new().get("/route42", echo_params);

    let err = router.add(Method::GET, "/route42", search).err().unwrap();
    assert!(matches!(err, RouteError::DuplicateRoute { .. }));

    let err = router.add(Method::GET, "/x/:|[0-9|", search).err().unwrap();
    assert!(matches!(err, RouteError::InvalidPattern { .. }));

    router.add(Method::GET, "/route43", search).unwrap();
    assert_eq!(router.len(), 2);

    let mut listed: Vec<String> = router.routes().map(|(m, p)| format!("{m} {p}")).collect();
    listed.sort();
    assert_eq!(listed, vec!["GET /route42", "GET /route43"]);
}

#[tokio::test]
async fn test_duplicate_keeps_original_handler() {
    let mut router = Router::new().get("/route42", |_req: Request| async { "first" });
    assert!(router.add(Method::GET, "/route42", |_req: Request| async { "second" }).is_err());
    let res = call(&router, Method::GET, "/route42").await;
    assert_eq!(text(&res), "first");
}

#[test]
#[should_panic(expected = "ambiguous route")]
fn test_on_panics_on_conflicting_param_names() {
    let _ = Router::new()
        .get("/users/:id", echo_params)
        .get("/users/:name/posts", echo_params);
}

#[tokio::test]
async fn test_concurrent_handles() {
    let app = std::sync::Arc::new(app());
    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let app = std::sync::Arc::clone(&app);
            tokio::spawn(async move {
                let res = call(&app, Method::GET, &format!("/users/{i}/posts/{}", i * 2)).await;
                assert_eq!(text(&res), format!("id={i}&postId={}|", i * 2));
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
}
