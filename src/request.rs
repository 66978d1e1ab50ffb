//! Incoming HTTP request type.

use std::borrow::Cow;

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Uri};

use crate::routing::PathParams;

/// An incoming HTTP request with its body fully read and its path parameters
/// resolved by the router.
pub struct Request {
    parts: Parts,
    body: Bytes,
    params: PathParams,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes, params: PathParams) -> Self {
        Self { parts, body, params }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn uri(&self) -> &Uri { &self.parts.uri }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn params(&self) -> &PathParams { &self.params }

    /// Header value as text. `None` if absent or not visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name)?.to_str().ok()
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns the text matched by the `n`-th regex segment of the route, counting from 1.
    ///
    /// For `/user/:|[a-z]+|/email/:|.+@.+|` on `/user/bob/email/b@x.io`,
    /// `regex_param(1)` is `"bob"` and `regex_param(2)` is `"b@x.io"`.
    pub fn regex_param(&self, n: usize) -> Option<&str> {
        self.params.regex(n)
    }

    /// Raw query string without the leading `?`.
    pub fn query_string(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    /// First value of query parameter `name`, percent- and `+`-decoded.
    ///
    /// `/search?q=rust+router&limit=10` → `query("q") == Some("rust router")`.
    pub fn query(&self, name: &str) -> Option<Cow<'_, str>> {
        let query = self.parts.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .uri(uri)
            .header("x-request-id", "abc")
            .body(())
            .unwrap()
            .into_parts();
        Request::new(parts, Bytes::new(), PathParams::default())
    }

    #[test]
    fn test_query_lookup() {
        let req = request("/search?q=rust+router&limit=10&q=second");
        assert_eq!(req.query("q").as_deref(), Some("rust router"));
        assert_eq!(req.query("limit").as_deref(), Some("10"));
        assert_eq!(req.query("missing"), None);
        assert_eq!(req.query_string(), Some("q=rust+router&limit=10&q=second"));
        assert_eq!(req.path(), "/search");
    }

    #[test]
    fn test_query_is_percent_decoded() {
        let req = request("/search?q=caf%C3%A9");
        assert_eq!(req.query("q").as_deref(), Some("café"));
    }

    #[test]
    fn test_no_query() {
        let req = request("/search");
        assert_eq!(req.query("q"), None);
        assert_eq!(req.query_string(), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = request("/");
        assert_eq!(req.header("X-Request-Id"), Some("abc"));
        assert_eq!(req.header("missing"), None);
    }
}
