//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// An incoming HTTP request with its body already collected.
///
/// Handlers receive ownership of the request. The body is plain bytes —
/// wisp does not interpret them unless [`JsonBody`](crate::middleware::JsonBody)
/// is on the chain, in which case the parsed value is available via
/// [`Request::json`].
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    json: Option<serde_json::Value>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, uri, headers, body, params, json: None }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path, without the query string.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body as collected bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup, as a UTF-8 string.
    ///
    /// Returns `None` for absent headers and for values that are not valid
    /// UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The body parsed as JSON, if [`JsonBody`](crate::middleware::JsonBody)
    /// ran and the request carried a JSON content type.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }

    pub(crate) fn set_json(&mut self, value: serde_json::Value) {
        self.json = Some(value);
    }

    #[cfg(test)]
    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[cfg(test)]
pub(crate) fn test_request(method: Method, path: &str, body: &[u8]) -> Request {
    Request::new(
        method,
        path.parse().expect("test uri"),
        HeaderMap::new(),
        Bytes::copy_from_slice(body),
        HashMap::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut req = test_request(Method::GET, "/", b"");
        req.headers.insert("X-Custom", "1".parse().unwrap());
        assert_eq!(req.header("x-custom"), Some("1"));
        assert_eq!(req.header("X-CUSTOM"), Some("1"));
        assert_eq!(req.header("missing"), None);
    }

    #[test]
    fn query_is_split_from_path() {
        let req = test_request(Method::GET, "/search?q=rust", b"");
        assert_eq!(req.path(), "/search");
        assert_eq!(req.query(), Some("q=rust"));
    }
}
