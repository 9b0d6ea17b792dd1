//! HTTP request representation.
//!
//! This module provides the parsed form of a one-shot HTTP request. The
//! request target is kept as the raw bytes from the request line (path plus
//! optional query, undecoded); interpreting its segments is left to the
//! routing layer.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// A fully parsed HTTP request.
///
/// Produced by the request decoder from a single read of the connection:
/// - `method` is any token `http::Method` accepts, including extensions
/// - `target` is the request-line target, verbatim
/// - `headers` hold lower-cased names, last occurrence winning
/// - `body` is the raw payload with trailing NUL padding stripped
#[derive(Debug)]
pub struct Request {
    method: Method,
    target: String,
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(method: Method, target: String, headers: HeaderMap, body: Bytes) -> Self {
        Self { method, target, headers, body }
    }

    /// Creates a builder, mainly useful for tests and embedders.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw request target (path plus optional query).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header value as a string, `None` when absent or opaque.
    ///
    /// Lookup is case-insensitive per `HeaderMap` semantics.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers.get(name.as_ref()).and_then(|v| v.to_str().ok())
    }

    /// Returns a reference to the request body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the request and returns the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Builder for [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Method,
    target: String,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestBuilder {
    fn new() -> Self {
        Self { method: Method::GET, target: String::from("/"), headers: HeaderMap::new(), body: Bytes::new() }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets a header. Repeated names overwrite, matching the decoder's
    /// last-wins rule.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        Request::new(self.method, self.target, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HOST, USER_AGENT};

    #[test]
    fn builder_defaults() {
        let request = Request::builder().build();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.target(), "/");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn builder_sets_all_fields() {
        let request = Request::builder()
            .method(Method::POST)
            .target("/files/report.txt")
            .header(HOST, HeaderValue::from_static("127.0.0.1:4221"))
            .body(&b"hello"[..])
            .build();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.target(), "/files/report.txt");
        assert_eq!(request.header("host"), Some("127.0.0.1:4221"));
        assert_eq!(request.body().as_ref(), b"hello");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = Request::builder()
            .header(USER_AGENT, HeaderValue::from_static("curl/7.79.1"))
            .build();

        assert_eq!(request.header("User-Agent"), Some("curl/7.79.1"));
        assert_eq!(request.header("USER-AGENT"), Some("curl/7.79.1"));
        assert_eq!(request.header("accept"), None);
    }

    #[test]
    fn repeated_header_names_keep_the_last_value() {
        let request = Request::builder()
            .header(HOST, HeaderValue::from_static("first"))
            .header(HOST, HeaderValue::from_static("second"))
            .build();

        assert_eq!(request.header("host"), Some("second"));
        assert_eq!(request.headers().len(), 1);
    }
}
