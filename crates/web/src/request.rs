//! Request handling module that provides route handlers access to the
//! request and the matched tail.
//!
//! This module contains the core type for working with requests in the web
//! layer:
//! - `RequestContext`: the parsed request plus the part of the target a
//!   prefix route matched

use bytes::Bytes;
use http::{HeaderMap, Method};
use oneshot_http::protocol::Request;

/// The context a route handler is invoked with.
///
/// Borrows the request for the duration of one handler invocation. The
/// `tail` is the remainder of the target after the matched route prefix,
/// verbatim: slashes and query bytes included. Exact-pattern matches carry
/// an empty tail.
#[derive(Debug)]
pub struct RequestContext<'req> {
    request: &'req Request,
    tail: &'req str,
}

impl<'req> RequestContext<'req> {
    /// Creates a new RequestContext from a request and its matched tail
    pub fn new(request: &'req Request, tail: &'req str) -> Self {
        Self { request, tail }
    }

    /// Returns a reference to the underlying request
    pub fn request(&self) -> &Request {
        self.request
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Returns the raw target of the request
    pub fn target(&self) -> &str {
        self.request.target()
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Looks up a header value as a string, case-insensitively
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.request.header(name)
    }

    /// Returns the request body
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Returns the tail the route match produced
    pub fn tail(&self) -> &'req str {
        self.tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use http::header::USER_AGENT;

    #[test]
    fn exposes_request_fields_and_tail() {
        let request = Request::builder()
            .method(Method::GET)
            .target("/echo/abc")
            .header(USER_AGENT, HeaderValue::from_static("tester/1.0"))
            .build();

        let context = RequestContext::new(&request, "abc");

        assert_eq!(context.method(), &Method::GET);
        assert_eq!(context.target(), "/echo/abc");
        assert_eq!(context.tail(), "abc");
        assert_eq!(context.header("User-Agent"), Some("tester/1.0"));
        assert!(context.body().is_empty());
    }
}
