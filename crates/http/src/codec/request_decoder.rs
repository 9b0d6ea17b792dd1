//! HTTP request decoder module
//!
//! This module provides functionality for decoding a one-shot HTTP request
//! from a single read buffer. There is no streaming state machine: the
//! connection hands over everything it read, and the decoder either produces
//! a complete [`Request`] or fails with a [`ParseError`].
//!
//! # Components
//!
//! - [`RequestDecoder`]: splits head from body, parses the request line and
//!   normalizes headers
//!
//! # Example
//!
//! ```
//! use oneshot_http::codec::RequestDecoder;
//! use bytes::BytesMut;
//!
//! let decoder = RequestDecoder::new();
//! let buffer = BytesMut::from(&b"GET /echo/hi HTTP/1.1\r\nHost: localhost\r\n\r\n"[..]);
//! let request = decoder.decode(buffer).unwrap();
//! assert_eq!(request.target(), "/echo/hi");
//! ```

use crate::protocol::{ParseError, Request};
use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use tracing::trace;

/// The head/body separator sequence.
const SEPARATOR: &[u8] = b"\r\n\r\n";

/// A decoder for one-shot HTTP requests.
///
/// The decoder works on a fully read buffer:
/// 1. Locate the first CRLF CRLF; everything after it is the body, with
///    trailing NUL padding from the fixed-size read buffer stripped.
/// 2. Parse the request line: method token, target token, and an optional
///    version token which is accepted but ignored.
/// 3. Normalize header lines: names lower-cased, the last occurrence of a
///    repeated name wins. A line without the `": "` separator (or with a
///    name or value the `http` types reject) is skipped rather than
///    failing the whole request.
#[derive(Debug, Default)]
pub struct RequestDecoder;

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Self
    }

    /// Decodes a complete HTTP request from the provided buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Request)`: the buffer framed a complete request
    /// - `Err(ParseError)`: no separator, an unusable request line, or a
    ///   non-UTF-8 head
    pub fn decode(&self, mut src: BytesMut) -> Result<Request, ParseError> {
        let separator_at = find_separator(&src).ok_or(ParseError::MissingSeparator)?;

        let mut body = src.split_off(separator_at + SEPARATOR.len());
        strip_trailing_nul(&mut body);

        let head = std::str::from_utf8(&src[..separator_at])?;
        let mut lines = head.split("\r\n");

        let request_line = lines.next().unwrap_or_default();
        let (method, target) = parse_request_line(request_line)?;
        let headers = parse_headers(lines);

        Ok(Request::new(method, target.to_owned(), headers, body.freeze()))
    }
}

fn find_separator(buf: &[u8]) -> Option<usize> {
    buf.windows(SEPARATOR.len()).position(|window| window == SEPARATOR)
}

/// Removes the NUL padding a fixed-size read buffer leaves after the
/// payload. Interior NUL bytes are part of the payload and stay.
fn strip_trailing_nul(body: &mut BytesMut) {
    let len = body.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
    body.truncate(len);
}

fn parse_request_line(line: &str) -> Result<(Method, &str), ParseError> {
    let (method_token, rest) =
        line.split_once(' ').ok_or_else(|| ParseError::invalid_request_line("missing request target"))?;

    // the version token, when present, is ignored
    let target = match rest.split_once(' ') {
        Some((target, _version)) => target,
        None => rest,
    };

    let method = Method::from_bytes(method_token.as_bytes()).map_err(ParseError::invalid_request_line)?;
    Ok((method, target))
}

fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for line in lines {
        let Some((name, value)) = line.split_once(": ") else {
            trace!(line, "skipping header line without separator");
            continue;
        };
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            trace!(name, "skipping header with invalid name");
            continue;
        };
        let Ok(value) = HeaderValue::from_str(value) else {
            trace!(header = %name, "skipping header with invalid value");
            continue;
        };
        // repeated names: last occurrence wins
        headers.insert(name, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn decode(raw: impl AsRef<[u8]>) -> Result<Request, ParseError> {
        RequestDecoder::new().decode(BytesMut::from(raw.as_ref()))
    }

    #[test]
    fn decodes_curl_style_request() {
        let raw = indoc! {"
            GET /index.html HTTP/1.1
            Host: 127.0.0.1:4221
            User-Agent: curl/7.79.1
            Accept: */*
        "}
        .replace('\n', "\r\n");

        let request = decode(raw).unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.target(), "/index.html");
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.header("host"), Some("127.0.0.1:4221"));
        assert_eq!(request.header("user-agent"), Some("curl/7.79.1"));
        assert_eq!(request.header("accept"), Some("*/*"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn header_names_are_lowercased_and_duplicates_keep_last() {
        let raw = b"GET / HTTP/1.1\r\nX-Trace: one\r\nx-trace: two\r\n\r\n";

        let request = decode(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("x-trace"), Some("two"));
    }

    #[test]
    fn body_keeps_interior_nul_and_drops_trailing_padding() {
        let raw = b"POST /files/data.bin HTTP/1.1\r\nContent-Length: 7\r\n\r\nab\x00cdef\x00\x00\x00";

        let request = decode(raw).unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.body().as_ref(), b"ab\x00cdef");
    }

    #[test]
    fn body_bytes_are_verbatim() {
        let raw = b"POST /files/a.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";

        let request = decode(raw).unwrap();

        assert_eq!(request.body().as_ref(), b"hello");
    }

    #[test]
    fn missing_separator_is_an_error() {
        let result = decode(b"GET / HTTP/1.1\r\nHost: localhost\r\n");

        assert!(matches!(result, Err(ParseError::MissingSeparator)));
    }

    #[test]
    fn request_line_with_a_single_token_is_an_error() {
        let result = decode(b"GET\r\n\r\n");

        assert!(matches!(result, Err(ParseError::InvalidRequestLine { .. })));
    }

    #[test]
    fn request_line_without_version_is_accepted() {
        let request = decode(b"GET /user-agent\r\n\r\n").unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.target(), "/user-agent");
    }

    #[test]
    fn query_stays_in_the_target() {
        let request = decode(b"GET /echo/a?b=c%20d HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.target(), "/echo/a?b=c%20d");
    }

    #[test]
    fn extension_methods_pass_through() {
        let request = decode(b"PURGE /cache HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method().as_str(), "PURGE");
    }

    #[test]
    fn malformed_header_line_is_skipped() {
        let raw = indoc! {"
            GET /user-agent HTTP/1.1
            this line has no separator
            User-Agent: tester/1.0
        "}
        .replace('\n', "\r\n");

        let request = decode(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("user-agent"), Some("tester/1.0"));
    }

    #[test]
    fn non_utf8_head_is_an_error() {
        let result = decode(b"GET /\xff\xfe HTTP/1.1\r\n\r\n");

        assert!(matches!(result, Err(ParseError::InvalidEncoding { .. })));
    }
}
