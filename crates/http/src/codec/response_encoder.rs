//! HTTP response encoder implementation for serializing responses onto the wire
//!
//! This module provides functionality for encoding a complete HTTP response
//! (status line, headers and body) into raw bytes. It manages the
//! Content-Length header so the framing on the wire always matches the body
//! that is actually written.
//!
//! # Features
//!
//! - Status line serialization with canonical reason phrases
//! - Content-Length enforcement for non-empty bodies
//! - Headers written in map order, one `name: value` pair per line

use crate::protocol::SendError;

use bytes::{BufMut, Bytes, BytesMut};

use http::{Response, header};
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size reserved for the status line and headers
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for HTTP responses implementing the [`Encoder`] trait.
///
/// The encoder serializes a `Response<Bytes>` in one pass. Responses are
/// always written as HTTP/1.1 since that is the only version the connection
/// layer speaks.
///
/// Content-Length handling:
/// - a non-empty body always goes out with `Content-Length` equal to the
///   body's byte length, overwriting whatever the response carried
/// - an empty body emits exactly the headers the response carried; an
///   explicit `Content-Length: 0` is preserved, but none is invented
#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    /// Creates a new `ResponseEncoder` instance
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<Response<Bytes>> for ResponseEncoder {
    type Error = SendError;

    /// Encodes an HTTP response into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the buffer fails.
    fn encode(&mut self, item: Response<Bytes>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut parts, body) = item.into_parts();

        dst.reserve(INIT_HEADER_SIZE + body.len());

        let reason = parts.status.canonical_reason().unwrap_or("Unknown");
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", parts.status.as_str(), reason)?;

        if !body.is_empty() {
            match parts.headers.get_mut(header::CONTENT_LENGTH) {
                Some(value) => *value = body.len().into(),
                None => {
                    parts.headers.insert(header::CONTENT_LENGTH, body.len().into());
                }
            }
        }

        // Write all headers
        for (header_name, header_value) in parts.headers.iter() {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        dst.put_slice(&body);
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    /// Writes a buffer into this writer, returning how many bytes were written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    /// Flush this output stream, ensuring that all intermediately buffered contents reach their destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, StatusCode};

    fn encode(response: Response<Bytes>) -> BytesMut {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut dst).unwrap();
        dst
    }

    #[test]
    fn writes_status_line_headers_and_body() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Bytes::from_static(b"abc"))
            .unwrap();

        let wire = encode(response);

        assert_eq!(wire.as_ref(), b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 3\r\n\r\nabc");
    }

    #[test]
    fn content_length_is_forced_to_the_body_length() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_LENGTH, "999")
            .body(Bytes::from_static(b"abc"))
            .unwrap();

        let wire = encode(response);
        let text = std::str::from_utf8(&wire).unwrap();

        assert!(text.contains("content-length: 3\r\n"));
        assert!(!text.contains("999"));
    }

    #[test]
    fn empty_body_emits_no_synthetic_content_length() {
        let response = Response::builder().status(StatusCode::NOT_FOUND).body(Bytes::new()).unwrap();

        let wire = encode(response);

        assert_eq!(wire.as_ref(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn explicit_zero_content_length_is_preserved() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::CONTENT_LENGTH, HeaderValue::from_static("0"))
            .body(Bytes::new())
            .unwrap();

        let wire = encode(response);
        let text = std::str::from_utf8(&wire).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("content-length: 0\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn body_bytes_are_written_verbatim() {
        let payload = Bytes::from_static(&[0x00, 0xff, 0x10, 0x80]);
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(payload.clone())
            .unwrap();

        let wire = encode(response);

        assert!(wire.ends_with(&payload));
        assert!(wire.starts_with(b"HTTP/1.1 200 OK\r\n"));
    }

    #[test]
    fn missing_canonical_reason_falls_back() {
        let status = StatusCode::from_u16(299).unwrap();
        let response = Response::builder().status(status).body(Bytes::new()).unwrap();

        let wire = encode(response);

        assert_eq!(wire.as_ref(), b"HTTP/1.1 299 Unknown\r\n\r\n");
    }

    #[test]
    fn created_response_has_the_canonical_reason() {
        let response = Response::builder().status(StatusCode::CREATED).body(Bytes::new()).unwrap();

        let wire = encode(response);

        assert_eq!(wire.as_ref(), b"HTTP/1.1 201 Created\r\n\r\n");
    }
}
