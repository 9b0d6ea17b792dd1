//! Response compression.
//!
//! Applies gzip to textual response bodies when the client offers the
//! `gzip` coding in `accept-encoding`. Bodies here are complete byte
//! buffers, so compression happens in one pass and the response's
//! `content-length` is rewritten to the compressed size. A response that
//! is not compressed goes out untouched.

use bytes::{Bytes, BytesMut};
use flate2::Compression;
use flate2::write::GzEncoder;
use http::{HeaderValue, Response, header};
use mime::Mime;
use oneshot_http::protocol::Request;
use std::io;
use std::io::Write;
use tracing::{error, trace};

/// Compresses the response body in place when the request allows it.
///
/// Skipped entirely for responses that already carry a
/// `content-encoding`, for non-text payloads and for empty bodies. On a
/// compression failure the identity body is kept and the failure is
/// logged.
pub fn apply(request: &Request, response: &mut Response<Bytes>) {
    // already encoded upstream
    if response.headers().contains_key(header::CONTENT_ENCODING) {
        return;
    }

    // only textual payloads are compressed
    if !is_text(response) {
        return;
    }

    if response.body().is_empty() {
        return;
    }

    if !accepts_gzip(request) {
        return;
    }

    let compressed = match compress(response.body()) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(cause = %e, "gzip compression failed, sending identity");
            return;
        }
    };

    trace!(from = response.body().len(), to = compressed.len(), "gzip applied");

    let content_length = compressed.len();
    *response.body_mut() = compressed;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));
}

/// Whether the request's `accept-encoding` lists the `gzip` coding.
///
/// The header is a comma-separated list whose entries may carry
/// `;q=`-style parameters. Matching is on the coding token alone,
/// case-insensitively; `xgzip` or `gzipx` do not count.
pub(crate) fn accepts_gzip(request: &Request) -> bool {
    let Some(accept_encoding) = request.header(header::ACCEPT_ENCODING) else {
        return false;
    };

    accept_encoding
        .split(',')
        .map(|entry| entry.split_once(';').map_or(entry, |(coding, _params)| coding).trim())
        .any(|coding| coding.eq_ignore_ascii_case("gzip"))
}

fn is_text(response: &Response<Bytes>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Mime>().ok())
        .is_some_and(|mime| mime.type_() == mime::TEXT)
}

fn compress(body: &[u8]) -> io::Result<Bytes> {
    let mut encoder = GzEncoder::new(Writer::new(), Compression::best());
    encoder.write_all(body)?;
    Ok(encoder.finish()?.into_bytes())
}

// inspired by from actix-http
struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn new() -> Self {
        Self { buf: BytesMut::with_capacity(4096) }
    }

    fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
