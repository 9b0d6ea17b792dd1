//! HTTP connection handling module
//!
//! This module provides functionality for managing one-shot HTTP
//! connections. Each connection carries exactly one request and one
//! response; there is no keep-alive and no pipelining.
//!
//! # Components
//!
//! - [`HttpConnection`]: Main connection handler that:
//!   - Reads the request bytes in a single bounded read
//!   - Decodes the request
//!   - Invokes the configured handler
//!   - Writes the response and closes the stream
//!
//! # Failure behavior
//!
//! Every failure before a complete request was decoded (peer closed early,
//! read deadline missed, oversized request, parse error) closes the
//! connection without writing any bytes. Handler failures map to a bare
//! 500 response.

mod http_connection;

pub use http_connection::DEFAULT_READ_TIMEOUT;
pub use http_connection::HttpConnection;
pub use http_connection::MAX_REQUEST_SIZE;
