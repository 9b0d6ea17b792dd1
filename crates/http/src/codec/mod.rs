//! HTTP codec module for encoding and decoding HTTP messages
//!
//! This module provides the two halves of the wire layer: the one-shot
//! request decoder and the response encoder. There is no streaming state
//! machine since a connection carries exactly one request and one response.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: parses a fully read buffer into a request
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: serializes status line, headers and body,
//!     enforcing Content-Length framing
//!
//! # Example
//!
//! ```
//! use oneshot_http::codec::{RequestDecoder, ResponseEncoder};
//! use bytes::BytesMut;
//!
//! let decoder = RequestDecoder::new();
//! let buffer = BytesMut::from(&b"GET / HTTP/1.1\r\n\r\n"[..]);
//! let request = decoder.decode(buffer).unwrap();
//! assert_eq!(request.target(), "/");
//! ```

mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
