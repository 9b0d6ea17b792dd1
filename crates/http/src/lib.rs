//! An asynchronous one-shot HTTP server implementation
//!
//! This crate provides a lightweight HTTP/1.1 server engine built on top of
//! tokio, specialized for connections that carry exactly one request and one
//! response. The request is read in a single bounded read, parsed leniently,
//! handed to a handler, and the response is written back before the stream
//! is shut down.
//!
//! # Features
//!
//! - Asynchronous I/O using tokio
//! - Single-read request framing with a configurable deadline
//! - Lenient header parsing: lower-cased names, last occurrence wins,
//!   malformed lines skipped
//! - Content-Length enforced response serialization
//! - Clean error handling
//!
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Response, StatusCode};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{Level, error, info, warn};
//! use tracing_subscriber::FmtSubscriber;
//! use oneshot_http::connection::HttpConnection;
//! use oneshot_http::handler::make_handler;
//! use oneshot_http::protocol::Request;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     info!(port = 4221, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:4221").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(_) => {
//!                     info!("finished process, connection shutdown");
//!                 }
//!                 Err(e) => {
//!                     error!("service has error, cause {}, connection shutdown", e);
//!                 }
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response<Bytes>, Infallible> {
//!     info!("request target {}", request.target());
//!
//!     let response = Response::builder()
//!         .status(StatusCode::OK)
//!         .header(http::header::CONTENT_TYPE, "text/plain")
//!         .body(Bytes::from_static(b"Hello World!\r\n"))
//!         .unwrap();
//!
//!     Ok(response)
//! }
//! ```
//!
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: Core connection handling and lifecycle management
//! - [`protocol`]: Protocol types and abstractions
//! - [`codec`]: Protocol encoding/decoding implementation
//! - [`handler`]: Request handler traits and utilities
//!
//!
//!
//! # Core Components
//!
//! ## Connection Handling
//!
//! The [`connection::HttpConnection`] type is the main entry point for
//! serving a connection. It reads the request bytes once, decodes them,
//! invokes the handler and writes the response. Failures before a complete
//! request was decoded close the connection without a response.
//!
//! ## Request Processing
//!
//! Requests are processed through handler functions that implement the
//! [`handler::Handler`] trait. The crate provides utilities for creating
//! handlers from async functions through [`handler::make_handler`].
//!
//! ## Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Request parsing and read errors
//! - [`protocol::SendError`]: Response sending errors
//!
//! # Limitations
//!
//! - HTTP/1.1 only, one request per connection, no keep-alive
//! - No TLS support (use a reverse proxy for HTTPS)
//! - Maximum request size (head and body together): 8KB
//! - No chunked transfer encoding; bodies are length-delimited


pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
