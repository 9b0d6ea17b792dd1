//! Core HTTP protocol abstractions.
//!
//! This module provides the fundamental building blocks for one-shot HTTP
//! handling: the parsed request model and the error taxonomy shared by the
//! codec and connection layers.
//!
//! # Architecture
//!
//! - **Request Processing** ([`request`]): the parsed request
//!   - [`Request`]: method, raw target, normalized headers and body
//!   - [`RequestBuilder`]: construction for tests and embedders
//!
//! - **Error Handling** ([`error`]): per-layer error types
//!   - [`HttpError`]: top-level connection error
//!   - [`ParseError`]: request parsing and read errors
//!   - [`SendError`]: response sending errors
//!
//! The protocol types are deliberately small. A connection carries exactly
//! one request and one response, so there is no streaming body machinery
//! and no cross-request state to model.

mod request;
pub use request::Request;
pub use request::RequestBuilder;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
