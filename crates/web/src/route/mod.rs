//! The built-in route behaviors.
//!
//! These handlers make up the server's stock wire surface:
//!
//! - `/` answers a bare 200
//! - `/echo/<tail>` reflects the tail as `text/plain`
//! - `/user-agent` reflects the `user-agent` header
//! - `/files/<name>` serves (GET) or stores (POST) files under the
//!   configured directory root
//!
//! Everything else falls through to [`NotFoundHandler`]. Handlers never
//! fail; filesystem and validation problems surface as response statuses.

use crate::RequestContext;
use crate::fs::{FsError, ServedDirectory};
use crate::handler::RouteHandler;
use crate::router::{Pattern, Router, any, get, post};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Response, StatusCode, header};
use tracing::{error, trace, warn};

/// Builds the stock route table over the given served directory.
///
/// Rules are checked in order; the two `/files/` rules share a pattern and
/// split on the request method.
pub fn default_router(served: ServedDirectory) -> Router {
    Router::builder()
        .route(Pattern::exact("/"), any(RootHandler))
        .route(Pattern::prefix("/echo/"), any(EchoHandler))
        .route(Pattern::exact("/user-agent"), any(UserAgentHandler))
        .route(Pattern::prefix("/files/"), get(FileGetHandler::new(served.clone())))
        .route(Pattern::prefix("/files/"), post(FilePostHandler::new(served)))
        .build()
}

/// `/`: confirms the server is reachable. 200 with no headers and no body.
pub struct RootHandler;

#[async_trait]
impl RouteHandler for RootHandler {
    async fn invoke<'req>(&self, _context: RequestContext<'req>) -> Response<Bytes> {
        empty_response(StatusCode::OK)
    }
}

/// `/echo/<tail>`: reflects the tail verbatim, slashes and query bytes
/// included.
pub struct EchoHandler;

#[async_trait]
impl RouteHandler for EchoHandler {
    async fn invoke<'req>(&self, context: RequestContext<'req>) -> Response<Bytes> {
        text_response(Bytes::copy_from_slice(context.tail().as_bytes()))
    }
}

/// `/user-agent`: reflects the literal `user-agent` value. A request
/// without one gets an empty body with an explicit zero length.
pub struct UserAgentHandler;

#[async_trait]
impl RouteHandler for UserAgentHandler {
    async fn invoke<'req>(&self, context: RequestContext<'req>) -> Response<Bytes> {
        let agent = context.header(header::USER_AGENT).unwrap_or_default();
        text_response(Bytes::copy_from_slice(agent.as_bytes()))
    }
}

/// `/files/<name>` under GET: serves the named file's exact bytes.
pub struct FileGetHandler {
    served: ServedDirectory,
}

impl FileGetHandler {
    pub fn new(served: ServedDirectory) -> Self {
        Self { served }
    }
}

#[async_trait]
impl RouteHandler for FileGetHandler {
    async fn invoke<'req>(&self, context: RequestContext<'req>) -> Response<Bytes> {
        match self.served.read(context.tail()).await {
            Ok(contents) => payload_response(StatusCode::OK, mime::APPLICATION_OCTET_STREAM.as_ref(), contents),
            Err(e @ FsError::Traversal { .. }) => {
                warn!(cause = %e, "rejecting file read");
                empty_response(StatusCode::BAD_REQUEST)
            }
            Err(e) => {
                trace!(cause = %e, "file not served");
                empty_response(StatusCode::NOT_FOUND)
            }
        }
    }
}

/// `/files/<name>` under POST: stores the request body under the name,
/// creating or truncating the file.
pub struct FilePostHandler {
    served: ServedDirectory,
}

impl FilePostHandler {
    pub fn new(served: ServedDirectory) -> Self {
        Self { served }
    }
}

#[async_trait]
impl RouteHandler for FilePostHandler {
    async fn invoke<'req>(&self, context: RequestContext<'req>) -> Response<Bytes> {
        let name = context.tail();
        if name.is_empty() {
            return empty_response(StatusCode::BAD_REQUEST);
        }

        match self.served.write(name, context.body()).await {
            Ok(()) => empty_response(StatusCode::CREATED),
            Err(e @ FsError::Traversal { .. }) => {
                warn!(cause = %e, "rejecting file write");
                empty_response(StatusCode::BAD_REQUEST)
            }
            Err(e) => {
                error!(cause = %e, "file write failed");
                empty_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// The router fallback: 404 with no body.
pub struct NotFoundHandler;

#[async_trait]
impl RouteHandler for NotFoundHandler {
    async fn invoke<'req>(&self, _context: RequestContext<'req>) -> Response<Bytes> {
        empty_response(StatusCode::NOT_FOUND)
    }
}

fn empty_response(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}

fn text_response(body: Bytes) -> Response<Bytes> {
    payload_response(StatusCode::OK, mime::TEXT_PLAIN.as_ref(), body)
}

/// A response with its content type and exact length declared up front,
/// matching what goes on the wire.
fn payload_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Bytes> {
    let content_length = body.len();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .body(body)
        .unwrap()
}
