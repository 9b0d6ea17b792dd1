use crate::RequestContext;
use async_trait::async_trait;
use bytes::Bytes;
use http::Response;

/// The seam between the router and the route behaviors.
///
/// Route handlers are infallible: anything that can go wrong inside one is
/// expressed as a response status, so the connection layer always has a
/// response to serialize.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn invoke<'req>(&self, context: RequestContext<'req>) -> Response<Bytes>;
}
