//! The one-shot web server.
//!
//! [`Server`] owns the route table and drives one [`HttpConnection`] per
//! accepted socket. Each connection carries exactly one request; routing,
//! compression and the access log all happen in [`Server::call`].

use crate::encoding;
use crate::fs::ServedDirectory;
use crate::request::RequestContext;
use crate::route;
use crate::router::Router;
use async_trait::async_trait;
use bytes::Bytes;
use http::Response;
use oneshot_http::connection::{DEFAULT_READ_TIMEOUT, HttpConnection};
use oneshot_http::handler::Handler;
use oneshot_http::protocol::Request;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

pub struct ServerBuilder {
    address: Option<String>,
    router: Option<Router>,
    directory: Option<PathBuf>,
    read_timeout: Duration,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { address: None, router: None, directory: None, read_timeout: DEFAULT_READ_TIMEOUT }
    }

    /// Sets the address to listen on, like `"127.0.0.1:4221"`. Required.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Replaces the stock route table. When set, [`Self::directory`] has
    /// no effect.
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Sets the directory root backing the `/files/` routes. Without it
    /// those routes run unconfigured.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Overrides how long a connection may stay silent before it is
    /// dropped without a response.
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        let router = self.router.unwrap_or_else(|| {
            let served = match self.directory {
                Some(root) => ServedDirectory::new(root),
                None => ServedDirectory::unconfigured(),
            };
            route::default_router(served)
        });
        Ok(Server { address, router, read_timeout: self.read_timeout })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,
}

pub struct Server {
    address: String,
    router: Router,
    read_timeout: Duration,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the configured address and serves until the process ends.
    pub async fn start(self) {
        info!("start listening at {}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_str()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return;
            }
        };

        self.serve(tcp_listener).await;
    }

    /// Accepts connections from an already bound listener.
    ///
    /// Every connection gets its own task; a failed accept is logged and
    /// the loop keeps going.
    pub async fn serve(self, tcp_listener: TcpListener) {
        let read_timeout = self.read_timeout;
        let handler = Arc::new(self);
        loop {
            let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = handler.clone();

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::new(reader, writer).with_read_timeout(read_timeout);
                match connection.process(handler).await {
                    Ok(_) => {
                        info!("finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!("service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }

    async fn handle(&self, request: Request) -> Response<Bytes> {
        let matched = self.router.at(request.method(), request.target());
        let context = RequestContext::new(&request, matched.tail());
        let mut response = matched.handler().invoke(context).await;
        encoding::apply(&request, &mut response);
        info!(method = %request.method(), target = request.target(), status = %response.status(), "request served");
        response
    }
}

#[async_trait]
impl Handler for Server {
    type Error = Infallible;

    async fn call(&self, request: Request) -> Result<Response<Bytes>, Self::Error> {
        Ok(self.handle(request).await)
    }
}
