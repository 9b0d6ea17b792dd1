use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};

use futures::SinkExt;
use http::{Response, StatusCode};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::ensure;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, SendError};

use tokio_util::codec::FramedWrite;
use tracing::{error, trace};

/// Upper bound for a whole request, head and body together.
///
/// The connection performs a single read; a request that fills the buffer
/// completely may have been truncated and is rejected.
pub const MAX_REQUEST_SIZE: usize = 8 * 1024;

/// How long the connection waits for the request bytes to arrive.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP connection that serves exactly one request
///
/// `HttpConnection` handles the full lifecycle of a one-shot connection:
/// - Reading the request bytes in a single read, bounded by a deadline
/// - Decoding them into a request
/// - Invoking the handler
/// - Writing the response and shutting the stream down
///
/// A connection that fails before a complete request was decoded is closed
/// without writing a single byte.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
pub struct HttpConnection<R, W> {
    reader: R,
    framed_write: FramedWrite<W, ResponseEncoder>,
    read_timeout: Duration,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Replaces the read deadline, mainly useful for tests and embedders.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Serves the connection: read once, decode, handle, respond, close.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let request = self.read_request().await?;
        trace!(method = %request.method(), target = request.target(), "request decoded");

        let response_result = handler.call(request).await;
        self.send_response(response_result).await?;
        self.shutdown().await
    }

    /// Reads the request in a single read and decodes it.
    ///
    /// An empty read (peer closed), a read that fills the whole buffer
    /// (possible truncation) and a missed deadline are all parse errors.
    async fn read_request(&mut self) -> Result<Request, ParseError> {
        let mut buffer = BytesMut::zeroed(MAX_REQUEST_SIZE);

        let n = timeout(self.read_timeout, self.reader.read(&mut buffer))
            .await
            .map_err(|_elapsed| ParseError::ReadTimeout(self.read_timeout))?
            .map_err(ParseError::io)?;

        ensure!(n > 0, ParseError::UnexpectedEof);
        ensure!(n < MAX_REQUEST_SIZE, ParseError::too_large_request(MAX_REQUEST_SIZE));

        buffer.truncate(n);
        RequestDecoder::new().decode(buffer)
    }

    async fn send_response<E>(&mut self, response_result: Result<Response<Bytes>, E>) -> Result<(), HttpError>
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        match response_result {
            Ok(response) => self.do_send_response(response).await,
            Err(e) => {
                error!("handle response error, cause: {}", e.into());
                self.do_send_response(build_error_response(StatusCode::INTERNAL_SERVER_ERROR)).await
            }
        }
    }

    async fn do_send_response(&mut self, response: Response<Bytes>) -> Result<(), HttpError> {
        // send instead of feed: the one and only response must reach the wire
        self.framed_write.send(response).await?;
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), HttpError> {
        self.framed_write.get_mut().shutdown().await.map_err(SendError::io)?;
        Ok(())
    }
}

fn build_error_response(status_code: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status_code;
    response
}
