use std::io;
use std::str::Utf8Error;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("request has no header/body separator")]
    MissingSeparator,

    #[error("invalid request line: {reason}")]
    InvalidRequestLine { reason: String },

    #[error("request head is not utf-8: {source}")]
    InvalidEncoding {
        #[from]
        source: Utf8Error,
    },

    #[error("request exceeds the read buffer of {max_size} bytes")]
    TooLargeRequest { max_size: usize },

    #[error("connection closed before a request arrived")]
    UnexpectedEof,

    #[error("no request within {0:?}")]
    ReadTimeout(Duration),

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_request_line<S: ToString>(str: S) -> Self {
        Self::InvalidRequestLine { reason: str.to_string() }
    }

    pub fn too_large_request(max_size: usize) -> Self {
        Self::TooLargeRequest { max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
