//! Error types for the socket module.

use std::fmt;

use thiserror::Error;

/// The syscall a socket error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketOp {
    Socket,
    Bind,
    Accept,
    Send,
    Recv,
}

impl fmt::Display for SocketOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Socket => "socket",
            Self::Bind => "bind",
            Self::Accept => "accept",
            Self::Send => "send",
            Self::Recv => "recv",
        })
    }
}

/// Errors that can occur on a crypto socket.
#[derive(Debug, Error)]
pub enum SocketError {
    /// A syscall failed with something other than `EINTR`.
    #[error("{op} failed: {source}")]
    Io {
        op: SocketOp,
        #[source]
        source: std::io::Error,
    },

    /// A finalized input produced no result bytes.
    #[error("kernel returned an empty result")]
    EmptyResult,

    /// Algorithm type or name does not fit in `sockaddr_alg`.
    #[error("{field} {value:?} exceeds {max} bytes")]
    AddressTooLong {
        field: &'static str,
        value: String,
        max: usize,
    },
}

impl SocketError {
    pub(crate) fn io(op: SocketOp, source: std::io::Error) -> Self {
        Self::Io { op, source }
    }

    /// The raw OS error code, for syscall failures.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for socket operations.
pub type Result<T> = std::result::Result<T, SocketError>;
