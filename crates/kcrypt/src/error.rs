//! Error types for the facade.

use kcrypt_registry::RegistryError;
use kcrypt_socket::SocketError;
use thiserror::Error;

/// Errors that can occur during kcrypt operations.
#[derive(Debug, Error)]
pub enum KcryptError {
    /// Registry could not be read or decoded.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Socket setup or transfer failed.
    #[error("socket error: {0}")]
    Socket(#[from] SocketError),

    /// The registry lists the algorithm, but not as a message digest.
    #[error("{algorithm} is a {algorithm_type} algorithm, not a digest")]
    NotADigest {
        algorithm: String,
        algorithm_type: String,
    },
}

/// Result type for kcrypt operations.
pub type Result<T> = std::result::Result<T, KcryptError>;
