//! # kcrypt
//!
//! User-space access to the Linux kernel crypto API.
//!
//! ## Overview
//!
//! - **Registry**: `/proc/crypto` decoded into typed [`Cipher`] records
//! - **Digests**: incremental hashing through `AF_ALG` sockets
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kcrypt::{CipherName, CryptoLinux};
//!
//! fn example() -> kcrypt::Result<()> {
//!     let crypto = CryptoLinux::load()?;
//!     for cipher in crypto.ciphers() {
//!         println!("{} ({}) via {}", cipher.name, cipher.algorithm_type, cipher.driver);
//!     }
//!
//!     let mut digest = crypto.message_digest(CipherName::SHA256)?;
//!     digest.update(b"hello ")?;
//!     digest.update(b"world")?;
//!     let hash = digest.finalize()?;
//!     assert_eq!(hash.len(), 32);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `kcrypt::registry` - registry parsing and decoding
//! - `kcrypt::socket` - channels and digest sessions

pub mod crypto;
pub mod error;

// Re-export component crates
pub use kcrypt_registry as registry;
pub use kcrypt_socket as socket;

pub use crypto::{CryptoConfig, CryptoLinux, MessageDigest};
pub use error::{KcryptError, Result};

// Re-export commonly used types
pub use kcrypt_registry::{AlgorithmType, Cipher, CipherName, Registry};
pub use kcrypt_socket::{Channel, DigestSession, KernelSocketChannel, SessionState};
