//! # kcrypt socket
//!
//! Protocol client for the Linux kernel crypto API's socket interface
//! (`AF_ALG`).
//!
//! ## Overview
//!
//! - [`Channel`]: one operational descriptor; partial sends, a finalizing
//!   send, and an exact-length result read.
//! - [`KernelSocketChannel`]: the `AF_ALG` implementation (Linux only).
//! - [`DigestSession`]: incremental hashing, `update* -> finalize`.
//!
//! Everything is synchronous and blocking. A session owns its descriptor;
//! run independent sessions on independent threads for concurrency.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kcrypt_socket::{DigestSession, KernelSocketChannel};
//!
//! let channel = KernelSocketChannel::bind("hash", "sha256")?.with_result_len(32);
//! let mut session = DigestSession::new(channel, "hash", "sha256");
//! session.update(b"ab")?;
//! session.update(b"c")?;
//! let digest = session.finalize()?;
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), kcrypt_socket::SocketError>(())
//! ```
//!
//! ## Message Flow
//!
//! ```text
//! user space                              kernel
//!   |-- send(chunk, MSG_MORE) ------------->|  (update)
//!   |-- send(chunk, MSG_MORE) ------------->|  (update)
//!   |-- send(empty) ----------------------->|  (finalize: digest computed)
//!   |-- recv(0, MSG_PEEK | MSG_TRUNC) ----->|  (probe, non-hash types only)
//!   |<------------------------ result len --|
//!   |-- recv(len) ------------------------->|
//!   |<---------------------------- digest --|
//! ```
//!
//! Hash sockets free the digest when peeked at with a zero-length buffer, so
//! they read with the known digest size, or a single `recv` of up to
//! [`HASH_MAX_DIGESTSIZE`] bytes. An empty result is an error.

pub mod channel;
pub mod digest;
pub mod error;
#[cfg(target_os = "linux")]
pub mod kernel;

pub use channel::{memory::MemoryChannel, memory::SentChunk, Channel};
pub use digest::{DigestSession, SessionState};
pub use error::{Result, SocketError, SocketOp};
#[cfg(target_os = "linux")]
pub use kernel::{KernelSocketChannel, ResultLen, HASH_MAX_DIGESTSIZE};
