//! # kcrypt registry
//!
//! Typed decoding of the Linux kernel crypto registry (`/proc/crypto`).
//!
//! The registry is plain text: blank-line-separated blocks of
//! `key : value` lines, one block per algorithm instance. Which keys appear
//! depends on the algorithm type, so records are decoded against a
//! declarative [`RecordSchema`] where type-dependent fields are optional.
//!
//! ## Pipeline
//!
//! ```text
//! text --split_blocks--> [RawBlock] --decode_all::<Cipher>--> [Cipher]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kcrypt_registry::Registry;
//!
//! let text = "\
//! name         : sha256
//! driver       : sha256-generic
//! module       : kernel
//! priority     : 100
//! refcnt       : 1
//! selftest     : passed
//! internal     : no
//! type         : shash
//! blocksize    : 64
//! digestsize   : 32
//! ";
//!
//! let registry = Registry::parse(text).unwrap();
//! let sha = registry.first().unwrap();
//! assert_eq!(sha.digest_size, Some(32));
//! assert_eq!(sha.iv_size, None);
//! ```

pub mod block;
pub mod cipher;
pub mod decode;
pub mod error;
pub mod registry;
pub mod schema;
pub mod types;

pub use block::{split_blocks, RawBlock};
pub use cipher::{Cipher, CIPHER_SCHEMA};
pub use decode::{decode_all, decode_block, decode_maps, decode_record, Fields, FromValue, Record, Value};
pub use error::{DecodeError, ParseError, RegistryError, Result};
pub use registry::{Registry, PROC_CRYPTO_PATH};
pub use schema::{normalize_key, FieldKind, FieldSpec, Presence, RecordSchema};
pub use types::{AlgorithmType, CipherName};
