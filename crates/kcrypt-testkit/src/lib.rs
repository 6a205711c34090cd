//! # kcrypt testkit
//!
//! Testing utilities for kcrypt.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: registry text captured from real machines, and digest
//!   sessions hashing in software so protocol tests run without `AF_ALG`
//! - **Generators**: Proptest strategies rendering random algorithm
//!   parameters as registry text
//! - **Vectors**: known-answer digests for the SHA-2 family
//!
//! ## Fixtures
//!
//! ```rust
//! use kcrypt_testkit::fixtures::{arm64_registry, ARM64_BLOCKS};
//!
//! let registry = arm64_registry();
//! assert_eq!(registry.len(), ARM64_BLOCKS);
//! assert_eq!(registry.first().unwrap().name, "__ecb(aes)");
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use kcrypt_registry::Registry;
//! use kcrypt_testkit::generators::{cipher_from_params, render_block, CipherParams};
//!
//! proptest! {
//!     #[test]
//!     fn rendered_blocks_decode(params: CipherParams) {
//!         let registry = Registry::parse(&render_block(&params)).unwrap();
//!         prop_assert_eq!(registry.first().unwrap(), &cipher_from_params(&params));
//!     }
//! }
//! ```
//!
//! ## Digest Vectors
//!
//! ```rust
//! use kcrypt_testkit::fixtures::software_session;
//! use kcrypt_testkit::vectors::{all_vectors, run_vector};
//!
//! for vector in all_vectors() {
//!     let mut session = software_session(vector.algorithm).unwrap();
//!     let digest = run_vector(&mut session, &vector).unwrap();
//!     assert_eq!(hex::encode(&digest), vector.expected);
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{arm64_registry, software_channel, software_session, ARM64_REGISTRY, ECB_AES_BLOCK};
pub use generators::{cipher_from_params, render_block, render_registry, CipherParams};
pub use vectors::{all_vectors, run_vector, DigestVector};
