//! Known-answer digest vectors.
//!
//! FIPS 180-4 examples for the SHA-2 family, usable against kernel sessions
//! and software sessions alike.

use bytes::Bytes;
use kcrypt_socket::{Channel, DigestSession, Result};

/// A known-answer test vector.
#[derive(Debug, Clone)]
pub struct DigestVector {
    /// Kernel algorithm name.
    pub algorithm: &'static str,
    /// Input, split into the chunks it is fed with.
    pub chunks: &'static [&'static [u8]],
    /// Expected digest (hex).
    pub expected: &'static str,
}

impl DigestVector {
    /// The input as one contiguous buffer.
    pub fn input(&self) -> Vec<u8> {
        self.chunks.concat()
    }

    pub fn expected_bytes(&self) -> Vec<u8> {
        hex::decode(self.expected).unwrap_or_default()
    }
}

/// Get all digest vectors.
pub fn all_vectors() -> Vec<DigestVector> {
    vec![
        DigestVector {
            algorithm: "sha224",
            chunks: &[],
            expected: "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f",
        },
        DigestVector {
            algorithm: "sha224",
            chunks: &[b"abc"],
            expected: "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
        },
        DigestVector {
            algorithm: "sha256",
            chunks: &[],
            expected: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        DigestVector {
            algorithm: "sha256",
            chunks: &[b"ab", b"c"],
            expected: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        DigestVector {
            algorithm: "sha256",
            chunks: &[b"abcdbcdecdefdefgefghfghighij", b"hijkijkljklmklmnlmnomnopnopq"],
            expected: "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
        },
        DigestVector {
            algorithm: "sha384",
            chunks: &[b"a", b"b", b"c"],
            expected: "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
                       8086072ba1e7cc2358baeca134c825a7",
        },
        DigestVector {
            algorithm: "sha512",
            chunks: &[b"abc"],
            expected: "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                       2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        },
    ]
}

/// Run a vector through a session and return the digest.
pub fn run_vector<C: Channel>(session: &mut DigestSession<C>, vector: &DigestVector) -> Result<Bytes> {
    for chunk in vector.chunks {
        session.update(chunk)?;
    }
    session.finalize()
}
