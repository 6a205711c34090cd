//! Strong type definitions for registry values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An algorithm name as the kernel knows it, e.g. `sha256` or `cbc(aes)`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherName(String);

impl CipherName {
    pub const SHA1: &'static str = "sha1";
    pub const SHA224: &'static str = "sha224";
    pub const SHA256: &'static str = "sha256";
    pub const SHA384: &'static str = "sha384";
    pub const SHA512: &'static str = "sha512";
    pub const SHA3_224: &'static str = "sha3-224";
    pub const SHA3_256: &'static str = "sha3-256";
    pub const SHA3_384: &'static str = "sha3-384";
    pub const SHA3_512: &'static str = "sha3-512";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CipherName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherName({})", self.0)
    }
}

impl fmt::Display for CipherName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CipherName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CipherName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for CipherName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for CipherName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CipherName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The registry's `type` field.
///
/// Unknown categories are kept verbatim in [`AlgorithmType::Other`] so newer
/// kernels still decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AlgorithmType {
    /// Single-block cipher.
    Cipher,
    Compression,
    Aead,
    Skcipher,
    Lskcipher,
    /// Synchronous hash.
    Shash,
    /// Asynchronous hash.
    Ahash,
    Rng,
    /// Key-agreement protocol primitive.
    Kpp,
    Akcipher,
    Sig,
    Scomp,
    Acomp,
    Other(String),
}

impl AlgorithmType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cipher => "cipher",
            Self::Compression => "compression",
            Self::Aead => "aead",
            Self::Skcipher => "skcipher",
            Self::Lskcipher => "lskcipher",
            Self::Shash => "shash",
            Self::Ahash => "ahash",
            Self::Rng => "rng",
            Self::Kpp => "kpp",
            Self::Akcipher => "akcipher",
            Self::Sig => "sig",
            Self::Scomp => "scomp",
            Self::Acomp => "acomp",
            Self::Other(s) => s,
        }
    }

    /// Check if this is a message digest.
    pub fn is_hash(&self) -> bool {
        matches!(self, Self::Shash | Self::Ahash)
    }

    /// The `salg_type` to bind an `AF_ALG` socket with, if the category is
    /// reachable from user space.
    pub fn socket_type(&self) -> Option<&'static str> {
        match self {
            Self::Shash | Self::Ahash => Some("hash"),
            Self::Skcipher | Self::Lskcipher | Self::Cipher => Some("skcipher"),
            Self::Aead => Some("aead"),
            Self::Rng => Some("rng"),
            _ => None,
        }
    }
}

impl FromStr for AlgorithmType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "cipher" => Self::Cipher,
            "compression" => Self::Compression,
            "aead" => Self::Aead,
            "skcipher" => Self::Skcipher,
            "lskcipher" => Self::Lskcipher,
            "shash" => Self::Shash,
            "ahash" => Self::Ahash,
            "rng" => Self::Rng,
            "kpp" => Self::Kpp,
            "akcipher" => Self::Akcipher,
            "sig" => Self::Sig,
            "scomp" => Self::Scomp,
            "acomp" => Self::Acomp,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for AlgorithmType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<AlgorithmType> for String {
    fn from(t: AlgorithmType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
