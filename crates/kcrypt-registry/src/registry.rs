//! The composed registry: text in, ordered [`Cipher`] records out.

use std::path::Path;

use crate::block::split_blocks;
use crate::cipher::Cipher;
use crate::decode::decode_all;
use crate::error::Result;

/// Default location of the kernel crypto registry.
pub const PROC_CRYPTO_PATH: &str = "/proc/crypto";

/// Decoded algorithm records, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    ciphers: Vec<Cipher>,
}

impl Registry {
    /// Parse registry text. Any malformed line or bad block fails the whole
    /// registry.
    pub fn parse(text: &str) -> Result<Self> {
        let blocks = split_blocks(text)?;
        let ciphers = decode_all::<Cipher>(&blocks)?;
        Ok(Self { ciphers })
    }

    /// Read and parse a registry file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let registry = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            count = registry.len(),
            "loaded crypto registry"
        );
        Ok(registry)
    }

    /// Read and parse `/proc/crypto`.
    pub fn load_system() -> Result<Self> {
        Self::load(PROC_CRYPTO_PATH)
    }

    pub fn len(&self) -> usize {
        self.ciphers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cipher> {
        self.ciphers.iter()
    }

    pub fn as_slice(&self) -> &[Cipher] {
        &self.ciphers
    }

    /// The first record, i.e. the first block of the registry text.
    pub fn first(&self) -> Option<&Cipher> {
        self.ciphers.first()
    }

    /// First record with the given algorithm name, in registry order.
    pub fn find(&self, name: &str) -> Option<&Cipher> {
        self.ciphers.iter().find(|c| c.name == name)
    }

    pub fn into_vec(self) -> Vec<Cipher> {
        self.ciphers
    }
}

impl From<Vec<Cipher>> for Registry {
    fn from(ciphers: Vec<Cipher>) -> Self {
        Self { ciphers }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Cipher;
    type IntoIter = std::slice::Iter<'a, Cipher>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Registry {
    type Item = Cipher;
    type IntoIter = std::vec::IntoIter<Cipher>;

    fn into_iter(self) -> Self::IntoIter {
        self.ciphers.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, ParseError, RegistryError};
    use std::io::Write;

    const TWO: &str = "\
name         : md5
driver       : md5-generic
module       : kernel
priority     : 100
refcnt       : 1
selftest     : passed
internal     : no
type         : shash
blocksize    : 64
digestsize   : 16

name         : stdrng
driver       : drbg_nopr_hmac_sha256
module       : kernel
priority     : 221
refcnt       : 2
selftest     : passed
internal     : no
type         : rng
seedsize     : 0
";

    #[test]
    fn test_parse_preserves_order() {
        let registry = Registry::parse(TWO).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.first().unwrap().name, "md5");
        assert_eq!(registry.as_slice()[1].name, "stdrng");
        assert_eq!(registry.find("stdrng").unwrap().priority, 221);
        assert!(registry.find("sha256").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::parse("").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_one_bad_block_fails_all() {
        let text = TWO.replace("refcnt       : 2", "refcnt       : lots");
        let err = Registry::parse(&text).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Decode(DecodeError::InvalidValue { block: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_line_surfaces() {
        let text = format!("{TWO}\nno separator here\n");
        let err = Registry::parse(&text).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Parse(ParseError::MalformedLine { line: 22, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO.as_bytes()).unwrap();

        let registry = Registry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::load(dir.path().join("crypto")).unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
