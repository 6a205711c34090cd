//! CryptoLinux: the registry and digest sessions behind one handle.

use std::path::PathBuf;

use bytes::Bytes;
use kcrypt_registry::{Cipher, Registry, PROC_CRYPTO_PATH};
use kcrypt_socket::{DigestSession, KernelSocketChannel};

use crate::error::{KcryptError, Result};

/// A digest session on a kernel socket.
pub type MessageDigest = DigestSession<KernelSocketChannel>;

/// Configuration for [`CryptoLinux`].
#[derive(Debug, Clone)]
pub struct CryptoConfig {
    /// Registry file to read.
    pub registry_path: PathBuf,
    /// `salg_type` used when binding digest sockets.
    pub digest_type: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(PROC_CRYPTO_PATH),
            digest_type: "hash".to_string(),
        }
    }
}

/// Handle on the kernel crypto API.
///
/// Holds a snapshot of the algorithm registry, taken when the handle was
/// created, and opens digest sessions on demand. Each session binds its own
/// socket.
#[derive(Debug, Clone)]
pub struct CryptoLinux {
    registry: Registry,
    config: CryptoConfig,
}

impl CryptoLinux {
    /// Read `/proc/crypto` with the default configuration.
    pub fn load() -> Result<Self> {
        Self::with_config(CryptoConfig::default())
    }

    /// Read the registry named by `config`.
    pub fn with_config(config: CryptoConfig) -> Result<Self> {
        let registry = Registry::load(&config.registry_path)?;
        Ok(Self::from_registry(registry, config))
    }

    /// Use an already decoded registry.
    pub fn from_registry(registry: Registry, config: CryptoConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    pub fn ciphers(&self) -> &[Cipher] {
        self.registry.as_slice()
    }

    pub fn find(&self, name: &str) -> Option<&Cipher> {
        self.registry.find(name)
    }

    /// Digest size the registry lists for a hash named `name`.
    pub fn digest_size(&self, name: &str) -> Option<usize> {
        self.registry
            .iter()
            .filter(|c| c.name == name && c.algorithm_type.is_hash())
            .find_map(|c| c.digest_size)
            .map(|size| size as usize)
    }

    /// Open an incremental digest session for `name`.
    ///
    /// Names missing from the registry are still tried: templates such as
    /// `hmac(sha256)` only appear once instantiated.
    pub fn message_digest(&self, name: &str) -> Result<MessageDigest> {
        let listed: Vec<&Cipher> = self.registry.iter().filter(|c| c.name == name).collect();
        if let Some(first) = listed.first() {
            if !listed.iter().any(|c| c.algorithm_type.is_hash()) {
                return Err(KcryptError::NotADigest {
                    algorithm: name.to_string(),
                    algorithm_type: first.algorithm_type.to_string(),
                });
            }
        }

        let mut channel = KernelSocketChannel::bind(&self.config.digest_type, name)?;
        match self.digest_size(name) {
            Some(size) => channel = channel.with_result_len(size),
            None => tracing::debug!(
                algorithm = name,
                result_len = ?channel.result_len(),
                "digest size not listed"
            ),
        }

        Ok(DigestSession::new(channel, self.config.digest_type.clone(), name))
    }

    /// Hash `data` in one call.
    pub fn hash(&self, name: &str, data: &[u8]) -> Result<Bytes> {
        let mut digest = self.message_digest(name)?;
        digest.update(data)?;
        Ok(digest.finalize()?)
    }
}
