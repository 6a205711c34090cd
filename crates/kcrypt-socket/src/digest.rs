//! Incremental message digest over a crypto channel.
//!
//! ```text
//!            update(data)*
//!           ┌──────────┐
//!           v          │
//!       ┌────────┐─────┘   finalize()   ┌───────────┐
//!  ───> │ Active │ ─────────────────────> │ Finalized │
//!       └────────┘                        └───────────┘
//! ```
//!
//! Updates are concatenated by the kernel in call order. Finalize sends an
//! empty final chunk and reads the digest. Feeding a finalized session, or
//! finalizing twice, is a caller bug and panics.

use bytes::Bytes;

use crate::channel::Channel;
use crate::error::Result;

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finalized,
}

/// A single-use incremental hashing session.
///
/// Owns its channel for its whole lifetime; dropping the session releases
/// the descriptor, whether or not it was finalized.
#[derive(Debug)]
pub struct DigestSession<C: Channel> {
    channel: C,
    alg_type: String,
    algorithm: String,
    state: SessionState,
    bytes_hashed: u64,
}

#[cfg(target_os = "linux")]
impl DigestSession<crate::kernel::KernelSocketChannel> {
    /// Bind a kernel socket for `alg_type` / `algorithm` and start a session.
    ///
    /// Without a known digest size the result is read with a single bounded
    /// `recv`; see [`KernelSocketChannel::bind`](crate::kernel::KernelSocketChannel::bind).
    pub fn open(alg_type: &str, algorithm: &str) -> Result<Self> {
        let channel = crate::kernel::KernelSocketChannel::bind(alg_type, algorithm)?;
        Ok(Self::new(channel, alg_type, algorithm))
    }
}

impl<C: Channel> DigestSession<C> {
    /// Start a session on an already bound channel.
    pub fn new(channel: C, alg_type: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            channel,
            alg_type: alg_type.into(),
            algorithm: algorithm.into(),
            state: SessionState::Active,
            bytes_hashed: 0,
        }
    }

    /// Feed the next block of input.
    ///
    /// # Panics
    ///
    /// Panics if the session was already finalized.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        assert_eq!(
            self.state,
            SessionState::Active,
            "update on a finalized {} digest session",
            self.algorithm
        );
        self.channel.send_chunk(data, false)?;
        self.bytes_hashed += data.len() as u64;
        Ok(())
    }

    /// Complete the input and return the digest.
    ///
    /// # Panics
    ///
    /// Panics if the session was already finalized.
    pub fn finalize(&mut self) -> Result<Bytes> {
        assert_eq!(
            self.state,
            SessionState::Active,
            "finalize on a finalized {} digest session",
            self.algorithm
        );
        self.channel.send_chunk(&[], true)?;
        self.state = SessionState::Finalized;

        let digest = self.channel.receive_result()?;
        tracing::debug!(
            algorithm = %self.algorithm,
            bytes = self.bytes_hashed,
            digest_len = digest.len(),
            "finalized digest"
        );
        Ok(digest)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    /// Algorithm name the session was bound to, e.g. `sha256`.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Algorithm type the session was bound to, e.g. `hash`.
    pub fn algorithm_type(&self) -> &str {
        &self.alg_type
    }

    /// Total bytes passed to [`update`](Self::update).
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes_hashed
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::MemoryChannel;
    use crate::error::SocketError;
    use proptest::prelude::*;

    /// Sum of bytes and input length, enough to tell inputs apart.
    fn checksum(input: &[u8]) -> Vec<u8> {
        let sum: u32 = input.iter().map(|&b| b as u32).sum();
        let mut out = sum.to_be_bytes().to_vec();
        out.extend_from_slice(&(input.len() as u32).to_be_bytes());
        out
    }

    fn session() -> DigestSession<MemoryChannel> {
        DigestSession::new(MemoryChannel::new(checksum), "hash", "checksum")
    }

    struct FailingChannel;

    impl Channel for FailingChannel {
        fn send_chunk(&mut self, _: &[u8], _: bool) -> Result<()> {
            Err(SocketError::Io {
                op: crate::error::SocketOp::Send,
                source: std::io::Error::from_raw_os_error(libc::EBADMSG),
            })
        }

        fn receive_result(&mut self) -> Result<Bytes> {
            unreachable!("nothing was sent")
        }
    }

    #[test]
    fn test_empty_input() {
        let mut s = session();
        let digest = s.finalize().unwrap();
        assert_eq!(&digest[..], &checksum(b"")[..]);
        assert!(s.is_finalized());
    }

    #[test]
    fn test_flags_per_call() {
        let mut s = session();
        s.update(b"ab").unwrap();
        s.update(b"c").unwrap();
        s.finalize().unwrap();

        let flags: Vec<bool> = s.channel().sent().iter().map(|c| c.is_final).collect();
        assert_eq!(flags, vec![false, false, true]);
        assert!(s.channel().sent()[2].data.is_empty());
        assert_eq!(s.bytes_hashed(), 3);
    }

    #[test]
    fn test_chunking_is_immaterial() {
        let mut split = session();
        split.update(b"ab").unwrap();
        split.update(b"c").unwrap();

        let mut whole = session();
        whole.update(b"abc").unwrap();

        assert_eq!(split.finalize().unwrap(), whole.finalize().unwrap());
    }

    #[test]
    #[should_panic(expected = "update on a finalized")]
    fn test_update_after_finalize_panics() {
        let mut s = session();
        s.finalize().unwrap();
        let _ = s.update(b"late");
    }

    #[test]
    #[should_panic(expected = "finalize on a finalized")]
    fn test_double_finalize_panics() {
        let mut s = session();
        s.finalize().unwrap();
        let _ = s.finalize();
    }

    #[test]
    fn test_failed_update_surfaces_error() {
        let mut s = DigestSession::new(FailingChannel, "hash", "broken");
        let err = s.update(b"data").unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADMSG));
        assert_eq!(s.bytes_hashed(), 0);
        assert_eq!(s.state(), SessionState::Active);
    }

    #[test]
    fn test_failed_finalize_stays_active() {
        let mut s = DigestSession::new(FailingChannel, "hash", "broken");
        assert!(s.finalize().is_err());
        assert!(!s.is_finalized());
    }

    proptest! {
        #[test]
        fn any_split_gives_same_digest(data in prop::collection::vec(any::<u8>(), 0..512), cut in 0usize..512) {
            let cut = cut.min(data.len());

            let mut split = session();
            split.update(&data[..cut]).unwrap();
            split.update(&data[cut..]).unwrap();

            let mut whole = session();
            whole.update(&data).unwrap();

            prop_assert_eq!(split.finalize().unwrap(), whole.finalize().unwrap());
        }
    }
}
