//! Channel abstraction for the kernel crypto protocol.
//!
//! A channel is one operational descriptor: chunks go in, one result comes
//! out. [`KernelSocketChannel`](crate::KernelSocketChannel) talks to
//! `AF_ALG`; [`memory::MemoryChannel`] computes results in-process.

use bytes::Bytes;

use crate::error::Result;

/// Synchronous request channel to a crypto transform.
pub trait Channel {
    /// Send a chunk of input.
    ///
    /// Non-final chunks tell the transform more input follows. A final chunk,
    /// possibly empty, completes the input and makes the result available.
    fn send_chunk(&mut self, data: &[u8], is_final: bool) -> Result<()>;

    /// Read back the complete result of the last finalized input.
    fn receive_result(&mut self) -> Result<Bytes>;
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn send_chunk(&mut self, data: &[u8], is_final: bool) -> Result<()> {
        (**self).send_chunk(data, is_final)
    }

    fn receive_result(&mut self) -> Result<Bytes> {
        (**self).receive_result()
    }
}

/// An in-process channel for testing.
///
/// Collects every chunk and, on the final one, runs a caller-supplied
/// function over the concatenated input.
pub mod memory {
    use super::*;

    type Compute = Box<dyn FnMut(&[u8]) -> Vec<u8> + Send>;

    /// A chunk as it was handed to the channel.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentChunk {
        pub data: Vec<u8>,
        pub is_final: bool,
    }

    /// In-memory channel implementation.
    pub struct MemoryChannel {
        compute: Compute,
        input: Vec<u8>,
        sent: Vec<SentChunk>,
        pending: Option<Vec<u8>>,
    }

    impl MemoryChannel {
        /// Create a channel whose result is `compute(all input)`.
        pub fn new(compute: impl FnMut(&[u8]) -> Vec<u8> + Send + 'static) -> Self {
            Self {
                compute: Box::new(compute),
                input: Vec::new(),
                sent: Vec::new(),
                pending: None,
            }
        }

        /// Every chunk sent so far, in order.
        pub fn sent(&self) -> &[SentChunk] {
            &self.sent
        }

        /// Length of the result waiting to be read.
        pub fn pending_len(&self) -> usize {
            self.pending.as_ref().map_or(0, Vec::len)
        }
    }

    impl std::fmt::Debug for MemoryChannel {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MemoryChannel")
                .field("buffered", &self.input.len())
                .field("sent", &self.sent.len())
                .field("pending", &self.pending_len())
                .finish()
        }
    }

    impl Channel for MemoryChannel {
        fn send_chunk(&mut self, data: &[u8], is_final: bool) -> Result<()> {
            self.sent.push(SentChunk {
                data: data.to_vec(),
                is_final,
            });
            self.input.extend_from_slice(data);

            if is_final {
                let input = std::mem::take(&mut self.input);
                self.pending = Some((self.compute)(&input));
            }
            Ok(())
        }

        fn receive_result(&mut self) -> Result<Bytes> {
            // Reading consumes the result, as on a kernel socket.
            Ok(Bytes::from(self.pending.take().unwrap_or_default()))
        }
    }
}
