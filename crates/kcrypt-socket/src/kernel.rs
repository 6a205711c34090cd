//! `AF_ALG` socket channel (Linux).
//!
//! To reach a transform, user space creates an `AF_ALG` socket, binds it to
//! a `sockaddr_alg` naming the algorithm type (`hash`, `skcipher`, ...) and
//! the algorithm (`sha256`, `cbc(aes)`, ...), then calls `accept`. The
//! accepted descriptor is the operational one; the bound socket is only a
//! factory and is closed once accept returns.
//!
//! On the operational descriptor, `send` with `MSG_MORE` feeds input without
//! finishing it, a `send` without it completes the input, and `recv` returns
//! the result.

use std::io;
use std::mem;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};
use std::ptr;

use bytes::Bytes;

use crate::channel::Channel;
use crate::error::{Result, SocketError, SocketOp};

/// Largest digest any kernel hash produces (`HASH_MAX_DIGESTSIZE`).
pub const HASH_MAX_DIGESTSIZE: usize = 64;

/// How [`KernelSocketChannel::receive_result`] sizes its read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLen {
    /// Peek for the pending length, then read exactly that much.
    Probe,
    /// Read exactly this many bytes.
    Exact(usize),
    /// One read of at most this many bytes.
    AtMost(usize),
}

/// Channel over one operational `AF_ALG` descriptor.
///
/// The descriptor is owned and closed exactly once, when the channel drops.
#[derive(Debug)]
pub struct KernelSocketChannel {
    fd: OwnedFd,
    result_len: ResultLen,
}

impl KernelSocketChannel {
    /// Wrap an already accepted operational descriptor.
    pub fn from_fd(fd: OwnedFd) -> Self {
        Self {
            fd,
            result_len: ResultLen::Probe,
        }
    }

    /// Create, bind and accept a socket for `alg_type` / `alg_name`.
    ///
    /// `hash` channels read results with one `recv` of up to
    /// [`HASH_MAX_DIGESTSIZE`] bytes; other types probe for the length.
    pub fn bind(alg_type: &str, alg_name: &str) -> Result<Self> {
        // SAFETY: sockaddr_alg is plain old data; all-zero is a valid value
        // and leaves both strings NUL terminated.
        let mut addr: libc::sockaddr_alg = unsafe { mem::zeroed() };
        addr.salg_family = libc::AF_ALG as libc::sa_family_t;
        copy_nul_terminated(&mut addr.salg_type, alg_type, "algorithm type")?;
        copy_nul_terminated(&mut addr.salg_name, alg_name, "algorithm name")?;

        // SAFETY: plain syscall, no pointers.
        let raw = unsafe {
            libc::socket(libc::AF_ALG, libc::SOCK_SEQPACKET | libc::SOCK_CLOEXEC, 0)
        };
        if raw < 0 {
            return Err(SocketError::io(SocketOp::Socket, io::Error::last_os_error()));
        }
        // SAFETY: `raw` is a fresh descriptor we own.
        let listener = unsafe { OwnedFd::from_raw_fd(raw) };

        // SAFETY: `addr` outlives the call and the length matches its type.
        let ret = unsafe {
            libc::bind(
                listener.as_raw_fd(),
                &addr as *const libc::sockaddr_alg as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_alg>() as libc::socklen_t,
            )
        };
        if ret < 0 {
            return Err(SocketError::io(SocketOp::Bind, io::Error::last_os_error()));
        }

        let accepted = retry_interrupted(SocketOp::Accept, || {
            // SAFETY: null address pointers are allowed by accept4.
            cvt(unsafe {
                libc::accept4(
                    listener.as_raw_fd(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    libc::SOCK_CLOEXEC,
                )
            } as isize)
        })?;

        tracing::debug!(alg_type, alg_name, fd = accepted, "bound AF_ALG socket");

        // SAFETY: accept4 returned a new descriptor we own.
        let channel = Self::from_fd(unsafe { OwnedFd::from_raw_fd(accepted as RawFd) });

        // Hash sockets discard the digest on a zero-length peek.
        Ok(if alg_type == "hash" {
            channel.with_max_result_len(HASH_MAX_DIGESTSIZE)
        } else {
            channel
        })
    }

    /// Read results of exactly `len` bytes instead of probing for the length.
    ///
    /// Hash sockets answer a zero-length peek by finishing and discarding
    /// the digest, so when the digest size is known (the registry's
    /// `digestsize`) it should be set here.
    pub fn with_result_len(mut self, len: usize) -> Self {
        self.result_len = ResultLen::Exact(len);
        self
    }

    /// Read results with a single `recv` of up to `max` bytes.
    pub fn with_max_result_len(mut self, max: usize) -> Self {
        self.result_len = ResultLen::AtMost(max);
        self
    }

    pub fn result_len(&self) -> ResultLen {
        self.result_len
    }

    /// Length of the pending result, without consuming it.
    fn probe_result_len(&self) -> Result<usize> {
        let fd = self.fd.as_raw_fd();
        retry_interrupted(SocketOp::Recv, || {
            // SAFETY: zero-length read into a null buffer; MSG_TRUNC makes
            // the kernel report the real length.
            cvt(unsafe { libc::recv(fd, ptr::null_mut(), 0, libc::MSG_PEEK | libc::MSG_TRUNC) })
        })
    }

    /// One `recv` into a buffer of `cap` bytes, truncated to what arrived.
    fn recv_up_to(&self, cap: usize) -> Result<Vec<u8>> {
        let fd = self.fd.as_raw_fd();
        let mut buf = vec![0u8; cap];
        let ptr = buf.as_mut_ptr();
        let read = retry_interrupted(SocketOp::Recv, || {
            // SAFETY: `buf` holds `cap` writable bytes and outlives the call.
            cvt(unsafe { libc::recv(fd, ptr.cast(), cap, 0) })
        })?;
        buf.truncate(read);
        Ok(buf)
    }

    fn read_exact_result(&self, expected: usize) -> Result<Vec<u8>> {
        let buf = self.recv_up_to(expected)?;
        let read = buf.len();
        assert_eq!(
            read, expected,
            "kernel returned {read} result bytes after announcing {expected}"
        );
        Ok(buf)
    }
}

/// `send(2)` flags for a chunk: `MSG_MORE` on every chunk but the final one.
fn send_flags(is_final: bool) -> libc::c_int {
    libc::MSG_NOSIGNAL | if is_final { 0 } else { libc::MSG_MORE }
}

impl Channel for KernelSocketChannel {
    fn send_chunk(&mut self, data: &[u8], is_final: bool) -> Result<()> {
        let fd = self.fd.as_raw_fd();
        let flags = send_flags(is_final);
        let mut offset = 0;

        // At least one send, so an empty final chunk still completes the input.
        loop {
            let rest = &data[offset..];
            let sent = retry_interrupted(SocketOp::Send, || {
                // SAFETY: `rest` is a live slice of the given length.
                cvt(unsafe { libc::send(fd, rest.as_ptr().cast(), rest.len(), flags) })
            })?;
            if sent == 0 && !rest.is_empty() {
                return Err(SocketError::io(
                    SocketOp::Send,
                    io::Error::from(io::ErrorKind::WriteZero),
                ));
            }
            offset += sent;
            if offset >= data.len() {
                break;
            }
        }

        tracing::trace!(fd, len = data.len(), is_final, "sent chunk");
        Ok(())
    }

    fn receive_result(&mut self) -> Result<Bytes> {
        let buf = match self.result_len {
            ResultLen::AtMost(max) => self.recv_up_to(max)?,
            ResultLen::Exact(expected) => self.read_exact_result(expected)?,
            ResultLen::Probe => match self.probe_result_len()? {
                0 => return Err(SocketError::EmptyResult),
                expected => self.read_exact_result(expected)?,
            },
        };
        if buf.is_empty() {
            return Err(SocketError::EmptyResult);
        }

        tracing::trace!(fd = self.fd.as_raw_fd(), len = buf.len(), "received result");
        Ok(Bytes::from(buf))
    }
}

impl AsFd for KernelSocketChannel {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl AsRawFd for KernelSocketChannel {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

/// Copy `value` into a fixed C string field, keeping a trailing NUL.
fn copy_nul_terminated(dst: &mut [u8], value: &str, field: &'static str) -> Result<()> {
    let bytes = value.as_bytes();
    if bytes.len() >= dst.len() || bytes.contains(&0) {
        return Err(SocketError::AddressTooLong {
            field,
            value: value.to_string(),
            max: dst.len() - 1,
        });
    }
    dst[..bytes.len()].copy_from_slice(bytes);
    Ok(())
}

/// Map a syscall return value to `io::Result`, reading `errno` on failure.
fn cvt(ret: isize) -> io::Result<usize> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret as usize)
    }
}

/// Run a syscall until it returns something other than `EINTR`.
pub(crate) fn retry_interrupted<F>(op: SocketOp, mut call: F) -> Result<usize>
where
    F: FnMut() -> io::Result<usize>,
{
    loop {
        match call() {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SocketError::io(op, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestSession;

    fn seqpacket_pair() -> (OwnedFd, OwnedFd) {
        let mut fds = [0 as RawFd; 2];
        let ret = unsafe {
            libc::socketpair(
                libc::AF_UNIX,
                libc::SOCK_SEQPACKET | libc::SOCK_CLOEXEC,
                0,
                fds.as_mut_ptr(),
            )
        };
        assert_eq!(ret, 0, "socketpair: {}", io::Error::last_os_error());
        unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) }
    }

    fn write_packet(fd: &OwnedFd, data: &[u8]) {
        let ret = unsafe { libc::send(fd.as_raw_fd(), data.as_ptr().cast(), data.len(), 0) };
        assert_eq!(ret, data.len() as isize);
    }

    fn read_packet(fd: &OwnedFd) -> Vec<u8> {
        let mut buf = vec![0u8; 256];
        let ret = unsafe { libc::recv(fd.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len(), 0) };
        assert!(ret >= 0);
        buf.truncate(ret as usize);
        buf
    }

    #[test]
    fn test_receive_probes_exact_length() {
        let (ours, peer) = seqpacket_pair();
        let mut channel = KernelSocketChannel::from_fd(ours);
        assert_eq!(channel.result_len(), ResultLen::Probe);

        write_packet(&peer, b"0123456789");
        let result = channel.receive_result().unwrap();
        assert_eq!(&result[..], b"0123456789");
    }

    #[test]
    fn test_receive_with_known_length() {
        let (ours, peer) = seqpacket_pair();
        let mut channel = KernelSocketChannel::from_fd(ours).with_result_len(4);
        assert_eq!(channel.result_len(), ResultLen::Exact(4));

        write_packet(&peer, b"abcd");
        assert_eq!(&channel.receive_result().unwrap()[..], b"abcd");
    }

    #[test]
    #[should_panic(expected = "result bytes after announcing")]
    fn test_length_mismatch_panics() {
        let (ours, peer) = seqpacket_pair();
        let mut channel = KernelSocketChannel::from_fd(ours).with_result_len(8);

        write_packet(&peer, b"abc");
        let _ = channel.receive_result();
    }

    #[test]
    fn test_probed_empty_result_is_an_error() {
        let (ours, peer) = seqpacket_pair();
        let mut session = DigestSession::new(KernelSocketChannel::from_fd(ours), "hash", "sha256");

        // What a hash socket leaves behind once the digest was peeked away.
        write_packet(&peer, b"");
        let err = session.finalize().unwrap_err();
        assert!(matches!(err, SocketError::EmptyResult));
    }

    #[test]
    fn test_bounded_read_truncates_to_result() {
        let (ours, peer) = seqpacket_pair();
        let mut channel = KernelSocketChannel::from_fd(ours).with_max_result_len(HASH_MAX_DIGESTSIZE);
        assert_eq!(channel.result_len(), ResultLen::AtMost(64));

        write_packet(&peer, &[7u8; 32]);
        assert_eq!(&channel.receive_result().unwrap()[..], &[7u8; 32][..]);
    }

    #[test]
    fn test_bounded_read_rejects_empty_result() {
        let (ours, peer) = seqpacket_pair();
        let mut channel = KernelSocketChannel::from_fd(ours).with_max_result_len(HASH_MAX_DIGESTSIZE);

        write_packet(&peer, b"");
        assert!(matches!(channel.receive_result(), Err(SocketError::EmptyResult)));
    }

    #[test]
    fn test_send_flags() {
        assert_eq!(send_flags(false), libc::MSG_NOSIGNAL | libc::MSG_MORE);
        assert_eq!(send_flags(true) & libc::MSG_MORE, 0);
        assert_ne!(send_flags(true) & libc::MSG_NOSIGNAL, 0);
    }

    #[test]
    fn test_final_send_reaches_peer() {
        let (ours, peer) = seqpacket_pair();
        let mut channel = KernelSocketChannel::from_fd(ours);

        channel.send_chunk(b"payload", true).unwrap();
        assert_eq!(read_packet(&peer), b"payload");
    }

    #[test]
    fn test_send_on_closed_peer_is_io_error() {
        let (ours, peer) = seqpacket_pair();
        drop(peer);
        let mut channel = KernelSocketChannel::from_fd(ours);

        let err = channel.send_chunk(b"x", true).unwrap_err();
        assert!(matches!(err, SocketError::Io { op: SocketOp::Send, .. }));
        assert!(err.raw_os_error().is_some());
    }

    #[test]
    fn test_drop_closes_descriptor() {
        let (ours, peer) = seqpacket_pair();
        drop(KernelSocketChannel::from_fd(ours));

        // Orderly shutdown reads as an empty packet on the peer.
        assert!(read_packet(&peer).is_empty());
    }

    #[test]
    fn test_retry_interrupted() {
        let mut calls = 0;
        let n = retry_interrupted(SocketOp::Recv, || {
            calls += 1;
            if calls < 3 {
                Err(io::Error::from(io::ErrorKind::Interrupted))
            } else {
                Ok(7)
            }
        })
        .unwrap();
        assert_eq!((n, calls), (7, 3));
    }

    #[test]
    fn test_retry_surfaces_other_errors() {
        let err = retry_interrupted(SocketOp::Accept, || {
            Err(io::Error::from_raw_os_error(libc::EINVAL))
        })
        .unwrap_err();
        assert!(matches!(err, SocketError::Io { op: SocketOp::Accept, .. }));
        assert_eq!(err.raw_os_error(), Some(libc::EINVAL));
    }

    #[test]
    fn test_address_limits() {
        let err = KernelSocketChannel::bind("hash", &"x".repeat(64)).unwrap_err();
        assert!(matches!(
            err,
            SocketError::AddressTooLong {
                field: "algorithm name",
                max: 63,
                ..
            }
        ));

        let err = KernelSocketChannel::bind(&"y".repeat(14), "sha256").unwrap_err();
        assert!(matches!(err, SocketError::AddressTooLong { max: 13, .. }));
    }

    #[test]
    fn test_unknown_algorithm_fails_to_bind() {
        match KernelSocketChannel::bind("hash", "no-such-digest") {
            Err(SocketError::Io { op, .. }) => {
                assert!(matches!(op, SocketOp::Socket | SocketOp::Bind))
            }
            other => panic!("unexpected bind result: {other:?}"),
        }
    }
}
