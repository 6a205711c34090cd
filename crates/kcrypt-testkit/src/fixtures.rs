//! Test fixtures and helpers.
//!
//! Registry text captured from real machines, and digest sessions that hash
//! in software so protocol tests run without `AF_ALG`.

use kcrypt_registry::Registry;
use kcrypt_socket::{DigestSession, MemoryChannel};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// The first block of an arm64 (Cortex-A72) `/proc/crypto`.
pub const ECB_AES_BLOCK: &str = "\
name         : __ecb(aes)
driver       : cryptd(__ecb-aes-ce)
module       : cryptd
priority     : 350
refcnt       : 2
selftest     : passed
internal     : yes
type         : skcipher
async        : yes
blocksize    : 16
min keysize  : 16
max keysize  : 32
ivsize       : 0
chunksize    : 16
walksize     : 16
";

/// An excerpt of an arm64 `/proc/crypto`, one block per algorithm type.
pub const ARM64_REGISTRY: &str = "\
name         : __ecb(aes)
driver       : cryptd(__ecb-aes-ce)
module       : cryptd
priority     : 350
refcnt       : 2
selftest     : passed
internal     : yes
type         : skcipher
async        : yes
blocksize    : 16
min keysize  : 16
max keysize  : 32
ivsize       : 0
chunksize    : 16
walksize     : 16

name         : ccm(aes)
driver       : ccm-aes-ce
module       : aes_ce_ccm
priority     : 300
refcnt       : 1
selftest     : passed
internal     : no
type         : aead
async        : no
blocksize    : 1
ivsize       : 16
maxauthsize  : 16
geniv        : <none>

name         : sha256
driver       : sha256-ce
module       : sha2_ce
priority     : 200
refcnt       : 3
selftest     : passed
internal     : no
type         : shash
blocksize    : 64
digestsize   : 32

name         : sha224
driver       : sha224-ce
module       : sha2_ce
priority     : 200
refcnt       : 1
selftest     : passed
internal     : no
type         : shash
blocksize    : 64
digestsize   : 28

name         : aes
driver       : aes-ce
module       : aes_ce_cipher
priority     : 250
refcnt       : 1
selftest     : passed
internal     : no
type         : cipher
blocksize    : 16
min keysize  : 16
max keysize  : 32

name         : crct10dif
driver       : crct10dif-arm64-ce
module       : crct10dif_ce
priority     : 200
refcnt       : 1
selftest     : passed
internal     : no
type         : shash
blocksize    : 1
digestsize   : 2

name         : jitterentropy_rng
driver       : jitterentropy_rng
module       : jitterentropy_rng
priority     : 100
refcnt       : 1
selftest     : passed
internal     : no
type         : rng
seedsize     : 0

name         : ecdh-nist-p256
driver       : ecdh-nist-p256-generic
module       : ecdh_generic
priority     : 100
refcnt       : 1
selftest     : passed
internal     : no
type         : kpp

name         : pkcs1pad(rsa-generic,sha256)
driver       : pkcs1pad(rsa-generic,sha256)
module       : kernel
priority     : 100
refcnt       : 1
selftest     : passed
internal     : no
type         : akcipher

name         : lzo-rle
driver       : lzo-rle-scomp
module       : kernel
priority     : 0
refcnt       : 1
selftest     : passed
internal     : no
type         : scomp

name         : lzo-rle
driver       : lzo-rle-generic
module       : kernel
priority     : 0
refcnt       : 1
selftest     : passed
internal     : no
type         : compression

name         : stdrng
driver       : drbg_nopr_hmac_sha256
module       : kernel
priority     : 207
refcnt       : 2
selftest     : passed
internal     : no
type         : rng
seedsize     : 0

";

/// Number of blocks in [`ARM64_REGISTRY`].
pub const ARM64_BLOCKS: usize = 12;

/// Decode [`ARM64_REGISTRY`].
pub fn arm64_registry() -> Registry {
    match Registry::parse(ARM64_REGISTRY) {
        Ok(registry) => registry,
        Err(e) => panic!("ARM64_REGISTRY fixture no longer decodes: {e}"),
    }
}

fn hasher<D: Digest + 'static>() -> MemoryChannel {
    MemoryChannel::new(|input| D::digest(input).to_vec())
}

/// A channel hashing with a software SHA-2, by kernel algorithm name.
pub fn software_channel(algorithm: &str) -> Option<MemoryChannel> {
    match algorithm {
        "sha224" => Some(hasher::<Sha224>()),
        "sha256" => Some(hasher::<Sha256>()),
        "sha384" => Some(hasher::<Sha384>()),
        "sha512" => Some(hasher::<Sha512>()),
        _ => None,
    }
}

/// A digest session backed by [`software_channel`].
pub fn software_session(algorithm: &str) -> Option<DigestSession<MemoryChannel>> {
    software_channel(algorithm).map(|channel| DigestSession::new(channel, "hash", algorithm))
}
