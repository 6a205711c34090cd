//! The algorithm record: one entry of `/proc/crypto`.

use serde::{Deserialize, Serialize};

use crate::decode::{Fields, Record};
use crate::error::DecodeError;
use crate::schema::{FieldKind, FieldSpec, RecordSchema};
use crate::types::{AlgorithmType, CipherName};

/// Field table for [`Cipher`].
///
/// Size fields are optional because the kernel only prints the ones that
/// apply to an algorithm's type.
pub const CIPHER_SCHEMA: RecordSchema = RecordSchema {
    record: "Cipher",
    fields: &[
        FieldSpec::required("name", "name", FieldKind::Str),
        FieldSpec::required("driver", "driver", FieldKind::Str),
        FieldSpec::required("module", "module", FieldKind::Str),
        FieldSpec::required("priority", "priority", FieldKind::I32),
        FieldSpec::required("reference_count", "refcnt", FieldKind::U32),
        FieldSpec::required("self_test", "selftest", FieldKind::Str),
        FieldSpec::required("is_internal", "internal", FieldKind::Bool),
        FieldSpec::required("algorithm_type", "type", FieldKind::Str),
        FieldSpec::optional("is_async", "async", FieldKind::Bool),
        FieldSpec::optional("block_size", "blocksize", FieldKind::U32),
        FieldSpec::optional("min_keysize", "min keysize", FieldKind::U32),
        FieldSpec::optional("max_keysize", "max keysize", FieldKind::U32),
        FieldSpec::optional("iv_size", "ivsize", FieldKind::U32),
        FieldSpec::optional("chunk_size", "chunksize", FieldKind::U32),
        FieldSpec::optional("walk_size", "walksize", FieldKind::U32),
        FieldSpec::optional("digest_size", "digestsize", FieldKind::U32),
    ],
};

/// A kernel crypto algorithm instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cipher {
    pub name: CipherName,
    pub driver: String,
    pub module: String,
    pub priority: i32,
    pub reference_count: u32,
    /// Self-test outcome, usually `passed` or `unknown`.
    pub self_test: String,
    pub is_internal: bool,
    pub algorithm_type: AlgorithmType,

    pub is_async: Option<bool>,
    pub block_size: Option<u32>,
    pub min_keysize: Option<u32>,
    pub max_keysize: Option<u32>,
    pub iv_size: Option<u32>,
    pub chunk_size: Option<u32>,
    pub walk_size: Option<u32>,
    pub digest_size: Option<u32>,
}

impl Cipher {
    /// Check if the kernel reported a passing self-test.
    pub fn self_test_passed(&self) -> bool {
        self.self_test == "passed"
    }
}

impl Record for Cipher {
    const SCHEMA: &'static RecordSchema = &CIPHER_SCHEMA;

    fn from_fields(fields: &mut Fields) -> Result<Self, DecodeError> {
        Ok(Self {
            name: CipherName::new(fields.required::<String>("name")?),
            driver: fields.required("driver")?,
            module: fields.required("module")?,
            priority: fields.required("priority")?,
            reference_count: fields.required("reference_count")?,
            self_test: fields.required("self_test")?,
            is_internal: fields.required("is_internal")?,
            algorithm_type: AlgorithmType::from(fields.required::<String>("algorithm_type")?),
            is_async: fields.optional("is_async")?,
            block_size: fields.optional("block_size")?,
            min_keysize: fields.optional("min_keysize")?,
            max_keysize: fields.optional("max_keysize")?,
            iv_size: fields.optional("iv_size")?,
            chunk_size: fields.optional("chunk_size")?,
            walk_size: fields.optional("walk_size")?,
            digest_size: fields.optional("digest_size")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::split_blocks;
    use crate::decode::decode_record;

    const AKCIPHER: &str = "\
name         : pkcs1pad(rsa-generic,sha256)
driver       : pkcs1pad(rsa-generic,sha256)
module       : kernel
priority     : 100
refcnt       : 1
selftest     : passed
internal     : no
type         : akcipher
";

    const SHASH: &str = "\
name         : sha256
driver       : sha256-ce
module       : sha2_ce
priority     : 200
refcnt       : 1
selftest     : passed
internal     : no
type         : shash
blocksize    : 64
digestsize   : 32
";

    fn decode(text: &str) -> Result<Cipher, DecodeError> {
        let blocks = split_blocks(text).unwrap();
        decode_record(&blocks[0], 0)
    }

    #[test]
    fn test_akcipher_has_no_size_fields() {
        let cipher = decode(AKCIPHER).unwrap();
        assert_eq!(cipher.algorithm_type, AlgorithmType::Akcipher);
        assert_eq!(cipher.is_async, None);
        assert_eq!(cipher.block_size, None);
        assert_eq!(cipher.min_keysize, None);
        assert_eq!(cipher.max_keysize, None);
        assert_eq!(cipher.iv_size, None);
        assert_eq!(cipher.chunk_size, None);
        assert_eq!(cipher.walk_size, None);
        assert_eq!(cipher.digest_size, None);
    }

    #[test]
    fn test_shash_sizes() {
        let cipher = decode(SHASH).unwrap();
        assert_eq!(cipher.name, "sha256");
        assert_eq!(cipher.block_size, Some(64));
        assert_eq!(cipher.digest_size, Some(32));
        assert!(cipher.algorithm_type.is_hash());
        assert!(cipher.self_test_passed());
        assert!(!cipher.is_internal);
    }

    #[test]
    fn test_missing_name() {
        let text = AKCIPHER.replace("name         : pkcs1pad(rsa-generic,sha256)\n", "");
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_negative_refcnt_rejected() {
        let text = SHASH.replace("refcnt       : 1", "refcnt       : -1");
        let err = decode(&text).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidValue {
                field: "reference_count",
                kind: FieldKind::U32,
                ..
            }
        ));
    }

    #[test]
    fn test_serialized_absent_fields_are_null() {
        let cipher = decode(AKCIPHER).unwrap();
        let json = serde_json::to_value(&cipher).unwrap();
        assert!(json["digest_size"].is_null());
        assert_eq!(json["algorithm_type"], "akcipher");
        assert_eq!(json["name"], "pkcs1pad(rsa-generic,sha256)");

        let back: Cipher = serde_json::from_value(json).unwrap();
        assert_eq!(back, cipher);
    }
}
