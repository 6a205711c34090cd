//! Error types for registry parsing and decoding.

use thiserror::Error;

use crate::schema::FieldKind;

/// Errors raised while splitting registry text into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A non-blank line without a `key : value` separator.
    #[error("malformed line {line}: missing ':' in {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Errors raised while decoding blocks into typed records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required field has no key in the block.
    #[error("block {block}: missing required field `{field}` (key {key:?})")]
    MissingField {
        field: &'static str,
        key: &'static str,
        block: usize,
    },

    /// A value could not be coerced to the field's declared kind.
    #[error("block {block}: field `{field}` expected {kind}, got {raw:?}")]
    InvalidValue {
        field: &'static str,
        kind: FieldKind,
        raw: String,
        block: usize,
    },

    /// A record type asked for something its schema does not declare.
    #[error("schema mismatch for `{record}.{field}`: {reason}")]
    Schema {
        record: &'static str,
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors from the composed registry pipeline.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
