//! Declarative record schemas.
//!
//! A schema is a static table: semantic field name, registry key, primitive
//! kind and presence. The decoding engine walks it in order; nothing is
//! inferred from the algorithm type.

use std::fmt;

/// Primitive kind a registry value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Literal `yes` or `no`.
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// Trimmed text, possibly empty.
    Str,
}

impl FieldKind {
    /// Check if this kind is a signed integer.
    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Check if this kind is an unsigned integer.
    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Str => "string",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a field must be present in every block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Required,
    Optional,
}

/// One declared field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Semantic name, as the record type refers to it.
    pub name: &'static str,
    /// Key as spelled in the registry (spaces allowed, see [`normalize_key`]).
    pub key: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldSpec {
    /// A required field.
    pub const fn required(name: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key,
            kind,
            presence: Presence::Required,
        }
    }

    /// An optional field.
    pub const fn optional(name: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key,
            kind,
            presence: Presence::Optional,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// The full field table of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Record name used in diagnostics.
    pub record: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    /// Position of a field by semantic name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Look up a field by semantic name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Normalize a registry key: all whitespace removed.
///
/// Applied both to keys read from registry text and to schema keys, so
/// `min keysize` and `minkeysize` name the same field.
pub fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect()
}
