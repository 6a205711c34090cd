//! Schema-driven decoding of raw blocks into typed records.
//!
//! Each block is walked against a [`RecordSchema`] in declaration order.
//! Values are coerced strictly; a block either decodes completely or fails
//! with the first offending field, and a batch fails with its first block.

use std::collections::BTreeMap;

use crate::block::RawBlock;
use crate::error::DecodeError;
use crate::schema::{normalize_key, FieldKind, FieldSpec, RecordSchema};

/// A coerced registry value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
}

/// Conversion from a coerced [`Value`] into a concrete Rust type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! from_value_int {
    ($variant:ident => $($ty:ty),+) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(n) => <$ty>::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

from_value_int!(Int => i8, i16, i32, i64);
from_value_int!(UInt => u8, u16, u32, u64);

/// A record type decodable from registry blocks.
pub trait Record: Sized {
    /// The field table this record is decoded against.
    const SCHEMA: &'static RecordSchema;

    /// Build the record from the decoded fields of one block.
    fn from_fields(fields: &mut Fields) -> Result<Self, DecodeError>;
}

/// Decoded values of one block, positionally aligned with its schema.
///
/// Acts as a cursor: each value is moved out when the record takes it.
#[derive(Debug)]
pub struct Fields {
    schema: &'static RecordSchema,
    block: usize,
    values: Vec<Option<Value>>,
}

impl Fields {
    /// Index of the block these fields came from.
    pub fn block(&self) -> usize {
        self.block
    }

    /// Take a field declared as required.
    pub fn required<T: FromValue>(&mut self, name: &'static str) -> Result<T, DecodeError> {
        self.optional(name)?.ok_or(DecodeError::Schema {
            record: self.schema.record,
            field: name,
            reason: "field is optional in the schema or was already taken",
        })
    }

    /// Take a field that may be absent.
    pub fn optional<T: FromValue>(&mut self, name: &'static str) -> Result<Option<T>, DecodeError> {
        let index = self.schema.position(name).ok_or(DecodeError::Schema {
            record: self.schema.record,
            field: name,
            reason: "field is not declared",
        })?;

        match self.values[index].take() {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or(DecodeError::Schema {
                record: self.schema.record,
                field: name,
                reason: "declared kind does not match the requested type",
            }),
        }
    }

    /// Borrow a decoded value without taking it.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .position(name)
            .and_then(|i| self.values[i].as_ref())
    }
}

/// Coerce a trimmed raw value to the field's kind.
pub fn coerce(spec: &FieldSpec, raw: &str, block: usize) -> Result<Value, DecodeError> {
    let invalid = || DecodeError::InvalidValue {
        field: spec.name,
        kind: spec.kind,
        raw: raw.to_string(),
        block,
    };

    let value = match spec.kind {
        FieldKind::Bool => match raw {
            "yes" => Value::Bool(true),
            "no" => Value::Bool(false),
            _ => return Err(invalid()),
        },
        FieldKind::Str => Value::Str(raw.to_string()),
        FieldKind::I8 => Value::Int(parse_decimal::<i8>(raw, true).ok_or_else(invalid)?.into()),
        FieldKind::I16 => Value::Int(parse_decimal::<i16>(raw, true).ok_or_else(invalid)?.into()),
        FieldKind::I32 => Value::Int(parse_decimal::<i32>(raw, true).ok_or_else(invalid)?.into()),
        FieldKind::I64 => Value::Int(parse_decimal::<i64>(raw, true).ok_or_else(invalid)?),
        FieldKind::U8 => Value::UInt(parse_decimal::<u8>(raw, false).ok_or_else(invalid)?.into()),
        FieldKind::U16 => Value::UInt(parse_decimal::<u16>(raw, false).ok_or_else(invalid)?.into()),
        FieldKind::U32 => Value::UInt(parse_decimal::<u32>(raw, false).ok_or_else(invalid)?.into()),
        FieldKind::U64 => Value::UInt(parse_decimal::<u64>(raw, false).ok_or_else(invalid)?),
    };

    Ok(value)
}

/// Base-10 digits only, with a leading `-` allowed for signed kinds.
///
/// `str::parse` alone would also accept a leading `+`.
fn parse_decimal<T: std::str::FromStr>(raw: &str, signed: bool) -> Option<T> {
    let digits = if signed {
        raw.strip_prefix('-').unwrap_or(raw)
    } else {
        raw
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Decode one block against a schema.
pub fn decode_block(
    block: &RawBlock<'_>,
    index: usize,
    schema: &'static RecordSchema,
) -> Result<Fields, DecodeError> {
    let mut values = Vec::with_capacity(schema.fields.len());

    for spec in schema.fields {
        match block.get(&normalize_key(spec.key)) {
            Some(raw) => values.push(Some(coerce(spec, raw.trim(), index)?)),
            None if spec.is_required() => {
                return Err(DecodeError::MissingField {
                    field: spec.name,
                    key: spec.key,
                    block: index,
                })
            }
            None => values.push(None),
        }
    }

    Ok(Fields {
        schema,
        block: index,
        values,
    })
}

/// Decode one block into a record.
pub fn decode_record<R: Record>(block: &RawBlock<'_>, index: usize) -> Result<R, DecodeError> {
    let mut fields = decode_block(block, index, R::SCHEMA)?;
    R::from_fields(&mut fields)
}

/// Decode every block, all or nothing, preserving order.
pub fn decode_all<R: Record>(blocks: &[RawBlock<'_>]) -> Result<Vec<R>, DecodeError> {
    let records = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| decode_record(block, index))
        .collect::<Result<Vec<R>, _>>()?;

    tracing::debug!(
        record = R::SCHEMA.record,
        count = records.len(),
        "decoded registry blocks"
    );
    Ok(records)
}

/// Untyped view of each block: normalized key to trimmed value, sorted by key.
pub fn decode_maps(blocks: &[RawBlock<'_>]) -> Vec<BTreeMap<String, String>> {
    blocks
        .iter()
        .map(|block| {
            block
                .iter()
                .map(|(k, v)| (k.to_string(), v.trim().to_string()))
                .collect()
        })
        .collect()
}
