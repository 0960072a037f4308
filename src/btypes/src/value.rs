//! Field values and their byte encoding
//!
//! Host memory is little-endian. Encoding never truncates or pads: a value
//! that does not fit the field's width or type is rejected.

use crate::layout::ConcreteType;
use crate::schema::{Scalar, POINTER_SIZE};
use byteorder::{ByteOrder, LE};

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Char(u8),
    Int(i64),
    UInt(u64),
    Float(f64),
    Pointer(usize),
    /// Raw bytes; `char` arrays and aggregate fields decode to this
    Bytes(Vec<u8>),
    Array(Vec<Value>),
}

impl Value {
    /// Short description used in type mismatch errors
    pub fn describe(&self) -> String {
        match self {
            Self::Bool(_) => "bool".to_string(),
            Self::Char(_) => "char".to_string(),
            Self::Int(v) => format!("int {}", v),
            Self::UInt(v) => format!("uint {}", v),
            Self::Float(v) => format!("float {}", v),
            Self::Pointer(_) => "pointer".to_string(),
            Self::Bytes(b) => format!("{} bytes", b.len()),
            Self::Array(items) => format!("array of {}", items.len()),
        }
    }

    /// Integer view of the value, if it has one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            Self::Char(c) => Some(*c as i64),
            Self::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    /// Numeric view of the value (integers and floats)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

fn int_range(scalar: Scalar) -> Option<(i128, i128)> {
    Some(match scalar {
        Scalar::I8 => (i8::MIN as i128, i8::MAX as i128),
        Scalar::U8 => (0, u8::MAX as i128),
        Scalar::I16 => (i16::MIN as i128, i16::MAX as i128),
        Scalar::U16 => (0, u16::MAX as i128),
        Scalar::I32 => (i32::MIN as i128, i32::MAX as i128),
        Scalar::U32 => (0, u32::MAX as i128),
        Scalar::I64 => (i64::MIN as i128, i64::MAX as i128),
        Scalar::U64 => (0, u64::MAX as i128),
        Scalar::Bool | Scalar::Char | Scalar::F32 | Scalar::F64 => return None,
    })
}

pub(crate) fn decode_scalar(scalar: Scalar, bytes: &[u8]) -> Value {
    match scalar {
        Scalar::Bool => Value::Bool(bytes[0] != 0),
        Scalar::Char => Value::Char(bytes[0]),
        Scalar::F32 => Value::Float(LE::read_f32(bytes) as f64),
        Scalar::F64 => Value::Float(LE::read_f64(bytes)),
        s if s.is_signed() => Value::Int(LE::read_int(bytes, s.size())),
        s => Value::UInt(LE::read_uint(bytes, s.size())),
    }
}

/// Decode `bytes` (exactly `ty.size()` long) as a value of `ty`
pub(crate) fn decode(ty: &ConcreteType, bytes: &[u8]) -> Value {
    match ty {
        ConcreteType::Scalar(s) => decode_scalar(*s, bytes),
        ConcreteType::Array { element, .. }
            if **element == ConcreteType::Scalar(Scalar::Char) =>
        {
            Value::Bytes(bytes.to_vec())
        }
        ConcreteType::Array { element, .. } => {
            let size = element.size();
            Value::Array(
                bytes
                    .chunks_exact(size.max(1))
                    .map(|chunk| decode(element, chunk))
                    .collect(),
            )
        }
        ConcreteType::Pointer(_) => Value::Pointer(LE::read_uint(bytes, POINTER_SIZE) as usize),
        ConcreteType::Struct { .. } | ConcreteType::ListBase { .. } | ConcreteType::Union(_) => {
            Value::Bytes(bytes.to_vec())
        }
    }
}

fn encode_scalar(scalar: Scalar, value: &Value) -> Option<Vec<u8>> {
    let size = scalar.size();
    let mut buf = vec![0u8; size];
    match (scalar, value) {
        (Scalar::Bool, Value::Bool(b)) => buf[0] = *b as u8,
        (Scalar::Char, Value::Char(c)) => buf[0] = *c,
        (Scalar::F32, Value::Float(f)) => {
            let narrowed = *f as f32;
            if f.is_finite() && !narrowed.is_finite() {
                return None;
            }
            LE::write_f32(&mut buf, narrowed);
        }
        (Scalar::F64, Value::Float(f)) => LE::write_f64(&mut buf, *f),
        (s, Value::Int(_) | Value::UInt(_)) => {
            let (min, max) = int_range(s)?;
            let n = match value {
                Value::Int(v) => *v as i128,
                Value::UInt(v) => *v as i128,
                _ => return None,
            };
            if n < min || n > max {
                return None;
            }
            if s.is_signed() {
                LE::write_int(&mut buf, n as i64, size);
            } else {
                LE::write_uint(&mut buf, n as u64, size);
            }
        }
        _ => return None,
    }
    Some(buf)
}

/// Encode `value` for a field of type `ty`
///
/// Raw bytes of exactly the field's size are accepted for any type.
/// Returns `None` when the value does not match the field.
pub(crate) fn encode(ty: &ConcreteType, value: &Value) -> Option<Vec<u8>> {
    if let Value::Bytes(bytes) = value {
        return (bytes.len() == ty.size()).then(|| bytes.clone());
    }

    match (ty, value) {
        (ConcreteType::Scalar(s), v) => encode_scalar(*s, v),
        (ConcreteType::Array { element, len }, Value::Array(items)) if items.len() == *len => {
            let mut out = Vec::with_capacity(ty.size());
            for item in items {
                out.extend(encode(element, item)?);
            }
            Some(out)
        }
        (ConcreteType::Pointer(_), Value::Pointer(address)) => {
            let mut buf = vec![0u8; POINTER_SIZE];
            LE::write_uint(&mut buf, *address as u64, POINTER_SIZE);
            Some(buf)
        }
        _ => None,
    }
}
