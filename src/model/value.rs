use std::fmt;

use serde::Serialize;

/// A single field value of a metric.
///
/// Numeric variants keep their original width and signedness so a rescaled
/// value can be narrowed back into the exact type it arrived with.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
}

impl FieldValue {
    /// Widens a numeric value to f64. Booleans and strings are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FieldValue::I32(v) => Some(v as f64),
            FieldValue::I64(v) => Some(v as f64),
            FieldValue::U32(v) => Some(v as f64),
            FieldValue::U64(v) => Some(v as f64),
            FieldValue::F32(v) => Some(v as f64),
            FieldValue::F64(v) => Some(v),
            FieldValue::Bool(_) | FieldValue::Str(_) => None,
        }
    }

    /// Computes `factor * self` in f64 and casts the product back to the
    /// variant of `self`. Integer casts truncate toward zero and saturate at
    /// the bounds of the target type.
    pub fn multiply(&self, factor: f64) -> Option<FieldValue> {
        let product = factor * self.as_f64()?;
        match self {
            FieldValue::I32(_) => Some(FieldValue::I32(product as i32)),
            FieldValue::I64(_) => Some(FieldValue::I64(product as i64)),
            FieldValue::U32(_) => Some(FieldValue::U32(product as u32)),
            FieldValue::U64(_) => Some(FieldValue::U64(product as u64)),
            FieldValue::F32(_) => Some(FieldValue::F32(product as f32)),
            FieldValue::F64(_) => Some(FieldValue::F64(product)),
            FieldValue::Bool(_) | FieldValue::Str(_) => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            FieldValue::F32(v) => v.is_finite(),
            FieldValue::F64(v) => v.is_finite(),
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::I32(_) => "int32",
            FieldValue::I64(_) => "int64",
            FieldValue::U32(_) => "uint32",
            FieldValue::U64(_) => "uint64",
            FieldValue::F32(_) => "float32",
            FieldValue::F64(_) => "float64",
            FieldValue::Bool(_) => "bool",
            FieldValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::I32(v) => write!(f, "{}", v),
            FieldValue::I64(v) => write!(f, "{}", v),
            FieldValue::U32(v) => write!(f, "{}", v),
            FieldValue::U64(v) => write!(f, "{}", v),
            FieldValue::F32(v) => write!(f, "{}", v),
            FieldValue::F64(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::I32(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::I64(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::U32(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::U64(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::F32(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::F64(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}
