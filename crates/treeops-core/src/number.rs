//! Width-preserving numeric payload.

use std::fmt;

/// A number together with the width it was created at.
///
/// Extraction operations hand back a `Number` rather than a widened `f64`
/// so that callers (and transcoding) can pick the matching constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// Whether the payload is one of the integer widths.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Number::Byte(_) | Number::Short(_) | Number::Int(_) | Number::Long(_)
        )
    }

    /// Widen to `i64`. Floating-point values are truncated toward zero.
    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Byte(v) => v as i64,
            Number::Short(v) => v as i64,
            Number::Int(v) => v as i64,
            Number::Long(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        }
    }

    /// Narrowing conversion; out-of-range integers wrap.
    pub fn as_i32(&self) -> i32 {
        self.as_i64() as i32
    }

    pub fn as_i16(&self) -> i16 {
        self.as_i64() as i16
    }

    pub fn as_i8(&self) -> i8 {
        self.as_i64() as i8
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Byte(v) => v as f64,
            Number::Short(v) => v as f64,
            Number::Int(v) => v as f64,
            Number::Long(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    pub fn as_f32(&self) -> f32 {
        self.as_f64() as f32
    }

    /// `true` unless the value is zero.
    pub fn is_truthy(&self) -> bool {
        match *self {
            Number::Float(v) => v != 0.0,
            Number::Double(v) => v != 0.0,
            _ => self.as_i64() != 0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Byte(v) => write!(f, "{}", v),
            Number::Short(v) => write!(f, "{}", v),
            Number::Int(v) => write!(f, "{}", v),
            Number::Long(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
            Number::Double(v) => write!(f, "{}", v),
        }
    }
}

impl From<i8> for Number {
    fn from(v: i8) -> Self {
        Number::Byte(v)
    }
}

impl From<i16> for Number {
    fn from(v: i16) -> Self {
        Number::Short(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Long(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Double(v)
    }
}
