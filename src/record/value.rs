//! Typed values read off records and produced by coercion

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Static description of a fieldless enum: member names and underlying values
#[derive(Debug)]
pub struct EnumType {
    name: &'static str,
    members: &'static [(&'static str, i64)],
}

impl EnumType {
    pub const fn new(name: &'static str, members: &'static [(&'static str, i64)]) -> Self {
        Self { name, members }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn members(&self) -> &'static [(&'static str, i64)] {
        self.members
    }

    /// Member by name, ignoring case
    pub fn by_name(&'static self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|(member, _)| member.eq_ignore_ascii_case(name))
            .map(|(_, value)| EnumValue { ty: self, value: *value })
    }

    /// Member by underlying value
    pub fn by_value(&'static self, value: i64) -> Option<EnumValue> {
        self.members
            .iter()
            .any(|(_, v)| *v == value)
            .then_some(EnumValue { ty: self, value })
    }

    /// Wrap an underlying value read off a record
    #[inline]
    pub fn value(&'static self, value: i64) -> Value {
        Value::Enum(EnumValue { ty: self, value })
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A member of an [`EnumType`]
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
    ty: &'static EnumType,
    value: i64,
}

impl EnumValue {
    pub fn enum_type(&self) -> &'static EnumType {
        self.ty
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn name(&self) -> Option<&'static str> {
        self.ty
            .members
            .iter()
            .find(|(_, v)| *v == self.value)
            .map(|(name, _)| *name)
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.value == other.value
    }
}

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Decimal(Decimal),
    String(String),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
    Enum(EnumValue),
    Array(Vec<Value>),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime kind name, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
            Value::Enum(_) => "enum",
            Value::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering between two values of the same variant.
    ///
    /// Returns `None` for nulls, arrays, mismatched variants and NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int32(a), Value::Int32(b)) => Some(a.cmp(b)),
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Value::Enum(b)) if a.ty == b.ty => Some(a.value.cmp(&b.value)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::DateTime(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Uuid(v) => write!(f, "{}", v),
            Value::Enum(v) => match v.name() {
                Some(name) => write!(f, "{}.{}", v.ty.name, name),
                None => write!(f, "{}({})", v.ty.name, v.value),
            },
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f64 => Float64,
    Decimal => Decimal,
    String => String,
    DateTime<Utc> => DateTime,
    Uuid => Uuid,
    EnumValue => Enum,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLOR: EnumType = EnumType::new("Color", &[("Red", 0), ("Green", 1), ("Blue", 5)]);

    #[test]
    fn test_enum_lookup() {
        assert_eq!(COLOR.by_name("green").map(|v| v.value()), Some(1));
        assert_eq!(COLOR.by_value(5).and_then(|v| v.name()), Some("Blue"));
        assert!(COLOR.by_value(2).is_none());
        assert!(COLOR.by_name("purple").is_none());
    }

    #[test]
    fn test_compare_same_variant() {
        assert_eq!(Value::Int32(1).compare(&Value::Int32(2)), Some(Ordering::Less));
        assert_eq!(
            Value::Decimal(Decimal::new(4999, 2)).compare(&Value::Decimal(Decimal::new(20, 0))),
            Some(Ordering::Greater)
        );
        assert_eq!(COLOR.value(5).compare(&COLOR.value(0)), Some(Ordering::Greater));
    }

    #[test]
    fn test_compare_rejects_null_and_mixed() {
        assert_eq!(Value::Null.compare(&Value::Null), None);
        assert_eq!(Value::Int32(1).compare(&Value::Int64(1)), None);
        assert_eq!(Value::Float64(f64::NAN).compare(&Value::Float64(1.0)), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("x").to_string(), "\"x\"");
        assert_eq!(COLOR.value(1).to_string(), "Color.Green");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
    }
}
