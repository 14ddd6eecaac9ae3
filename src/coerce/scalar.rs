//! Convertible conversions between native scalars

use crate::error::{QueryMatrixError, Result};
use crate::matrix::Scalar;
use crate::record::{EnumType, EnumValue, FieldType, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use uuid::Uuid;

/// Convert a native scalar to a non-enum, non-array target
pub(crate) fn convert(raw: &Scalar, target: &FieldType) -> Result<Value> {
    let converted = match target {
        FieldType::Bool => to_bool(raw).map(Value::Bool),
        FieldType::Int32 => to_i64(raw)
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int32),
        FieldType::Int64 => to_i64(raw).map(Value::Int64),
        FieldType::Float64 => to_f64(raw).map(Value::Float64),
        FieldType::Decimal => to_decimal(raw).map(Value::Decimal),
        FieldType::String => Some(Value::String(to_text(raw))),
        FieldType::DateTime => to_datetime(raw).map(Value::DateTime),
        FieldType::Uuid => to_uuid(raw).map(Value::Uuid),
        FieldType::Enum(ty) => return to_enum(raw, ty),
        FieldType::Array(_) => {
            return Err(QueryMatrixError::unsupported_value(raw.kind_name(), target))
        }
    };
    converted.ok_or_else(|| QueryMatrixError::conversion(raw, target))
}

/// Enum member by name (ignoring case) or by underlying value
fn to_enum(raw: &Scalar, ty: &'static EnumType) -> Result<Value> {
    let member = match raw {
        Scalar::String(s) => enum_from_text(ty, s),
        Scalar::Int(v) => ty.by_value(*v),
        _ => None,
    };
    member
        .map(Value::Enum)
        .ok_or_else(|| QueryMatrixError::conversion(raw, FieldType::Enum(ty)))
}

pub(crate) fn enum_from_text(ty: &'static EnumType, text: &str) -> Option<EnumValue> {
    let text = text.trim();
    ty.by_name(text)
        .or_else(|| text.parse::<i64>().ok().and_then(|v| ty.by_value(v)))
}

/// Round half to even and range-check into `i64`
fn float_to_i64(v: f64) -> Option<i64> {
    let rounded = v.round_ties_even();
    // 2^63 is exactly representable; anything at or above it overflows
    (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
        .then_some(rounded as i64)
}

fn to_bool(raw: &Scalar) -> Option<bool> {
    match raw {
        Scalar::Bool(v) => Some(*v),
        Scalar::Int(v) => Some(*v != 0),
        Scalar::Float(v) => Some(*v != 0.0),
        Scalar::Decimal(v) => Some(!v.is_zero()),
        Scalar::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        Scalar::DateTime(_) | Scalar::Uuid(_) | Scalar::Json(_) => None,
    }
}

fn to_i64(raw: &Scalar) -> Option<i64> {
    match raw {
        Scalar::Bool(v) => Some(i64::from(*v)),
        Scalar::Int(v) => Some(*v),
        Scalar::Float(v) => float_to_i64(*v),
        Scalar::Decimal(v) => v
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64(),
        Scalar::String(s) => s.trim().parse().ok(),
        Scalar::DateTime(_) | Scalar::Uuid(_) | Scalar::Json(_) => None,
    }
}

fn to_f64(raw: &Scalar) -> Option<f64> {
    match raw {
        Scalar::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
        Scalar::Int(v) => Some(*v as f64),
        Scalar::Float(v) => Some(*v),
        Scalar::Decimal(v) => v.to_f64(),
        Scalar::String(s) => s.trim().parse().ok(),
        Scalar::DateTime(_) | Scalar::Uuid(_) | Scalar::Json(_) => None,
    }
}

fn to_decimal(raw: &Scalar) -> Option<Decimal> {
    match raw {
        Scalar::Bool(v) => Some(Decimal::from(u8::from(*v))),
        Scalar::Int(v) => Some(Decimal::from(*v)),
        Scalar::Float(v) => Decimal::try_from(*v).ok(),
        Scalar::Decimal(v) => Some(*v),
        Scalar::String(s) => parse_decimal(s),
        Scalar::DateTime(_) | Scalar::Uuid(_) | Scalar::Json(_) => None,
    }
}

/// Plain or scientific decimal text
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Canonical text of a scalar
fn to_text(raw: &Scalar) -> String {
    match raw {
        Scalar::String(s) => s.clone(),
        Scalar::Bool(v) => v.to_string(),
        Scalar::Int(v) => v.to_string(),
        Scalar::Float(v) => v.to_string(),
        Scalar::Decimal(v) => v.to_string(),
        Scalar::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Scalar::Uuid(v) => v.to_string(),
        Scalar::Json(serde_json::Value::String(s)) => s.clone(),
        Scalar::Json(v) => v.to_string(),
    }
}

fn to_datetime(raw: &Scalar) -> Option<DateTime<Utc>> {
    match raw {
        Scalar::DateTime(v) => Some(*v),
        Scalar::String(s) => parse_datetime(s),
        _ => None,
    }
}

fn to_uuid(raw: &Scalar) -> Option<Uuid> {
    match raw {
        Scalar::Uuid(v) => Some(*v),
        Scalar::String(s) => Uuid::parse_str(s.trim()).ok(),
        _ => None,
    }
}

/// RFC 3339, or a bare date / date-time taken as UTC
pub(crate) fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    static SIZE: EnumType = EnumType::new("Size", &[("Small", 1), ("Large", 3)]);

    #[test]
    fn test_float_to_integer_rounds_half_to_even() {
        assert_eq!(
            convert(&Scalar::Float(2.5), &FieldType::Int32).unwrap(),
            Value::Int32(2)
        );
        assert_eq!(
            convert(&Scalar::Float(3.5), &FieldType::Int64).unwrap(),
            Value::Int64(4)
        );
        assert_eq!(
            convert(&Scalar::Decimal(Decimal::new(-25, 1)), &FieldType::Int32).unwrap(),
            Value::Int32(-2)
        );
    }

    #[test]
    fn test_integer_range_checks() {
        let err = convert(&Scalar::Int(i64::from(i32::MAX) + 1), &FieldType::Int32).unwrap_err();
        assert!(matches!(err, QueryMatrixError::ValueConversion { .. }));
        assert!(convert(&Scalar::Float(1e30), &FieldType::Int64).is_err());
        assert!(convert(&Scalar::Float(f64::NAN), &FieldType::Int64).is_err());
    }

    #[test]
    fn test_string_parsing_trims() {
        assert_eq!(
            convert(&Scalar::from(" 42 "), &FieldType::Int32).unwrap(),
            Value::Int32(42)
        );
        assert_eq!(
            convert(&Scalar::from("19.99"), &FieldType::Decimal).unwrap(),
            Value::Decimal(Decimal::new(1999, 2))
        );
        assert_eq!(
            convert(&Scalar::from("TRUE"), &FieldType::Bool).unwrap(),
            Value::Bool(true)
        );
        assert!(convert(&Scalar::from("12.5"), &FieldType::Int32).is_err());
    }

    #[test]
    fn test_numeric_bool_conversions() {
        assert_eq!(
            convert(&Scalar::Int(0), &FieldType::Bool).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            convert(&Scalar::Bool(true), &FieldType::Decimal).unwrap(),
            Value::Decimal(Decimal::ONE)
        );
    }

    #[test]
    fn test_anything_to_string() {
        assert_eq!(
            convert(&Scalar::Int(7), &FieldType::String).unwrap(),
            Value::from("7")
        );
        let uuid = Uuid::nil();
        assert_eq!(
            convert(&Scalar::Uuid(uuid), &FieldType::String).unwrap(),
            Value::String(uuid.to_string())
        );
    }

    #[test]
    fn test_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_datetime("2024-03-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01T12:30:00"), Some(expected));
        assert_eq!(
            parse_datetime("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_datetime("yesterday"), None);
    }

    #[test]
    fn test_enum_by_name_or_value() {
        let large = Value::Enum(SIZE.by_value(3).unwrap());
        assert_eq!(to_enum(&Scalar::from("large"), &SIZE).unwrap(), large);
        assert_eq!(to_enum(&Scalar::Int(3), &SIZE).unwrap(), large);
        assert_eq!(to_enum(&Scalar::from("3"), &SIZE).unwrap(), large);

        let undefined = to_enum(&Scalar::Int(2), &SIZE).unwrap_err();
        assert!(matches!(undefined, QueryMatrixError::ValueConversion { .. }));
        assert!(to_enum(&Scalar::Bool(true), &SIZE).is_err());
    }

    #[test]
    fn test_scalar_into_array_is_unsupported() {
        let err = convert(&Scalar::Int(1), &FieldType::Int32.array_of()).unwrap_err();
        assert_eq!(
            err,
            QueryMatrixError::UnsupportedValue {
                value_type: "int".to_string(),
                target: "array<int32>".to_string(),
            }
        );
    }
}
