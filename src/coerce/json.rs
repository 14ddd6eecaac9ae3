//! Lossless extraction from wire values

use crate::coerce::scalar::{enum_from_text, parse_datetime, parse_decimal};
use crate::error::{QueryMatrixError, Result};
use crate::record::{FieldType, Value};
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value as Json;
use uuid::Uuid;

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "json bool",
        Json::Number(_) => "json number",
        Json::String(_) => "json string",
        Json::Array(_) => "json array",
        Json::Object(_) => "json object",
    }
}

/// Convert a decoded wire value to `target`
pub(crate) fn coerce_json(json: &Json, target: &FieldType) -> Result<Value> {
    match (json, target) {
        (Json::Null, _) => return Ok(Value::Null),
        (Json::Array(items), FieldType::Array(element)) => {
            return items
                .iter()
                .map(|item| coerce_json(item, element))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        (Json::Array(_) | Json::Object(_), _) | (_, FieldType::Array(_)) => {
            return Err(QueryMatrixError::unsupported_value(json_kind(json), target))
        }
        _ => {}
    }

    let converted = match target {
        FieldType::String => json.as_str().map(|s| Value::String(s.to_string())),
        FieldType::Bool => json.as_bool().map(Value::Bool),
        FieldType::Int32 => json_integer(json)
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int32),
        FieldType::Int64 => json_integer(json).map(Value::Int64),
        FieldType::Float64 => json.as_f64().map(Value::Float64),
        FieldType::Decimal => match json {
            Json::Number(n) => parse_decimal(&n.to_string()).map(Value::Decimal),
            _ => None,
        },
        FieldType::DateTime => json.as_str().and_then(parse_datetime).map(Value::DateTime),
        FieldType::Uuid => json
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(Value::Uuid),
        FieldType::Enum(ty) => {
            let member = match json {
                Json::String(s) => enum_from_text(ty, s),
                Json::Number(n) => n.as_i64().and_then(|v| ty.by_value(v)),
                _ => None,
            };
            member.map(Value::Enum)
        }
        FieldType::Array(_) => None,
    };

    converted.ok_or_else(|| QueryMatrixError::conversion(json, target))
}

/// Integral numbers, including `2.0` and `2e0`, which lose nothing
fn json_integer(json: &Json) -> Option<i64> {
    let Json::Number(n) = json else {
        return None;
    };
    n.as_i64().or_else(|| {
        parse_decimal(&n.to_string())
            .filter(|d| d.fract().is_zero())
            .and_then(|d| d.to_i64())
    })
}
