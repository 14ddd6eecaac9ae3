//! JSON wire format
//!
//! ```text
//! { "_and": [ { "Price": { "_gt": 20 } },
//!             { "DiscountPrice": { "_clt": ["Price"] } },
//!             { "_or": [ ... ] } ] }
//! ```
//!
//! An empty matrix is `{}`. Null checks encode as `{ "Field": { "_is_null": true } }`;
//! any other null-check payload is rejected, so "not null" is spelled
//! `{ "_not": [ { "Field": { "_is_null": true } } ] }`.
//! Both directions refuse trees deeper than `max_depth` (the root is depth 0).

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{QueryMatrixError, Result};
use crate::matrix::ast::{Condition, ConditionValue, QueryMatrix, Scalar};
use crate::operator::{resolve, LogicalOperator, Operator};
use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as Json};

/// Encode a matrix as a JSON value
pub fn to_json(matrix: &QueryMatrix, max_depth: usize) -> Result<Json> {
    encode_matrix(matrix, max_depth, 0)
}

/// Encode a matrix as indented JSON text
pub fn to_json_string(matrix: &QueryMatrix, max_depth: usize) -> Result<String> {
    let json = to_json(matrix, max_depth)?;
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Decode a matrix from a JSON value
pub fn from_json(json: &Json, max_depth: usize) -> Result<QueryMatrix> {
    decode_matrix(json, max_depth, 0)
}

/// Decode a matrix from JSON text
pub fn from_json_str(text: &str, max_depth: usize) -> Result<QueryMatrix> {
    if text.trim().is_empty() {
        return Err(QueryMatrixError::Serialization(
            "JSON text cannot be empty".to_string(),
        ));
    }
    let json: Json = serde_json::from_str(text)?;
    from_json(&json, max_depth)
}

fn encode_matrix(matrix: &QueryMatrix, max_depth: usize, depth: usize) -> Result<Json> {
    if depth >= max_depth {
        return Err(QueryMatrixError::DepthExceeded { max_depth });
    }

    let mut object = Map::new();
    if matrix.is_empty() {
        return Ok(Json::Object(object));
    }

    let mut elements =
        Vec::with_capacity(matrix.conditions().len() + matrix.nested_matrices().len());
    for condition in matrix.conditions() {
        elements.push(encode_condition(condition)?);
    }
    for nested in matrix.nested_matrices() {
        elements.push(encode_matrix(nested, max_depth, depth + 1)?);
    }

    object.insert(
        matrix.logical_operator().code().to_string(),
        Json::Array(elements),
    );
    Ok(Json::Object(object))
}

fn encode_condition(condition: &Condition) -> Result<Json> {
    let op = condition.operator();
    let payload = match condition.value() {
        ConditionValue::Column(other) => Json::Array(vec![Json::String(other.clone())]),
        _ if op.is_null() => Json::Bool(true),
        ConditionValue::Null => Json::Null,
        ConditionValue::Pattern(pattern) => Json::String(pattern.clone()),
        ConditionValue::Single(scalar) => encode_scalar(scalar)?,
        ConditionValue::Array(items) => Json::Array(
            items
                .iter()
                .map(encode_scalar)
                .collect::<Result<Vec<_>>>()?,
        ),
    };

    let mut test = Map::with_capacity(1);
    test.insert(op.code().to_string(), payload);
    let mut object = Map::with_capacity(1);
    object.insert(condition.field().to_string(), Json::Object(test));
    Ok(Json::Object(object))
}

fn encode_scalar(scalar: &Scalar) -> Result<Json> {
    Ok(match scalar {
        Scalar::Bool(v) => Json::Bool(*v),
        Scalar::Int(v) => Json::from(*v),
        Scalar::Float(v) => Number::from_f64(*v).map(Json::Number).ok_or_else(|| {
            QueryMatrixError::Serialization(format!("Cannot encode non-finite number {}", v))
        })?,
        // Decimal text goes through the JSON number grammar
        Scalar::Decimal(v) => Json::Number(serde_json::from_str::<Number>(&v.to_string())?),
        Scalar::String(v) => Json::String(v.clone()),
        Scalar::DateTime(v) => Json::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Scalar::Uuid(v) => Json::String(v.to_string()),
        Scalar::Json(v) => v.clone(),
    })
}

fn decode_matrix(json: &Json, max_depth: usize, depth: usize) -> Result<QueryMatrix> {
    if depth >= max_depth {
        return Err(QueryMatrixError::DepthExceeded { max_depth });
    }

    let object = json
        .as_object()
        .ok_or_else(|| malformed(format!("expected a matrix object, found {}", json)))?;
    let (code, children) = match single_entry(object) {
        Some(entry) => entry,
        None if object.is_empty() => return Ok(QueryMatrix::default()),
        None => {
            return Err(malformed(
                "a matrix object must have exactly one logical operator key",
            ))
        }
    };

    let logical_operator = LogicalOperator::resolve(code)?;
    let children = children.as_array().ok_or_else(|| {
        malformed(format!("operands of '{}' must be an array", code))
    })?;

    let mut conditions = Vec::new();
    let mut nested = Vec::new();
    for child in children {
        let element = child
            .as_object()
            .ok_or_else(|| malformed(format!("expected an object element, found {}", child)))?;
        if is_matrix_element(element) {
            nested.push(decode_matrix(child, max_depth, depth + 1)?);
        } else {
            conditions.push(decode_condition(element)?);
        }
    }

    Ok(QueryMatrix::new(logical_operator, conditions, nested))
}

fn decode_condition(element: &Map<String, Json>) -> Result<Condition> {
    let (field, test) = single_entry(element)
        .ok_or_else(|| malformed("a condition must name exactly one field"))?;
    let test = test
        .as_object()
        .ok_or_else(|| malformed(format!("condition on '{}' must be an object", field)))?;
    let (code, payload) = single_entry(test)
        .ok_or_else(|| malformed(format!("condition on '{}' must have exactly one operator", field)))?;

    let op = resolve(code)?;
    if op.is_column_operation() {
        return match payload.as_array().map(Vec::as_slice) {
            Some([Json::String(other)]) => Condition::column(field.as_str(), op, other.as_str()),
            _ => Err(malformed(format!(
                "operator '{}' expects a single-element array naming a field",
                code
            ))),
        };
    }
    if op.is_null() {
        return match payload {
            Json::Bool(true) => Condition::new(field.as_str(), op, ConditionValue::Null),
            _ => Err(malformed(format!(
                "operator '{}' on '{}' only accepts true, found {}",
                code, field, payload
            ))),
        };
    }

    Condition::new(field.as_str(), op, decode_value(op, payload)?)
}

fn decode_value(op: Operator, payload: &Json) -> Result<ConditionValue> {
    Ok(match payload {
        Json::Null => ConditionValue::Null,
        Json::Array(items) => {
            ConditionValue::Array(items.iter().cloned().map(Scalar::Json).collect())
        }
        Json::Object(_) => {
            return Err(malformed(format!(
                "operator '{}' cannot take an object value",
                op.code()
            )))
        }
        Json::String(pattern) if op.is_text() => ConditionValue::Pattern(pattern.clone()),
        scalar => ConditionValue::Single(Scalar::Json(scalar.clone())),
    })
}

/// `{}` or a single logical key marks a nested matrix
fn is_matrix_element(element: &Map<String, Json>) -> bool {
    element.is_empty()
        || single_entry(element)
            .is_some_and(|(key, _)| resolve(key).is_ok_and(Operator::is_logical))
}

fn single_entry(object: &Map<String, Json>) -> Option<(&String, &Json)> {
    if object.len() == 1 {
        object.iter().next()
    } else {
        None
    }
}

fn malformed(message: impl Into<String>) -> QueryMatrixError {
    QueryMatrixError::Serialization(message.into())
}

impl Serialize for QueryMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        to_json(self, DEFAULT_MAX_DEPTH)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for QueryMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        from_json(&json, DEFAULT_MAX_DEPTH).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{apply_slice, compile};
    use crate::fixtures::{products, Product};
    use crate::matrix::QueryMatrixBuilder;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn chain(levels: usize) -> QueryMatrix {
        let mut matrix = QueryMatrixBuilder::new()
            .add_condition("Price", Operator::GreaterThan, 1)
            .build()
            .unwrap();
        for _ in 1..levels {
            matrix = QueryMatrixBuilder::new()
                .add_nested_matrix(matrix)
                .build()
                .unwrap();
        }
        matrix
    }

    #[test]
    fn test_encode_shape() {
        let matrix = QueryMatrixBuilder::new()
            .add_condition("Price", Operator::GreaterThan, Decimal::new(2000, 2))
            .add_column_comparison("DiscountPrice", Operator::ColumnLessThan, "Price")
            .add_null_check("Description")
            .add_values("CategoryId", Operator::In, [1, 2])
            .add_nested_matrix(
                QueryMatrixBuilder::new()
                    .with_logical_operator(Operator::Or)
                    .add_pattern("Name", Operator::Like, "Lap")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        // Parsed from text so the decimal keeps its scale
        let expected: Json = serde_json::from_str(
            r#"{ "_and": [
                { "Price": { "_gt": 20.00 } },
                { "DiscountPrice": { "_clt": ["Price"] } },
                { "Description": { "_is_null": true } },
                { "CategoryId": { "_in": [1, 2] } },
                { "_or": [ { "Name": { "_like": "Lap" } } ] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(to_json(&matrix, DEFAULT_MAX_DEPTH).unwrap(), expected);
    }

    #[test]
    fn test_empty_matrix_is_empty_object() {
        let json = to_json(&QueryMatrix::default(), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(json, json!({}));
        assert_eq!(from_json(&json, DEFAULT_MAX_DEPTH).unwrap(), QueryMatrix::default());
    }

    #[test]
    fn test_decode_value_shapes() {
        let matrix = from_json_str(
            r#"{ "_or": [
                { "Name": { "_ilike": "lap" } },
                { "Name": { "_eq": "Laptop" } },
                { "CategoryId": { "_nin": [1, 2] } },
                { "DiscountPrice": { "_is_null": true } },
                { "DiscountPrice": { "_cgte": ["Price"] } },
                { "Description": { "_eq": null } }
            ] }"#,
            DEFAULT_MAX_DEPTH,
        )
        .unwrap();

        assert_eq!(matrix.logical_operator(), LogicalOperator::Or);
        let values: Vec<_> = matrix.conditions().iter().map(|c| c.value().clone()).collect();
        assert_eq!(
            values,
            vec![
                ConditionValue::Pattern("lap".to_string()),
                ConditionValue::Single(Scalar::Json(json!("Laptop"))),
                ConditionValue::Array(vec![Scalar::Json(json!(1)), Scalar::Json(json!(2))]),
                ConditionValue::Null,
                ConditionValue::Column("Price".to_string()),
                ConditionValue::Null,
            ]
        );
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let cases = [
            json!([]),
            json!({ "_and": [], "_or": [] }),
            json!({ "_and": { "Price": { "_gt": 1 } } }),
            json!({ "_and": [ { "Price": { "_gt": 1, "_lt": 5 } } ] }),
            json!({ "_and": [ { "Price": { "_ceq": "DiscountPrice" } } ] }),
            json!({ "_and": [ { "Price": { "_eq": { "a": 1 } } } ] }),
            json!({ "_and": [ 5 ] }),
        ];
        for case in cases {
            let err = from_json(&case, DEFAULT_MAX_DEPTH).unwrap_err();
            assert!(
                matches!(err, QueryMatrixError::Serialization(_)),
                "{} -> {:?}",
                case,
                err
            );
        }
    }

    #[test]
    fn test_high_precision_decimal_survives() {
        let price = Decimal::new(1_234_567_890_123_456_789, 2);
        let matrix = QueryMatrixBuilder::new()
            .add_condition("Price", Operator::Equal, price)
            .build()
            .unwrap();

        let text = to_json_string(&matrix, DEFAULT_MAX_DEPTH).unwrap();
        assert!(text.contains("12345678901234567.89"), "{}", text);

        let decoded = from_json_str(&text, DEFAULT_MAX_DEPTH).unwrap();
        let predicate = compile::<Product>(&decoded).unwrap();
        let mut product = Product::sample(1, "Vault", price, 1);
        assert!(predicate.evaluate(&product));
        product.price = Decimal::new(1_234_567_890_123_456_800, 2);
        assert!(!predicate.evaluate(&product));
    }

    #[test]
    fn test_integral_float_survives() {
        let matrix = QueryMatrixBuilder::new()
            .add_condition("CategoryId", Operator::Equal, 2.0)
            .build()
            .unwrap();
        let decoded = from_json(&to_json(&matrix, DEFAULT_MAX_DEPTH).unwrap(), DEFAULT_MAX_DEPTH)
            .unwrap();

        let ids = |m: &QueryMatrix| -> Vec<i32> {
            apply_slice(&products(), m)
                .unwrap()
                .into_iter()
                .map(|p| p.id)
                .collect()
        };
        assert_eq!(ids(&matrix), vec![2]);
        assert_eq!(ids(&decoded), vec![2]);
    }

    #[test]
    fn test_native_text_is_not_reparsed_after_the_wire() {
        // Native strings convert loosely; wire strings only match text fields
        let matrix = QueryMatrixBuilder::new()
            .add_condition("CategoryId", Operator::Equal, "2")
            .build()
            .unwrap();
        assert!(compile::<Product>(&matrix).is_ok());

        let decoded = from_json(&to_json(&matrix, DEFAULT_MAX_DEPTH).unwrap(), DEFAULT_MAX_DEPTH)
            .unwrap();
        assert!(matches!(
            compile::<Product>(&decoded),
            Err(QueryMatrixError::ValueConversion { .. })
        ));
    }

    #[test]
    fn test_null_check_payload_must_be_true() {
        let matrix = from_json(
            &json!({ "_and": [ { "DiscountPrice": { "_is_null": true } } ] }),
            DEFAULT_MAX_DEPTH,
        )
        .unwrap();
        assert_eq!(matrix.conditions()[0].operator(), Operator::IsNull);

        for payload in [json!(false), json!(null), json!("true"), json!(1), json!([])] {
            let err = from_json(
                &json!({ "_and": [ { "DiscountPrice": { "_is_null": payload.clone() } } ] }),
                DEFAULT_MAX_DEPTH,
            )
            .unwrap_err();
            assert!(
                matches!(err, QueryMatrixError::Serialization(_)),
                "{} -> {:?}",
                payload,
                err
            );
        }
    }

    #[test]
    fn test_decode_rejects_unknown_and_misplaced_operators() {
        let unknown = from_json(&json!({ "_xor": [] }), DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(unknown, QueryMatrixError::UnknownOperator("_xor".to_string()));

        let not_logical = from_json(&json!({ "_eq": [] }), DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(not_logical, QueryMatrixError::InvalidCondition(_)));

        let bad_field_op =
            from_json(&json!({ "_and": [ { "Price": { "_gtx": 1 } } ] }), DEFAULT_MAX_DEPTH)
                .unwrap_err();
        assert_eq!(bad_field_op, QueryMatrixError::UnknownOperator("_gtx".to_string()));
    }

    #[test]
    fn test_depth_limit_both_directions() {
        let at_limit = chain(DEFAULT_MAX_DEPTH);
        let json = to_json(&at_limit, DEFAULT_MAX_DEPTH).unwrap();
        assert!(from_json(&json, DEFAULT_MAX_DEPTH).is_ok());

        let too_deep = chain(DEFAULT_MAX_DEPTH + 1);
        assert_eq!(
            to_json(&too_deep, DEFAULT_MAX_DEPTH).unwrap_err(),
            QueryMatrixError::DepthExceeded {
                max_depth: DEFAULT_MAX_DEPTH
            }
        );

        let deeper_json = json!({ "_and": [json] });
        assert_eq!(
            from_json(&deeper_json, DEFAULT_MAX_DEPTH).unwrap_err(),
            QueryMatrixError::DepthExceeded {
                max_depth: DEFAULT_MAX_DEPTH
            }
        );
        assert!(from_json(&deeper_json, DEFAULT_MAX_DEPTH + 1).is_ok());
    }

    #[test]
    fn test_serde_impls_use_wire_format() {
        let matrix = QueryMatrixBuilder::new()
            .with_logical_operator(Operator::Not)
            .add_condition("CategoryId", Operator::Equal, 2)
            .build()
            .unwrap();

        let text = serde_json::to_string(&matrix).unwrap();
        assert_eq!(text, r#"{"_not":[{"CategoryId":{"_eq":2}}]}"#);

        let back: QueryMatrix = serde_json::from_str(&text).unwrap();
        assert_eq!(back.logical_operator(), LogicalOperator::Not);
        assert_eq!(back.conditions()[0].field(), "CategoryId");
    }

    #[test]
    fn test_blank_text_is_rejected() {
        assert!(matches!(
            from_json_str("  ", DEFAULT_MAX_DEPTH),
            Err(QueryMatrixError::Serialization(_))
        ));
        assert!(matches!(
            from_json_str("{ not json", DEFAULT_MAX_DEPTH),
            Err(QueryMatrixError::Serialization(_))
        ));
    }
}
