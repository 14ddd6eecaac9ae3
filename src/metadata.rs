//! Field and operator metadata for filter UIs

use crate::operator::{Operator, OperatorKind};
use crate::record::{field_map, FieldDescriptor, FieldType, Record};

/// Scalar fields of `R`, in registration order
pub fn filterable_fields<R: Record>() -> Vec<FieldDescriptor> {
    field_map::<R>()
        .fields()
        .iter()
        .filter(|accessor| accessor.field_type().is_filterable())
        .map(|accessor| accessor.descriptor().clone())
        .collect()
}

/// Operators that make sense for `field`, in catalog order
pub fn valid_operators(field: &FieldDescriptor) -> Vec<Operator> {
    Operator::ALL
        .into_iter()
        .filter(|op| is_valid_for(*op, &field.field_type))
        .collect()
}

fn is_valid_for(op: Operator, field_type: &FieldType) -> bool {
    match op.kind() {
        OperatorKind::Null | OperatorKind::ColumnComparison | OperatorKind::Logical => true,
        OperatorKind::Text => *field_type == FieldType::String,
        OperatorKind::Comparison if op.is_ordering() => field_type.is_ordered(),
        OperatorKind::Comparison => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Order, Product};

    fn field<R: Record>(name: &str) -> FieldDescriptor {
        filterable_fields::<R>()
            .into_iter()
            .find(|f| f.name == name)
            .unwrap()
    }

    #[test]
    fn test_filterable_fields_skip_arrays() {
        let names: Vec<_> = filterable_fields::<Product>()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            [
                "Id",
                "Name",
                "Description",
                "Price",
                "DiscountPrice",
                "InventoryQuantity",
                "CategoryId",
                "CreatedAt",
                "Sku",
                "Status",
            ]
        );
        assert!(field::<Product>("DiscountPrice").nullable);
    }

    #[test]
    fn test_string_fields_get_text_but_no_ordering() {
        let ops = valid_operators(&field::<Product>("Name"));
        assert!(ops.contains(&Operator::Like));
        assert!(ops.contains(&Operator::Regex));
        assert!(ops.contains(&Operator::Equal));
        assert!(!ops.contains(&Operator::GreaterThan));
    }

    #[test]
    fn test_ordered_fields_get_ordering_but_no_text() {
        for (ops, label) in [
            (valid_operators(&field::<Product>("Price")), "decimal"),
            (valid_operators(&field::<Product>("Status")), "enum"),
            (valid_operators(&field::<Order>("OrderDate")), "datetime"),
        ] {
            assert!(ops.contains(&Operator::LessThanOrEqual), "{}", label);
            assert!(!ops.contains(&Operator::ILike), "{}", label);
        }
    }

    #[test]
    fn test_unordered_non_text_fields() {
        let ops = valid_operators(&field::<Order>("Express"));
        assert_eq!(
            ops.iter().filter(|op| op.kind() == OperatorKind::Comparison).count(),
            4
        );
        assert!(ops.contains(&Operator::IsNull));
        assert!(ops.contains(&Operator::ColumnEqual));
        assert!(ops.contains(&Operator::Not));
        // Catalog order is kept
        assert_eq!(ops.first(), Some(&Operator::Equal));
        assert_eq!(ops.last(), Some(&Operator::Not));
    }
}
