//! Explicit field registration for record types

use crate::record::value::{EnumType, Value};
use std::fmt;

/// Static type of a registered field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Int32,
    Int64,
    Float64,
    Decimal,
    String,
    DateTime,
    Uuid,
    Enum(&'static EnumType),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Array of this type
    pub fn array_of(self) -> FieldType {
        FieldType::Array(Box::new(self))
    }

    /// Types that support `<`, `>`, `<=` and `>=`
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            FieldType::Int32
                | FieldType::Int64
                | FieldType::Float64
                | FieldType::Decimal
                | FieldType::DateTime
                | FieldType::Enum(_)
        )
    }

    /// Scalar types exposed to filter UIs
    pub fn is_filterable(&self) -> bool {
        !matches!(self, FieldType::Array(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bool => f.write_str("bool"),
            FieldType::Int32 => f.write_str("int32"),
            FieldType::Int64 => f.write_str("int64"),
            FieldType::Float64 => f.write_str("float64"),
            FieldType::Decimal => f.write_str("decimal"),
            FieldType::String => f.write_str("string"),
            FieldType::DateTime => f.write_str("datetime"),
            FieldType::Uuid => f.write_str("uuid"),
            FieldType::Enum(ty) => write!(f, "enum {}", ty.name()),
            FieldType::Array(inner) => write!(f, "array<{}>", inner),
        }
    }
}

/// Name, type and nullability of a field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub nullable: bool,
}

/// Typed reader for one field of `R`
pub struct FieldAccessor<R> {
    descriptor: FieldDescriptor,
    getter: fn(&R) -> Value,
}

impl<R> FieldAccessor<R> {
    pub fn new(descriptor: FieldDescriptor, getter: fn(&R) -> Value) -> Self {
        Self { descriptor, getter }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    #[inline]
    pub fn field_type(&self) -> &FieldType {
        &self.descriptor.field_type
    }

    #[inline]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Read the field off a record
    #[inline]
    pub fn read(&self, record: &R) -> Value {
        (self.getter)(record)
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.descriptor.name)
            .field("field_type", &self.descriptor.field_type)
            .field("nullable", &self.descriptor.nullable)
            .finish()
    }
}

/// Ordered field registry for a record type
pub struct Schema<R> {
    record: &'static str,
    fields: Vec<FieldAccessor<R>>,
}

impl<R> Schema<R> {
    pub fn new(record: &'static str) -> Self {
        Self {
            record,
            fields: Vec::new(),
        }
    }

    /// Register a non-nullable field
    pub fn field(self, name: &'static str, field_type: FieldType, getter: fn(&R) -> Value) -> Self {
        self.push(name, field_type, false, getter)
    }

    /// Register a field whose getter may yield [`Value::Null`]
    pub fn nullable(
        self,
        name: &'static str,
        field_type: FieldType,
        getter: fn(&R) -> Value,
    ) -> Self {
        self.push(name, field_type, true, getter)
    }

    fn push(
        mut self,
        name: &'static str,
        field_type: FieldType,
        nullable: bool,
        getter: fn(&R) -> Value,
    ) -> Self {
        self.fields.push(FieldAccessor::new(
            FieldDescriptor {
                name,
                field_type,
                nullable,
            },
            getter,
        ));
        self
    }

    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn into_fields(self) -> Vec<FieldAccessor<R>> {
        self.fields
    }
}

/// A record type whose fields can be filtered by name
///
/// Name the schema's record type up front so the getter closures infer
/// their argument:
///
/// ```
/// use query_matrix::{FieldType, Record, Schema};
///
/// struct Point {
///     x: i32,
///     label: Option<String>,
/// }
///
/// impl Record for Point {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::new("Point")
///             .field("X", FieldType::Int32, |p| p.x.into())
///             .nullable("Label", FieldType::String, |p| p.label.clone().into())
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    /// Field registry; called once per type and cached
    fn schema() -> Schema<Self>;
}
