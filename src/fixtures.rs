//! Sample records shared by tests

use crate::record::{EnumType, FieldType, Record, Schema, Value};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

pub static PRODUCT_STATUS: EnumType = EnumType::new(
    "ProductStatus",
    &[("Draft", 0), ("Active", 1), ("Discontinued", 2)],
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Draft = 0,
    Active = 1,
    Discontinued = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub inventory_quantity: i32,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub sku: Uuid,
    pub status: ProductStatus,
    pub tags: Vec<String>,
}

impl Product {
    /// Active product with stock and no discount
    pub fn sample(id: i32, name: &str, price: Decimal, category_id: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: None,
            price,
            discount_price: None,
            inventory_quantity: 10,
            category_id,
            created_at: date(2024, 1, 1),
            sku: Uuid::from_u128(id as u128),
            status: ProductStatus::Active,
            tags: Vec::new(),
        }
    }
}

impl Record for Product {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Product")
            .field("Id", FieldType::Int32, |p| p.id.into())
            .field("Name", FieldType::String, |p| p.name.clone().into())
            .nullable("Description", FieldType::String, |p| {
                p.description.clone().into()
            })
            .field("Price", FieldType::Decimal, |p| p.price.into())
            .nullable("DiscountPrice", FieldType::Decimal, |p| {
                p.discount_price.into()
            })
            .field("InventoryQuantity", FieldType::Int32, |p| {
                p.inventory_quantity.into()
            })
            .field("CategoryId", FieldType::Int32, |p| p.category_id.into())
            .field("CreatedAt", FieldType::DateTime, |p| p.created_at.into())
            .field("Sku", FieldType::Uuid, |p| p.sku.into())
            .field("Status", FieldType::Enum(&PRODUCT_STATUS), |p| {
                PRODUCT_STATUS.value(p.status as i64)
            })
            .field("Tags", FieldType::String.array_of(), |p| {
                Value::from(p.tags.clone())
            })
    }
}

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Laptop (1), T-Shirt (2) and Novel (3)
pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Laptop".to_string(),
            description: Some("High performance laptop".to_string()),
            price: Decimal::new(99999, 2),
            discount_price: Some(Decimal::new(89999, 2)),
            inventory_quantity: 50,
            category_id: 1,
            created_at: date(2024, 1, 15),
            sku: Uuid::from_u128(1),
            status: ProductStatus::Active,
            tags: vec!["electronics".to_string()],
        },
        Product {
            id: 2,
            name: "T-Shirt".to_string(),
            description: Some("Cotton t-shirt".to_string()),
            price: Decimal::new(1999, 2),
            discount_price: None,
            inventory_quantity: 200,
            category_id: 2,
            created_at: date(2024, 2, 10),
            sku: Uuid::from_u128(2),
            status: ProductStatus::Active,
            tags: vec!["clothing".to_string(), "cotton".to_string()],
        },
        Product {
            id: 3,
            name: "Novel".to_string(),
            description: None,
            price: Decimal::new(4999, 2),
            discount_price: None,
            inventory_quantity: 0,
            category_id: 3,
            created_at: date(2024, 3, 5),
            sku: Uuid::from_u128(3),
            status: ProductStatus::Discontinued,
            tags: Vec::new(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
    pub ship_date: Option<DateTime<Utc>>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub shipping_method: String,
    pub express: bool,
    pub weight_kg: f64,
}

impl Record for Order {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Order")
            .field("Id", FieldType::Int64, |o| o.id.into())
            .field("CustomerId", FieldType::Int64, |o| o.customer_id.into())
            .field("OrderDate", FieldType::DateTime, |o| o.order_date.into())
            .nullable("ShipDate", FieldType::DateTime, |o| o.ship_date.into())
            .field("TotalAmount", FieldType::Decimal, |o| o.total_amount.into())
            .field("PaidAmount", FieldType::Decimal, |o| o.paid_amount.into())
            .field("ShippingMethod", FieldType::String, |o| {
                o.shipping_method.clone().into()
            })
            .field("Express", FieldType::Bool, |o| o.express.into())
            .field("WeightKg", FieldType::Float64, |o| o.weight_kg.into())
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: 100,
            customer_id: 7,
            order_date: date(2024, 4, 1),
            ship_date: Some(date(2024, 4, 3)),
            total_amount: Decimal::new(12000, 2),
            paid_amount: Decimal::new(12000, 2),
            shipping_method: "Standard Ground".to_string(),
            express: false,
            weight_kg: 2.5,
        },
        Order {
            id: 101,
            customer_id: 8,
            order_date: date(2024, 4, 2),
            ship_date: None,
            total_amount: Decimal::new(4550, 2),
            paid_amount: Decimal::new(2000, 2),
            shipping_method: "Express Air".to_string(),
            express: true,
            weight_kg: 0.4,
        },
        Order {
            id: 102,
            customer_id: 7,
            order_date: date(2024, 4, 5),
            ship_date: Some(date(2024, 4, 5)),
            total_amount: Decimal::new(999, 2),
            paid_amount: Decimal::new(999, 2),
            shipping_method: "express ground".to_string(),
            express: true,
            weight_kg: 1.0,
        },
    ]
}
