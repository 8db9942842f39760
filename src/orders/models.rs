// Order models and DTOs
//
// Line items snapshot the product name, image, price and size at order
// time; they never track the live product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Per-line-item fulfilment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum LineItemStatus {
    Pending,
    Processed,
    Shipped,
    Delivered,
    Cancelled,
}

impl LineItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemStatus::Pending => "Pending",
            LineItemStatus::Processed => "Processed",
            LineItemStatus::Shipped => "Shipped",
            LineItemStatus::Delivered => "Delivered",
            LineItemStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "Pending" => Ok(LineItemStatus::Pending),
            "Processed" => Ok(LineItemStatus::Processed),
            "Shipped" => Ok(LineItemStatus::Shipped),
            "Delivered" => Ok(LineItemStatus::Delivered),
            "Cancelled" => Ok(LineItemStatus::Cancelled),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl Default for LineItemStatus {
    fn default() -> Self {
        LineItemStatus::Pending
    }
}

impl std::fmt::Display for LineItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order header stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub phone: String,
    pub payment_method: String,
    pub date: DateTime<Utc>,
}

/// One line item within an order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: i32,
    pub order_id: Uuid,
    pub product_id: Option<i32>,
    pub product_name: Option<String>,
    pub product_main_image: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub size: Option<String>,
    pub status: LineItemStatus,
}

/// Line item as supplied by the client at order time
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(alias = "product")]
    pub product_id: Option<i32>,
    pub product_name: Option<String>,
    pub product_main_image: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub size: Option<String>,
}

/// Order creation request
///
/// Every contact/shipping field and the payment method must be present
/// and non-empty;
/// validation fails the request before anything is persisted. The
/// line-items field is kept as a raw JSON value so a non-array shape
/// can be rejected explicitly.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(required(message = "firstName is required"), length(min = 1, message = "firstName is required"))]
    pub first_name: Option<String>,
    #[validate(required(message = "lastName is required"), length(min = 1, message = "lastName is required"))]
    pub last_name: Option<String>,
    #[validate(required(message = "email is required"), length(min = 1, message = "email is required"))]
    pub email: Option<String>,
    #[validate(required(message = "street is required"), length(min = 1, message = "street is required"))]
    pub street: Option<String>,
    #[validate(required(message = "city is required"), length(min = 1, message = "city is required"))]
    pub city: Option<String>,
    #[validate(required(message = "state is required"), length(min = 1, message = "state is required"))]
    pub state: Option<String>,
    #[validate(required(message = "zipcode is required"), length(min = 1, message = "zipcode is required"))]
    pub zipcode: Option<String>,
    #[validate(required(message = "country is required"), length(min = 1, message = "country is required"))]
    pub country: Option<String>,
    #[validate(required(message = "phone is required"), length(min = 1, message = "phone is required"))]
    pub phone: Option<String>,
    #[validate(required(message = "paymentMethod is required"), length(min = 1, message = "paymentMethod is required"))]
    pub payment_method: Option<String>,
    #[validate(required(message = "products is required"))]
    pub products: Option<serde_json::Value>,
    pub date: Option<DateTime<Utc>>,
}

/// Order with its line items, as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub phone: String,
    pub payment_method: String,
    pub date: DateTime<Utc>,
    pub products: Vec<OrderLineItem>,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderLineItem>) -> Self {
        Self {
            id: order.id,
            first_name: order.first_name,
            last_name: order.last_name,
            email: order.email,
            street: order.street,
            city: order.city,
            state: order.state,
            zipcode: order.zipcode,
            country: order.country,
            phone: order.phone,
            payment_method: order.payment_method,
            date: order.date,
            products: items,
        }
    }
}

/// Status update request for PUT /api/orders/:id
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            LineItemStatus::Pending,
            LineItemStatus::Processed,
            LineItemStatus::Shipped,
            LineItemStatus::Delivered,
            LineItemStatus::Cancelled,
        ] {
            assert_eq!(LineItemStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(LineItemStatus::parse("Enroute").is_err());
        assert!(LineItemStatus::parse("pending").is_err());
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(LineItemStatus::default(), LineItemStatus::Pending);
    }

    #[test]
    fn missing_required_field_fails_validation() {
        use validator::Validate;

        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com",
                "street":"1 Analytical Way","city":"London","state":"LDN",
                "zipcode":"E1","country":"UK","phone":"555",
                "products":[]}"#,
        )
        .unwrap();
        // paymentMethod omitted
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("payment_method"));
    }

    #[test]
    fn blank_required_field_fails_validation() {
        use validator::Validate;

        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"firstName":"","lastName":"Lovelace","email":"ada@example.com",
                "street":"1 Analytical Way","city":"London","state":"LDN",
                "zipcode":"E1","country":"UK","phone":"555",
                "paymentMethod":"cod","products":[]}"#,
        )
        .unwrap();
        // firstName present but empty
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn complete_request_validates() {
        use validator::Validate;

        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com",
                "street":"1 Analytical Way","city":"London","state":"LDN",
                "zipcode":"E1","country":"UK","phone":"555",
                "paymentMethod":"cod","products":[{"productName":"Hoodie","quantity":1}]}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn line_item_accepts_product_alias() {
        let item: LineItemInput =
            serde_json::from_str(r#"{"product": 3, "quantity": 2, "size": "M"}"#).unwrap();
        assert_eq!(item.product_id, Some(3));
        assert_eq!(item.quantity, Some(2));
    }
}
