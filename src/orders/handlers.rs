// HTTP handlers for order endpoints

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::orders::{
    error::OrderError,
    models::{CreateOrderRequest, LineItemInput, LineItemStatus, OrderResponse, UpdateStatusRequest},
};
use crate::AppState;

/// Handler for POST /api/orders
///
/// Accepts either a JSON body or a multipart form with the same fields
/// plus an optional mainImage file. Validation runs before anything is
/// persisted, so a rejected order leaves no record behind.
pub async fn place_order(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<OrderResponse>), OrderError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (payload, uploaded_image) = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| OrderError::ValidationError(format!("Malformed multipart body: {}", e)))?;
        read_order_multipart(&state, multipart).await?
    } else {
        let Json(payload) = Json::<CreateOrderRequest>::from_request(request, &state)
            .await
            .map_err(|e| OrderError::ValidationError(format!("Invalid request body: {}", e)))?;
        (payload, None)
    };

    payload
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    // The line-items field must be array-shaped before it is decoded
    let products = payload.products.as_ref().ok_or(OrderError::ItemsNotASequence)?;
    if !products.is_array() {
        return Err(OrderError::ItemsNotASequence);
    }
    let items: Vec<LineItemInput> = serde_json::from_value(products.clone())
        .map_err(|e| OrderError::ValidationError(format!("Invalid line item: {}", e)))?;

    // validate() already guaranteed these are present
    let fields = [
        payload.first_name.as_deref().unwrap_or_default(),
        payload.last_name.as_deref().unwrap_or_default(),
        payload.email.as_deref().unwrap_or_default(),
        payload.street.as_deref().unwrap_or_default(),
        payload.city.as_deref().unwrap_or_default(),
        payload.state.as_deref().unwrap_or_default(),
        payload.zipcode.as_deref().unwrap_or_default(),
        payload.country.as_deref().unwrap_or_default(),
        payload.phone.as_deref().unwrap_or_default(),
        payload.payment_method.as_deref().unwrap_or_default(),
    ];

    let (order, stored_items) = state
        .orders
        .create(&fields, payload.date, &items, uploaded_image.as_deref())
        .await?;

    tracing::info!("Order {} placed with {} items", order.id, stored_items.len());
    Ok((
        StatusCode::CREATED,
        Json(OrderResponse::from_parts(order, stored_items)),
    ))
}

/// Collect order fields from a multipart form. The products field is a
/// JSON-encoded array; an attached mainImage is stored and its path is
/// later copied onto every line item.
async fn read_order_multipart(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(CreateOrderRequest, Option<String>), OrderError> {
    let mut payload = CreateOrderRequest::default();
    let mut uploaded_image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| OrderError::ValidationError(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "mainImage" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| OrderError::ValidationError(format!("Failed to read upload: {}", e)))?;
            uploaded_image =
                Some(state.uploads.save(&file_name, content_type.as_deref(), &bytes).await?);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| OrderError::ValidationError(format!("Malformed field: {}", e)))?;

        match name.as_str() {
            "firstName" => payload.first_name = Some(value),
            "lastName" => payload.last_name = Some(value),
            "email" => payload.email = Some(value),
            "street" => payload.street = Some(value),
            "city" => payload.city = Some(value),
            "state" => payload.state = Some(value),
            "zipcode" => payload.zipcode = Some(value),
            "country" => payload.country = Some(value),
            "phone" => payload.phone = Some(value),
            "paymentMethod" => payload.payment_method = Some(value),
            "products" => {
                // Unparseable JSON cannot be a sequence
                payload.products =
                    Some(serde_json::from_str(&value).unwrap_or(serde_json::Value::Null));
            }
            "date" => {
                payload.date = value.parse::<DateTime<Utc>>().ok();
            }
            _ => {}
        }
    }

    Ok((payload, uploaded_image))
}

/// Handler for GET /api/orders
pub async fn get_all_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, OrderError> {
    let orders = state.orders.find_all().await?;

    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let items = state.orders.find_items(order.id).await?;
        responses.push(OrderResponse::from_parts(order, items));
    }

    Ok(Json(responses))
}

/// Handler for GET /api/orders/:id
pub async fn get_order_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, OrderError> {
    let order = state
        .orders
        .find_by_id(order_id)
        .await?
        .ok_or(OrderError::NotFound)?;
    let items = state.orders.find_items(order.id).await?;

    Ok(Json(OrderResponse::from_parts(order, items)))
}

/// Handler for PUT /api/orders/:id
/// Sets the supplied status on every line item of the order
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, OrderError> {
    let status = LineItemStatus::parse(&request.status)
        .map_err(OrderError::InvalidStatus)?;

    let order = state
        .orders
        .find_by_id(order_id)
        .await?
        .ok_or(OrderError::NotFound)?;

    state.orders.update_items_status(order.id, status).await?;
    let items = state.orders.find_items(order.id).await?;

    tracing::info!("Order {} items set to {}", order.id, status);
    Ok(Json(OrderResponse::from_parts(order, items)))
}

/// Handler for DELETE /api/orders/:orderId
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, OrderError> {
    if !state.orders.delete(order_id).await? {
        return Err(OrderError::NotFound);
    }

    tracing::info!("Order {} deleted", order_id);
    Ok(Json(
        serde_json::json!({ "message": "Order deleted successfully" }),
    ))
}
