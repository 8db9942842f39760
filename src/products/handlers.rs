// HTTP handlers for product catalog endpoints

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::auth::AuthenticatedIdentity;
use crate::error::ApiError;
use crate::products::models::{parse_sizes, CreateProduct, Product, UpdateProductFields};
use crate::uploads::{UploadError, UploadStore};
use crate::AppState;

/// Cap on thumbnail images per product
const MAX_THUMBNAILS: usize = 4;

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidFileType(_) | UploadError::TooLarge => {
                ApiError::BadRequest(err.to_string())
            }
            UploadError::Io(io_err) => ApiError::InternalError(io_err.to_string()),
        }
    }
}

/// Text and image fields collected from a multipart product body
#[derive(Debug, Default)]
struct MultipartProduct {
    fields: UpdateProductFields,
    main_image: Option<String>,
    thumbnails: Vec<String>,
}

/// Drain a multipart body, storing image parts on disk and gathering
/// text parts. Shared by the create-with-images and update paths.
async fn read_product_multipart(
    uploads: &UploadStore,
    mut multipart: Multipart,
) -> Result<MultipartProduct, ApiError> {
    let mut out = MultipartProduct::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "mainImage" => {
                if out.main_image.is_some() {
                    return Err(ApiError::BadRequest(
                        "Only one main image is allowed".to_string(),
                    ));
                }
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                out.main_image =
                    Some(uploads.save(&file_name, content_type.as_deref(), &bytes).await?);
            }
            "thumbnails" => {
                if out.thumbnails.len() >= MAX_THUMBNAILS {
                    return Err(ApiError::BadRequest(format!(
                        "At most {} thumbnails are allowed",
                        MAX_THUMBNAILS
                    )));
                }
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                out.thumbnails
                    .push(uploads.save(&file_name, content_type.as_deref(), &bytes).await?);
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Malformed field: {}", e)))?;
                match name.as_str() {
                    "name" => out.fields.name = Some(value),
                    "description" => out.fields.description = Some(value),
                    "price" => {
                        let price: Decimal = value.parse().map_err(|_| {
                            ApiError::BadRequest("price must be a number".to_string())
                        })?;
                        out.fields.price = Some(price);
                    }
                    "category" => out.fields.category = Some(value),
                    "subCategory" => out.fields.sub_category = Some(value),
                    "sizes" => out.fields.sizes = Some(parse_sizes(&value)),
                    "status" => out.fields.status = Some(value),
                    "bestseller" => {
                        out.fields.bestseller = Some(value.parse().map_err(|_| {
                            ApiError::BadRequest("bestseller must be a boolean".to_string())
                        })?);
                    }
                    // Unknown parts are ignored, matching the permissive
                    // form handling of the storefront clients
                    _ => {}
                }
            }
        }
    }

    Ok(out)
}

fn require_field<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {}", name)))
}

/// Handler for POST /api/products
/// Creates a product from a plain JSON body, without images
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Invalid input data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    tracing::debug!("Creating new product: {}", payload.name);

    payload.validate()?;

    let sizes = payload.sizes.normalize();
    let product = state
        .products
        .insert(
            &payload.name,
            &payload.description,
            payload.price,
            &payload.category,
            &payload.sub_category,
            &sizes,
            None,
            &[],
            payload.status.as_deref(),
            payload.bestseller,
        )
        .await?;

    tracing::info!("Successfully created product with id: {}", product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for POST /api/products/add
/// Creates a product from a multipart body carrying up to one main
/// image and up to four thumbnails; requires a bearer token
pub async fn add_product(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    tracing::debug!("Adding product with images, subject_id={}", identity.subject_id);

    let parsed = read_product_multipart(&state.uploads, multipart).await?;

    let name = require_field(parsed.fields.name, "name")?;
    let description = require_field(parsed.fields.description, "description")?;
    let price = require_field(parsed.fields.price, "price")?;
    let category = require_field(parsed.fields.category, "category")?;
    let sub_category = require_field(parsed.fields.sub_category, "subCategory")?;
    let sizes = require_field(parsed.fields.sizes, "sizes")?;

    let product = state
        .products
        .insert(
            &name,
            &description,
            price,
            &category,
            &sub_category,
            &sizes,
            parsed.main_image.as_deref(),
            &parsed.thumbnails,
            parsed.fields.status.as_deref(),
            parsed.fields.bestseller,
        )
        .await?;

    tracing::info!("Successfully added product with id: {}", product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List of all products", body = Vec<Product>),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.find_all().await?;
    tracing::debug!("Retrieved {} products", products.len());
    Ok(Json(products))
}

/// Handler for GET /api/products/:id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(product))
}

/// Handler for PUT /api/products/:id
/// Applies a partial multipart update; only supplied fields overwrite,
/// and the size list is re-normalized from its string form
pub async fn update_product(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<Product>, ApiError> {
    tracing::debug!(
        "Updating product {}, subject_id={}",
        id,
        identity.subject_id
    );

    let parsed = read_product_multipart(&state.uploads, multipart).await?;
    let thumbnails = if parsed.thumbnails.is_empty() {
        None
    } else {
        Some(parsed.thumbnails)
    };

    let product = state
        .products
        .update(id, parsed.fields, parsed.main_image, thumbnails)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        })?;

    tracing::info!("Successfully updated product with id: {}", id);
    Ok(Json(product))
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.products.delete(id).await? {
        return Err(ApiError::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("Successfully deleted product with id: {}", id);
    Ok(Json(
        serde_json::json!({ "message": "Product deleted successfully" }),
    ))
}
