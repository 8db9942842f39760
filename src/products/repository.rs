// Database repository for catalog products

use sqlx::PgPool;

use crate::error::ApiError;
use crate::products::models::{Product, UpdateProductFields, DEFAULT_STATUS};

const PRODUCT_COLUMNS: &str = "id, name, description, price, category, sub_category, sizes, \
                               main_image, thumbnails, status, bestseller, created_at, updated_at";

/// Repository for product CRUD operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product and return the stored record
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        name: &str,
        description: &str,
        price: rust_decimal::Decimal,
        category: &str,
        sub_category: &str,
        sizes: &[String],
        main_image: Option<&str>,
        thumbnails: &[String],
        status: Option<&str>,
        bestseller: Option<bool>,
    ) -> Result<Product, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products
                (name, description, price, category, sub_category, sizes,
                 main_image, thumbnails, status, bestseller)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(sub_category)
        .bind(sizes)
        .bind(main_image)
        .bind(thumbnails)
        .bind(status.unwrap_or(DEFAULT_STATUS))
        .bind(bestseller.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Fetch all products
    pub async fn find_all(&self) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Fetch a product by id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a partial update inside a transaction, keeping existing
    /// values for omitted fields. Returns None when the id does not
    /// resolve.
    pub async fn update(
        &self,
        id: i32,
        fields: UpdateProductFields,
        main_image: Option<String>,
        thumbnails: Option<Vec<String>>,
    ) -> Result<Option<Product>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let updated = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $1,
                description = $2,
                price = $3,
                category = $4,
                sub_category = $5,
                sizes = $6,
                main_image = $7,
                thumbnails = $8,
                status = $9,
                bestseller = $10,
                updated_at = NOW()
            WHERE id = $11
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(fields.name.unwrap_or(existing.name))
        .bind(fields.description.unwrap_or(existing.description))
        .bind(fields.price.unwrap_or(existing.price))
        .bind(fields.category.unwrap_or(existing.category))
        .bind(fields.sub_category.unwrap_or(existing.sub_category))
        .bind(fields.sizes.unwrap_or(existing.sizes))
        .bind(main_image.or(existing.main_image))
        .bind(thumbnails.unwrap_or(existing.thumbnails))
        .bind(fields.status.unwrap_or(existing.status))
        .bind(fields.bestseller.unwrap_or(existing.bestseller))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    /// Delete a product by id; returns false when the id does not resolve
    pub async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
