// Database repository for orders and their line items

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::orders::error::OrderError;
use crate::orders::models::{LineItemInput, LineItemStatus, Order, OrderLineItem};

const ORDER_COLUMNS: &str = "id, first_name, last_name, email, street, city, state, zipcode, \
                             country, phone, payment_method, date";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, product_main_image, price, \
                            quantity, size, status";

/// Repository for order operations
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order and its line items atomically
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        fields: &[&str; 10],
        date: Option<DateTime<Utc>>,
        items: &[LineItemInput],
        shared_image: Option<&str>,
    ) -> Result<(Order, Vec<OrderLineItem>), OrderError> {
        let [first_name, last_name, email, street, city, state, zipcode, country, phone, payment_method] =
            *fields;

        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders
                (first_name, last_name, email, street, city, state, zipcode,
                 country, phone, payment_method, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, NOW()))
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(street)
        .bind(city)
        .bind(state)
        .bind(zipcode)
        .bind(country)
        .bind(phone)
        .bind(payment_method)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            // An image uploaded with the order is copied onto every line
            // item (documented limitation of the single-upload form)
            let image = shared_image
                .map(str::to_string)
                .or_else(|| item.product_main_image.clone());

            sqlx::query(
                r#"
                INSERT INTO order_items
                    (order_id, product_id, product_name, product_main_image,
                     price, quantity, size, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(image)
            .bind(item.price)
            .bind(item.quantity)
            .bind(&item.size)
            .bind(LineItemStatus::default())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let items = self.find_items(order.id).await?;
        Ok((order, items))
    }

    /// Fetch all orders
    pub async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Fetch one order by id
    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Fetch the line items of an order in insertion order
    pub async fn find_items(&self, order_id: Uuid) -> Result<Vec<OrderLineItem>, OrderError> {
        let items = sqlx::query_as::<_, OrderLineItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Set the status of every line item in an order
    pub async fn update_items_status(
        &self,
        order_id: Uuid,
        status: LineItemStatus,
    ) -> Result<(), OrderError> {
        sqlx::query("UPDATE order_items SET status = $1 WHERE order_id = $2")
            .bind(status)
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete an order (line items cascade); returns false when the id
    /// does not resolve
    pub async fn delete(&self, order_id: Uuid) -> Result<bool, OrderError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
