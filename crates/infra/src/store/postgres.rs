//! Postgres-backed stock store.
//!
//! One table, `stock_records`. The (color, cotton_part) index is
//! non-unique: edits may create duplicate keys, and key lookups then return the
//! oldest row (UUIDv7 ids are time-ordered).

use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::Span;

use sockwarehouse_core::StockId;
use sockwarehouse_inventory::StockRecord;

use super::{StockStore, StoreError};

const SCHEMA: &str = include_str!("../../migrations/0001_stock_records.sql");

pub struct PostgresStockStore {
    pool: Arc<PgPool>,
}

impl PostgresStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Connect and make sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create `stock_records` and its index if missing. Idempotent.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    async fn fetch_many(&self, operation: &'static str, sql: &'static str, color: &str, cotton_part: i32) -> Result<Vec<StockRecord>, StoreError> {
        Span::current().record("operation", operation);

        let rows = sqlx::query(sql)
            .bind(color)
            .bind(cotton_part)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    tracing::error!(operation, error = %err, "stock store query failed");
    StoreError::Backend(format!("{operation}: {err}"))
}

fn row_to_record(row: &PgRow) -> Result<StockRecord, StoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::Corrupt(format!("id: {e}")))?;
    let color: String = row
        .try_get("color")
        .map_err(|e| StoreError::Corrupt(format!("color: {e}")))?;
    let cotton_part: i32 = row
        .try_get("cotton_part")
        .map_err(|e| StoreError::Corrupt(format!("cotton_part: {e}")))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| StoreError::Corrupt(format!("quantity: {e}")))?;
    let quantity = u32::try_from(quantity)
        .map_err(|_| StoreError::Corrupt(format!("quantity out of range: {quantity}")))?;

    Ok(StockRecord {
        id: Some(StockId::from_uuid(id)),
        color,
        cotton_part,
        quantity,
    })
}

#[async_trait::async_trait]
impl StockStore for PostgresStockStore {
    async fn find_by_key(&self, color: &str, cotton_part: i32) -> Result<Option<StockRecord>, StoreError> {
        Span::current().record("operation", "find_stock_by_key");

        let row = sqlx::query(
            r#"
            SELECT id, color, cotton_part, quantity
            FROM stock_records
            WHERE color = $1 AND cotton_part = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(color)
        .bind(cotton_part)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_stock_by_key", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_by_color_and_cotton_above(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError> {
        self.fetch_many(
            "find_stock_above",
            r#"
            SELECT id, color, cotton_part, quantity
            FROM stock_records
            WHERE color = $1 AND cotton_part > $2
            "#,
            color,
            cotton_part,
        )
        .await
    }

    async fn find_by_color_and_cotton_below(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError> {
        self.fetch_many(
            "find_stock_below",
            r#"
            SELECT id, color, cotton_part, quantity
            FROM stock_records
            WHERE color = $1 AND cotton_part < $2
            "#,
            color,
            cotton_part,
        )
        .await
    }

    async fn find_by_id(&self, id: StockId) -> Result<Option<StockRecord>, StoreError> {
        Span::current().record("operation", "find_stock_by_id");

        let row = sqlx::query(
            r#"
            SELECT id, color, cotton_part, quantity
            FROM stock_records
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_stock_by_id", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn save(&self, mut record: StockRecord) -> Result<StockRecord, StoreError> {
        match record.id {
            None => {
                Span::current().record("operation", "insert_stock");
                let id = StockId::new();

                sqlx::query(
                    r#"
                    INSERT INTO stock_records (id, color, cotton_part, quantity)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(id.as_uuid())
                .bind(&record.color)
                .bind(record.cotton_part)
                .bind(i64::from(record.quantity))
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("insert_stock", e))?;

                record.id = Some(id);
            }
            Some(id) => {
                Span::current().record("operation", "update_stock");

                let result = sqlx::query(
                    r#"
                    UPDATE stock_records
                    SET color = $2,
                        cotton_part = $3,
                        quantity = $4,
                        updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(id.as_uuid())
                .bind(&record.color)
                .bind(record.cotton_part)
                .bind(i64::from(record.quantity))
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("update_stock", e))?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::MissingRecord(id));
                }
            }
        }
        Ok(record)
    }
}
