//! Storage seam for the sales table.
//!
//! `SalesStore` is the read-only interface the query service depends on;
//! `DuckDbStore` is the embedded implementation. DuckDB work is blocking,
//! so every call checks out a pooled connection, runs on the blocking
//! thread pool, and returns the connection afterwards. A semaphore bounds
//! how many statements run at once.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use duckdb::types::Value;
use duckdb::{params_from_iter, Row};
use tokio::sync::{Mutex, Semaphore, SemaphorePermit};

use crate::error::{Result, SalesboardError};
use crate::model::{SalesRecord, StatsRow};

/// Read-only access to the sales table.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Execute a row-selection statement and map every result row.
    async fn fetch_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<SalesRecord>>;

    /// Execute a single-row aggregate statement.
    async fn fetch_stats(&self, sql: &str, params: Vec<Value>) -> Result<StatsRow>;

    /// Return every non-null, non-empty raw `tags` column value.
    async fn scan_tag_column(&self) -> Result<Vec<String>>;
}

const SCHEMA_SQL: &str = "
CREATE SEQUENCE IF NOT EXISTS sales_id_seq;
CREATE TABLE IF NOT EXISTS sales (
    id BIGINT PRIMARY KEY DEFAULT nextval('sales_id_seq'),
    transaction_id VARCHAR,
    date VARCHAR,
    customer_id VARCHAR,
    customer_name VARCHAR,
    phone_number VARCHAR,
    gender VARCHAR,
    age BIGINT,
    customer_region VARCHAR,
    customer_type VARCHAR,
    product_id VARCHAR,
    product_name VARCHAR,
    brand VARCHAR,
    product_category VARCHAR,
    tags VARCHAR,
    quantity BIGINT,
    price_per_unit DOUBLE,
    discount_percentage DOUBLE,
    total_amount DOUBLE,
    final_amount DOUBLE,
    payment_method VARCHAR,
    order_status VARCHAR,
    delivery_type VARCHAR,
    store_id VARCHAR,
    store_location VARCHAR,
    salesperson_id VARCHAR,
    employee_name VARCHAR
);
CREATE INDEX IF NOT EXISTS idx_sales_date ON sales(date);
CREATE INDEX IF NOT EXISTS idx_sales_customer_region ON sales(customer_region);
CREATE INDEX IF NOT EXISTS idx_sales_product_category ON sales(product_category);
CREATE INDEX IF NOT EXISTS idx_sales_customer_name ON sales(customer_name);
CREATE INDEX IF NOT EXISTS idx_sales_phone_number ON sales(phone_number);
CREATE INDEX IF NOT EXISTS idx_sales_payment_method ON sales(payment_method);
";

/// Embedded DuckDB store backing the dashboard.
#[derive(Clone)]
pub struct DuckDbStore {
    database_path: PathBuf,
    limiter: Arc<Semaphore>,
    pool: Arc<Mutex<Vec<duckdb::Connection>>>,
}

impl DuckDbStore {
    /// Open the database at `path`, applying the sales schema and indexes
    /// idempotently.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let database_path = path.as_ref().to_path_buf();
        let conn = duckdb::Connection::open(&database_path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            database_path,
            limiter: Arc::new(Semaphore::new(16)),
            pool: Arc::new(Mutex::new(vec![conn])),
        })
    }

    /// Configure maximum concurrent statement executions.
    pub fn with_max_concurrency(mut self, max_in_flight: usize) -> Self {
        self.limiter = Arc::new(Semaphore::new(max_in_flight));
        self
    }

    async fn acquire_slot(&self) -> Result<SemaphorePermit<'_>> {
        self.limiter
            .acquire()
            .await
            .map_err(|e| SalesboardError::Execution(format!("limiter closed: {e}")))
    }

    async fn checkout_connection(&self) -> Result<duckdb::Connection> {
        if let Some(conn) = self.pool.lock().await.pop() {
            return Ok(conn);
        }
        duckdb::Connection::open(self.database_path.clone())
            .map_err(|e| SalesboardError::Execution(format!("open duckdb: {e}")))
    }

    /// Run a blocking closure against a checked-out connection and return
    /// the connection to the pool afterwards.
    async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&duckdb::Connection) -> Result<T> + Send + 'static,
    {
        let _permit = self.acquire_slot().await?;
        let conn = self.checkout_connection().await?;
        let pool = self.pool.clone();
        let (result, conn) = tokio::task::spawn_blocking(move || {
            let result = op(&conn);
            (result, conn)
        })
        .await
        .map_err(|e| SalesboardError::Execution(format!("task join error: {e}")))?;
        pool.lock().await.push(conn);
        result
    }

    /// Execute a batch of statements verbatim. Used by ingestion and test
    /// seeding, never by the request path.
    pub async fn execute_batch(&self, sql: String) -> Result<()> {
        self.with_connection(move |conn| {
            conn.execute_batch(&sql)?;
            Ok(())
        })
        .await
    }

    /// Current number of rows in the sales table.
    pub async fn count_rows(&self) -> Result<i64> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row(
                "SELECT CAST(COUNT(*) AS BIGINT) FROM sales",
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}

fn record_from_row(row: &Row<'_>) -> duckdb::Result<SalesRecord> {
    Ok(SalesRecord {
        id: row.get("id")?,
        transaction_id: row.get("transaction_id")?,
        date: row.get("date")?,
        customer_id: row.get("customer_id")?,
        customer_name: row.get("customer_name")?,
        phone_number: row.get("phone_number")?,
        gender: row.get("gender")?,
        age: row.get("age")?,
        customer_region: row.get("customer_region")?,
        customer_type: row.get("customer_type")?,
        product_id: row.get("product_id")?,
        product_name: row.get("product_name")?,
        brand: row.get("brand")?,
        product_category: row.get("product_category")?,
        tags: row.get("tags")?,
        quantity: row.get::<_, Option<i64>>("quantity")?.unwrap_or(0),
        price_per_unit: row.get::<_, Option<f64>>("price_per_unit")?.unwrap_or(0.0),
        discount_percentage: row
            .get::<_, Option<f64>>("discount_percentage")?
            .unwrap_or(0.0),
        total_amount: row.get::<_, Option<f64>>("total_amount")?.unwrap_or(0.0),
        final_amount: row.get::<_, Option<f64>>("final_amount")?.unwrap_or(0.0),
        payment_method: row.get("payment_method")?,
        order_status: row.get("order_status")?,
        delivery_type: row.get("delivery_type")?,
        store_id: row.get("store_id")?,
        store_location: row.get("store_location")?,
        salesperson_id: row.get("salesperson_id")?,
        employee_name: row.get("employee_name")?,
    })
}

#[async_trait]
impl SalesStore for DuckDbStore {
    async fn fetch_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<SalesRecord>> {
        let sql = sql.to_string();
        self.with_connection(move |conn| {
            let start = Instant::now();
            let mut stmt = conn.prepare(&sql)?;
            let mut rows_iter = stmt.query(params_from_iter(params))?;
            let mut records = Vec::new();
            while let Some(row) = rows_iter.next()? {
                records.push(record_from_row(row)?);
            }
            tracing::debug!(
                rows = records.len(),
                ms = start.elapsed().as_millis(),
                "duckdb fetch_rows"
            );
            Ok(records)
        })
        .await
    }

    async fn fetch_stats(&self, sql: &str, params: Vec<Value>) -> Result<StatsRow> {
        let sql = sql.to_string();
        self.with_connection(move |conn| {
            let start = Instant::now();
            let stats = conn.query_row(&sql, params_from_iter(params), |row| {
                Ok(StatsRow {
                    total_rows: row.get("total_rows")?,
                    total_units: row.get("total_units")?,
                    total_amount: row.get("total_amount")?,
                    total_discount: row.get("total_discount")?,
                })
            })?;
            tracing::debug!(
                total_rows = stats.total_rows,
                ms = start.elapsed().as_millis(),
                "duckdb fetch_stats"
            );
            Ok(stats)
        })
        .await
    }

    async fn scan_tag_column(&self) -> Result<Vec<String>> {
        self.with_connection(|conn| {
            let start = Instant::now();
            let mut stmt =
                conn.prepare("SELECT tags FROM sales WHERE tags IS NOT NULL AND tags <> ''")?;
            let mut rows_iter = stmt.query([])?;
            let mut values = Vec::new();
            while let Some(row) = rows_iter.next()? {
                values.push(row.get::<_, String>(0)?);
            }
            tracing::debug!(
                rows = values.len(),
                ms = start.elapsed().as_millis(),
                "duckdb scan_tag_column"
            );
            Ok(values)
        })
        .await
    }
}
