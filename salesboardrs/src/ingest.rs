//! One-shot CSV ingestion.
//!
//! Populates the sales table from the source dataset, remapping the CSV's
//! human-readable headers onto the physical columns. The load is delegated
//! to DuckDB's streaming CSV reader, so arbitrarily large files never pass
//! through process memory as a whole. Ingestion is skipped entirely when
//! the table already holds rows; the serving path performs no population
//! checks of its own.

use std::path::Path;

use crate::error::{Result, SalesboardError};
use crate::store::DuckDbStore;

/// Import the CSV at `csv_path` unless the sales table is already
/// populated. Returns the number of rows in the table afterwards.
pub async fn import_csv_if_needed(store: &DuckDbStore, csv_path: &Path) -> Result<i64> {
    let existing = store.count_rows().await?;
    if existing > 0 {
        tracing::info!(rows = existing, "sales table already populated, skipping import");
        return Ok(existing);
    }

    let path = csv_path
        .to_str()
        .ok_or_else(|| SalesboardError::Execution("csv path is not valid UTF-8".to_string()))?
        .replace('\'', "''");

    tracing::info!(path = %csv_path.display(), "importing sales csv");

    // Headers are read as text and cast per column so one malformed numeric
    // cell degrades to null/zero instead of failing the whole load.
    let sql = format!(
        "INSERT INTO sales (
            transaction_id, date, customer_id, customer_name, phone_number,
            gender, age, customer_region, customer_type, product_id,
            product_name, brand, product_category, tags, quantity,
            price_per_unit, discount_percentage, total_amount, final_amount,
            payment_method, order_status, delivery_type, store_id,
            store_location, salesperson_id, employee_name
        )
        SELECT
            \"Transaction ID\",
            \"Date\",
            \"Customer ID\",
            \"Customer Name\",
            \"Phone Number\",
            \"Gender\",
            TRY_CAST(\"Age\" AS BIGINT),
            \"Customer Region\",
            \"Customer Type\",
            \"Product ID\",
            \"Product Name\",
            \"Brand\",
            \"Category\",
            \"Tags\",
            COALESCE(TRY_CAST(\"Quantity\" AS BIGINT), 0),
            COALESCE(TRY_CAST(\"Price per Unit\" AS DOUBLE), 0),
            COALESCE(TRY_CAST(\"Discount Percentage\" AS DOUBLE), 0),
            COALESCE(TRY_CAST(\"Total Amount\" AS DOUBLE), 0),
            COALESCE(TRY_CAST(\"Final Amount\" AS DOUBLE), 0),
            \"Payment Method\",
            \"Order Status\",
            \"Delivery Type\",
            \"Store ID\",
            \"Store Location\",
            \"Salesperson ID\",
            \"Employee Name\"
        FROM read_csv('{path}', header = true, all_varchar = true)"
    );

    store.execute_batch(sql).await?;

    let imported = store.count_rows().await?;
    tracing::info!(rows = imported, "csv import completed");
    Ok(imported)
}
