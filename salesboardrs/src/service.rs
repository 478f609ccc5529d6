//! Sales query service: normalize, compile, execute, shape.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{PageInfo, RawSalesQuery, SalesPage, SalesStats};
use crate::normalize::normalize;
use crate::query_builder::build_statements;
use crate::store::SalesStore;
use crate::tags::TagCatalog;

/// Orchestrates one sales query end to end. Each call builds its own
/// descriptor and parameter vector, so concurrent calls share nothing but
/// the store handle and the tag cache.
pub struct SalesService {
    store: Arc<dyn SalesStore>,
    tags: TagCatalog,
}

impl SalesService {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self {
            store,
            tags: TagCatalog::new(),
        }
    }

    /// Run the paged row query and the matching aggregate query over the
    /// identical predicate, then shape the combined response. Store errors
    /// propagate unrecovered.
    pub async fn get_sales(&self, raw: &RawSalesQuery) -> Result<SalesPage> {
        let query = normalize(raw);
        let statements = build_statements(&query);

        tracing::debug!(
            page = query.page,
            page_size = query.page_size,
            params = statements.params.len(),
            "executing sales query"
        );

        let rows = self
            .store
            .fetch_rows(&statements.rows_sql, statements.params.clone())
            .await?;
        let stats = self
            .store
            .fetch_stats(&statements.stats_sql, statements.params)
            .await?;

        Ok(SalesPage {
            data: rows,
            pagination: PageInfo {
                page: query.page,
                page_size: query.page_size,
                total_rows: stats.total_rows,
            },
            stats: SalesStats {
                total_units: stats.total_units,
                total_amount: stats.total_amount,
                total_discount: stats.total_discount,
            },
        })
    }

    /// Sorted distinct tag list, computed once per process.
    pub async fn all_tags(&self) -> Result<Arc<Vec<String>>> {
        self.tags.all(self.store.as_ref()).await
    }
}
