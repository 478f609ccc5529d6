//! Process-lifetime tag catalog.
//!
//! The distinct set of tags across the whole table is computed on first
//! request and cached for the remainder of the process. The dataset is
//! static after ingestion, so the cache is never invalidated. A failed scan
//! caches nothing; the next caller retries.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::Result;
use crate::store::SalesStore;

/// Compute-once cache of the sorted, deduplicated tag list.
#[derive(Debug, Default)]
pub struct TagCatalog {
    cache: OnceCell<Arc<Vec<String>>>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog, scanning the store only on the first successful
    /// call. Concurrent first callers are serialized by the cell, so the
    /// scan runs at most once per process.
    pub async fn all(&self, store: &dyn SalesStore) -> Result<Arc<Vec<String>>> {
        let tags = self
            .cache
            .get_or_try_init(|| async {
                let raw = store.scan_tag_column().await?;
                Ok::<_, crate::error::SalesboardError>(Arc::new(collect_tags(raw)))
            })
            .await?;
        Ok(Arc::clone(tags))
    }
}

/// Split delimited tag values, trim, drop empties, deduplicate, and sort
/// case-insensitively (with a bytewise tiebreak so the order is total).
fn collect_tags(raw_values: Vec<String>) -> Vec<String> {
    let mut set = HashSet::new();
    for value in raw_values {
        for tag in value.split(',') {
            let tag = tag.trim();
            if !tag.is_empty() {
                set.insert(tag.to_string());
            }
        }
    }
    let mut tags: Vec<String> = set.into_iter().collect();
    tags.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    tags
}
