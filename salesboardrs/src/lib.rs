pub mod config;
pub mod constraints;
pub mod error;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod query_builder;
pub mod server;
pub mod service;
pub mod store;
pub mod tags;

pub use config::SalesboardConfig;
pub use constraints::{SortDirection, SortField};
pub use error::{Result, SalesboardError};
pub use model::{RawSalesQuery, SalesPage, SalesQuery, SalesRecord};
pub use normalize::normalize;
pub use query_builder::{build_statements, SalesStatements};
pub use service::SalesService;
pub use store::{DuckDbStore, SalesStore};
pub use tags::TagCatalog;
