//! SQL assembly for the sales query surface.
//!
//! From one canonical descriptor this produces two statements over the
//! `sales` table that share the exact same predicate and parameter vector:
//! a paged row selection and a single-row aggregate. Sharing the bindings
//! guarantees the statistics always describe the same filtered population
//! as the rows.

use duckdb::types::Value;

use crate::model::SalesQuery;

mod predicate;

pub use predicate::{build_predicate, Predicate};

/// The two statements executed per sales query, with their shared
/// positional parameters.
#[derive(Debug)]
pub struct SalesStatements {
    pub rows_sql: String,
    pub stats_sql: String,
    pub params: Vec<Value>,
}

/// Assemble the row and stats statements for a normalized query.
///
/// LIMIT and OFFSET are rendered inline: both derive from integers the
/// normalizer has already clamped, so no client text can reach them. The
/// ORDER BY column comes from the static sort-field mapping for the same
/// reason.
pub fn build_statements(query: &SalesQuery) -> SalesStatements {
    let predicate = build_predicate(query);
    let where_sql = predicate.where_sql();

    let order_column = query.sort.field.column();
    let order_direction = query.sort.direction.keyword();
    let limit = u64::from(query.page_size);
    let offset = u64::from(query.page - 1) * u64::from(query.page_size);

    let rows_sql = format!(
        "SELECT * FROM sales{where_sql} \
         ORDER BY {order_column} {order_direction} \
         LIMIT {limit} OFFSET {offset}"
    );

    // Aggregate sums are COALESCEd so an empty population reports zeros,
    // and cast so the output types stay stable regardless of input width.
    let stats_sql = format!(
        "SELECT \
         CAST(COUNT(*) AS BIGINT) AS total_rows, \
         CAST(COALESCE(SUM(quantity), 0) AS BIGINT) AS total_units, \
         CAST(COALESCE(SUM(total_amount), 0) AS DOUBLE) AS total_amount, \
         CAST(COALESCE(SUM(total_amount - final_amount), 0) AS DOUBLE) AS total_discount \
         FROM sales{where_sql}"
    );

    SalesStatements {
        rows_sql,
        stats_sql,
        params: predicate.into_params(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawSalesQuery;
    use crate::normalize::normalize;

    fn statements(pairs: &[(&str, &str)]) -> SalesStatements {
        let raw = RawSalesQuery::from_pairs(pairs.iter().map(|(k, v)| (*k, v.to_string())));
        build_statements(&normalize(&raw))
    }

    #[test]
    fn unfiltered_query_has_no_where_clause() {
        let stmts = statements(&[]);
        assert_eq!(
            stmts.rows_sql,
            "SELECT * FROM sales ORDER BY date DESC LIMIT 10 OFFSET 0"
        );
        assert!(stmts.stats_sql.ends_with("FROM sales"));
        assert!(stmts.params.is_empty());
    }

    #[test]
    fn both_statements_share_the_where_fragment() {
        let stmts = statements(&[("region", "North"), ("ageMin", "30")]);
        let fragment = " WHERE customer_region IN (?) AND age >= ?";
        assert!(stmts.rows_sql.contains(fragment));
        assert!(stmts.stats_sql.contains(fragment));
        assert_eq!(stmts.params.len(), 2);
    }

    #[test]
    fn pagination_renders_clamped_limit_and_offset() {
        let stmts = statements(&[("page", "3"), ("pageSize", "25")]);
        assert!(stmts.rows_sql.ends_with("LIMIT 25 OFFSET 50"));

        let stmts = statements(&[("page", "-1"), ("pageSize", "0")]);
        assert!(stmts.rows_sql.ends_with("LIMIT 1 OFFSET 0"));
    }

    #[test]
    fn sort_resolves_to_physical_column() {
        let stmts = statements(&[("sortField", "customerName"), ("sortOrder", "asc")]);
        assert!(stmts.rows_sql.contains("ORDER BY customer_name ASC"));

        // Stats are order-independent and never carry the sort.
        assert!(!stmts.stats_sql.contains("ORDER BY"));
    }

    #[test]
    fn stats_statement_derives_discount() {
        let stmts = statements(&[]);
        assert!(stmts
            .stats_sql
            .contains("SUM(total_amount - final_amount)"));
        assert!(stmts.stats_sql.contains("COALESCE"));
    }
}
