//! Predicate construction for the sales table.
//!
//! A predicate is an ordered list of clause templates plus the parameter
//! values bound to their `?` placeholders, accumulated in clause order.
//! Binding positionally keeps parameter collisions structurally impossible:
//! there are no names to collide.

use duckdb::types::Value;

use crate::model::SalesQuery;

/// A conjunction of parameterized filter clauses. An empty predicate
/// matches every row.
#[derive(Debug, Default)]
pub struct Predicate {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Predicate {
    fn clause<I>(&mut self, sql: impl Into<String>, binds: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.clauses.push(sql.into());
        self.params.extend(binds);
    }

    /// Render the WHERE fragment, including the leading keyword, or an
    /// empty string when no filters apply.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}

fn membership(predicate: &mut Predicate, column: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    predicate.clause(
        format!("{column} IN ({placeholders})"),
        values.iter().map(|v| Value::Text(v.clone())),
    );
}

/// Build the shared predicate for a normalized query. Each filter is
/// independently optional; absent filters emit no clause at all.
pub fn build_predicate(query: &SalesQuery) -> Predicate {
    let mut predicate = Predicate::default();

    if !query.search.is_empty() {
        // One search term tested against both columns: case-insensitive on
        // the customer name, raw substring on the phone number.
        let pattern = like_pattern(&query.search);
        predicate.clause(
            "(LOWER(customer_name) LIKE ? OR phone_number LIKE ?)",
            [Value::Text(pattern.clone()), Value::Text(pattern)],
        );
    }

    let filters = &query.filters;
    membership(&mut predicate, "customer_region", &filters.region);
    membership(&mut predicate, "gender", &filters.gender);
    membership(&mut predicate, "product_category", &filters.category);
    membership(&mut predicate, "payment_method", &filters.payment);

    // AND across requested tags: a record must contain every requested
    // substring, not any one of them.
    for tag in &filters.tags {
        predicate.clause(
            "LOWER(tags) LIKE ?",
            [Value::Text(like_pattern(tag))],
        );
    }

    if let Some(age_min) = filters.age_min {
        predicate.clause("age >= ?", [Value::BigInt(age_min)]);
    }
    if let Some(age_max) = filters.age_max {
        predicate.clause("age <= ?", [Value::BigInt(age_max)]);
    }

    if let Some(date_from) = &filters.date_from {
        predicate.clause("date >= ?", [Value::Text(date_from.clone())]);
    }
    if let Some(date_to) = &filters.date_to {
        predicate.clause("date <= ?", [Value::Text(date_to.clone())]);
    }

    predicate
}
