//! Print the SQL generated for a sample dashboard query.
//!
//! Run with: cargo run --example print_sql

use salesboard::{build_statements, normalize, RawSalesQuery};

fn main() {
    let raw = RawSalesQuery::from_pairs(vec![
        ("search", "alice".to_string()),
        ("region", "North".to_string()),
        ("region", "East".to_string()),
        ("tags", "wireless,gaming".to_string()),
        ("ageMin", "30".to_string()),
        ("dateFrom", "2024-01-01".to_string()),
        ("sortField", "quantity".to_string()),
        ("sortOrder", "asc".to_string()),
        ("page", "2".to_string()),
        ("pageSize", "25".to_string()),
    ]);

    let query = normalize(&raw);
    let statements = build_statements(&query);

    println!("descriptor: {query:#?}");
    println!("\nrows sql:\n{}", statements.rows_sql);
    println!("\nstats sql:\n{}", statements.stats_sql);
    println!("\nparams ({}):", statements.params.len());
    for (idx, param) in statements.params.iter().enumerate() {
        println!("  {}: {:?}", idx + 1, param);
    }
}
