//! Request and response types for the sales query surface.
//!
//! `RawSalesQuery` is the typed form of the incoming query-string bag: every
//! field optional, multi-select fields scalar-or-repeated. `SalesQuery` is
//! the canonical descriptor produced by the normalizer and consumed by the
//! query builder. The remaining types shape the wire responses; record
//! fields serialize under their raw column names, the pagination and stats
//! envelopes serialize camelCase.

use serde::{Deserialize, Serialize};

use crate::constraints::{SortDirection, SortField};

/// A query-string value that arrived either once or repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

impl ParamValue {
    fn push(&mut self, value: String) {
        match self {
            ParamValue::One(first) => {
                *self = ParamValue::Many(vec![std::mem::take(first), value]);
            }
            ParamValue::Many(values) => values.push(value),
        }
    }
}

/// Raw, un-normalized sales query as it appears on the wire.
///
/// All fields are optional; unknown keys are ignored. The normalizer turns
/// this into a [`SalesQuery`] without ever failing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSalesQuery {
    pub search: Option<String>,
    pub region: Option<ParamValue>,
    pub gender: Option<ParamValue>,
    pub category: Option<ParamValue>,
    pub tags: Option<ParamValue>,
    pub payment: Option<ParamValue>,
    pub age_min: Option<String>,
    pub age_max: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl RawSalesQuery {
    /// Build from raw query-string pairs, preserving repeated keys as
    /// multi-values. This is the entry point for the HTTP layer, where the
    /// same key may legitimately appear more than once.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        fn multi(slot: &mut Option<ParamValue>, value: String) {
            match slot {
                Some(existing) => existing.push(value),
                None => *slot = Some(ParamValue::One(value)),
            }
        }

        let mut raw = RawSalesQuery::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "search" => raw.search = Some(value),
                "region" => multi(&mut raw.region, value),
                "gender" => multi(&mut raw.gender, value),
                "category" => multi(&mut raw.category, value),
                "tags" => multi(&mut raw.tags, value),
                "payment" => multi(&mut raw.payment, value),
                "ageMin" => raw.age_min = Some(value),
                "ageMax" => raw.age_max = Some(value),
                "dateFrom" => raw.date_from = Some(value),
                "dateTo" => raw.date_to = Some(value),
                "sortField" => raw.sort_field = Some(value),
                "sortOrder" => raw.sort_order = Some(value),
                "page" => raw.page = Some(value),
                "pageSize" => raw.page_size = Some(value),
                _ => {}
            }
        }
        raw
    }
}

/// Canonical, validated query descriptor. Constructed fresh per request and
/// discarded after the statements are built.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesQuery {
    pub search: String,
    pub filters: SalesFilters,
    pub sort: SortSpec,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesFilters {
    pub region: Vec<String>,
    pub gender: Vec<String>,
    pub category: Vec<String>,
    pub tags: Vec<String>,
    pub payment: Vec<String>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// One sales transaction as stored in the wide `sales` table.
///
/// Text columns are nullable in the schema, so they surface as options;
/// numeric columns default to zero at ingest time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: i64,
    pub transaction_id: Option<String>,
    pub date: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub customer_region: Option<String>,
    pub customer_type: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub product_category: Option<String>,
    pub tags: Option<String>,
    pub quantity: i64,
    pub price_per_unit: f64,
    pub discount_percentage: f64,
    pub total_amount: f64,
    pub final_amount: f64,
    pub payment_method: Option<String>,
    pub order_status: Option<String>,
    pub delivery_type: Option<String>,
    pub store_id: Option<String>,
    pub store_location: Option<String>,
    pub salesperson_id: Option<String>,
    pub employee_name: Option<String>,
}

/// Single-row aggregate over the filtered population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsRow {
    pub total_rows: i64,
    pub total_units: i64,
    pub total_amount: f64,
    pub total_discount: f64,
}

/// Combined response for the sales query endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SalesPage {
    pub data: Vec<SalesRecord>,
    pub pagination: PageInfo,
    pub stats: SalesStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_rows: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_units: i64,
    pub total_amount: f64,
    pub total_discount: f64,
}

/// Response for the tag listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_collects_repeated_keys() {
        let raw = RawSalesQuery::from_pairs(vec![
            ("region", "North"),
            ("region", "South"),
            ("search", " alice "),
            ("pageSize", "25"),
            ("bogus", "ignored"),
        ]);

        assert_eq!(
            raw.region,
            Some(ParamValue::Many(vec![
                "North".to_string(),
                "South".to_string()
            ]))
        );
        assert_eq!(raw.search.as_deref(), Some(" alice "));
        assert_eq!(raw.page_size.as_deref(), Some("25"));
        assert!(raw.gender.is_none());
    }

    #[test]
    fn from_pairs_keeps_single_values_scalar() {
        let raw = RawSalesQuery::from_pairs(vec![("category", "Electronics,Toys")]);
        assert_eq!(
            raw.category,
            Some(ParamValue::One("Electronics,Toys".to_string()))
        );
    }

    #[test]
    fn raw_query_deserializes_from_json() {
        let raw: RawSalesQuery = serde_json::from_str(
            r#"{"search":"tv","region":["North","East"],"ageMin":"30","sortField":"quantity"}"#,
        )
        .unwrap();
        assert_eq!(raw.search.as_deref(), Some("tv"));
        assert_eq!(
            raw.region,
            Some(ParamValue::Many(vec![
                "North".to_string(),
                "East".to_string()
            ]))
        );
        assert_eq!(raw.age_min.as_deref(), Some("30"));
        assert_eq!(raw.sort_field.as_deref(), Some("quantity"));
    }

    #[test]
    fn pagination_envelope_serializes_camel_case() {
        let info = PageInfo {
            page: 2,
            page_size: 10,
            total_rows: 25,
        };
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "pageSize": 10, "totalRows": 25})
        );
    }
}
