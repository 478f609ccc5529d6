//! Query normalization: raw wire parameters to canonical descriptor.
//!
//! Normalization is total. Bad input never fails a request; unknown sort
//! fields, unparseable numbers, and out-of-range pagination all fall back to
//! documented defaults or clamps.

use crate::constraints::{
    SortDirection, SortField, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use crate::model::{ParamValue, RawSalesQuery, SalesFilters, SalesQuery, SortSpec};

/// Convert a scalar-or-repeated parameter into a list of filter values.
/// Scalars split on comma with per-segment trimming; repeated values are
/// kept as sent, minus empty entries.
fn to_list(value: Option<&ParamValue>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(ParamValue::Many(values)) => values
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect(),
        Some(ParamValue::One(value)) => value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_int_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn opaque_string(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Normalize a raw query into the canonical descriptor.
pub fn normalize(raw: &RawSalesQuery) -> SalesQuery {
    let search = raw
        .search
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let filters = SalesFilters {
        region: to_list(raw.region.as_ref()),
        gender: to_list(raw.gender.as_ref()),
        category: to_list(raw.category.as_ref()),
        tags: to_list(raw.tags.as_ref()),
        payment: to_list(raw.payment.as_ref()),
        age_min: parse_int(raw.age_min.as_deref()),
        age_max: parse_int(raw.age_max.as_deref()),
        // Opaque pass-through: dates are ISO strings and compare
        // lexicographically, so no format validation happens here.
        date_from: opaque_string(raw.date_from.as_deref()),
        date_to: opaque_string(raw.date_to.as_deref()),
    };

    let sort = SortSpec {
        field: raw
            .sort_field
            .as_deref()
            .and_then(SortField::parse)
            .unwrap_or(SortField::Date),
        direction: SortDirection::parse(raw.sort_order.as_deref()),
    };

    let page = parse_int_or(raw.page.as_deref(), DEFAULT_PAGE).max(1);
    // Numeric zero or negative page sizes clamp up to 1, so the descriptor
    // always satisfies 1 <= page_size <= MAX_PAGE_SIZE.
    let page_size = parse_int_or(raw.page_size.as_deref(), DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    SalesQuery {
        search,
        filters,
        sort,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawSalesQuery;

    fn raw(pairs: &[(&str, &str)]) -> RawSalesQuery {
        RawSalesQuery::from_pairs(pairs.iter().map(|(k, v)| (*k, v.to_string())))
    }

    #[test]
    fn empty_input_yields_defaults() {
        let norm = normalize(&RawSalesQuery::default());
        assert_eq!(norm.search, "");
        assert!(norm.filters.region.is_empty());
        assert!(norm.filters.tags.is_empty());
        assert_eq!(norm.filters.age_min, None);
        assert_eq!(norm.filters.date_from, None);
        assert_eq!(norm.sort.field, SortField::Date);
        assert_eq!(norm.sort.direction, SortDirection::Desc);
        assert_eq!(norm.page, 1);
        assert_eq!(norm.page_size, 10);
    }

    #[test]
    fn search_is_trimmed() {
        let norm = normalize(&raw(&[("search", "  Alice  ")]));
        assert_eq!(norm.search, "Alice");
    }

    #[test]
    fn scalar_filters_split_on_comma() {
        let norm = normalize(&raw(&[("region", "North, South ,,East")]));
        assert_eq!(norm.filters.region, vec!["North", "South", "East"]);
    }

    #[test]
    fn repeated_filters_keep_entries() {
        let norm = normalize(&raw(&[
            ("category", "Electronics"),
            ("category", "Toys"),
            ("category", ""),
        ]));
        assert_eq!(norm.filters.category, vec!["Electronics", "Toys"]);
    }

    #[test]
    fn age_bounds_parse_or_stay_open() {
        let norm = normalize(&raw(&[("ageMin", "30"), ("ageMax", "forty")]));
        assert_eq!(norm.filters.age_min, Some(30));
        assert_eq!(norm.filters.age_max, None);
    }

    #[test]
    fn dates_pass_through_unvalidated() {
        let norm = normalize(&raw(&[("dateFrom", "2024-01-01"), ("dateTo", "")]));
        assert_eq!(norm.filters.date_from.as_deref(), Some("2024-01-01"));
        assert_eq!(norm.filters.date_to, None);
    }

    #[test]
    fn unknown_sort_field_defaults_to_date() {
        let norm = normalize(&raw(&[("sortField", "price"), ("sortOrder", "asc")]));
        assert_eq!(norm.sort.field, SortField::Date);
        assert_eq!(norm.sort.direction, SortDirection::Asc);

        let norm = normalize(&raw(&[("sortField", "quantity"), ("sortOrder", "up")]));
        assert_eq!(norm.sort.field, SortField::Quantity);
        assert_eq!(norm.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn page_bounds_always_hold() {
        for (page, page_size) in [
            ("0", "0"),
            ("-3", "-50"),
            ("abc", "xyz"),
            ("", ""),
            ("2", "1000"),
            ("999999", "100"),
        ] {
            let norm = normalize(&raw(&[("page", page), ("pageSize", page_size)]));
            assert!(norm.page >= 1, "page {page:?} normalized below 1");
            assert!(
                (1..=100).contains(&norm.page_size),
                "pageSize {page_size:?} normalized out of range"
            );
        }
    }

    #[test]
    fn page_size_zero_clamps_to_one() {
        // "0" parses as a valid integer; the clamp, not the parse fallback,
        // must catch it.
        let norm = normalize(&raw(&[("pageSize", "0")]));
        assert_eq!(norm.page_size, 1);
    }

    #[test]
    fn page_size_caps_at_maximum() {
        let norm = normalize(&raw(&[("pageSize", "250")]));
        assert_eq!(norm.page_size, 100);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize(&raw(&[
            ("search", "  tv "),
            ("region", "North,South"),
            ("ageMin", "30"),
            ("sortField", "customerName"),
            ("sortOrder", "asc"),
            ("page", "3"),
            ("pageSize", "50"),
        ]));

        // Re-express the normalized descriptor as raw input and normalize
        // again; nothing should change.
        let region = first.filters.region.join(",");
        let second = normalize(&raw(&[
            ("search", first.search.as_str()),
            ("region", region.as_str()),
            ("ageMin", "30"),
            ("sortField", "customerName"),
            ("sortOrder", "asc"),
            ("page", "3"),
            ("pageSize", "50"),
        ]));

        assert_eq!(first, second);
    }
}
