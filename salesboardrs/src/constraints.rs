//! Static query constraints: allowed sort fields, sort directions, and
//! pagination bounds. Pure lookup, no failure modes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Logical sort fields exposed to clients, mapped to physical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Date,
    Quantity,
    CustomerName,
}

impl SortField {
    /// Parse a client-supplied sort field name. Unknown names are rejected
    /// here and defaulted by the normalizer.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "date" => Some(SortField::Date),
            "quantity" => Some(SortField::Quantity),
            "customerName" => Some(SortField::CustomerName),
            _ => None,
        }
    }

    /// Physical column this field sorts on. Always a static identifier, so
    /// client input can never reach the ORDER BY clause as raw text.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Quantity => "quantity",
            SortField::CustomerName => "customer_name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the exact string `asc` sorts ascending; anything else descends.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parse_round_trips_columns() {
        assert_eq!(SortField::parse("date"), Some(SortField::Date));
        assert_eq!(SortField::parse("quantity"), Some(SortField::Quantity));
        assert_eq!(
            SortField::parse("customerName"),
            Some(SortField::CustomerName)
        );
        assert_eq!(SortField::parse("customer_name"), None);
        assert_eq!(SortField::parse(""), None);

        assert_eq!(SortField::CustomerName.column(), "customer_name");
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("ASC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("ascending")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
    }
}
