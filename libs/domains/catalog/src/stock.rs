use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stock health bucket derived from stock count and low-stock threshold.
/// Never stored; the filter predicate, the sort key and the response
/// annotation all go through [`StockStatus::derive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Red,
    Yellow,
    Green,
}

/// Threshold used when a record carries none.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

impl StockStatus {
    pub fn derive(stock: i32, threshold: i32) -> Self {
        if stock == 0 {
            StockStatus::Red
        } else if stock <= threshold {
            StockStatus::Yellow
        } else {
            StockStatus::Green
        }
    }

    pub fn derive_or_default(stock: i32, threshold: Option<i32>) -> Self {
        Self::derive(stock, threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD))
    }

    /// Sort priority: ascending puts the most urgent bucket first.
    pub fn rank(self) -> i32 {
        match self {
            StockStatus::Red => 0,
            StockStatus::Yellow => 1,
            StockStatus::Green => 2,
        }
    }

    /// Unknown bucket names are ignored by the filter, not rejected.
    pub fn parse_filter(value: &str) -> Option<Self> {
        match value {
            "red" => Some(StockStatus::Red),
            "yellow" => Some(StockStatus::Yellow),
            "green" => Some(StockStatus::Green),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stock_is_red_for_any_threshold() {
        for threshold in [0, 1, 10, 1000] {
            assert_eq!(StockStatus::derive(0, threshold), StockStatus::Red);
        }
    }

    #[test]
    fn yellow_iff_positive_and_at_most_threshold() {
        assert_eq!(StockStatus::derive(1, 10), StockStatus::Yellow);
        assert_eq!(StockStatus::derive(10, 10), StockStatus::Yellow);
        assert_eq!(StockStatus::derive(11, 10), StockStatus::Green);
    }

    #[test]
    fn green_strictly_above_threshold() {
        assert_eq!(StockStatus::derive(6, 5), StockStatus::Green);
        assert_eq!(StockStatus::derive(1, 0), StockStatus::Green);
    }

    #[test]
    fn default_threshold_is_ten() {
        assert_eq!(
            StockStatus::derive_or_default(10, None),
            StockStatus::Yellow
        );
        assert_eq!(
            StockStatus::derive_or_default(11, None),
            StockStatus::Green
        );
    }

    #[test]
    fn rank_orders_urgent_first() {
        assert!(StockStatus::Red.rank() < StockStatus::Yellow.rank());
        assert!(StockStatus::Yellow.rank() < StockStatus::Green.rank());
    }

    #[test]
    fn unknown_bucket_names_parse_to_none() {
        assert_eq!(StockStatus::parse_filter("red"), Some(StockStatus::Red));
        assert_eq!(StockStatus::parse_filter("purple"), None);
        assert_eq!(StockStatus::parse_filter("RED"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StockStatus::Yellow).unwrap(),
            "\"yellow\""
        );
    }
}
