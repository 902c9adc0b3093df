//! Qualitative stock classification.

use serde::{Deserialize, Serialize};

/// Stock level below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Stock level below which a product counts as medium stock.
pub const MEDIUM_STOCK_THRESHOLD: u32 = 15;

/// Qualitative bucket derived from a numeric stock count.
///
/// Boundaries are inclusive-exclusive: 0-4 is low, 5-14 medium, 15+ high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockState {
    Low,
    Medium,
    High,
}

impl StockState {
    /// Classify a stock count.
    #[must_use]
    pub const fn for_quantity(stock: u32) -> Self {
        if stock < LOW_STOCK_THRESHOLD {
            Self::Low
        } else if stock < MEDIUM_STOCK_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Human-readable label shown next to the product.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Medium => "Medio",
            Self::High => "Alto",
        }
    }

    /// CSS class used by the storefront badge.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "stock-bajo",
            Self::Medium => "stock-medio",
            Self::High => "stock-alto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(StockState::for_quantity(0), StockState::Low);
        assert_eq!(StockState::for_quantity(4), StockState::Low);
        assert_eq!(StockState::for_quantity(5), StockState::Medium);
        assert_eq!(StockState::for_quantity(14), StockState::Medium);
        assert_eq!(StockState::for_quantity(15), StockState::High);
        assert_eq!(StockState::for_quantity(500), StockState::High);
    }

    #[test]
    fn test_labels_and_classes() {
        assert_eq!(StockState::Low.label(), "Bajo");
        assert_eq!(StockState::Medium.css_class(), "stock-medio");
        assert_eq!(StockState::High.label(), "Alto");
    }
}
