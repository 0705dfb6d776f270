//! # Unit Types
//!
//! Area units, quantity rounding rules and currency formatting.
//!
//! ## Area Units
//!
//! A deployment measures built-up area in exactly one unit, fixed by the
//! active [`EstimationPreset`](crate::presets::EstimationPreset):
//! - Square yards (`sq_yd`) for the standard preset
//! - Square feet (`sq_ft`) for the compact preset
//!
//! Layout rectangles are always expressed in feet, so the area unit also
//! carries the linear conversion used by the layout generator.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{format_currency, AreaUnit, Rounding};
//!
//! assert_eq!(AreaUnit::SquareYards.feet_per_unit(), 3.0);
//! assert_eq!(Rounding::Decimals(1).apply(12.345), 12.3);
//! assert_eq!(format_currency(1234567.4), "12,34,567");
//! ```

use serde::{Deserialize, Serialize};

/// Currency symbol used in reports and insight text
pub const CURRENCY_SYMBOL: &str = "₹";

// ============================================================================
// Area Units
// ============================================================================

/// Unit in which built-up area is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    #[serde(rename = "sq_ft")]
    SquareFeet,
    #[serde(rename = "sq_yd")]
    SquareYards,
}

impl AreaUnit {
    /// Short label, e.g. "sq yd"
    pub fn label(&self) -> &'static str {
        match self {
            AreaUnit::SquareFeet => "sq ft",
            AreaUnit::SquareYards => "sq yd",
        }
    }

    /// Label used for unit rates, e.g. "Sq Yard"
    pub fn rate_label(&self) -> &'static str {
        match self {
            AreaUnit::SquareFeet => "Sq Ft",
            AreaUnit::SquareYards => "Sq Yard",
        }
    }

    /// Feet per linear unit (side of one square unit)
    pub fn feet_per_unit(&self) -> f64 {
        match self {
            AreaUnit::SquareFeet => 1.0,
            AreaUnit::SquareYards => 3.0,
        }
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Rounding rule applied to a derived quantity.
///
/// All rules are monotonically non-decreasing, so a larger raw quantity
/// never rounds to a smaller value.
///
/// ## JSON
///
/// ```json
/// "Ceil"
/// "Nearest"
/// { "Decimals": 2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Round up to a whole number (bags, pieces)
    Ceil,
    /// Round half away from zero to a whole number
    Nearest,
    /// Round to a fixed number of decimal places (volumes, tonnage)
    Decimals(u32),
}

impl Rounding {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Rounding::Ceil => value.ceil(),
            Rounding::Nearest => value.round(),
            Rounding::Decimals(places) => {
                let scale = 10f64.powi(*places as i32);
                (value * scale).round() / scale
            }
        }
    }
}

// ============================================================================
// Currency
// ============================================================================

/// Format a money value with Indian digit grouping and no fraction digits.
///
/// The last three digits form one group, every group above that has two
/// digits: `1234567` becomes `12,34,567`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a money value with the currency symbol, e.g. `₹12,34,567`
pub fn format_inr(value: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_currency(value))
}
