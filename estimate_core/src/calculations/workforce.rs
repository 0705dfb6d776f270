//! # Workforce Estimation
//!
//! Sizes the crew from effective area. Every division rounds up: being one
//! worker short stalls a site, one extra does not.
//!
//! ## Formulas
//!
//! - labor-days = effective area / productivity, rounded per preset
//!   (up for standard, to nearest for compact)
//! - trade count = ⌈effective area / trade coefficient⌉
//! - supervisors = max(minimum, ⌈trade workers / span of control⌉)
//!
//! Counts saturate at `u32::MAX` instead of overflowing.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::workforce;
//! use estimate_core::presets::EstimationPreset;
//!
//! let rules = &EstimationPreset::standard().workforce;
//! let crew = workforce::calculate(3000.0, rules);
//!
//! assert_eq!(crew.masons, 15);
//! assert_eq!(crew.helpers, 30);
//! assert_eq!(crew.total_labor_days, 60);
//! assert_eq!(crew.supervisors, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::{ceil_count, whole_count};
use crate::presets::{Trade, WorkforceRules};

/// Worker counts per trade and total effort.
///
/// ## JSON Example
///
/// ```json
/// {
///   "masons": 15,
///   "helpers": 30,
///   "steel_fixers": 6,
///   "carpenters": 8,
///   "supervisors": 3,
///   "total_labor_days": 60
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceBreakdown {
    pub masons: u32,
    pub helpers: u32,
    pub steel_fixers: u32,
    pub carpenters: u32,
    pub supervisors: u32,

    /// Total effort in labor-days
    pub total_labor_days: u32,
}

impl WorkforceBreakdown {
    /// Headcount for one trade
    pub fn count(&self, trade: Trade) -> u32 {
        match trade {
            Trade::Mason => self.masons,
            Trade::Helper => self.helpers,
            Trade::SteelFixer => self.steel_fixers,
            Trade::Carpenter => self.carpenters,
            Trade::Supervisor => self.supervisors,
        }
    }

    /// Workers on the tools (everyone except supervisors)
    pub fn trade_workers(&self) -> u32 {
        self.masons
            .saturating_add(self.helpers)
            .saturating_add(self.steel_fixers)
            .saturating_add(self.carpenters)
    }

    pub fn total_headcount(&self) -> u32 {
        self.trade_workers().saturating_add(self.supervisors)
    }
}

/// Derive trade headcounts and labor-days from effective area.
pub fn calculate(effective_area: f64, rules: &WorkforceRules) -> WorkforceBreakdown {
    let trades = &rules.trades;
    let masons = ceil_count(effective_area / trades.mason);
    let helpers = ceil_count(effective_area / trades.helper);
    let steel_fixers = ceil_count(effective_area / trades.steel_fixer);
    let carpenters = ceil_count(effective_area / trades.carpenter);

    let mut crew = WorkforceBreakdown {
        masons,
        helpers,
        steel_fixers,
        carpenters,
        supervisors: 0,
        total_labor_days: whole_count(
            rules
                .labor_day_rounding
                .apply(effective_area / rules.productivity),
        ),
    };
    let span = rules.supervisors.span_of_control.max(1);
    crew.supervisors = rules
        .supervisors
        .minimum
        .max(crew.trade_workers().div_ceil(span));
    crew
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::EstimationPreset;

    fn rules() -> &'static WorkforceRules {
        &EstimationPreset::standard().workforce
    }

    #[test]
    fn test_standard_crew() {
        // 1000 sq yd × 3 floors
        let crew = calculate(3000.0, rules());
        assert_eq!(crew.masons, 15);
        assert_eq!(crew.helpers, 30);
        assert_eq!(crew.steel_fixers, 6);
        assert_eq!(crew.carpenters, 8);
        assert_eq!(crew.total_labor_days, 60);
        // 59 trade workers / 20 → 3, equal to the minimum
        assert_eq!(crew.supervisors, 3);
    }

    #[test]
    fn test_fractional_workers_round_up() {
        let crew = calculate(201.0, rules());
        assert_eq!(crew.masons, 2);
        assert_eq!(crew.helpers, 3);
        assert_eq!(crew.steel_fixers, 1);
        assert_eq!(crew.carpenters, 1);
        assert_eq!(crew.total_labor_days, 5);
    }

    #[test]
    fn test_supervisors_scale_with_headcount() {
        let crew = calculate(20000.0, rules());
        // 100 + 200 + 40 + 50 = 390 trade workers → 20 supervisors
        assert_eq!(crew.trade_workers(), 390);
        assert_eq!(crew.supervisors, 20);
        assert!(crew.supervisors >= rules().supervisors.minimum);
    }

    #[test]
    fn test_supervisor_minimum_on_tiny_site() {
        let crew = calculate(1.0, rules());
        assert_eq!(crew.supervisors, 3);
        assert_eq!(crew.count(Trade::Mason), 1);
        assert_eq!(crew.total_headcount(), crew.trade_workers() + 3);
    }

    #[test]
    fn test_compact_labor_days_round_to_nearest() {
        let rules = &EstimationPreset::compact().workforce;
        // 0.65 labor-days per sq ft
        assert_eq!(calculate(1000.0, rules).total_labor_days, 650);
        assert_eq!(calculate(1001.0, rules).total_labor_days, 651);
        // 1002 × 0.65 = 651.3
        assert_eq!(calculate(1002.0, rules).total_labor_days, 651);
    }

    #[test]
    fn test_huge_area_saturates() {
        let crew = calculate(1e15, rules());
        assert_eq!(crew.masons, u32::MAX);
        assert_eq!(crew.trade_workers(), u32::MAX);
        assert_eq!(crew.total_headcount(), u32::MAX);
        assert!(crew.supervisors >= rules().supervisors.minimum);
    }

    #[test]
    fn test_counts_never_decrease_with_area() {
        let mut previous = calculate(1.0, rules());
        for step in 1..400 {
            let current = calculate(step as f64 * 37.5, rules());
            for trade in Trade::ALL {
                assert!(current.count(trade) >= previous.count(trade));
            }
            assert!(current.total_labor_days >= previous.total_labor_days);
            previous = current;
        }
    }
}
