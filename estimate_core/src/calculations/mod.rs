//! # Estimation Stages
//!
//! One module per pipeline stage. Every stage is a pure, total function over
//! a normalized [`ProjectConfig`](crate::project::ProjectConfig) and the
//! outputs of earlier stages:
//!
//! - [`workforce`] - trade headcounts and total labor-days
//! - [`materials`] - material quantities from per-area thumb rules
//! - [`timeline`] - total duration and the phased, dependency-ordered plan
//! - [`cost`] - labor, material, overhead and contingency
//! - [`schedule`] - week-by-week projection of the phase plan
//! - [`layout`] - template-based room rectangles per floor
//! - [`insights`] - deterministic advisory insights
//!
//! Stages never read results from a later stage.

pub mod cost;
pub mod insights;
pub mod layout;
pub mod materials;
pub mod schedule;
pub mod timeline;
pub mod workforce;

// Re-export commonly used types
pub use cost::{CostBreakdown, LaborLine, MaterialCostLine};
pub use insights::{Insight, InsightCategory, InsightViolation, Severity};
pub use layout::{FloorLayout, LayoutPlan, LayoutViolation, Room};
pub use materials::{MaterialBreakdown, MaterialQuantity};
pub use schedule::ScheduleWeek;
pub use timeline::{Phase, TimelinePlan};
pub use workforce::WorkforceBreakdown;

/// Round a non-negative quantity up to a whole count.
///
/// Fractional workers or days are never truncated down.
pub(crate) fn ceil_count(value: f64) -> u32 {
    whole_count(value.ceil())
}

/// Convert an already-rounded quantity to a count, clamped to `0..=u32::MAX`.
pub(crate) fn whole_count(value: f64) -> u32 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, u32::MAX as f64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_count() {
        assert_eq!(ceil_count(0.0), 0);
        assert_eq!(ceil_count(0.01), 1);
        assert_eq!(ceil_count(15.0), 15);
        assert_eq!(ceil_count(15.2), 16);
        assert_eq!(ceil_count(1e20), u32::MAX);
        assert_eq!(whole_count(f64::NAN), 0);
    }
}
