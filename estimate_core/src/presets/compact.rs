//! Compact preset: built-up area in square feet, thumb rules per square foot.
//!
//! Effective area grows by 12% per additional floor instead of scaling
//! linearly with floor count. Labor is sized from 0.65 labor-days per square
//! foot, rounded to the nearest day; trade granularities are expressed per
//! square foot of effective area (one mason per 60 labor-days, one helper
//! per 30, one steel fixer per 120).
//!
//! Labor is priced per labor-day rather than per head:
//!
//! | Line                | Billed labor-days | Wage |
//! |---------------------|-------------------|------|
//! | Masons              | 1.0 × labor-days  | 850  |
//! | Helpers             | 1.5 × labor-days  | 550  |
//! | Steel fixers        | 0.2 × labor-days  | 950  |
//! | Plumbing/Electrical | fixed 85,000      |      |
//!
//! Contingency is taken on labor + material only.

use super::{
    standard, ContingencyBase, CostRules, EffectiveAreaRule, EstimationPreset, FixedLabor,
    LaborPricing, LayoutRules, MaterialKind, MaterialSpec, PhaseCatalog, PhaseTemplate,
    SupervisorRule, TimelineRules, TradeCoefficients, TradeShares, WageRates, WorkforceRules,
};
use crate::units::{AreaUnit, Rounding};

/// Labor-days per square foot of effective area
const LABOR_DAYS_PER_SQFT: f64 = 0.65;

pub(crate) fn preset() -> EstimationPreset {
    EstimationPreset {
        name: "compact".to_string(),
        area_unit: AreaUnit::SquareFeet,
        effective_area: EffectiveAreaRule::FloorMultiplier {
            per_additional_floor: 0.12,
        },
        workforce: WorkforceRules {
            productivity: 1.0 / LABOR_DAYS_PER_SQFT,
            labor_day_rounding: Rounding::Nearest,
            trades: TradeCoefficients {
                mason: 60.0 / LABOR_DAYS_PER_SQFT,
                helper: 30.0 / LABOR_DAYS_PER_SQFT,
                steel_fixer: 120.0 / LABOR_DAYS_PER_SQFT,
                carpenter: 120.0 / LABOR_DAYS_PER_SQFT,
            },
            supervisors: SupervisorRule {
                minimum: 2,
                span_of_control: 20,
            },
        },
        materials: vec![
            material(MaterialKind::Cement, "Cement", "Bags", 0.4, 420.0),
            material(MaterialKind::Steel, "Steel (TMT)", "Kg", 3.8, 72.0),
            material(MaterialKind::Sand, "Sand/M-Sand", "Cu Ft", 1.6, 65.0),
            material(MaterialKind::Bricks, "Red Bricks", "Pcs", 11.0, 9.0),
            material(MaterialKind::Aggregates, "Aggregates", "Cu Ft", 1.3, 55.0),
        ],
        wages: WageRates {
            mason: 850.0,
            helper: 550.0,
            steel_fixer: 950.0,
            carpenter: 850.0,
            supervisor: 1200.0,
        },
        timeline: TimelineRules {
            team_size: 5.0,
            min_total_days: 30,
            min_phase_days: 3,
            catalog: PhaseCatalog {
                before_floors: vec![PhaseTemplate::new("Foundation & Excavation", 0.20, 15)],
                per_floor: Vec::new(),
                after_floors: vec![
                    PhaseTemplate::new("Structural Work & Masonry", 0.35, 25).after("Foundation & Excavation"),
                    PhaseTemplate::new("Flooring & Concrete Work", 0.15, 20).after("Structural Work & Masonry"),
                    PhaseTemplate::new("MEP (Plumbing/Electrical)", 0.20, 10).after("Flooring & Concrete Work"),
                    PhaseTemplate::new("Finishing & Painting", 0.10, 15).after("MEP (Plumbing/Electrical)"),
                ],
            },
        },
        cost: CostRules {
            labor: LaborPricing::LaborDays {
                shares: TradeShares {
                    mason: 1.0,
                    helper: 1.5,
                    steel_fixer: 0.2,
                    carpenter: 0.0,
                    supervisor: 0.0,
                },
                fixed: vec![FixedLabor {
                    name: "Plumbing/Electrical".to_string(),
                    workers: 2,
                    days: 45,
                    cost: 85000.0,
                }],
            },
            overhead_rate: 0.08,
            contingency_rate: 0.05,
            contingency_base: ContingencyBase::LaborAndMaterial,
            compression: standard::overtime_policy(),
            locations: standard::location_multipliers(),
        },
        layout: LayoutRules {
            scale: AreaUnit::SquareFeet.feet_per_unit(),
            slack: 0.05,
            ground_floor: standard::ground_floor_rooms(),
            upper_floor: standard::upper_floor_rooms(),
        },
    }
}

fn material(kind: MaterialKind, name: &str, unit: &str, per_area: f64, unit_price: f64) -> MaterialSpec {
    MaterialSpec {
        material: kind,
        name: name.to_string(),
        unit: unit.to_string(),
        per_area,
        rounding: Rounding::Nearest,
        unit_price,
        price_per_units: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_tracks_aggregates_not_water() {
        let preset = preset();
        assert!(preset.materials.iter().any(|m| m.material == MaterialKind::Aggregates));
        assert!(!preset.materials.iter().any(|m| m.material == MaterialKind::Water));
    }

    #[test]
    fn test_compact_labor_productivity() {
        let preset = preset();
        // 1000 sq ft → 650 labor-days
        let labor_days = 1000.0 / preset.workforce.productivity;
        assert!((labor_days - 650.0).abs() < 1e-6);
        assert_eq!(preset.workforce.labor_day_rounding, Rounding::Nearest);
    }

    #[test]
    fn test_compact_bills_per_labor_day() {
        match preset().cost.labor {
            LaborPricing::LaborDays { shares, fixed } => {
                assert_eq!(shares.helper, 1.5);
                assert_eq!(fixed.len(), 1);
                assert_eq!(fixed[0].cost, 85000.0);
            }
            other => panic!("unexpected labor pricing {:?}", other),
        }
    }

    #[test]
    fn test_compact_catalog_is_sequential() {
        let catalog = preset().timeline.catalog;
        let total_share: f64 = catalog
            .before_floors
            .iter()
            .chain(catalog.after_floors.iter())
            .map(|p| p.share)
            .sum();
        assert!((total_share - 1.0).abs() < 1e-9);
        assert!(catalog.per_floor.is_empty());
    }
}
