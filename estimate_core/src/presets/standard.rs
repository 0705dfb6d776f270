//! Standard preset: built-up area in square yards, effective area = area × floors.
//!
//! Thumb rules per square yard of effective area:
//!
//! | Material | Qty / sq yd | Rounding | Default price        |
//! |----------|-------------|----------|----------------------|
//! | Cement   | 0.4 bags    | up       | 380 per bag          |
//! | Steel    | 0.004 t     | 0.01 t   | 55,000 per ton       |
//! | Sand     | 0.04 m³     | 0.1 m³   | 1,800 per m³         |
//! | Water    | 0.5 kL      | up       | 50 per kL            |
//! | Bricks   | 8 pcs       | up       | 7,000 per 1,000      |

use super::{
    CompressionPolicy, ContingencyBase, CostRules, EffectiveAreaRule, EstimationPreset, LaborPricing,
    LayoutRules, LocationMultipliers, MaterialKind, MaterialSpec, PhaseCatalog, PhaseTemplate,
    RoomKind, RoomTemplate, SupervisorRule, TimelineRules, Trade, TradeCoefficients, WageRates,
    WorkforceRules,
};
use crate::units::{AreaUnit, Rounding};

pub(crate) fn preset() -> EstimationPreset {
    EstimationPreset {
        name: "standard".to_string(),
        area_unit: AreaUnit::SquareYards,
        effective_area: EffectiveAreaRule::FloorCount,
        workforce: WorkforceRules {
            productivity: 50.0,
            labor_day_rounding: Rounding::Ceil,
            trades: TradeCoefficients {
                mason: 200.0,
                helper: 100.0,
                steel_fixer: 500.0,
                carpenter: 400.0,
            },
            supervisors: SupervisorRule {
                minimum: 3,
                span_of_control: 20,
            },
        },
        materials: vec![
            material(MaterialKind::Cement, "Cement", "bags", 0.4, Rounding::Ceil, 380.0, 1.0),
            material(MaterialKind::Steel, "Steel", "tons", 0.004, Rounding::Decimals(2), 55000.0, 1.0),
            material(MaterialKind::Sand, "Sand", "cubic meters", 0.04, Rounding::Decimals(1), 1800.0, 1.0),
            material(MaterialKind::Water, "Water", "kiloliters", 0.5, Rounding::Ceil, 50.0, 1.0),
            material(MaterialKind::Bricks, "Bricks", "bricks", 8.0, Rounding::Ceil, 7000.0, 1000.0),
        ],
        wages: WageRates {
            mason: 800.0,
            helper: 500.0,
            steel_fixer: 900.0,
            carpenter: 850.0,
            supervisor: 1200.0,
        },
        timeline: TimelineRules {
            team_size: 5.0,
            min_total_days: 30,
            min_phase_days: 3,
            catalog: phase_catalog(),
        },
        cost: CostRules {
            labor: LaborPricing::Crew { utilization: 0.15 },
            overhead_rate: 0.10,
            contingency_rate: 0.05,
            contingency_base: ContingencyBase::LaborMaterialOverhead,
            compression: overtime_policy(),
            locations: location_multipliers(),
        },
        layout: LayoutRules {
            scale: AreaUnit::SquareYards.feet_per_unit(),
            slack: 0.05,
            ground_floor: ground_floor_rooms(),
            upper_floor: upper_floor_rooms(),
        },
    }
}

fn material(
    kind: MaterialKind,
    name: &str,
    unit: &str,
    per_area: f64,
    rounding: Rounding,
    unit_price: f64,
    price_per_units: f64,
) -> MaterialSpec {
    MaterialSpec {
        material: kind,
        name: name.to_string(),
        unit: unit.to_string(),
        per_area,
        rounding,
        unit_price,
        price_per_units,
    }
}

fn phase_catalog() -> PhaseCatalog {
    PhaseCatalog {
        before_floors: vec![
            PhaseTemplate::new("Site Preparation", 0.05, 8),
            PhaseTemplate::new("Foundation", 0.12, 15).after("Site Preparation"),
        ],
        per_floor: vec![
            PhaseTemplate::new("Columns & Beams", 0.08, 12).after("Foundation"),
            PhaseTemplate::new("Slab Casting", 0.06, 18).after("Columns & Beams"),
        ],
        after_floors: vec![
            PhaseTemplate::new("Brickwork", 0.10, 14).after("Slab Casting"),
            PhaseTemplate::new("Electrical", 0.07, 8).after("Brickwork"),
            PhaseTemplate::new("Plumbing", 0.07, 8).after("Brickwork"),
            PhaseTemplate::new("Plastering", 0.08, 10)
                .after("Electrical")
                .after("Plumbing"),
            PhaseTemplate::new("Painting", 0.06, 8).after("Plastering"),
            PhaseTemplate::new("Finishing & Fixtures", 0.05, 6).after("Painting"),
            PhaseTemplate::new("Handover", 0.02, 4).after("Finishing & Fixtures"),
        ],
    }
}

/// Rush work on masonry crews is paid at time-and-a-quarter.
pub(crate) fn overtime_policy() -> CompressionPolicy {
    CompressionPolicy {
        threshold: 0.8,
        reference_crew: 5.0,
        overtime_multiplier: 1.25,
        sensitive_trades: vec![Trade::Mason, Trade::Helper],
    }
}

pub(crate) fn location_multipliers() -> LocationMultipliers {
    LocationMultipliers {
        urban: 1.0,
        suburban: 0.85,
        rural: 0.7,
        metro: 1.25,
    }
}

/// Ground floor: living, kitchen, dining, one bedroom, bath, stairs.
///
/// Living room and bedroom share the left column; kitchen over dining in
/// the middle; bath over staircase on the right.
pub(crate) fn ground_floor_rooms() -> Vec<RoomTemplate> {
    vec![
        RoomTemplate::new(RoomKind::LivingRoom, 0.0, 0.0, 0.35, 0.4),
        RoomTemplate::new(RoomKind::Kitchen, 0.35, 0.0, 0.25, 0.3),
        RoomTemplate::new(RoomKind::Dining, 0.35, 0.3, 0.25, 0.3),
        RoomTemplate::new(RoomKind::Bedroom, 0.0, 0.4, 0.35, 0.35),
        RoomTemplate::new(RoomKind::Bathroom, 0.6, 0.0, 0.15, 0.2),
        RoomTemplate::new(RoomKind::Staircase, 0.6, 0.2, 0.15, 0.25),
    ]
}

/// Upper floors: two bedrooms over a bath, stair core and balcony strip.
pub(crate) fn upper_floor_rooms() -> Vec<RoomTemplate> {
    vec![
        RoomTemplate::new(RoomKind::Bedroom, 0.0, 0.0, 0.45, 0.45),
        RoomTemplate::new(RoomKind::Bedroom, 0.45, 0.0, 0.45, 0.45),
        RoomTemplate::new(RoomKind::Bathroom, 0.0, 0.45, 0.25, 0.25),
        RoomTemplate::new(RoomKind::Balcony, 0.45, 0.45, 0.3, 0.2),
        RoomTemplate::new(RoomKind::Staircase, 0.25, 0.45, 0.15, 0.25),
    ]
}
