//! # Cost Estimation
//!
//! Prices the crew and the material take-off, then adds overhead and
//! contingency.
//!
//! ## Formulas
//!
//! ```text
//! labor     = Σ billed days × daily wage × location + fixed packages × location
//! material  = Σ quantity × price / price basis × location
//! overhead  = overhead rate × (labor + material)
//! contingency = contingency rate × base
//! total     = labor + material + overhead + contingency
//! ```
//!
//! Billed days per trade depend on the preset's [`LaborPricing`]:
//!
//! - `Crew`: count × labor-days × utilization
//! - `LaborDays`: labor-days × trade share
//!
//! The contingency base is `labor + material + overhead` or
//! `labor + material`, per preset.
//!
//! ## Compression
//!
//! A requested duration (floored at the build minimum) below
//! `threshold × labor-days / reference crew` bills overtime on the labor
//! lines of compression-sensitive trades (masons and helpers in the
//! built-in presets). Other trades, fixed packages and all material costs
//! are untouched. The reference grows with labor-days, so for a fixed
//! request a larger project is never less compressed than a smaller one.

use serde::{Deserialize, Serialize};

use super::materials::MaterialBreakdown;
use super::workforce::WorkforceBreakdown;
use crate::presets::{
    CompressionPolicy, ContingencyBase, EstimationPreset, FixedLabor, LaborPricing, MaterialKind, Trade,
};
use crate::project::ProjectConfig;

/// Labor cost of one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborLine {
    pub trade: Trade,
    pub workers: u32,
    pub daily_wage: f64,
    /// Labor-days paid for this trade
    pub billed_days: f64,
    pub cost: f64,
}

/// Material cost of one tracked material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCostLine {
    pub material: MaterialKind,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub cost: f64,
}

/// Money breakdown of a project.
///
/// `total_cost` is always exactly `labor_cost + material_cost + overhead_cost + contingency`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "labor_cost": 385200.0,
///   "material_cost": 1575000.0,
///   "overhead_cost": 196020.0,
///   "contingency": 107811.0,
///   "total_cost": 2264031.0,
///   "cost_per_unit_area": 754.677,
///   "overtime_applied": false,
///   "labor_lines": [],
///   "fixed_labor_lines": [],
///   "material_lines": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub labor_cost: f64,
    pub material_cost: f64,
    pub overhead_cost: f64,
    pub contingency: f64,
    pub total_cost: f64,

    /// Total cost per unit of built-up area across all floors
    pub cost_per_unit_area: f64,

    /// Whether the overtime multiplier was applied
    pub overtime_applied: bool,

    pub labor_lines: Vec<LaborLine>,

    /// Lump-sum labor packages, location-adjusted
    #[serde(default)]
    pub fixed_labor_lines: Vec<FixedLabor>,

    pub material_lines: Vec<MaterialCostLine>,
}

/// Duration the overtime test measures a request against
pub fn reference_days(labor_days: u32, policy: &CompressionPolicy) -> f64 {
    labor_days as f64 / policy.reference_crew
}

/// Whether a requested duration is short enough to bill overtime.
///
/// Unconstrained projects never pay overtime.
pub fn is_compressed(committed_days: Option<u32>, labor_days: u32, policy: &CompressionPolicy) -> bool {
    committed_days.is_some_and(|days| (days as f64) < policy.threshold * reference_days(labor_days, policy))
}

/// Price a project.
pub fn calculate(
    config: &ProjectConfig,
    workforce: &WorkforceBreakdown,
    materials: &MaterialBreakdown,
    preset: &EstimationPreset,
) -> CostBreakdown {
    let rules = &preset.cost;
    let location = rules.locations.for_tier(config.location);
    let committed_days = config
        .duration_constraint_days
        .map(|days| days.max(preset.timeline.min_total_days));
    let overtime_applied = is_compressed(committed_days, workforce.total_labor_days, &rules.compression);
    let labor_days = workforce.total_labor_days as f64;

    let labor_lines: Vec<LaborLine> = Trade::ALL
        .iter()
        .map(|&trade| {
            let workers = workforce.count(trade);
            let daily_wage = config.wages.rate(trade);
            let billed_days = match &rules.labor {
                LaborPricing::Crew { utilization } => workers as f64 * labor_days * utilization,
                LaborPricing::LaborDays { shares, .. } => labor_days * shares.share(trade),
            };
            let mut cost = billed_days * daily_wage * location;
            if overtime_applied && rules.compression.sensitive_trades.contains(&trade) {
                cost *= rules.compression.overtime_multiplier;
            }
            LaborLine {
                trade,
                workers,
                daily_wage,
                billed_days,
                cost,
            }
        })
        .collect();

    let fixed_labor_lines: Vec<FixedLabor> = match &rules.labor {
        LaborPricing::Crew { .. } => Vec::new(),
        LaborPricing::LaborDays { fixed, .. } => fixed
            .iter()
            .map(|package| FixedLabor {
                cost: package.cost * location,
                ..package.clone()
            })
            .collect(),
    };

    let material_lines: Vec<MaterialCostLine> = materials
        .items
        .iter()
        .map(|item| {
            let spec = preset.materials.iter().find(|s| s.material == item.material);
            let price = config
                .material_prices
                .get(&item.material)
                .copied()
                .or_else(|| spec.map(|s| s.unit_price))
                .unwrap_or(0.0);
            let basis = spec.map(|s| s.price_per_units).unwrap_or(1.0);
            MaterialCostLine {
                material: item.material,
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                cost: item.quantity * price / basis * location,
            }
        })
        .collect();

    let labor_cost: f64 = labor_lines.iter().map(|l| l.cost).sum::<f64>()
        + fixed_labor_lines.iter().map(|l| l.cost).sum::<f64>();
    let material_cost: f64 = material_lines.iter().map(|l| l.cost).sum();
    let overhead_cost = rules.overhead_rate * (labor_cost + material_cost);
    let contingency_base = match rules.contingency_base {
        ContingencyBase::LaborMaterialOverhead => labor_cost + material_cost + overhead_cost,
        ContingencyBase::LaborAndMaterial => labor_cost + material_cost,
    };
    let contingency = rules.contingency_rate * contingency_base;
    let total_cost = labor_cost + material_cost + overhead_cost + contingency;

    CostBreakdown {
        labor_cost,
        material_cost,
        overhead_cost,
        contingency,
        total_cost,
        cost_per_unit_area: total_cost / config.total_floor_area(),
        overtime_applied,
        labor_lines,
        fixed_labor_lines,
        material_lines,
    }
}
