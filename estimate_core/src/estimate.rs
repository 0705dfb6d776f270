//! # Estimation Pipeline
//!
//! Runs every stage in order over one normalized configuration:
//!
//! ```text
//! normalize → workforce → materials → timeline → cost → schedule → layout → insights
//! ```
//!
//! Normalization is the only step that can fail. Once a [`ProjectConfig`]
//! exists every later stage is total, so [`estimate_config`] returns the
//! result directly.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::{estimate, EstimationPreset, ProjectInput};
//!
//! let input = ProjectInput::with_floors_label(1000.0, "G+2", "Urban");
//! let result = estimate(&input, EstimationPreset::standard()).unwrap();
//!
//! assert!(result.timeline.total_days >= 30);
//! assert_eq!(result.layout.floors.len(), 3);
//! assert_eq!(result.layout.floors[0].rooms[0].name, "Living Room");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::{
    cost, insights, materials, schedule, timeline, workforce, CostBreakdown, Insight, LayoutPlan,
    MaterialBreakdown, ScheduleWeek, TimelinePlan, WorkforceBreakdown,
};
use crate::errors::EstimateResult;
use crate::presets::EstimationPreset;
use crate::project::{ProjectConfig, ProjectInput};
use crate::units::AreaUnit;

/// Everything the engine derives for one project.
///
/// Consumers read these fields as-is; nothing here needs re-deriving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResult {
    pub config: ProjectConfig,

    /// Name of the preset that produced this result
    pub preset: String,
    pub area_unit: AreaUnit,

    /// Area the per-unit coefficients were applied to
    pub effective_area: f64,

    pub workforce: WorkforceBreakdown,
    pub materials: MaterialBreakdown,
    pub timeline: TimelinePlan,
    pub cost: CostBreakdown,
    pub schedule: Vec<ScheduleWeek>,
    pub layout: LayoutPlan,
    pub insights: Vec<Insight>,
}

/// Normalize raw input and run the full pipeline.
///
/// # Errors
///
/// `InvalidConfiguration` when the input fails normalization. No partial
/// result is produced.
pub fn estimate(input: &ProjectInput, preset: &EstimationPreset) -> EstimateResult<ProjectResult> {
    let config = input.normalize(preset)?;
    Ok(estimate_config(&config, preset))
}

/// Run the pipeline over an already-normalized configuration.
pub fn estimate_config(config: &ProjectConfig, preset: &EstimationPreset) -> ProjectResult {
    let effective_area = preset.effective_area.effective_area(config.area, config.floors);

    let workforce = workforce::calculate(effective_area, &preset.workforce);
    debug!(
        effective_area,
        trade_workers = workforce.trade_workers(),
        supervisors = workforce.supervisors,
        labor_days = workforce.total_labor_days,
        "workforce estimated"
    );

    let materials = materials::calculate(effective_area, &preset.materials);
    debug!(items = materials.items.len(), "materials estimated");

    let timeline = timeline::calculate(
        &workforce,
        config.duration_constraint_days,
        config.floors,
        &preset.timeline,
    );
    debug!(
        total_days = timeline.total_days,
        natural_days = timeline.natural_days,
        phases = timeline.phases.len(),
        "timeline planned"
    );

    let cost = cost::calculate(config, &workforce, &materials, preset);
    debug!(
        total_cost = cost.total_cost,
        overtime = cost.overtime_applied,
        "cost estimated"
    );

    let schedule = schedule::project(&timeline);
    debug!(weeks = schedule.len(), "schedule projected");

    let layout = LayoutPlan::generate(config, preset);
    debug!(floors = layout.floors.len(), "layout generated");

    let insights = insights::generate(config, &workforce, &timeline, &cost, &preset.cost);

    info!(
        preset = %preset.name,
        floors = config.floors,
        location = %config.location,
        total_days = timeline.total_days,
        total_cost = cost.total_cost,
        "estimate complete"
    );

    ProjectResult {
        config: config.clone(),
        preset: preset.name.clone(),
        area_unit: preset.area_unit,
        effective_area,
        workforce,
        materials,
        timeline,
        cost,
        schedule,
        layout,
        insights,
    }
}
