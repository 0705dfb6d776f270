//! # Timeline Estimation
//!
//! Derives the total build duration and lays the phase catalog out on a day
//! axis.
//!
//! ## Duration
//!
//! ```text
//! teams   = max(1, trade workers / team size)
//! natural = max(minimum, ⌈labor-days / teams⌉)
//! total   = max(minimum, min(natural, constraint))
//! ```
//!
//! A constraint shorter than the natural duration compresses the schedule;
//! the minimum is never undercut regardless of the constraint.
//!
//! ## Phases
//!
//! Each phase lasts `max(min phase days, ⌈total × share⌉)`. Phases are
//! placed back to back in catalog order starting on day 1, so every phase
//! starts the day after its predecessor in the catalog ends. Dependencies
//! are recorded for display only; catalog order already respects them.
//! When the per-phase minimums add up to more than the total, the last
//! phases run past the total duration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ceil_count;
use super::workforce::WorkforceBreakdown;
use crate::presets::{PhaseCatalog, PhaseTemplate, TimelineRules};

/// One scheduled phase. Days are 1-based and `end_day` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub start_day: u32,
    pub end_day: u32,
    pub duration_days: u32,
    pub workers: u32,
    pub dependencies: Vec<String>,
}

/// Total duration and the ordered phase plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePlan {
    /// Committed total duration in days
    pub total_days: u32,
    pub total_weeks: u32,
    /// Total duration in 30-day months, one decimal
    pub total_months: f64,

    /// Duration the crew needs without a constraint
    pub natural_days: u32,

    /// Whether a duration constraint shortened the schedule
    pub compressed: bool,

    pub phases: Vec<Phase>,
}

impl TimelinePlan {
    /// Last day any phase is active (may exceed `total_days`)
    pub fn last_day(&self) -> u32 {
        self.phases.last().map(|p| p.end_day).unwrap_or(0)
    }

    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }
}

/// Duration the crew needs with no constraint, floored at the minimum.
pub fn natural_duration(workforce: &WorkforceBreakdown, rules: &TimelineRules) -> u32 {
    let teams = (workforce.trade_workers() as f64 / rules.team_size).max(1.0);
    let days = ceil_count(workforce.total_labor_days as f64 / teams);
    days.max(rules.min_total_days)
}

/// Build the timeline for a crew, an optional constraint and a floor count.
pub fn calculate(
    workforce: &WorkforceBreakdown,
    duration_constraint_days: Option<u32>,
    floors: u32,
    rules: &TimelineRules,
) -> TimelinePlan {
    let natural_days = natural_duration(workforce, rules);

    let committed = match duration_constraint_days {
        Some(constraint) if constraint < natural_days => constraint,
        _ => natural_days,
    };
    let total_days = committed.max(rules.min_total_days);

    TimelinePlan {
        total_days,
        total_weeks: total_days.div_ceil(7),
        total_months: (total_days as f64 / 30.0 * 10.0).round() / 10.0,
        natural_days,
        compressed: total_days < natural_days,
        phases: generate_phases(total_days, floors, rules),
    }
}

/// Name of a per-floor phase instance, e.g. "Floor 1 – Slab Casting"
pub fn floor_phase_name(floor: u32, template: &str) -> String {
    format!("Floor {} – {}", floor, template)
}

/// Expand the catalog for `floors` floors and assign days.
pub fn generate_phases(total_days: u32, floors: u32, rules: &TimelineRules) -> Vec<Phase> {
    let mut phases = Vec::new();
    let mut day = 1;

    for (name, template, dependencies) in expand_catalog(&rules.catalog, floors) {
        let duration = rules
            .min_phase_days
            .max(ceil_count(total_days as f64 * template.share))
            .max(1);
        phases.push(Phase {
            name,
            start_day: day,
            end_day: day.saturating_add(duration - 1),
            duration_days: duration,
            workers: template.workers,
            dependencies,
        });
        day = day.saturating_add(duration);
    }

    phases
}

/// Resolve catalog templates into concrete phase names and dependency lists.
fn expand_catalog(catalog: &PhaseCatalog, floors: u32) -> Vec<(String, &PhaseTemplate, Vec<String>)> {
    let per_floor: HashSet<&str> = catalog.per_floor.iter().map(|t| t.name.as_str()).collect();
    let last_floor = floors.saturating_sub(1);
    let mut expanded = Vec::new();

    for template in &catalog.before_floors {
        expanded.push((template.name.clone(), template, template.depends_on.clone()));
    }

    for floor in 0..floors {
        for (index, template) in catalog.per_floor.iter().enumerate() {
            let dependencies = if index == 0 && floor > 0 {
                // A floor's structure starts once the floor below is finished
                catalog
                    .per_floor
                    .last()
                    .map(|last| vec![floor_phase_name(floor - 1, &last.name)])
                    .unwrap_or_default()
            } else {
                resolve(&template.depends_on, &per_floor, floor)
            };
            expanded.push((floor_phase_name(floor, &template.name), template, dependencies));
        }
    }

    for template in &catalog.after_floors {
        let dependencies = resolve(&template.depends_on, &per_floor, last_floor);
        expanded.push((template.name.clone(), template, dependencies));
    }

    expanded
}

fn resolve(depends_on: &[String], per_floor: &HashSet<&str>, floor: u32) -> Vec<String> {
    depends_on
        .iter()
        .map(|dep| {
            if per_floor.contains(dep.as_str()) {
                floor_phase_name(floor, dep)
            } else {
                dep.clone()
            }
        })
        .collect()
}
