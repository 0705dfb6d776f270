//! # Weekly Schedule
//!
//! Re-projects the phase plan onto calendar weeks. Week `w` covers days
//! `(w-1)·7 + 1 ..= w·7`; a phase is active in a week when its day range
//! intersects that window. Weeks with no active phase are left out.

use serde::{Deserialize, Serialize};

use super::timeline::TimelinePlan;

/// Phases active in one week.
///
/// ## JSON Example
///
/// ```json
/// {
///   "week": 2,
///   "activities": ["Site Preparation", "Foundation"],
///   "phase": "Foundation",
///   "workers_needed": 15
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWeek {
    pub week: u32,

    /// Active phases in catalog order
    pub activities: Vec<String>,

    /// Last active phase in catalog order
    pub phase: String,

    /// Largest crew among the active phases
    pub workers_needed: u32,
}

/// Project the timeline onto weeks `1..=total_weeks`.
pub fn project(timeline: &TimelinePlan) -> Vec<ScheduleWeek> {
    (1..=timeline.total_weeks)
        .filter_map(|week| {
            let window_start = (week - 1) * 7 + 1;
            let window_end = week * 7;

            let active: Vec<_> = timeline
                .phases
                .iter()
                .filter(|p| p.start_day <= window_end && p.end_day >= window_start)
                .collect();

            let last = active.last()?;
            Some(ScheduleWeek {
                week,
                activities: active.iter().map(|p| p.name.clone()).collect(),
                phase: last.name.clone(),
                workers_needed: active.iter().map(|p| p.workers).max().unwrap_or(0),
            })
        })
        .collect()
}
