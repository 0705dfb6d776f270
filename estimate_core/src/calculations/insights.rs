//! # Advisory Insights
//!
//! Twelve fixed advisories, templated with the project's numbers. There is
//! no branching beyond interpolation: every project gets the same twelve
//! titles in the same order.
//!
//! Insights from other sources (see the enrichment crate) share the
//! [`Insight`] shape and must pass [`validate`] before they replace these.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ceil_count;
use super::cost::CostBreakdown;
use super::timeline::TimelinePlan;
use super::workforce::WorkforceBreakdown;
use crate::presets::CostRules;
use crate::project::ProjectConfig;
use crate::units::format_inr;

/// Number of deterministic insights
pub const INSIGHT_COUNT: usize = 12;

/// Highest allowed insight score
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsightCategory {
    Budget,
    Timeline,
    Sustainability,
    Optimization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One advisory.
///
/// ## JSON Example
///
/// ```json
/// {
///   "title": "Contingency Buffer",
///   "category": "Budget",
///   "severity": "medium",
///   "score": 7.0,
///   "recommendation": "Maintain 5% contingency buffer (₹1,07,811) for unexpected costs."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub category: InsightCategory,
    pub severity: Severity,

    /// Importance on a 0-10 scale
    pub score: f64,

    pub recommendation: String,
}

impl Insight {
    fn new(
        title: &str,
        category: InsightCategory,
        severity: Severity,
        score: f64,
        recommendation: String,
    ) -> Self {
        Insight {
            title: title.to_string(),
            category,
            severity,
            score,
            recommendation,
        }
    }
}

/// Reason a list of insights is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightViolation {
    #[error("No insights provided")]
    Empty,

    #[error("Insight {index} has an empty title")]
    MissingTitle { index: usize },

    #[error("Insight {index} has an empty recommendation")]
    MissingRecommendation { index: usize },

    #[error("Insight {index} score {score} is outside 0-10")]
    ScoreOutOfRange { index: usize, score: f64 },
}

/// Build the twelve deterministic insights.
pub fn generate(
    config: &ProjectConfig,
    workforce: &WorkforceBreakdown,
    timeline: &TimelinePlan,
    cost: &CostBreakdown,
    rules: &CostRules,
) -> Vec<Insight> {
    use InsightCategory::*;
    use Severity::*;

    let days = timeline.total_days;
    vec![
        Insight::new(
            "Weather Delays",
            Timeline,
            Medium,
            6.5,
            format!(
                "Weather delays may extend the {}-day timeline by 10-15%. Plan monsoon contingency.",
                days
            ),
        ),
        Insight::new(
            "Material Price Volatility",
            Budget,
            High,
            7.5,
            format!(
                "Material price fluctuations could impact the {} budget. Lock vendor rates early.",
                format_inr(cost.total_cost)
            ),
        ),
        Insight::new(
            "Labour Availability",
            Timeline,
            Medium,
            6.0,
            format!(
                "Skilled labour availability in {} area needs monitoring. Pre-book specialist teams.",
                config.location
            ),
        ),
        Insight::new(
            "Bulk Procurement",
            Budget,
            Medium,
            7.0,
            format!(
                "Bulk material procurement can save 8-12% on material costs ({} potential savings).",
                format_inr(cost.material_cost * 0.1)
            ),
        ),
        Insight::new(
            "Local Sourcing",
            Sustainability,
            Low,
            5.5,
            "Local material sourcing reduces transportation costs by an estimated 5-8%.".to_string(),
        ),
        Insight::new(
            "Foundation Critical Path",
            Timeline,
            High,
            8.0,
            "Foundation work is critical path and cannot be rushed without quality compromise.".to_string(),
        ),
        Insight::new(
            "Parallel MEP Work",
            Optimization,
            Medium,
            6.5,
            format!(
                "Parallel execution of electrical and plumbing work saves {} days.",
                ceil_count(days as f64 * 0.05)
            ),
        ),
        Insight::new(
            "Labour Scheduling",
            Optimization,
            Medium,
            6.0,
            format!(
                "{} total labour days require careful scheduling to avoid idle time.",
                workforce.total_labor_days
            ),
        ),
        Insight::new(
            "Supervision Ratio",
            Optimization,
            Low,
            5.0,
            format!(
                "Supervisor-to-worker ratio of {}:{} is within optimal range.",
                workforce.supervisors,
                workforce.trade_workers()
            ),
        ),
        Insight::new(
            "Contingency Buffer",
            Budget,
            Medium,
            7.0,
            format!(
                "Maintain {}% contingency buffer ({}) for unexpected costs.",
                rules.contingency_rate * 100.0,
                format_inr(cost.contingency)
            ),
        ),
        Insight::new(
            "Quality Checks",
            Optimization,
            Low,
            5.5,
            "Regular quality checks at each construction phase prevent costly rework.".to_string(),
        ),
        Insight::new(
            "Code Compliance",
            Timeline,
            Medium,
            6.0,
            format!(
                "Ensure compliance with local building codes for {} construction.",
                config.floors_label()
            ),
        ),
    ]
}

/// Check the shape of an insight list.
pub fn validate(insights: &[Insight]) -> Result<(), InsightViolation> {
    if insights.is_empty() {
        return Err(InsightViolation::Empty);
    }
    for (index, insight) in insights.iter().enumerate() {
        if insight.title.trim().is_empty() {
            return Err(InsightViolation::MissingTitle { index });
        }
        if insight.recommendation.trim().is_empty() {
            return Err(InsightViolation::MissingRecommendation { index });
        }
        if !insight.score.is_finite() || !(0.0..=MAX_SCORE).contains(&insight.score) {
            return Err(InsightViolation::ScoreOutOfRange {
                index,
                score: insight.score,
            });
        }
    }
    Ok(())
}
