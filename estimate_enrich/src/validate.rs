//! Acceptance checks for provider output.
//!
//! A generated layout must match the deterministic plan floor for floor and
//! obey the same geometry rules; generated insights must have the shape of
//! the deterministic ones.

use estimate_core::calculations::{insights, Insight, LayoutPlan};

use crate::error::EnrichmentError;

/// Accept a generated layout if it fits the deterministic floors.
pub fn check_layout(
    candidate: LayoutPlan,
    reference: &LayoutPlan,
    slack: f64,
) -> Result<LayoutPlan, EnrichmentError> {
    candidate.validate_against(reference, slack)?;
    Ok(candidate)
}

/// Accept generated insights if every entry is well formed.
pub fn check_insights(candidate: Vec<Insight>) -> Result<Vec<Insight>, EnrichmentError> {
    insights::validate(&candidate)?;
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::calculations::{InsightCategory, Room, Severity};
    use estimate_core::{estimate, EstimationPreset, ProjectInput};

    fn reference() -> LayoutPlan {
        estimate(&ProjectInput::new(600.0, 2, "Urban"), EstimationPreset::standard())
            .unwrap()
            .layout
    }

    #[test]
    fn test_accepts_deterministic_layout() {
        let layout = reference();
        assert!(check_layout(layout.clone(), &layout, 0.05).is_ok());
    }

    #[test]
    fn test_rejects_overlapping_rooms() {
        let layout = reference();
        let mut candidate = layout.clone();
        candidate.floors[0].rooms.push(Room {
            name: "Pooja Room".to_string(),
            width: 5.0,
            height: 5.0,
            x: 1.0,
            y: 1.0,
        });
        let err = check_layout(candidate, &layout, 0.05).unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_VIOLATION");
    }

    #[test]
    fn test_insight_checks() {
        let good = vec![Insight {
            title: "Rainwater Harvesting".to_string(),
            category: InsightCategory::Sustainability,
            severity: Severity::Low,
            score: 6.0,
            recommendation: "Add a recharge pit near the parking slab.".to_string(),
        }];
        assert_eq!(check_insights(good.clone()).unwrap(), good);

        let mut bad = good;
        bad[0].score = -1.0;
        assert!(check_insights(bad).is_err());
        assert!(check_insights(Vec::new()).is_err());
    }
}
