//! Payload handed to enrichment providers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use estimate_core::{ProjectConfig, ProjectResult};

/// One enrichment round for a finished estimate.
///
/// Both the layout and the insight call of a round share the same
/// `request_id`, so provider logs can be correlated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub request_id: Uuid,
    pub config: ProjectConfig,
    pub result: ProjectResult,
}

impl EnrichmentRequest {
    pub fn new(result: &ProjectResult) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            config: result.config.clone(),
            result: result.clone(),
        }
    }

    /// Serialized configuration, as sent to remote services
    pub fn config_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.config)
    }

    /// Serialized cost and workforce summary for insight prompts
    pub fn estimation_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&serde_json::json!({
            "area_unit": self.result.area_unit,
            "workforce": self.result.workforce,
            "materials": self.result.materials,
            "cost": {
                "labor_cost": self.result.cost.labor_cost,
                "material_cost": self.result.cost.material_cost,
                "overhead_cost": self.result.cost.overhead_cost,
                "contingency": self.result.cost.contingency,
                "total_cost": self.result.cost.total_cost,
                "cost_per_unit_area": self.result.cost.cost_per_unit_area,
            },
            "total_days": self.result.timeline.total_days,
        }))
    }
}
