//! # Prompt-Based Provider
//!
//! Adapts any text generator (a hosted model, a local model, a recorded
//! transcript) into an [`EnrichmentProvider`]. The provider writes a prompt
//! describing the project and the JSON shape it expects back, then parses
//! the reply with serde_json. Markdown code fences around the JSON are
//! tolerated.
//!
//! Generated layouts only supply room rectangles and an explanation; floor
//! labels and dimensions are taken from the deterministic plan so the result
//! can be validated against it.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use estimate_core::calculations::{FloorLayout, Insight, LayoutPlan, Room};
use estimate_core::units::format_inr;

use crate::error::EnrichmentError;
use crate::provider::EnrichmentProvider;
use crate::request::EnrichmentRequest;

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, EnrichmentError>;
}

pub struct GenerativeEnricher<G> {
    generator: G,
    insight_count: usize,
}

impl<G: TextGenerator> GenerativeEnricher<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            insight_count: 4,
        }
    }

    pub fn with_insight_count(mut self, count: usize) -> Self {
        self.insight_count = count.max(1);
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedLayout {
    floors: Vec<GeneratedFloor>,
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedFloor {
    rooms: Vec<Room>,
}

/// Build the layout prompt for a request.
pub fn layout_prompt(request: &EnrichmentRequest) -> String {
    let config = &request.config;
    let program = &config.room_program;
    let reference = &request.result.layout;
    let side = reference.floors.first().map(|f| f.side).unwrap_or(0.0);

    format!(
        "Generate a realistic room layout for a {floors_label} house of {area} {unit} per floor.\n\
         Inputs: Floors: {floors}, Bedrooms: {bedrooms}, Bathrooms: {bathrooms}, \
         Dining: {dining}, Staircase: {staircase}, Balcony: {balcony}, Parking: {parking}.\n\
         \n\
         STRICT ARCHITECTURAL RULES:\n\
         1. Every floor is a square of side {side:.1} feet with the origin at one corner.\n\
         2. Rooms MUST NOT overlap and must stay inside the square.\n\
         3. Room areas on a floor must not exceed the floor square's area.\n\
         4. Return exactly {floors} floors, ground floor first.\n\
         5. Respond with strict JSON only, in this shape:\n\
         {{\"floors\": [{{\"rooms\": [{{\"name\": \"Living Room\", \"x\": 0, \"y\": 0, \"width\": 18, \"height\": 20}}]}}], \
         \"explanation\": \"...\"}}",
        floors_label = config.floors_label(),
        area = config.area_per_floor().round(),
        unit = request.result.area_unit.label(),
        floors = config.floors,
        bedrooms = program.bedrooms,
        bathrooms = program.bathrooms,
        dining = program.dining_room,
        staircase = program.staircase,
        balcony = program.balcony,
        parking = program.parking,
        side = side,
    )
}

/// Build the insight prompt for a request.
pub fn insights_prompt(request: &EnrichmentRequest, count: usize) -> Result<String, EnrichmentError> {
    Ok(format!(
        "Analyze Indian construction data: {config} and estimation: {estimation}.\n\
         Currency: INR (₹). The total budget is {total}.\n\
         Generate {count} structured insights for the dashboard.\n\
         Respond with a strict JSON array of objects with the fields \
         \"title\" (string), \"category\" (one of Budget, Timeline, Sustainability, Optimization), \
         \"severity\" (one of low, medium, high), \"score\" (number from 0 to 10) \
         and \"recommendation\" (string).",
        config = request.config_json()?,
        estimation = request.estimation_json()?,
        total = format_inr(request.result.cost.total_cost),
        count = count,
    ))
}

/// Strip an optional markdown code fence around a JSON reply.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    trimmed
}

/// Parse a generated layout and attach the deterministic floor frames.
pub fn parse_layout(text: &str, reference: &LayoutPlan) -> Result<LayoutPlan, EnrichmentError> {
    let generated: GeneratedLayout = serde_json::from_str(extract_json(text))?;
    if generated.floors.len() != reference.floors.len() {
        return Err(EnrichmentError::SchemaViolation {
            message: format!(
                "Expected {} floors, response has {}",
                reference.floors.len(),
                generated.floors.len()
            ),
        });
    }

    let floors = generated
        .floors
        .into_iter()
        .zip(reference.floors.iter())
        .map(|(floor, frame)| FloorLayout {
            floor: frame.floor,
            label: frame.label.clone(),
            side: frame.side,
            area_share: frame.area_share,
            allotted_area: frame.allotted_area,
            rooms: floor.rooms,
        })
        .collect();

    Ok(LayoutPlan {
        floors,
        explanation: generated.explanation,
    })
}

pub fn parse_insights(text: &str) -> Result<Vec<Insight>, EnrichmentError> {
    Ok(serde_json::from_str(extract_json(text))?)
}

#[async_trait]
impl<G: TextGenerator> EnrichmentProvider for GenerativeEnricher<G> {
    fn name(&self) -> &str {
        self.generator.name()
    }

    async fn enrich_layout(&self, request: &EnrichmentRequest) -> Result<LayoutPlan, EnrichmentError> {
        let prompt = layout_prompt(request);
        debug!(request_id = %request.request_id, chars = prompt.len(), "requesting layout");
        let reply = self.generator.generate(&prompt).await?;
        parse_layout(&reply, &request.result.layout)
    }

    async fn enrich_insights(&self, request: &EnrichmentRequest) -> Result<Vec<Insight>, EnrichmentError> {
        let prompt = insights_prompt(request, self.insight_count)?;
        debug!(request_id = %request.request_id, chars = prompt.len(), "requesting insights");
        let reply = self.generator.generate(&prompt).await?;
        parse_insights(&reply)
    }
}
