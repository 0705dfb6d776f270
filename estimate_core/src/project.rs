//! # Project Configuration
//!
//! [`ProjectInput`] is the raw, user-facing description of a build: area,
//! floors, location and optional constraints and overrides. Normalizing it
//! against an [`EstimationPreset`] yields an immutable [`ProjectConfig`],
//! the only input the estimation stages accept.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::presets::EstimationPreset;
//! use estimate_core::project::{LocationTier, ProjectInput};
//!
//! let input = ProjectInput::with_floors_label(1000.0, "G+2", "urban")
//!     .with_duration_constraint(120);
//!
//! let config = input.normalize(EstimationPreset::standard()).unwrap();
//! assert_eq!(config.floors, 3);
//! assert_eq!(config.location, LocationTier::Urban);
//! assert_eq!(config.floors_label(), "G+2");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::presets::{EstimationPreset, MaterialKind, MaterialPrices, WageOverrides, WageRates};

/// Tallest building the residential templates are meant for
pub const MAX_FLOORS: u32 = 100;

/// Largest built-up area accepted, in the preset's area unit.
///
/// Keeps every headcount and day count well inside `u32`.
pub const MAX_AREA: f64 = 10_000_000.0;

/// Location tier, each mapped to a fixed cost multiplier by the preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationTier {
    Urban,
    Suburban,
    Rural,
    Metro,
}

impl LocationTier {
    pub const ALL: [LocationTier; 4] = [
        LocationTier::Urban,
        LocationTier::Suburban,
        LocationTier::Rural,
        LocationTier::Metro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationTier::Urban => "Urban",
            LocationTier::Suburban => "Suburban",
            LocationTier::Rural => "Rural",
            LocationTier::Metro => "Metro",
        }
    }
}

impl fmt::Display for LocationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationTier {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LocationTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                EstimateError::invalid_configuration(
                    "location",
                    s,
                    "Location must be one of Urban, Suburban, Rural, Metro",
                )
            })
    }
}

/// Room program requested by the owner.
///
/// The deterministic layout honours the optional-room flags; counts are
/// passed through to enrichment collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomProgram {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub dining_room: bool,
    pub staircase: bool,
    pub balcony: bool,
    pub balcony_count: u32,
    pub parking: bool,
}

impl Default for RoomProgram {
    fn default() -> Self {
        RoomProgram {
            bedrooms: 3,
            bathrooms: 2,
            dining_room: true,
            staircase: true,
            balcony: true,
            balcony_count: 2,
            parking: true,
        }
    }
}

/// Raw project input as entered by a user or received as JSON.
///
/// ## JSON Example
///
/// ```json
/// {
///   "area": 1000.0,
///   "floors_label": "G+2",
///   "location": "Urban",
///   "duration_constraint_days": 180,
///   "wage_overrides": { "mason": 900.0 },
///   "material_price_overrides": { "Cement": 400.0 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Built-up area in the preset's area unit
    pub area: f64,

    /// Floor count including the ground floor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<i64>,

    /// Floor count as a label ("G", "G+2"); used when `floors` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors_label: Option<String>,

    pub location: String,

    /// Requested total duration; 0 or absent means unconstrained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_constraint_days: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_program: Option<RoomProgram>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wage_overrides: Option<WageOverrides>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub material_price_overrides: BTreeMap<MaterialKind, f64>,
}

impl ProjectInput {
    pub fn new(area: f64, floors: i64, location: impl Into<String>) -> Self {
        ProjectInput {
            area,
            floors: Some(floors),
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn with_floors_label(area: f64, label: impl Into<String>, location: impl Into<String>) -> Self {
        ProjectInput {
            area,
            floors_label: Some(label.into()),
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn with_duration_constraint(mut self, days: i64) -> Self {
        self.duration_constraint_days = Some(days);
        self
    }

    pub fn with_room_program(mut self, program: RoomProgram) -> Self {
        self.room_program = Some(program);
        self
    }

    pub fn with_wage_overrides(mut self, overrides: WageOverrides) -> Self {
        self.wage_overrides = Some(overrides);
        self
    }

    pub fn with_material_price(mut self, material: MaterialKind, price: f64) -> Self {
        self.material_price_overrides.insert(material, price);
        self
    }

    /// Validate the input and apply preset defaults.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when the area is not a positive finite number
    /// no larger than [`MAX_AREA`],
    /// the floor count is below one (or the label is unreadable), the
    /// location is not a known tier, the duration is negative, or an
    /// override is negative.
    pub fn normalize(&self, preset: &EstimationPreset) -> EstimateResult<ProjectConfig> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(EstimateError::invalid_configuration(
                "area",
                self.area.to_string(),
                "Built-up area must be a positive number",
            ));
        }
        if self.area > MAX_AREA {
            return Err(EstimateError::invalid_configuration(
                "area",
                self.area.to_string(),
                format!("Built-up area exceeds {} - outside residential range", MAX_AREA),
            ));
        }

        let floors = self.resolve_floors()?;
        let location: LocationTier = self.location.parse()?;

        let duration_constraint_days = match self.duration_constraint_days {
            None | Some(0) => None,
            Some(days) if days < 0 => {
                return Err(EstimateError::invalid_configuration(
                    "duration_constraint_days",
                    days.to_string(),
                    "Duration constraint cannot be negative",
                ));
            }
            Some(days) => Some(u32::try_from(days).map_err(|_| {
                EstimateError::invalid_configuration(
                    "duration_constraint_days",
                    days.to_string(),
                    "Duration constraint is out of range",
                )
            })?),
        };

        let wage_overrides = self.wage_overrides.unwrap_or_default();
        for (trade, rate) in wage_overrides.entries() {
            check_money(&format!("wage_overrides.{:?}", trade), rate)?;
        }

        let mut material_prices = preset.default_prices();
        for (material, price) in &self.material_price_overrides {
            check_money(&format!("material_price_overrides.{:?}", material), *price)?;
            if let Some(slot) = material_prices.get_mut(material) {
                *slot = *price;
            } else {
                tracing::debug!(?material, preset = %preset.name, "price override for untracked material ignored");
            }
        }

        Ok(ProjectConfig {
            area: self.area,
            floors,
            location,
            duration_constraint_days,
            room_program: self.room_program.unwrap_or_default(),
            wages: preset.wages.with_overrides(&wage_overrides),
            material_prices,
        })
    }

    fn resolve_floors(&self) -> EstimateResult<u32> {
        let floors = match (self.floors, self.floors_label.as_deref()) {
            (Some(floors), _) => floors,
            (None, Some(label)) => parse_floors_label(label).map(i64::from).ok_or_else(|| {
                EstimateError::invalid_configuration("floors_label", label, "Expected a label like 'G', 'G+2' or '3'")
            })?,
            (None, None) => {
                return Err(EstimateError::invalid_configuration(
                    "floors",
                    "none",
                    "Floor count or floors label is required",
                ));
            }
        };

        if floors < 1 {
            return Err(EstimateError::invalid_configuration(
                "floors",
                floors.to_string(),
                "At least one floor (the ground floor) is required",
            ));
        }
        if floors > MAX_FLOORS as i64 {
            return Err(EstimateError::invalid_configuration(
                "floors",
                floors.to_string(),
                format!("Floor count exceeds {} - outside residential range", MAX_FLOORS),
            ));
        }
        Ok(floors as u32)
    }
}

fn check_money(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_configuration(
            field,
            value.to_string(),
            "Rates and prices must be non-negative numbers",
        ));
    }
    Ok(())
}

/// Parse a floors label into a floor count.
///
/// `"G"` is one floor, `"G+N"` is N + 1 floors, a plain integer is taken as is.
pub fn parse_floors_label(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.eq_ignore_ascii_case("g") {
        return Some(1);
    }
    if let Some(rest) = label.strip_prefix('G').or_else(|| label.strip_prefix('g')) {
        let upper = rest.trim_start().strip_prefix('+')?;
        return upper.trim().parse::<u32>().ok().and_then(|n| n.checked_add(1));
    }
    label.parse::<u32>().ok().filter(|n| *n >= 1)
}

/// Label for a floor count: 1 → "G", 3 → "G+2"
pub fn floors_label(floors: u32) -> String {
    if floors <= 1 {
        "G".to_string()
    } else {
        format!("G+{}", floors - 1)
    }
}

/// Validated, immutable project configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Built-up area in the preset's area unit
    pub area: f64,

    /// Floor count including the ground floor (≥ 1)
    pub floors: u32,

    pub location: LocationTier,

    /// Requested total duration, if any
    pub duration_constraint_days: Option<u32>,

    pub room_program: RoomProgram,

    /// Daily wages after user overrides
    pub wages: WageRates,

    /// Material unit prices after user overrides
    pub material_prices: MaterialPrices,
}

impl ProjectConfig {
    pub fn floors_label(&self) -> String {
        floors_label(self.floors)
    }

    /// Built-up area summed over all floors (basis of the unit rate)
    pub fn total_floor_area(&self) -> f64 {
        self.area * self.floors as f64
    }

    /// Area allotted to each floor by the layout generator
    pub fn area_per_floor(&self) -> f64 {
        self.area / self.floors as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> &'static EstimationPreset {
        EstimationPreset::standard()
    }

    #[test]
    fn test_normalize_defaults() {
        let config = ProjectInput::new(1000.0, 3, "Urban").normalize(standard()).unwrap();
        assert_eq!(config.floors, 3);
        assert_eq!(config.duration_constraint_days, None);
        assert_eq!(config.room_program, RoomProgram::default());
        assert_eq!(config.wages, standard().wages);
        assert_eq!(config.material_prices, standard().default_prices());
    }

    #[test]
    fn test_invalid_area() {
        for area in [0.0, -10.0, f64::NAN, f64::INFINITY, MAX_AREA + 1.0, 1e12] {
            let err = ProjectInput::new(area, 1, "Urban").normalize(standard()).unwrap_err();
            match err {
                EstimateError::InvalidConfiguration { field, .. } => assert_eq!(field, "area"),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn test_area_limit_inclusive() {
        let config = ProjectInput::new(MAX_AREA, 1, "Urban").normalize(standard()).unwrap();
        assert_eq!(config.area, MAX_AREA);
    }

    #[test]
    fn test_invalid_floors() {
        assert!(ProjectInput::new(100.0, 0, "Urban").normalize(standard()).is_err());
        assert!(ProjectInput::new(100.0, -2, "Urban").normalize(standard()).is_err());
        assert!(ProjectInput::new(100.0, 101, "Urban").normalize(standard()).is_err());
        let missing = ProjectInput {
            area: 100.0,
            location: "Urban".to_string(),
            ..Default::default()
        };
        assert!(missing.normalize(standard()).is_err());
    }

    #[test]
    fn test_unknown_location() {
        let err = ProjectInput::new(100.0, 1, "Lunar Colony").normalize(standard()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_location_case_insensitive() {
        assert_eq!("  metro ".parse::<LocationTier>().unwrap(), LocationTier::Metro);
        assert_eq!("SUBURBAN".parse::<LocationTier>().unwrap(), LocationTier::Suburban);
    }

    #[test]
    fn test_duration_constraint_handling() {
        let zero = ProjectInput::new(100.0, 1, "Rural").with_duration_constraint(0);
        assert_eq!(zero.normalize(standard()).unwrap().duration_constraint_days, None);

        let set = ProjectInput::new(100.0, 1, "Rural").with_duration_constraint(45);
        assert_eq!(set.normalize(standard()).unwrap().duration_constraint_days, Some(45));

        let negative = ProjectInput::new(100.0, 1, "Rural").with_duration_constraint(-5);
        assert!(negative.normalize(standard()).is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let input = ProjectInput::new(100.0, 1, "Urban")
            .with_wage_overrides(WageOverrides {
                helper: Some(600.0),
                ..Default::default()
            })
            .with_material_price(MaterialKind::Cement, 410.0)
            .with_material_price(MaterialKind::Aggregates, 60.0);
        let config = input.normalize(standard()).unwrap();
        assert_eq!(config.wages.helper, 600.0);
        assert_eq!(config.wages.mason, standard().wages.mason);
        assert_eq!(config.material_prices[&MaterialKind::Cement], 410.0);
        // Standard preset does not track aggregates
        assert!(!config.material_prices.contains_key(&MaterialKind::Aggregates));
    }

    #[test]
    fn test_negative_override_rejected() {
        let input = ProjectInput::new(100.0, 1, "Urban").with_material_price(MaterialKind::Steel, -1.0);
        assert!(input.normalize(standard()).is_err());
    }

    #[test]
    fn test_floors_labels() {
        assert_eq!(parse_floors_label("G"), Some(1));
        assert_eq!(parse_floors_label("g+2"), Some(3));
        assert_eq!(parse_floors_label("G + 4"), Some(5));
        assert_eq!(parse_floors_label("3"), Some(3));
        assert_eq!(parse_floors_label("0"), None);
        assert_eq!(parse_floors_label("ground"), None);
        assert_eq!(floors_label(1), "G");
        assert_eq!(floors_label(3), "G+2");
    }

    #[test]
    fn test_floors_value_wins_over_label() {
        let mut input = ProjectInput::with_floors_label(100.0, "G+4", "Urban");
        input.floors = Some(2);
        assert_eq!(input.normalize(standard()).unwrap().floors, 2);
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "area": 1000.0,
            "floors_label": "G+2",
            "location": "Urban",
            "wage_overrides": { "mason": 900.0 },
            "material_price_overrides": { "Cement": 400.0 }
        }"#;
        let input: ProjectInput = serde_json::from_str(json).unwrap();
        let config = input.normalize(standard()).unwrap();
        assert_eq!(config.floors, 3);
        assert_eq!(config.wages.mason, 900.0);
        assert_eq!(config.material_prices[&MaterialKind::Cement], 400.0);
    }
}
