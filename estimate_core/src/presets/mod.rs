//! # Estimation Presets
//!
//! Every coefficient the engine uses lives in an [`EstimationPreset`]: area
//! unit, productivity, trade granularity, material thumb rules, wage and price
//! tables, location multipliers, the phase catalog and the layout templates.
//! Nothing is read from process-wide mutable state; the engine receives a
//! preset by reference on every call.
//!
//! ## Built-in Presets
//!
//! - [`PresetName::Standard`] - square yards, per-floor structural phases,
//!   five tracked materials including water
//! - [`PresetName::Compact`] - square feet, floor-multiplier effective area,
//!   coarse five-phase catalog, aggregates instead of water
//!
//! The two presets disagree on several coefficients and rounding rules; both
//! are kept as-is rather than merged.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::presets::{EstimationPreset, PresetName};
//! use estimate_core::units::AreaUnit;
//!
//! let preset = EstimationPreset::standard();
//! assert_eq!(preset.area_unit, AreaUnit::SquareYards);
//!
//! let compact: PresetName = "compact".parse().unwrap();
//! assert_eq!(compact.preset().area_unit, AreaUnit::SquareFeet);
//!
//! // Custom tables round-trip through JSON
//! let json = serde_json::to_string(preset).unwrap();
//! let custom = EstimationPreset::from_json(&json).unwrap();
//! assert_eq!(custom.name, preset.name);
//! ```

pub mod compact;
pub mod standard;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::project::LocationTier;
use crate::units::{AreaUnit, Rounding};

/// Largest decimal precision a material quantity may be rounded to
pub const MAX_DECIMALS: u32 = 6;

static STANDARD: Lazy<EstimationPreset> = Lazy::new(standard::preset);
static COMPACT: Lazy<EstimationPreset> = Lazy::new(compact::preset);

// ============================================================================
// Trades and Materials
// ============================================================================

/// Worker trade tracked by the workforce estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trade {
    Mason,
    Helper,
    SteelFixer,
    Carpenter,
    Supervisor,
}

impl Trade {
    pub const ALL: [Trade; 5] = [
        Trade::Mason,
        Trade::Helper,
        Trade::SteelFixer,
        Trade::Carpenter,
        Trade::Supervisor,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Trade::Mason => "Masons",
            Trade::Helper => "Helpers",
            Trade::SteelFixer => "Steel Fixers",
            Trade::Carpenter => "Carpenters",
            Trade::Supervisor => "Supervisors",
        }
    }
}

/// Material tracked by the material estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Cement,
    Steel,
    Sand,
    Water,
    Bricks,
    Aggregates,
}

/// Daily wage per trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WageRates {
    pub mason: f64,
    pub helper: f64,
    pub steel_fixer: f64,
    pub carpenter: f64,
    pub supervisor: f64,
}

impl WageRates {
    /// Daily wage for one trade
    pub fn rate(&self, trade: Trade) -> f64 {
        match trade {
            Trade::Mason => self.mason,
            Trade::Helper => self.helper,
            Trade::SteelFixer => self.steel_fixer,
            Trade::Carpenter => self.carpenter,
            Trade::Supervisor => self.supervisor,
        }
    }

    /// Apply a partial override table on top of these rates
    pub fn with_overrides(&self, overrides: &WageOverrides) -> WageRates {
        WageRates {
            mason: overrides.mason.unwrap_or(self.mason),
            helper: overrides.helper.unwrap_or(self.helper),
            steel_fixer: overrides.steel_fixer.unwrap_or(self.steel_fixer),
            carpenter: overrides.carpenter.unwrap_or(self.carpenter),
            supervisor: overrides.supervisor.unwrap_or(self.supervisor),
        }
    }
}

/// Partial wage table supplied by the user; missing entries keep the preset rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WageOverrides {
    pub mason: Option<f64>,
    pub helper: Option<f64>,
    pub steel_fixer: Option<f64>,
    pub carpenter: Option<f64>,
    pub supervisor: Option<f64>,
}

impl WageOverrides {
    /// Iterate over the overrides that are set
    pub fn entries(&self) -> impl Iterator<Item = (Trade, f64)> {
        [
            (Trade::Mason, self.mason),
            (Trade::Helper, self.helper),
            (Trade::SteelFixer, self.steel_fixer),
            (Trade::Carpenter, self.carpenter),
            (Trade::Supervisor, self.supervisor),
        ]
        .into_iter()
        .filter_map(|(trade, rate)| rate.map(|r| (trade, r)))
    }
}

/// Unit prices keyed by material
pub type MaterialPrices = BTreeMap<MaterialKind, f64>;

/// Thumb rule for one tracked material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "Bricks",
///   "name": "Bricks",
///   "unit": "bricks",
///   "per_area": 8.0,
///   "rounding": "Ceil",
///   "unit_price": 7000.0,
///   "price_per_units": 1000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub material: MaterialKind,

    /// Display name (e.g., "Steel (TMT)")
    pub name: String,

    /// Quantity unit (e.g., "bags", "tons")
    pub unit: String,

    /// Quantity per unit of effective area
    pub per_area: f64,

    pub rounding: Rounding,

    /// Default price for `price_per_units` units of quantity
    pub unit_price: f64,

    /// How many quantity units the price covers (1000 for bricks priced per thousand)
    pub price_per_units: f64,
}

// ============================================================================
// Rule Tables
// ============================================================================

/// How built-up area and floor count combine into effective area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectiveAreaRule {
    /// area × floors
    FloorCount,
    /// area × (1 + (floors - 1) × per_additional_floor)
    FloorMultiplier { per_additional_floor: f64 },
}

impl EffectiveAreaRule {
    pub fn effective_area(&self, area: f64, floors: u32) -> f64 {
        match self {
            EffectiveAreaRule::FloorCount => area * floors as f64,
            EffectiveAreaRule::FloorMultiplier { per_additional_floor } => {
                area * (1.0 + floors.saturating_sub(1) as f64 * per_additional_floor)
            }
        }
    }
}

/// Effective area handled by one worker of each trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeCoefficients {
    pub mason: f64,
    pub helper: f64,
    pub steel_fixer: f64,
    pub carpenter: f64,
}

/// Supervisor staffing rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupervisorRule {
    /// Site never runs with fewer supervisors than this
    pub minimum: u32,
    /// Trade workers per supervisor
    pub span_of_control: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforceRules {
    /// Effective area processed per labor-day
    pub productivity: f64,
    /// Rounding of total labor-days, `Ceil` or `Nearest`
    pub labor_day_rounding: Rounding,
    pub trades: TradeCoefficients,
    pub supervisors: SupervisorRule,
}

/// One named phase in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTemplate {
    pub name: String,

    /// Fraction of the total duration assigned to this phase
    pub share: f64,

    /// Crew size while the phase is active
    pub workers: u32,

    /// Names of catalog templates this phase waits for
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl PhaseTemplate {
    pub fn new(name: impl Into<String>, share: f64, workers: u32) -> Self {
        PhaseTemplate {
            name: name.into(),
            share,
            workers,
            depends_on: Vec::new(),
        }
    }

    /// Add a dependency (builder pattern)
    pub fn after(mut self, dependency: impl Into<String>) -> Self {
        self.depends_on.push(dependency.into());
        self
    }
}

/// Ordered phase catalog.
///
/// `per_floor` templates repeat once per floor, in floor order, between the
/// `before_floors` and `after_floors` sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseCatalog {
    pub before_floors: Vec<PhaseTemplate>,
    #[serde(default)]
    pub per_floor: Vec<PhaseTemplate>,
    pub after_floors: Vec<PhaseTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRules {
    /// Trade workers forming one productive team
    pub team_size: f64,
    /// Irreducible minimum duration of any build
    pub min_total_days: u32,
    /// Every phase lasts at least this long
    pub min_phase_days: u32,
    pub catalog: PhaseCatalog,
}

/// Base the contingency percentage is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContingencyBase {
    LaborMaterialOverhead,
    LaborAndMaterial,
}

/// Overtime rule for compressed schedules.
///
/// The reference duration is `labor-days / reference_crew`. It only grows
/// with area, so a bigger house never drops out of overtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionPolicy {
    /// Compression applies when committed days < threshold × reference days
    pub threshold: f64,
    /// Workers assumed when turning labor-days into a reference duration
    pub reference_crew: f64,
    pub overtime_multiplier: f64,
    /// Trades whose labor cost carries the overtime multiplier
    pub sensitive_trades: Vec<Trade>,
}

/// Cost multiplier per location tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationMultipliers {
    pub urban: f64,
    pub suburban: f64,
    pub rural: f64,
    pub metro: f64,
}

impl LocationMultipliers {
    pub fn for_tier(&self, tier: LocationTier) -> f64 {
        match tier {
            LocationTier::Urban => self.urban,
            LocationTier::Suburban => self.suburban,
            LocationTier::Rural => self.rural,
            LocationTier::Metro => self.metro,
        }
    }
}

/// Labor-days billed per labor-day of effort, per trade
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeShares {
    #[serde(default)]
    pub mason: f64,
    #[serde(default)]
    pub helper: f64,
    #[serde(default)]
    pub steel_fixer: f64,
    #[serde(default)]
    pub carpenter: f64,
    #[serde(default)]
    pub supervisor: f64,
}

impl TradeShares {
    pub fn share(&self, trade: Trade) -> f64 {
        match trade {
            Trade::Mason => self.mason,
            Trade::Helper => self.helper,
            Trade::SteelFixer => self.steel_fixer,
            Trade::Carpenter => self.carpenter,
            Trade::Supervisor => self.supervisor,
        }
    }
}

/// Lump-sum labor package billed regardless of area (e.g. plumbing and electrical)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedLabor {
    pub name: String,
    pub workers: u32,
    pub days: u32,
    pub cost: f64,
}

/// How labor is priced.
///
/// ## JSON Example
///
/// ```json
/// { "Crew": { "utilization": 0.15 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaborPricing {
    /// count × wage × labor-days × utilization, per trade
    Crew {
        /// Fraction of each labor-day actually billed per worker
        utilization: f64,
    },
    /// labor-days × share × wage per trade, plus fixed packages
    LaborDays {
        shares: TradeShares,
        #[serde(default)]
        fixed: Vec<FixedLabor>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRules {
    pub labor: LaborPricing,
    pub overhead_rate: f64,
    pub contingency_rate: f64,
    pub contingency_base: ContingencyBase,
    pub compression: CompressionPolicy,
    pub locations: LocationMultipliers,
}

/// Room type placed by the layout templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    LivingRoom,
    Kitchen,
    Dining,
    Bedroom,
    Bathroom,
    Staircase,
    Balcony,
}

impl RoomKind {
    pub fn base_name(&self) -> &'static str {
        match self {
            RoomKind::LivingRoom => "Living Room",
            RoomKind::Kitchen => "Kitchen",
            RoomKind::Dining => "Dining",
            RoomKind::Bedroom => "Bedroom",
            RoomKind::Bathroom => "Bathroom",
            RoomKind::Staircase => "Staircase",
            RoomKind::Balcony => "Balcony",
        }
    }

    /// Numbered rooms carry a building-wide running index ("Bedroom 3")
    pub fn is_numbered(&self) -> bool {
        matches!(self, RoomKind::Bedroom | RoomKind::Bathroom)
    }
}

/// Room placement as fractions of the floor's bounding side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub kind: RoomKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RoomTemplate {
    pub const fn new(kind: RoomKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        RoomTemplate { kind, x, y, width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRules {
    /// Feet of bounding side per square root of floor share
    pub scale: f64,
    /// Occupied area may exceed the allotted area by this fraction
    pub slack: f64,
    pub ground_floor: Vec<RoomTemplate>,
    pub upper_floor: Vec<RoomTemplate>,
}

// ============================================================================
// Preset
// ============================================================================

/// Complete coefficient set for one deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationPreset {
    pub name: String,
    pub area_unit: AreaUnit,
    pub effective_area: EffectiveAreaRule,
    pub workforce: WorkforceRules,
    pub materials: Vec<MaterialSpec>,
    pub wages: WageRates,
    pub timeline: TimelineRules,
    pub cost: CostRules,
    pub layout: LayoutRules,
}

impl EstimationPreset {
    /// Square-yard preset with per-floor structural phases
    pub fn standard() -> &'static EstimationPreset {
        &STANDARD
    }

    /// Square-foot preset with floor-multiplier effective area
    pub fn compact() -> &'static EstimationPreset {
        &COMPACT
    }

    /// Load a custom preset from JSON
    pub fn from_json(json: &str) -> EstimateResult<EstimationPreset> {
        let preset: EstimationPreset = serde_json::from_str(json)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Default prices for every tracked material
    pub fn default_prices(&self) -> MaterialPrices {
        self.materials
            .iter()
            .map(|spec| (spec.material, spec.unit_price))
            .collect()
    }

    /// Check that divisors are positive and rates non-negative.
    pub fn validate(&self) -> EstimateResult<()> {
        let positive = [
            ("workforce.productivity", self.workforce.productivity),
            ("workforce.trades.mason", self.workforce.trades.mason),
            ("workforce.trades.helper", self.workforce.trades.helper),
            ("workforce.trades.steel_fixer", self.workforce.trades.steel_fixer),
            ("workforce.trades.carpenter", self.workforce.trades.carpenter),
            ("timeline.team_size", self.timeline.team_size),
            ("layout.scale", self.layout.scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::invalid_configuration(
                    field,
                    value.to_string(),
                    "Preset coefficient must be positive",
                ));
            }
        }
        if !matches!(self.workforce.labor_day_rounding, Rounding::Ceil | Rounding::Nearest) {
            return Err(EstimateError::invalid_configuration(
                "workforce.labor_day_rounding",
                format!("{:?}", self.workforce.labor_day_rounding),
                "Labor-days round to whole days: use Ceil or Nearest",
            ));
        }
        if self.workforce.supervisors.span_of_control == 0 {
            return Err(EstimateError::invalid_configuration(
                "workforce.supervisors.span_of_control",
                "0",
                "Span of control must be at least one worker",
            ));
        }
        for spec in &self.materials {
            if !spec.price_per_units.is_finite() || spec.price_per_units <= 0.0 {
                return Err(EstimateError::invalid_configuration(
                    format!("materials.{}.price_per_units", spec.name),
                    spec.price_per_units.to_string(),
                    "Price basis must be positive",
                ));
            }
            if let Rounding::Decimals(places) = spec.rounding {
                if places > MAX_DECIMALS {
                    return Err(EstimateError::invalid_configuration(
                        format!("materials.{}.rounding", spec.name),
                        places.to_string(),
                        format!("At most {} decimal places", MAX_DECIMALS),
                    ));
                }
            }
            if !(spec.per_area >= 0.0 && spec.unit_price >= 0.0)
                || !spec.per_area.is_finite()
                || !spec.unit_price.is_finite()
            {
                return Err(EstimateError::invalid_configuration(
                    format!("materials.{}", spec.name),
                    format!("per_area={}, unit_price={}", spec.per_area, spec.unit_price),
                    "Material coefficients must be non-negative",
                ));
            }
        }
        if self.layout.slack < 0.0 {
            return Err(EstimateError::invalid_configuration(
                "layout.slack",
                self.layout.slack.to_string(),
                "Slack cannot be negative",
            ));
        }
        self.validate_timeline()?;
        self.validate_cost()
    }

    fn validate_timeline(&self) -> EstimateResult<()> {
        let timeline = &self.timeline;
        if timeline.min_phase_days == 0 {
            return Err(EstimateError::invalid_configuration(
                "timeline.min_phase_days",
                "0",
                "Every phase must last at least one day",
            ));
        }
        if timeline.min_total_days == 0 {
            return Err(EstimateError::invalid_configuration(
                "timeline.min_total_days",
                "0",
                "Minimum build duration must be at least one day",
            ));
        }
        let catalog = &timeline.catalog;
        for template in catalog
            .before_floors
            .iter()
            .chain(catalog.per_floor.iter())
            .chain(catalog.after_floors.iter())
        {
            if !template.share.is_finite() || template.share <= 0.0 || template.share > 1.0 {
                return Err(EstimateError::invalid_configuration(
                    format!("timeline.catalog.{}.share", template.name),
                    template.share.to_string(),
                    "Phase share must be in (0, 1]",
                ));
            }
        }
        Ok(())
    }

    fn validate_cost(&self) -> EstimateResult<()> {
        let cost = &self.cost;
        let locations = &cost.locations;
        let mut non_negative = vec![
            ("cost.overhead_rate".to_string(), cost.overhead_rate),
            ("cost.contingency_rate".to_string(), cost.contingency_rate),
            ("cost.compression.threshold".to_string(), cost.compression.threshold),
            ("cost.locations.urban".to_string(), locations.urban),
            ("cost.locations.suburban".to_string(), locations.suburban),
            ("cost.locations.rural".to_string(), locations.rural),
            ("cost.locations.metro".to_string(), locations.metro),
        ];
        match &cost.labor {
            LaborPricing::Crew { utilization } => {
                non_negative.push(("cost.labor.utilization".to_string(), *utilization));
            }
            LaborPricing::LaborDays { shares, fixed } => {
                for trade in Trade::ALL {
                    non_negative.push((format!("cost.labor.shares.{:?}", trade), shares.share(trade)));
                }
                for package in fixed {
                    non_negative.push((format!("cost.labor.fixed.{}", package.name), package.cost));
                }
            }
        }
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EstimateError::invalid_configuration(
                    field,
                    value.to_string(),
                    "Rates and multipliers must be non-negative",
                ));
            }
        }

        let compression = &cost.compression;
        if !compression.reference_crew.is_finite() || compression.reference_crew <= 0.0 {
            return Err(EstimateError::invalid_configuration(
                "cost.compression.reference_crew",
                compression.reference_crew.to_string(),
                "Reference crew must be positive",
            ));
        }
        if !compression.overtime_multiplier.is_finite() || compression.overtime_multiplier < 1.0 {
            return Err(EstimateError::invalid_configuration(
                "cost.compression.overtime_multiplier",
                compression.overtime_multiplier.to_string(),
                "Overtime never makes labor cheaper",
            ));
        }
        Ok(())
    }
}

/// Name of a built-in preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    #[default]
    Standard,
    Compact,
}

impl PresetName {
    pub fn preset(&self) -> &'static EstimationPreset {
        match self {
            PresetName::Standard => EstimationPreset::standard(),
            PresetName::Compact => EstimationPreset::compact(),
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetName::Standard => write!(f, "standard"),
            PresetName::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for PresetName {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PresetName::Standard),
            "compact" => Ok(PresetName::Compact),
            other => Err(EstimateError::invalid_configuration(
                "preset",
                other,
                "Known presets are 'standard' and 'compact'",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_validate() {
        assert!(EstimationPreset::standard().validate().is_ok());
        assert!(EstimationPreset::compact().validate().is_ok());
    }

    #[test]
    fn test_preset_name_parsing() {
        assert_eq!("Standard".parse::<PresetName>().unwrap(), PresetName::Standard);
        assert_eq!(" compact ".parse::<PresetName>().unwrap(), PresetName::Compact);
        assert!("deluxe".parse::<PresetName>().is_err());
        assert_eq!(PresetName::Compact.to_string(), "compact");
    }

    #[test]
    fn test_effective_area_rules() {
        assert_eq!(EffectiveAreaRule::FloorCount.effective_area(1000.0, 3), 3000.0);
        let rule = EffectiveAreaRule::FloorMultiplier { per_additional_floor: 0.12 };
        assert!((rule.effective_area(1800.0, 1) - 1800.0).abs() < 1e-9);
        assert!((rule.effective_area(1000.0, 3) - 1240.0).abs() < 1e-9);
    }

    #[test]
    fn test_wage_overrides_merge() {
        let base = EstimationPreset::standard().wages;
        let overrides = WageOverrides {
            mason: Some(950.0),
            ..Default::default()
        };
        let merged = base.with_overrides(&overrides);
        assert_eq!(merged.mason, 950.0);
        assert_eq!(merged.helper, base.helper);
        assert_eq!(overrides.entries().count(), 1);
    }

    #[test]
    fn test_preset_json_roundtrip() {
        let preset = EstimationPreset::compact();
        let json = serde_json::to_string_pretty(preset).unwrap();
        let loaded = EstimationPreset::from_json(&json).unwrap();
        assert_eq!(&loaded, preset);
    }

    #[test]
    fn test_invalid_custom_preset_rejected() {
        let mut preset = EstimationPreset::standard().clone();
        preset.workforce.productivity = 0.0;
        let json = serde_json::to_string(&preset).unwrap();
        let err = EstimationPreset::from_json(&json).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_degenerate_tables_rejected() {
        let cases: Vec<(&str, fn(&mut EstimationPreset))> = vec![
            ("timeline.min_phase_days", |p| p.timeline.min_phase_days = 0),
            ("timeline.min_total_days", |p| p.timeline.min_total_days = 0),
            ("timeline.catalog.Site Preparation.share", |p| p.timeline.catalog.before_floors[0].share = 0.0),
            ("timeline.catalog.Handover.share", |p| {
                if let Some(last) = p.timeline.catalog.after_floors.last_mut() {
                    last.share = f64::NAN;
                }
            }),
            ("cost.locations.rural", |p| p.cost.locations.rural = -0.7),
            ("cost.overhead_rate", |p| p.cost.overhead_rate = -0.1),
            ("cost.contingency_rate", |p| p.cost.contingency_rate = f64::INFINITY),
            ("cost.labor.utilization", |p| p.cost.labor = LaborPricing::Crew { utilization: -1.0 }),
            ("cost.compression.reference_crew", |p| p.cost.compression.reference_crew = 0.0),
            ("cost.compression.overtime_multiplier", |p| p.cost.compression.overtime_multiplier = 0.5),
            ("materials.Sand.rounding", |p| p.materials[2].rounding = Rounding::Decimals(400)),
            ("workforce.labor_day_rounding", |p| p.workforce.labor_day_rounding = Rounding::Decimals(1)),
        ];

        for (expected_field, corrupt) in cases {
            let mut preset = EstimationPreset::standard().clone();
            corrupt(&mut preset);
            match preset.validate() {
                Err(EstimateError::InvalidConfiguration { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("{} not rejected: {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn test_compact_labor_shares_validated() {
        let mut preset = EstimationPreset::compact().clone();
        if let LaborPricing::LaborDays { shares, fixed } = &mut preset.cost.labor {
            shares.helper = -1.5;
            fixed.clear();
        }
        let err = preset.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_default_prices_cover_materials() {
        let preset = EstimationPreset::standard();
        let prices = preset.default_prices();
        assert_eq!(prices.len(), preset.materials.len());
        assert_eq!(prices[&MaterialKind::Steel], 55000.0);
    }
}
