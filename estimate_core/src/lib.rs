//! # estimate_core - Residential Construction Estimation Engine
//!
//! `estimate_core` turns a small project description (built-up area, floor
//! count, location tier, optional duration target) into a full estimate:
//! workforce, materials, phased timeline, weekly schedule, cost breakdown,
//! floor layout and advisory insights. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Data-driven**: Every coefficient lives in an [`EstimationPreset`]
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::{estimate, EstimationPreset, ProjectInput};
//! use estimate_core::units::format_inr;
//!
//! let input = ProjectInput::new(1000.0, 3, "Urban");
//! let result = estimate(&input, EstimationPreset::standard()).unwrap();
//!
//! println!("Total: {}", format_inr(result.cost.total_cost));
//! println!("Duration: {} days", result.timeline.total_days);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Raw input, normalization and the validated configuration
//! - [`presets`] - Coefficient tables and the built-in presets
//! - [`calculations`] - One module per pipeline stage
//! - [`estimate`] - The pipeline entry points
//! - [`units`] - Area units, rounding rules and currency formatting
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod estimate;
pub mod presets;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{estimate, estimate_config, ProjectResult};
pub use presets::{EstimationPreset, PresetName};
pub use project::{LocationTier, ProjectConfig, ProjectInput, RoomProgram};
