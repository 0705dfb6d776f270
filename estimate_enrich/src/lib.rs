//! # estimate_enrich - Optional Generative Enrichment
//!
//! Layers richer layouts and insights from an external generator over a
//! finished [`ProjectResult`](estimate_core::ProjectResult). The engine's
//! deterministic output is always the fallback: a missing provider, a
//! failure, a timeout or a response that does not validate leaves the
//! deterministic part in place.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::{estimate, EstimationPreset, ProjectInput};
//! use estimate_enrich::{enrich, EnrichOptions, MockEnricher, Source};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let result = estimate(&ProjectInput::new(1000.0, 3, "Urban"), EstimationPreset::standard()).unwrap();
//!
//! // A provider with nothing queued fails both calls
//! let provider = MockEnricher::new();
//! let enriched = runtime.block_on(enrich(result, Some(&provider), &EnrichOptions::default()));
//!
//! assert_eq!(enriched.layout_source, Source::Deterministic);
//! assert_eq!(enriched.notices.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`provider`] - The capability trait
//! - [`orchestrator`] - Concurrent, time-bounded enrichment with fallback
//! - [`validate`] - Acceptance checks for provider output
//! - [`generative`] - Prompt-based provider over any text generator
//! - [`mock`] - Scripted provider

pub mod error;
pub mod generative;
pub mod mock;
pub mod orchestrator;
pub mod provider;
pub mod request;
pub mod validate;

pub use error::EnrichmentError;
pub use generative::{GenerativeEnricher, TextGenerator};
pub use mock::{MockEnricher, MockReply};
pub use orchestrator::{enrich, EnrichOptions, EnrichedResult, Notice, Source};
pub use provider::EnrichmentProvider;
pub use request::EnrichmentRequest;
