//! # Enrichment Orchestration
//!
//! Runs the layout and insight enrichments of one estimate concurrently,
//! each under its own timeout, and keeps the deterministic value for any
//! part that fails, times out or does not validate.
//!
//! ```text
//!            ┌─ enrich_layout ──── timeout ── check_layout ───┐
//! result ────┤                                                ├── EnrichedResult
//!            └─ enrich_insights ── timeout ── check_insights ─┘
//! ```
//!
//! [`enrich`] never fails. A fallback is logged with `warn!` and, unless
//! suppressed, recorded as a short-lived [`Notice`] for the user. A provider
//! that reports itself unavailable falls back without a notice.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use estimate_core::ProjectResult;

use crate::error::EnrichmentError;
use crate::provider::EnrichmentProvider;
use crate::request::EnrichmentRequest;
use crate::validate::{check_insights, check_layout};

/// Text shown when any enrichment falls back
pub const FALLBACK_NOTICE: &str = "AI generation partially failed. Using deterministic fallbacks.";

/// How long a fallback notice stays visible
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichOptions {
    /// Budget for each enrichment call
    pub timeout: Duration,

    /// Area slack allowed for generated layouts
    pub layout_slack: f64,

    /// Record a notice when a fallback is taken
    pub notify_on_fallback: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            layout_slack: 0.05,
            notify_on_fallback: true,
        }
    }
}

impl EnrichOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Suppress user notices (e.g. for the first estimate after start-up)
    pub fn quiet(mut self) -> Self {
        self.notify_on_fallback = false;
        self
    }
}

/// Where a part of an enriched result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider")]
pub enum Source {
    Deterministic,
    Generated(String),
}

/// Non-blocking message for the user, dismissed automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notice {
    fn fallback() -> Self {
        Self {
            message: FALLBACK_NOTICE.to_string(),
            dismiss_after: NOTICE_DISMISS_AFTER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedResult {
    pub result: ProjectResult,
    pub layout_source: Source,
    pub insights_source: Source,
    pub notices: Vec<Notice>,
}

impl EnrichedResult {
    fn deterministic(result: ProjectResult) -> Self {
        Self {
            result,
            layout_source: Source::Deterministic,
            insights_source: Source::Deterministic,
            notices: Vec::new(),
        }
    }
}

/// Enrich an estimate, falling back to its deterministic parts as needed.
pub async fn enrich(
    result: ProjectResult,
    provider: Option<&dyn EnrichmentProvider>,
    options: &EnrichOptions,
) -> EnrichedResult {
    let Some(provider) = provider else {
        debug!("no enrichment provider configured");
        return EnrichedResult::deterministic(result);
    };

    let request = EnrichmentRequest::new(&result);
    debug!(request_id = %request.request_id, provider = provider.name(), "enrichment started");

    let (layout, insights) = tokio::join!(
        bounded(options.timeout, provider.enrich_layout(&request)),
        bounded(options.timeout, provider.enrich_insights(&request)),
    );
    let layout = layout.and_then(|plan| check_layout(plan, &result.layout, options.layout_slack));
    let insights = insights.and_then(check_insights);

    let mut enriched = EnrichedResult::deterministic(result);
    let mut failed = false;

    match layout {
        Ok(plan) => {
            enriched.result.layout = plan;
            enriched.layout_source = Source::Generated(provider.name().to_string());
        }
        Err(err) => failed |= fallback("layout", provider.name(), &err),
    }

    match insights {
        Ok(list) => {
            enriched.result.insights = list;
            enriched.insights_source = Source::Generated(provider.name().to_string());
        }
        Err(err) => failed |= fallback("insights", provider.name(), &err),
    }

    if failed && options.notify_on_fallback {
        enriched.notices.push(Notice::fallback());
    }

    info!(
        request_id = %request.request_id,
        layout = ?enriched.layout_source,
        insights = ?enriched.insights_source,
        "enrichment finished"
    );
    enriched
}

async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, EnrichmentError>>,
) -> Result<T, EnrichmentError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(EnrichmentError::Timeout {
            seconds: timeout.as_secs(),
        }),
    }
}

/// Log a fallback; returns whether it counts as a failure.
fn fallback(part: &str, provider: &str, err: &EnrichmentError) -> bool {
    if err.is_unavailable() {
        debug!(part, provider, "{}", err);
        return false;
    }
    warn!(part, provider, code = err.error_code(), "enrichment fell back: {}", err);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use estimate_core::calculations::{Insight, InsightCategory, LayoutPlan, Severity};
    use estimate_core::{estimate, EstimationPreset, ProjectInput};

    use crate::mock::{MockEnricher, MockReply};

    fn baseline() -> ProjectResult {
        estimate(&ProjectInput::new(1000.0, 3, "Urban"), EstimationPreset::standard()).unwrap()
    }

    fn generated_insights() -> Vec<Insight> {
        vec![Insight {
            title: "Fly Ash Bricks".to_string(),
            category: InsightCategory::Sustainability,
            severity: Severity::Medium,
            score: 7.2,
            recommendation: "Switch the upper-floor partitions to fly ash bricks.".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_without_provider_returns_baseline() {
        let result = baseline();
        let enriched = enrich(result.clone(), None, &EnrichOptions::default()).await;
        assert_eq!(enriched.result, result);
        assert_eq!(enriched.layout_source, Source::Deterministic);
        assert!(enriched.notices.is_empty());
    }

    #[tokio::test]
    async fn test_valid_responses_replace_baseline() {
        let result = baseline();
        let mut layout = result.layout.clone();
        layout.explanation = "Open plan ground floor with a central stair core.".to_string();

        let mock = MockEnricher::new();
        mock.add_layout(MockReply::Value(layout.clone()));
        mock.add_insights(MockReply::Value(generated_insights()));

        let enriched = enrich(result, Some(&mock), &EnrichOptions::default()).await;
        assert_eq!(enriched.result.layout, layout);
        assert_eq!(enriched.result.insights, generated_insights());
        assert_eq!(enriched.layout_source, Source::Generated("mock".to_string()));
        assert_eq!(enriched.insights_source, Source::Generated("mock".to_string()));
        assert!(enriched.notices.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back_with_notice() {
        let result = baseline();
        let mock = MockEnricher::new();
        mock.add_layout(MockReply::Error(EnrichmentError::backend("503 Service Unavailable")));
        mock.add_insights(MockReply::Value(generated_insights()));

        let enriched = enrich(result.clone(), Some(&mock), &EnrichOptions::default()).await;
        assert_eq!(enriched.result.layout, result.layout);
        assert_eq!(enriched.layout_source, Source::Deterministic);
        assert_eq!(enriched.result.insights, generated_insights());
        assert_eq!(enriched.notices.len(), 1);
        assert_eq!(enriched.notices[0].message, FALLBACK_NOTICE);
        assert_eq!(enriched.notices[0].dismiss_after, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_invalid_payloads_fall_back() {
        let result = baseline();
        let mut wrong_floors = result.layout.clone();
        wrong_floors.floors.truncate(1);
        let mut bad_score = generated_insights();
        bad_score[0].score = 42.0;

        let mock = MockEnricher::new();
        mock.add_layout(MockReply::Value(wrong_floors));
        mock.add_insights(MockReply::Value(bad_score));

        let enriched = enrich(result.clone(), Some(&mock), &EnrichOptions::default()).await;
        assert_eq!(enriched.result, result);
        assert_eq!(enriched.notices.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_is_silent() {
        let result = baseline();
        let mock = MockEnricher::new();
        mock.add_layout(MockReply::Error(EnrichmentError::unavailable("no API key")));
        mock.add_insights(MockReply::Error(EnrichmentError::unavailable("no API key")));

        let enriched = enrich(result.clone(), Some(&mock), &EnrichOptions::default()).await;
        assert_eq!(enriched.result, result);
        assert!(enriched.notices.is_empty());
    }

    #[tokio::test]
    async fn test_quiet_suppresses_notice() {
        let mock = MockEnricher::new();
        let enriched = enrich(baseline(), Some(&mock), &EnrichOptions::default().quiet()).await;
        // Empty queues behave as backend failures
        assert_eq!(enriched.layout_source, Source::Deterministic);
        assert!(enriched.notices.is_empty());
    }

    struct Stalled;

    #[async_trait]
    impl EnrichmentProvider for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn enrich_layout(&self, _request: &EnrichmentRequest) -> Result<LayoutPlan, EnrichmentError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(EnrichmentError::backend("unreachable"))
        }

        async fn enrich_insights(&self, _request: &EnrichmentRequest) -> Result<Vec<Insight>, EnrichmentError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(EnrichmentError::backend("unreachable"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let result = baseline();
        let options = EnrichOptions::default().with_timeout(Duration::from_secs(5));
        let enriched = enrich(result.clone(), Some(&Stalled), &options).await;
        assert_eq!(enriched.result, result);
        assert_eq!(enriched.notices.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_reports_timeout() {
        let stalled = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<u32, EnrichmentError>(1)
        };
        let outcome = bounded(Duration::from_secs(2), stalled).await;
        assert_eq!(outcome, Err(EnrichmentError::Timeout { seconds: 2 }));
    }
}
