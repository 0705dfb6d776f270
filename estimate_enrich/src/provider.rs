use async_trait::async_trait;

use estimate_core::calculations::{Insight, LayoutPlan};

use crate::error::EnrichmentError;
use crate::request::EnrichmentRequest;

/// A source of richer layouts and insights than the deterministic engine.
///
/// Implementations return [`EnrichmentError::Unavailable`] when they cannot
/// serve a request at all. Whatever they return is validated before use.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn enrich_layout(&self, request: &EnrichmentRequest) -> Result<LayoutPlan, EnrichmentError>;

    async fn enrich_insights(&self, request: &EnrichmentRequest) -> Result<Vec<Insight>, EnrichmentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    #[async_trait]
    impl EnrichmentProvider for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        async fn enrich_layout(&self, _request: &EnrichmentRequest) -> Result<LayoutPlan, EnrichmentError> {
            Err(EnrichmentError::unavailable("offline"))
        }

        async fn enrich_insights(&self, _request: &EnrichmentRequest) -> Result<Vec<Insight>, EnrichmentError> {
            Err(EnrichmentError::unavailable("offline"))
        }
    }

    #[tokio::test]
    async fn test_provider_is_object_safe() {
        let provider: Box<dyn EnrichmentProvider> = Box::new(Offline);
        assert_eq!(provider.name(), "offline");
    }
}
