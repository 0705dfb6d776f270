//! Scripted provider for tests and offline demos.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use estimate_core::calculations::{Insight, LayoutPlan};

use crate::error::EnrichmentError;
use crate::provider::EnrichmentProvider;
use crate::request::EnrichmentRequest;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Value(T),
    Error(EnrichmentError),
}

/// Provider that answers from queues, one entry per call.
///
/// An empty queue answers with a backend error.
pub struct MockEnricher {
    name: String,
    layouts: Mutex<VecDeque<MockReply<LayoutPlan>>>,
    insights: Mutex<VecDeque<MockReply<Vec<Insight>>>>,
}

impl MockEnricher {
    pub fn new() -> Self {
        Self::with_name("mock")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layouts: Mutex::new(VecDeque::new()),
            insights: Mutex::new(VecDeque::new()),
        }
    }

    pub fn add_layout(&self, reply: MockReply<LayoutPlan>) {
        self.layouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    pub fn add_insights(&self, reply: MockReply<Vec<Insight>>) {
        self.insights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Replies still queued (layouts, insights)
    pub fn remaining(&self) -> (usize, usize) {
        (
            self.layouts.lock().unwrap_or_else(PoisonError::into_inner).len(),
            self.insights.lock().unwrap_or_else(PoisonError::into_inner).len(),
        )
    }
}

impl Default for MockEnricher {
    fn default() -> Self {
        Self::new()
    }
}

fn next<T>(queue: &Mutex<VecDeque<MockReply<T>>>, what: &str) -> Result<T, EnrichmentError> {
    let reply = queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .ok_or_else(|| EnrichmentError::backend(format!("MockEnricher: no more {} replies queued", what)))?;

    match reply {
        MockReply::Value(value) => Ok(value),
        MockReply::Error(err) => Err(err),
    }
}

#[async_trait]
impl EnrichmentProvider for MockEnricher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enrich_layout(&self, _request: &EnrichmentRequest) -> Result<LayoutPlan, EnrichmentError> {
        next(&self.layouts, "layout")
    }

    async fn enrich_insights(&self, _request: &EnrichmentRequest) -> Result<Vec<Insight>, EnrichmentError> {
        next(&self.insights, "insight")
    }
}

impl std::fmt::Debug for MockEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEnricher")
            .field("name", &self.name)
            .field("remaining", &self.remaining())
            .finish()
    }
}
