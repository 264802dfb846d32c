//! Shared test utilities for nutripsych integration tests.
//!
//! Provides a scripted completion provider and builders for enrichers and
//! food records so each test states only what it cares about.

#![allow(dead_code)]

use async_trait::async_trait;
use nutripsych::ai::{
    CompletionClient, CompletionError, CompletionProvider, ModelSettings, RateLimiter,
    ResponseEnvelope, ResponsesRequest, RetryPolicy,
};
use nutripsych::enrich::Enricher;
use nutripsych::model::{FoodRecord, StandardNutrients};
use nutripsych::prompt::BuiltinTemplates;
use nutripsych::store::{MemoryFoodStore, PersistenceBridge};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Log Capture
// =============================================================================

/// In-memory log sink for asserting on emitted warnings.
///
/// `install` scopes a subscriber to the current thread, which covers the
/// default current-thread `#[tokio::test]` runtime.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// =============================================================================
// Scripted Provider
// =============================================================================

/// Provider that replays scripted replies in order and records every
/// request it receives. Once the script runs out it answers with
/// `fallback`, or a connection error when there is none.
pub struct ScriptedProvider {
    replies: Mutex<Vec<Result<ResponseEnvelope, CompletionError>>>,
    fallback: Option<String>,
    seen: Mutex<Vec<ResponsesRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<ResponseEnvelope, CompletionError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            fallback: None,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Provider that answers every request with the same output text.
    pub fn always(text: &str) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(Vec::new()),
            fallback: Some(text.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Provider whose replies are the given output texts, in order.
    pub fn texts(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| completed(t)).collect())
    }

    pub fn requests(&self) -> Vec<ResponsesRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponseEnvelope, CompletionError> {
        self.seen.lock().unwrap().push(request.clone());
        if let Some(reply) = self.replies.lock().unwrap().pop() {
            return reply;
        }
        match &self.fallback {
            Some(text) => completed(text),
            None => Err(CompletionError::Connection("script exhausted".to_string())),
        }
    }
}

/// A completed envelope carrying `text`.
pub fn completed(text: &str) -> Result<ResponseEnvelope, CompletionError> {
    Ok(ResponseEnvelope {
        status: "completed".to_string(),
        output_text: Some(text.to_string()),
        ..Default::default()
    })
}

// =============================================================================
// Client and Enricher Builders
// =============================================================================

/// Retry policy with millisecond backoff so tests stay fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, 1.0, Duration::from_millis(2), Duration::from_millis(30))
        .with_unit(Duration::from_millis(1))
}

/// Completion client with no rate-limit delay and fast retries.
pub fn fast_client(provider: Arc<dyn CompletionProvider>) -> CompletionClient {
    CompletionClient::new(
        provider,
        ModelSettings::default(),
        RateLimiter::new(Duration::ZERO),
        fast_retry(),
    )
}

/// Enricher over `provider` using the built-in templates, no persistence.
pub fn make_enricher(provider: Arc<dyn CompletionProvider>) -> Enricher {
    Enricher::new(fast_client(provider), Arc::new(BuiltinTemplates))
}

/// Enricher that persists onto `store`.
pub fn make_persisting_enricher(
    provider: Arc<dyn CompletionProvider>,
    store: Arc<MemoryFoodStore>,
) -> Enricher {
    make_enricher(provider).with_persistence(PersistenceBridge::new(store))
}

// =============================================================================
// Food Builders
// =============================================================================

pub fn salmon() -> FoodRecord {
    FoodRecord::new("food-salmon", "Atlantic Salmon")
        .with_category("Fish")
        .with_standard_nutrients(
            StandardNutrients::new()
                .with("protein_g", 20.4)
                .with("fat_g", 13.4),
        )
}

pub fn blueberry() -> FoodRecord {
    FoodRecord::new("food-blueberry", "Blueberries")
        .with_category("Fruit")
        .with_standard_nutrients(StandardNutrients::new().with("fiber_g", 2.4))
}

pub fn kefir() -> FoodRecord {
    FoodRecord::new("food-kefir", "Kefir").with_category("Dairy")
}

pub fn seeded_store() -> Arc<MemoryFoodStore> {
    Arc::new(MemoryFoodStore::from_records([salmon(), blueberry(), kefir()]))
}
