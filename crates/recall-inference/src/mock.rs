//! Mock card generator for deterministic testing.
//!
//! Lets orchestrator tests script generation outcomes and assert on exactly
//! how (and whether) the gateway seam was exercised, without any network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use recall_core::{CandidateFlashcard, CardGenerator, Error, Result};

/// One recorded `generate` invocation.
#[derive(Debug, Clone)]
pub struct MockGenerateCall {
    pub text: String,
    pub max_cards: u32,
}

/// Scripted [`CardGenerator`] with a call log.
///
/// Queued outcomes are consumed in order; once the queue is empty the
/// default response is returned.
#[derive(Clone, Default)]
pub struct MockCardGenerator {
    queued: Arc<Mutex<VecDeque<Result<Vec<CandidateFlashcard>>>>>,
    default_cards: Arc<Mutex<Vec<CandidateFlashcard>>>,
    calls: Arc<Mutex<Vec<MockGenerateCall>>>,
}

impl MockCardGenerator {
    /// Create a mock whose default response is an empty candidate list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default response returned once the queue is exhausted.
    pub fn with_cards(self, cards: Vec<CandidateFlashcard>) -> Self {
        *self.default_cards.lock().unwrap() = cards;
        self
    }

    /// Queue one outcome (success or error) for the next call.
    pub fn push_outcome(&self, outcome: Result<Vec<CandidateFlashcard>>) {
        self.queued.lock().unwrap().push_back(outcome);
    }

    /// Queue a gateway-style failure for the next call.
    pub fn push_gateway_error(&self, status: u16) {
        self.push_outcome(Err(Error::Gateway {
            status,
            body: String::new(),
        }));
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockGenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CardGenerator for MockCardGenerator {
    async fn generate(&self, text: &str, max_cards: u32) -> Result<Vec<CandidateFlashcard>> {
        self.calls.lock().unwrap().push(MockGenerateCall {
            text: text.to_string(),
            max_cards,
        });

        if let Some(outcome) = self.queued.lock().unwrap().pop_front() {
            return outcome;
        }
        Ok(self.default_cards.lock().unwrap().clone())
    }
}
