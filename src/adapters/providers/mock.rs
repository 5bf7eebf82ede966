//! Mock provider for testing.
//!
//! Embeddings are deterministic bag-of-words vectors: each lowercased word is
//! hashed into a bucket and the counts are L2-normalized, so texts sharing
//! words land close together without any network access.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::errors::ProviderError;
use crate::domain::ports::ModelProvider;

/// Mock model provider.
pub struct MockProvider {
    name: String,
    dimension: usize,
    reply: Option<String>,
    fail_embed: AtomicBool,
    fail_complete: AtomicBool,
    fail_embed_containing: Option<String>,
    embed_calls: AtomicUsize,
    complete_calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockProvider {
    /// Deterministic mock producing `dimension`-wide bag-of-words vectors.
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
            reply: None,
            fail_embed: AtomicBool::new(false),
            fail_complete: AtomicBool::new(false),
            fail_embed_containing: None,
            embed_calls: AtomicUsize::new(0),
            complete_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Fixed completion text. Without one the mock answers
    /// `"<name> answer"`.
    #[must_use]
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Fail every embedding call.
    #[must_use]
    pub fn failing_embed(self) -> Self {
        self.fail_embed.store(true, Ordering::SeqCst);
        self
    }

    /// Fail every completion call.
    #[must_use]
    pub fn failing_complete(self) -> Self {
        self.fail_complete.store(true, Ordering::SeqCst);
        self
    }

    /// Fail embedding calls whose text contains `needle`.
    #[must_use]
    pub fn failing_embed_containing(mut self, needle: impl Into<String>) -> Self {
        self.fail_embed_containing = Some(needle.into());
        self
    }

    /// Toggle embedding failures after construction.
    pub fn set_embed_failure(&self, fail: bool) {
        self.fail_embed.store(fail, Ordering::SeqCst);
    }

    /// Toggle completion failures after construction.
    pub fn set_complete_failure(&self, fail: bool) {
        self.fail_complete.store(fail, Ordering::SeqCst);
    }

    /// Embedding calls made so far, including failed ones.
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    /// Completion calls made so far.
    pub fn complete_calls(&self) -> usize {
        self.complete_calls.load(Ordering::SeqCst)
    }

    /// The most recent prompt passed to `complete`.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn unavailable(&self) -> ProviderError {
        ProviderError::Http {
            status: 503,
            message: format!("{} unavailable", self.name),
        }
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);

        let poisoned = self
            .fail_embed_containing
            .as_deref()
            .is_some_and(|needle| text.contains(needle));
        if poisoned || self.fail_embed.load(Ordering::SeqCst) {
            return Err(self.unavailable());
        }

        Ok(bag_of_words(text, self.dimension))
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        if self.fail_complete.load(Ordering::SeqCst) {
            return Err(self.unavailable());
        }

        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| format!("{} answer", self.name)))
    }
}

/// Hashed, L2-normalized word counts. Text without words maps to the zero
/// vector.
pub fn bag_of_words(text: &str, dimension: usize) -> Vec<f32> {
    let mut vector = vec![0.0_f32; dimension];
    if dimension == 0 {
        return vector;
    }

    let words = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty());
    for word in words {
        let bucket = fnv1a(&word.to_lowercase()) % dimension as u64;
        #[allow(clippy::cast_possible_truncation)]
        {
            vector[bucket as usize] += 1.0;
        }
    }

    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

fn fnv1a(word: &str) -> u64 {
    word.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
