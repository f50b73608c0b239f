//! Scripted provider for testing.
//!
//! Replays queued outcomes in order and records every prompt it receives.

use super::{ChatMessage, Completion, CompletionProvider, GenerationParams, ProviderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub params: GenerationParams,
}

#[derive(Default)]
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<Option<String>, ProviderError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that answers each call with the next of `replies`.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for reply in replies {
            provider.push_reply(reply);
        }
        provider
    }

    pub fn push_reply(&self, text: impl Into<String>) -> &Self {
        lock(&self.outcomes).push_back(Ok(Some(text.into())));
        self
    }

    /// Queue a successful call that carries no text.
    pub fn push_empty(&self) -> &Self {
        lock(&self.outcomes).push_back(Ok(None));
        self
    }

    pub fn push_error(&self, error: ProviderError) -> &Self {
        lock(&self.outcomes).push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<Completion, ProviderError> {
        lock(&self.requests).push(RecordedRequest {
            messages: messages.to_vec(),
            params: *params,
        });

        let outcome = lock(&self.outcomes).pop_front().unwrap_or_else(|| {
            Err(ProviderError::ApiError(
                "Scripted provider has no outcome left".to_string(),
            ))
        })?;

        Ok(Completion {
            output_tokens: outcome
                .as_deref()
                .map(|text| text.split_whitespace().count() as u32)
                .unwrap_or(0),
            text: outcome,
            input_tokens: messages.iter().map(|m| m.content.len() as u32 / 4).sum(),
        })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
