/*!
 * Mock synthesizer implementations for testing.
 *
 * This module provides mock synthesizers that simulate different behaviors:
 * - `MockSynthesizer::working(n)` - Always succeeds with `n` bytes of audio
 * - `MockSynthesizer::failing()` - Always fails with an API error
 * - `MockSynthesizer::unauthorized()` - Rejects the credential
 * - `MockSynthesizer::empty()` - Returns no audio
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Synthesizer;

/// Behavior mode for the mock synthesizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the given number of audio bytes
    Working { audio_len: usize },
    /// Always fails with an API error
    Failing,
    /// Always rejects the credential
    Unauthorized,
    /// Returns an empty audio payload error
    Empty,
    /// Simulates slow response before succeeding
    Slow { delay_ms: u64, audio_len: usize },
}

/// Mock synthesizer that records every call it receives
#[derive(Debug)]
pub struct MockSynthesizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of synthesize calls
    request_count: Arc<AtomicUsize>,
    /// Texts passed to synthesize, in call order
    texts: Arc<Mutex<Vec<String>>>,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            texts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock that returns `audio_len` bytes
    pub fn working(audio_len: usize) -> Self {
        Self::new(MockBehavior::Working { audio_len })
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that rejects the credential
    pub fn unauthorized() -> Self {
        Self::new(MockBehavior::Unauthorized)
    }

    /// Create a mock that returns no audio
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of synthesize calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts received so far
    pub fn received_texts(&self) -> Vec<String> {
        self.texts.lock().map(|texts| texts.clone()).unwrap_or_default()
    }

    /// Fake MP3 payload: an ID3 tag header padded to `len` bytes
    pub fn fake_audio(len: usize) -> Vec<u8> {
        let mut audio = b"ID3".to_vec();
        audio.resize(len.max(audio.len()), 0);
        audio.truncate(len);
        audio
    }
}

impl Clone for MockSynthesizer {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            texts: Arc::clone(&self.texts),
        }
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, _api_key: &str) -> Result<Vec<u8>, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }

        match self.behavior {
            MockBehavior::Working { audio_len } => Ok(Self::fake_audio(audio_len)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Unauthorized => Err(ProviderError::AuthenticationError(
                "Simulated invalid API key".to_string(),
            )),

            MockBehavior::Empty => Err(ProviderError::EmptyResponse(
                "Simulated empty audio".to_string(),
            )),

            MockBehavior::Slow { delay_ms, audio_len } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::fake_audio(audio_len))
            }
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
