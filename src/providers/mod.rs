/*!
 * Provider implementations for text-to-speech services.
 *
 * This module contains the synthesis seam and its implementations:
 * - MiniMax: the hosted `t2a_v2` speech API
 * - Mock: an in-process synthesizer for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all speech synthesis providers
///
/// The controller only talks to this trait, so tests can swap the network
/// client for a mock and check whether synthesis was attempted at all.
#[async_trait]
pub trait Synthesizer: Send + Sync + Debug {
    /// Turn narration text into encoded audio bytes
    ///
    /// # Arguments
    /// * `text` - The narration text
    /// * `api_key` - Credential for the service
    ///
    /// # Returns
    /// * `Result<Vec<u8>, ProviderError>` - Decoded audio or an error
    async fn synthesize(&self, text: &str, api_key: &str) -> Result<Vec<u8>, ProviderError>;

    /// Human readable provider name for log lines
    fn name(&self) -> &str;
}

pub mod minimax;
pub mod mock;
