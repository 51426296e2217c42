use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::app_config::TtsConfig;
use crate::errors::ProviderError;
use crate::providers::Synthesizer;

/// Status code the service reports for a rejected API key
const AUTH_FAILURE_STATUS: i64 = 1004;

/// MiniMax client for the `t2a_v2` speech endpoint
#[derive(Debug)]
pub struct MiniMax {
    /// HTTP client for API requests
    client: Client,
    /// Request settings
    settings: TtsConfig,
}

/// Synthesis request body
#[derive(Debug, Serialize)]
pub struct MiniMaxRequest {
    /// The speech model to use
    model: String,

    /// Text to narrate
    text: String,

    /// Always false: the whole file is returned at once
    stream: bool,

    /// Language hint
    language_boost: String,

    /// Voice parameters
    voice_setting: VoiceSetting,

    /// Audio encoding parameters
    audio_setting: AudioSetting,
}

/// Voice parameters of a synthesis request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VoiceSetting {
    pub voice_id: String,
    pub speed: f32,
    pub vol: f32,
    pub pitch: i32,
}

/// Audio encoding parameters of a synthesis request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AudioSetting {
    pub sample_rate: u32,
    pub bitrate: u32,
    pub format: String,
    pub channel: u8,
}

/// Synthesis response
#[derive(Debug, Deserialize)]
pub struct MiniMaxResponse {
    /// Audio payload
    #[serde(default)]
    pub data: Option<AudioData>,

    /// Service-level status
    #[serde(default)]
    pub base_resp: Option<BaseResponse>,
}

/// Audio payload of a synthesis response
#[derive(Debug, Deserialize)]
pub struct AudioData {
    /// Hex-encoded audio bytes
    #[serde(default)]
    pub audio: Option<String>,
}

/// Service-level status block
#[derive(Debug, Deserialize)]
pub struct BaseResponse {
    /// Zero on success
    pub status_code: i64,

    /// Description of the status
    #[serde(default)]
    pub status_msg: String,
}

impl MiniMaxRequest {
    /// Build a request for `text` using the configured voice and audio settings
    pub fn new(text: impl Into<String>, settings: &TtsConfig) -> Self {
        Self {
            model: settings.model.clone(),
            text: text.into(),
            stream: false,
            language_boost: settings.language_boost.clone(),
            voice_setting: VoiceSetting {
                voice_id: settings.voice_id.clone(),
                speed: settings.speed,
                vol: settings.vol,
                pitch: settings.pitch,
            },
            audio_setting: AudioSetting {
                sample_rate: settings.sample_rate,
                bitrate: settings.bitrate,
                format: settings.format.clone(),
                channel: settings.channel,
            },
        }
    }

    /// Text carried by the request
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl MiniMax {
    /// Create a new MiniMax client
    pub fn new(settings: TtsConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build()
                .unwrap_or_default(),
            settings,
        }
    }

    /// Endpoint the client posts to
    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    /// Send a synthesis request and return the raw response body
    pub async fn complete(&self, request: &MiniMaxRequest, api_key: &str) -> Result<String, ProviderError> {
        debug!("Posting {} characters to {}", request.text().chars().count(), self.settings.endpoint);

        let response = self.client.post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to send request to MiniMax API: {}", e)))?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read MiniMax API response: {}", e)))?;

        if !status.is_success() {
            error!("MiniMax API error ({}): {}", status, body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(body),
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: body,
                },
            });
        }

        Ok(body)
    }

    /// Pull the decoded audio out of a response body
    pub fn extract_audio(body: &str) -> Result<Vec<u8>, ProviderError> {
        let response: MiniMaxResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("{} in body: {}", e, body)))?;

        if let Some(base) = &response.base_resp {
            if base.status_code == AUTH_FAILURE_STATUS {
                return Err(ProviderError::AuthenticationError(base.status_msg.clone()));
            }
            if base.status_code != 0 {
                return Err(ProviderError::ApiError {
                    status_code: u16::try_from(base.status_code).unwrap_or(u16::MAX),
                    message: base.status_msg.clone(),
                });
            }
        }

        let audio_hex = response.data
            .and_then(|data| data.audio)
            .ok_or_else(|| ProviderError::ParseError(format!("No audio data in response: {}", body)))?;

        let audio = hex::decode(audio_hex.trim())
            .map_err(|e| ProviderError::EmptyResponse(format!("Audio payload is not valid hex: {}", e)))?;

        if audio.is_empty() {
            return Err(ProviderError::EmptyResponse("Audio payload decoded to zero bytes".to_string()));
        }

        Ok(audio)
    }
}

#[async_trait]
impl Synthesizer for MiniMax {
    async fn synthesize(&self, text: &str, api_key: &str) -> Result<Vec<u8>, ProviderError> {
        let request = MiniMaxRequest::new(text, &self.settings);
        let body = self.complete(&request, api_key).await?;
        Self::extract_audio(&body)
    }

    fn name(&self) -> &str {
        "MiniMax"
    }
}
