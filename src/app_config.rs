use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles loading and validating the optional JSON config file
/// and resolving the API credential from the environment.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Text-to-speech request settings
    #[serde(default)]
    pub tts: TtsConfig,

    /// Files smaller than this many bytes trigger a warning after writing
    #[serde(default = "default_min_expected_bytes")]
    pub min_expected_bytes: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text-to-speech service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TtsConfig {
    // @field: Full URL of the synthesis endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Speech model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Narrator voice
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    // @field: Speaking speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f32,

    // @field: Volume multiplier
    #[serde(default = "default_vol")]
    pub vol: f32,

    // @field: Pitch offset in semitones
    #[serde(default)]
    pub pitch: i32,

    // @field: Language hint sent with the text
    #[serde(default = "default_language_boost")]
    pub language_boost: String,

    // @field: Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    // @field: Output bitrate in bits per second
    #[serde(default = "default_bitrate")]
    pub bitrate: u32,

    // @field: Output container format
    #[serde(default = "default_format")]
    pub format: String,

    // @field: Number of audio channels
    #[serde(default = "default_channel")]
    pub channel: u8,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            voice_id: default_voice_id(),
            speed: default_speed(),
            vol: default_vol(),
            pitch: 0,
            language_boost: default_language_boost(),
            sample_rate: default_sample_rate(),
            bitrate: default_bitrate(),
            format: default_format(),
            channel: default_channel(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Sample rates accepted by the synthesis service
pub const SUPPORTED_SAMPLE_RATES: &[u32] = &[8000, 16000, 22050, 24000, 32000, 44100];

/// Bitrates accepted by the synthesis service
pub const SUPPORTED_BITRATES: &[u32] = &[32000, 64000, 128000, 256000];

/// Output formats accepted by the synthesis service
pub const SUPPORTED_FORMATS: &[&str] = &["mp3", "pcm", "flac", "wav"];

fn default_endpoint() -> String {
    "https://api.minimax.io/v1/t2a_v2".to_string()
}

fn default_model() -> String {
    "speech-2.8-hd".to_string()
}

fn default_voice_id() -> String {
    "English_expressive_narrator".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_vol() -> f32 {
    1.0
}

fn default_language_boost() -> String {
    "auto".to_string()
}

fn default_sample_rate() -> u32 {
    32000
}

fn default_bitrate() -> u32 {
    128000
}

fn default_format() -> String {
    "mp3".to_string()
}

fn default_channel() -> u8 {
    1
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "MINIMAX_API_KEY".to_string()
}

fn default_min_expected_bytes() -> u64 {
    100_000
}

impl Config {
    /// Load a configuration file, filling missing fields with defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let tts = &self.tts;

        let endpoint = Url::parse(&tts.endpoint)
            .map_err(|e| anyhow!("Invalid TTS endpoint '{}': {}", tts.endpoint, e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!("TTS endpoint must use http or https: {}", tts.endpoint));
        }

        if tts.model.trim().is_empty() {
            return Err(anyhow!("TTS model must not be empty"));
        }

        if tts.voice_id.trim().is_empty() {
            return Err(anyhow!("Voice id must not be empty"));
        }

        if !(0.5..=2.0).contains(&tts.speed) {
            return Err(anyhow!("Speed must be between 0.5 and 2.0, got {}", tts.speed));
        }

        if !(tts.vol > 0.0 && tts.vol <= 10.0) {
            return Err(anyhow!("Volume must be in (0, 10], got {}", tts.vol));
        }

        if !(-12..=12).contains(&tts.pitch) {
            return Err(anyhow!("Pitch must be between -12 and 12, got {}", tts.pitch));
        }

        if !SUPPORTED_SAMPLE_RATES.contains(&tts.sample_rate) {
            return Err(anyhow!("Unsupported sample rate: {}", tts.sample_rate));
        }

        if !SUPPORTED_BITRATES.contains(&tts.bitrate) {
            return Err(anyhow!("Unsupported bitrate: {}", tts.bitrate));
        }

        if !SUPPORTED_FORMATS.contains(&tts.format.as_str()) {
            return Err(anyhow!("Unsupported audio format: {}", tts.format));
        }

        if !matches!(tts.channel, 1 | 2) {
            return Err(anyhow!("Channel count must be 1 or 2, got {}", tts.channel));
        }

        if tts.timeout_secs == 0 {
            return Err(anyhow!("Timeout must be at least one second"));
        }

        if tts.api_key_env.trim().is_empty() {
            return Err(anyhow!("API key environment variable name must not be empty"));
        }

        Ok(())
    }

    /// Read the API key from the process environment
    pub fn api_key_from_env(&self) -> Option<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key through `lookup`; blank values count as missing
    pub fn api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(&self.tts.api_key_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tts: TtsConfig::default(),
            min_expected_bytes: default_min_expected_bytes(),
            log_level: LogLevel::default(),
        }
    }
}
