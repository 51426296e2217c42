use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::extraction;
use crate::providers::Synthesizer;

// @module: Application controller for one narration run

/// Outcome of a successful narration run
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationReport {
    /// Characters of narration text sent for synthesis
    pub text_chars: usize,
    /// Where the audio was written
    pub output_path: PathBuf,
    /// Size of the written file
    pub bytes_written: u64,
    /// Whether the file fell below the expected minimum size
    pub undersized: bool,
}

/// Main application controller for blog post narration
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Self {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read `input_file` and extract its narration text
    ///
    /// Fails with an extraction error when the post yields no text, so the
    /// synthesis service is never called for an empty document.
    pub fn extract(&self, input_file: &Path) -> Result<String, AppError> {
        let html = std::fs::read_to_string(input_file)
            .map_err(|e| AppError::File(format!("Failed to read {}: {}", input_file.display(), e)))?;

        let text = extraction::extract_narration(&html);
        info!("Extracted text length: {} characters", text.chars().count());

        if text.is_empty() {
            return Err(AppError::Extraction(format!(
                "Could not extract text from post: {}",
                input_file.display()
            )));
        }

        Ok(text)
    }

    /// Run the whole workflow: extract, check the credential, synthesize, write
    pub async fn run<S: Synthesizer + ?Sized>(
        &self,
        input_file: &Path,
        output_file: &Path,
        api_key: Option<&str>,
        synthesizer: &S,
    ) -> Result<NarrationReport, AppError> {
        let text = self.extract(input_file)?;

        let api_key = api_key.ok_or_else(|| {
            AppError::Config(format!("{} environment variable not set", self.config.tts.api_key_env))
        })?;

        self.synthesize_to_file(&text, api_key, output_file, synthesizer).await
    }

    /// Synthesize `text` and write the audio to `output_file`
    ///
    /// The file only appears once the audio is complete. A synthesis failure
    /// leaves the destination untouched.
    pub async fn synthesize_to_file<S: Synthesizer + ?Sized>(
        &self,
        text: &str,
        api_key: &str,
        output_file: &Path,
        synthesizer: &S,
    ) -> Result<NarrationReport, AppError> {
        let start_time = Instant::now();
        info!("Generating audio with {}...", synthesizer.name());

        let spinner = Self::create_spinner(synthesizer.name());
        let result = synthesizer.synthesize(text, api_key).await;
        spinner.finish_and_clear();
        let audio = result?;

        debug!("Received {} bytes of audio in {:.1?}", audio.len(), start_time.elapsed());

        Self::write_atomically(output_file, &audio)?;
        info!("Audio generated successfully: {}", output_file.display());

        let bytes_written = std::fs::metadata(output_file)?.len();
        info!("File size: {} bytes ({:.1} KB)", bytes_written, bytes_written as f64 / 1024.0);

        let undersized = bytes_written < self.config.min_expected_bytes;
        if undersized {
            warn!(
                "Audio file is smaller than expected (< {} KB)",
                self.config.min_expected_bytes / 1000
            );
        }

        Ok(NarrationReport {
            text_chars: text.chars().count(),
            output_path: output_file.to_path_buf(),
            bytes_written,
            undersized,
        })
    }

    fn create_spinner(provider: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Waiting for {}", provider));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // Write to a sibling temp file first so a failed write never leaves a truncated MP3
    fn write_atomically(output_file: &Path, audio: &[u8]) -> Result<(), AppError> {
        let dir = output_file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| AppError::File(format!("Failed to create temp file in {}: {}", dir.display(), e)))?;
        temp.write_all(audio)?;
        temp.as_file().sync_all()?;
        temp.persist(output_file)
            .map_err(|e| AppError::File(format!("Failed to write {}: {}", output_file.display(), e.error)))?;

        Ok(())
    }
}
