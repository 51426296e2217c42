/*!
 * # blogcast - narrated audio for blog posts
 *
 * A Rust library that turns a rendered blog post into an MP3 narration.
 *
 * ## Features
 *
 * - Extract the title, date and paragraphs of a post from its HTML
 * - Skip the comments section, the audio player and separator glyphs
 * - Join fragments into speech-friendly sentences
 * - Synthesize audio through the MiniMax text-to-speech API
 * - Write the MP3 atomically and warn about suspiciously small files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `extraction`: HTML tag-event walking, article text extraction and joining
 * - `providers`: speech synthesis clients:
 *   - `providers::minimax`: MiniMax `t2a_v2` client
 *   - `providers::mock`: in-process synthesizer for tests
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extraction;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, NarrationReport};
pub use errors::{AppError, ProviderError};
pub use extraction::{extract_narration, join_fragments, ArticleTextExtractor, TagSink};
pub use providers::Synthesizer;
