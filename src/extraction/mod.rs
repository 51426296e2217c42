/*!
 * Extraction of narratable text from blog post HTML.
 *
 * This module is organized in three parts:
 * - `events`: walks a parsed document and emits open/text/close events
 * - `extractor`: the stateful consumer that keeps article fragments
 * - `assembly`: joins fragments into the final narration string
 */

pub mod assembly;
pub mod events;
pub mod extractor;

use log::debug;

pub use assembly::join_fragments;
pub use events::{feed_document, feed_html, TagAttributes, TagSink};
pub use extractor::{ArticleTextExtractor, DiscardReason, DiscardStats};

/// Extract the narration text from an HTML string
pub fn extract_narration(html: &str) -> String {
    let mut extractor = ArticleTextExtractor::new();
    feed_html(html, &mut extractor);

    debug!(
        "Extraction kept {} fragment(s), discarded {} ({:?})",
        extractor.fragments().len(),
        extractor.discarded().total(),
        extractor.discarded()
    );

    join_fragments(extractor.fragments())
}
