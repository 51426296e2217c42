use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::events::{TagAttributes, TagSink};

// @module: Article text extraction for the blog's post template

/// Glyph sequence the template uses as a visual paragraph break
pub const SEPARATOR_GLYPH: &str = "· · ·";

/// Prefix spoken before the post date
pub const DATE_PREFIX: &str = "Posted on ";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Why a text fragment was not narrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Only whitespace
    Empty,
    /// Seen before the article opened or after it closed
    OutsideArticle,
    /// Inside the comments section or the audio player
    ExcludedRegion,
    /// Separator glyph paragraph or separator div
    Separator,
    /// Not directly under a title, date or paragraph tag
    UntrackedTag,
}

/// Counters of discarded fragments, for diagnostics only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardStats {
    pub empty: usize,
    pub outside_article: usize,
    pub excluded_region: usize,
    pub separator: usize,
    pub untracked_tag: usize,
}

impl DiscardStats {
    fn record(&mut self, reason: DiscardReason) {
        match reason {
            DiscardReason::Empty => self.empty += 1,
            DiscardReason::OutsideArticle => self.outside_article += 1,
            DiscardReason::ExcludedRegion => self.excluded_region += 1,
            DiscardReason::Separator => self.separator += 1,
            DiscardReason::UntrackedTag => self.untracked_tag += 1,
        }
    }

    /// Total number of discarded fragments
    pub fn total(&self) -> usize {
        self.empty + self.outside_article + self.excluded_region + self.separator + self.untracked_tag
    }
}

/// Stateful consumer of the tag stream that keeps narratable fragments
///
/// Text is only kept while inside `<article>` and outside both
/// `<section class="comments">` and `<div class="audio-player">`. The
/// region flags carry no depth: a nested opening re-affirms a flag and the
/// first matching close clears it.
///
/// The current tag is flat. Any closing tag clears it, so text that follows
/// a close (for example the tail of a paragraph after an inline `<a>`) is
/// not attributed to the enclosing element.
#[derive(Debug, Default)]
pub struct ArticleTextExtractor {
    inside_article: bool,
    inside_comments_section: bool,
    inside_audio_player: bool,
    current_tag: Option<String>,
    fragments: Vec<String>,
    discarded: DiscardStats,
}

impl ArticleTextExtractor {
    /// Create an extractor with all regions closed and no fragments
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragments accepted so far, in document order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Consume the extractor and return the accepted fragments
    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    /// Discard counters collected so far
    pub fn discarded(&self) -> &DiscardStats {
        &self.discarded
    }

    /// Return to the initial state so another document can be fed
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_collecting(&self) -> bool {
        self.inside_article && !self.inside_comments_section && !self.inside_audio_player
    }

    fn discard(&mut self, reason: DiscardReason, text: &str) {
        trace!("Discarding fragment ({:?}): {:?}", reason, text);
        self.discarded.record(reason);
    }

    fn accept(&mut self, fragment: String) {
        debug!("Accepted fragment #{}: {} chars", self.fragments.len() + 1, fragment.chars().count());
        self.fragments.push(fragment);
    }
}

impl TagSink for ArticleTextExtractor {
    fn on_open_tag(&mut self, name: &str, attributes: &TagAttributes) {
        self.current_tag = Some(name.to_string());

        match name {
            "article" => self.inside_article = true,
            "section" if attributes.get("class") == Some("comments") => {
                self.inside_comments_section = true;
            }
            "div" if attributes.get("class") == Some("audio-player") => {
                self.inside_audio_player = true;
            }
            _ => {}
        }
    }

    fn on_close_tag(&mut self, name: &str) {
        match name {
            "article" => self.inside_article = false,
            "section" if self.inside_comments_section => self.inside_comments_section = false,
            "div" if self.inside_audio_player => self.inside_audio_player = false,
            _ => {}
        }

        self.current_tag = None;
    }

    fn on_text(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            self.discarded.record(DiscardReason::Empty);
            return;
        }

        if !self.is_collecting() {
            let reason = if self.inside_article {
                DiscardReason::ExcludedRegion
            } else {
                DiscardReason::OutsideArticle
            };
            self.discard(reason, text);
            return;
        }

        let current_tag = self.current_tag.clone();
        match current_tag.as_deref() {
            Some("h1") => self.accept(text.to_string()),
            Some("span") => self.accept(format!("{}{}", DATE_PREFIX, text)),
            Some("p") => {
                let clean = WHITESPACE_RUN.replace_all(text, " ");
                if clean.contains(SEPARATOR_GLYPH) {
                    self.discard(DiscardReason::Separator, text);
                } else {
                    self.accept(clean.into_owned());
                }
            }
            Some("div") if text.contains("separator") => self.discard(DiscardReason::Separator, text),
            _ => self.discard(DiscardReason::UntrackedTag, text),
        }
    }
}
