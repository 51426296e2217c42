/*!
 * Tests for article text extraction through the public API
 */

use blogcast::extraction::{extract_narration, feed_html, join_fragments, ArticleTextExtractor, TagAttributes, TagSink};
use crate::common;

fn fragments_of(html: &str) -> Vec<String> {
    let mut extractor = ArticleTextExtractor::new();
    feed_html(html, &mut extractor);
    extractor.into_fragments()
}

#[test]
fn test_extract_narration_withFixturePost_shouldKeepOnlyArticleContent() {
    let html = std::fs::read_to_string(common::fixture_path("post.html")).expect("fixture should exist");
    assert_eq!(extract_narration(&html), common::FIXTURE_NARRATION);
}

#[test]
fn test_extract_narration_withFixturePost_shouldNotMentionExcludedRegions() {
    let html = std::fs::read_to_string(common::fixture_path("post.html")).expect("fixture should exist");
    let narration = extract_narration(&html);
    for excluded in ["Listen to this post", "Comments", "alice", "Great write-up", "Copyright", "Home", "· · ·", "separator"] {
        assert!(!narration.contains(excluded), "narration should not contain {:?}: {}", excluded, narration);
    }
}

#[test]
fn test_extract_narration_withoutArticle_shouldBeEmpty() {
    let html = "<html><body><h1>Blog</h1><span>Today</span><p>Welcome to my blog</p></body></html>";
    assert!(fragments_of(html).is_empty());
    assert_eq!(extract_narration(html), "");
}

#[test]
fn test_extract_narration_withTitleDateAndBody_shouldFormatEachFragment() {
    let html = "<article><h1>My Post</h1><span>Jan 1, 2024</span><p>Hello  world</p></article>";
    assert_eq!(extract_narration(html), "My Post. Posted on Jan 1, 2024. Hello world");
}

#[test]
fn test_comments_section_withAnyInnerTags_shouldNeverBeIncluded() {
    let html = r#"<article>
        <section class="comments">
            <h1>Discussion</h1>
            <span>Jan 2</span>
            <p>Reply text</p>
            <div>separator</div>
        </section>
    </article>"#;
    assert!(fragments_of(html).is_empty());
}

#[test]
fn test_audio_player_withParagraphs_shouldNeverBeIncluded() {
    let html = r#"<article><div class="audio-player"><h1>Audio</h1><p>Play narration</p></div></article>"#;
    assert!(fragments_of(html).is_empty());
}

#[test]
fn test_separator_glyph_inParagraph_shouldBeExcluded() {
    assert!(fragments_of("<article><p>· · ·</p></article>").is_empty());
    assert!(fragments_of("<article><p>end · · · start</p></article>").is_empty());
    assert_eq!(fragments_of("<article><p>· ·</p></article>"), vec!["· ·"]);
}

#[test]
fn test_paragraph_whitespace_withNewlinesAndSpaces_shouldCollapse() {
    assert_eq!(fragments_of("<article><p>a\n\n  b</p></article>"), vec!["a b"]);
    assert_eq!(fragments_of("<article><p>\t one \t two\r\nthree </p></article>"), vec!["one two three"]);
}

#[test]
fn test_title_whitespace_shouldBeKeptVerbatim() {
    // Only paragraphs are collapsed
    assert_eq!(fragments_of("<article><h1>Two  spaces</h1></article>"), vec!["Two  spaces"]);
}

#[test]
fn test_join_fragments_withMixedPunctuation_shouldInsertSyntheticBreaks() {
    let joined = join_fragments(&["Title", "Posted on Jan 1", "Body ends here."]);
    assert_eq!(joined, "Title. Posted on Jan 1. Body ends here.");
}

#[test]
fn test_extractor_driven_manually_shouldFollowEventOrder() {
    let mut extractor = ArticleTextExtractor::new();
    let none = TagAttributes::default();

    extractor.on_open_tag("article", &none);
    extractor.on_open_tag("span", &none);
    extractor.on_text("  May 5  ");
    extractor.on_close_tag("span");
    // Text right after a close has no tag context
    extractor.on_text("stray text");
    extractor.on_open_tag("section", &TagAttributes::new([("class", "comments")]));
    extractor.on_open_tag("p", &none);
    extractor.on_text("hidden");
    extractor.on_close_tag("p");
    extractor.on_close_tag("section");
    extractor.on_open_tag("p", &none);
    extractor.on_text("visible");
    extractor.on_close_tag("article");

    assert_eq!(extractor.fragments(), ["Posted on May 5", "visible"]);
    assert_eq!(extractor.discarded().untracked_tag, 1);
    assert_eq!(extractor.discarded().excluded_region, 1);
}

#[test]
fn test_extractor_reuse_acrossDocuments_shouldNotLeakState() {
    let mut extractor = ArticleTextExtractor::new();
    // Unclosed audio player in the first document
    extractor.on_open_tag("article", &TagAttributes::default());
    extractor.on_open_tag("div", &TagAttributes::new([("class", "audio-player")]));

    extractor.reset();
    feed_html("<article><p>Fresh start</p></article>", &mut extractor);
    assert_eq!(extractor.fragments(), ["Fresh start"]);
}
