/*!
 * HTML tag-event source.
 *
 * Walks a parsed document in document order and reports every element
 * opening, every text node and every element closing to a [`TagSink`].
 * The parsing itself is delegated to `dom_query` (html5ever underneath),
 * so malformed markup is recovered the way a browser would recover it.
 */

use dom_query::{Document, NodeRef};

// Elements that never get a closing event. The blog templates write them
// without a self-closing slash, so no end tag is ever seen for them.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Attributes of an opened tag, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagAttributes {
    entries: Vec<(String, String)>,
}

impl TagAttributes {
    /// Create an attribute set from name/value pairs
    pub fn new<N, V>(entries: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Look up an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of attributes on the tag
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tag carried no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Receiver of structural HTML events
///
/// Implementations see events strictly in document order. Text is passed
/// raw, without trimming or whitespace normalization.
pub trait TagSink {
    /// An element was opened
    fn on_open_tag(&mut self, name: &str, attributes: &TagAttributes);

    /// An element was closed
    fn on_close_tag(&mut self, name: &str);

    /// A run of character data was found
    fn on_text(&mut self, raw: &str);
}

/// Parse `html` and feed its events to `sink`
pub fn feed_html<S: TagSink + ?Sized>(html: &str, sink: &mut S) {
    let document = Document::from(html);
    feed_document(&document, sink);
}

/// Feed the events of an already parsed document to `sink`
pub fn feed_document<S: TagSink + ?Sized>(document: &Document, sink: &mut S) {
    for child in document.root().children() {
        walk(&child, sink);
    }
}

fn walk<S: TagSink + ?Sized>(node: &NodeRef, sink: &mut S) {
    if node.is_text() {
        let text = node.text();
        sink.on_text(&text);
        return;
    }

    if !node.is_element() {
        // Comments, doctypes and processing instructions carry nothing to narrate
        return;
    }

    let Some(name) = node.node_name() else {
        return;
    };
    let name = name.to_string();

    let attributes = TagAttributes::new(
        node.attrs()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string())),
    );

    sink.on_open_tag(&name, &attributes);

    for child in node.children() {
        walk(&child, sink);
    }

    if !VOID_ELEMENTS.contains(&name.as_str()) {
        sink.on_close_tag(&name);
    }
}
