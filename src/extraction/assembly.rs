// @module: Joining extracted fragments into one narration string

/// Characters that already end a spoken sentence
pub const SENTENCE_TERMINALS: &[char] = &['.', '!', '?', ':', ';'];

/// Synthetic break inserted after fragments lacking terminal punctuation
pub const SENTENCE_BREAK: &str = ". ";

/// Join fragments into a single narration text
///
/// A `". "` break is forced between fragments whenever the text built so
/// far does not end in sentence punctuation. Fragments that already end a
/// sentence are followed directly by the next one.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut narration = String::new();

    for (index, fragment) in fragments.iter().enumerate() {
        if index > 0 && !narration.ends_with(SENTENCE_TERMINALS) {
            narration.push_str(SENTENCE_BREAK);
        }
        narration.push_str(fragment.as_ref());
    }

    narration.trim().to_string()
}
