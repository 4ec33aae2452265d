// src/pacing/text.rs

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into user-perceived characters (extended grapheme clusters),
/// so a base letter and its combining marks become one stroke unit.
pub fn segment_graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// `text` without its final grapheme, for editing from the keyboard.
pub fn drop_last_grapheme(text: &str) -> &str {
    text.grapheme_indices(true)
        .next_back()
        .map_or(text, |(start, _)| &text[..start])
}
