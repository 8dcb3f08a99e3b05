//! All-caps heading detection.
//!
//! The only typographic signal the reconstruction keeps is a binary heading
//! flag. A paragraph is a heading when it is short, already upper case, and
//! contains at least one ASCII capital. This is a cheap filter for all-caps
//! section titles in Latin-script documents, not a general classifier: text in
//! scripts without case never qualifies.

/// Decide whether a paragraph's text is a heading.
///
/// The text is trimmed first, so surrounding whitespace never changes the
/// answer. `heading_max_len` is an exclusive bound on the trimmed length in
/// characters.
///
/// # Examples
///
/// ```
/// use pdf_restructure::layout::is_heading_text;
///
/// assert!(is_heading_text("INTRODUCTION", 80));
/// assert!(!is_heading_text("Introduction", 80));
/// assert!(!is_heading_text("123", 80));
/// ```
pub fn is_heading_text(text: &str, heading_max_len: usize) -> bool {
    let text = text.trim();
    let len = text.chars().count();

    len > 0
        && len < heading_max_len
        && text.to_uppercase() == text
        && text.chars().any(|c| c.is_ascii_uppercase())
}
