use once_cell::sync::Lazy;
use regex::Regex;

/// A blank line (possibly holding only whitespace) separates paragraphs.
pub static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern"));

/// Clause markers recognised at the start of a line:
/// - decimal enumerations: `1.`, `1.1`, `12.`
/// - lettered sub-items: `a)`, `B)`
/// - roman-numeral sub-items: `iv.`, `XI.`
pub static LINE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:\d+\.\d*|[a-zA-Z]\)|[ivxIVX]+\.)\s*").expect("line marker pattern")
});

/// The same marker classes when they open a sentence in the middle of a line.
/// Requires whitespace and then content after the marker.
pub static SENTENCE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+\.\d*|[a-zA-Z]\)|[ivxIVX]+\.)\s+\S").expect("sentence marker pattern")
});

/// Byte offsets where a line-start marker opens a new clause.
pub fn line_marker_offsets(paragraph: &str) -> Vec<usize> {
    LINE_MARKER.find_iter(paragraph).map(|m| m.start()).collect()
}

/// Split paragraph text at the given offsets. Text before the first offset
/// is kept as its own piece; empty pieces are dropped.
pub fn split_at_offsets(paragraph: &str, offsets: &[usize]) -> Vec<String> {
    let mut bounds = Vec::with_capacity(offsets.len() + 2);
    bounds.push(0);
    bounds.extend(offsets.iter().copied().filter(|&o| o > 0 && o < paragraph.len()));
    bounds.push(paragraph.len());
    bounds.dedup();

    bounds
        .windows(2)
        .map(|w| paragraph[w[0]..w[1]].trim())
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
