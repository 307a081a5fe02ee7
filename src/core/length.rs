//! Word-budget enforcement. Truncation always cuts the tail.

use itertools::Itertools;

/// Keep at most `max_words` whitespace-separated words.
///
/// Text within budget is returned untouched; otherwise the first `max_words`
/// words are rejoined with single spaces and trailing commas are stripped.
pub fn enforce(
    text: String,
    max_words: usize,
) -> String
{
    if text
        .split_whitespace()
        .count()
        <= max_words
    {
        return text;
    }

    let truncated = text
        .split_whitespace()
        .take(max_words)
        .join(" ");
    truncated
        .trim_end_matches(',')
        .trim_end()
        .to_string()
}
