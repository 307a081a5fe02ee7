//! Prompt tokenization on comma and spaced `-` / `|` separators.

use std::sync::LazyLock;

use regex::Regex;

/// Secondary separators inside a comma segment; bare hyphens in words survive.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-\s+|\s+\|\s+").expect("separator pattern compiles"));

/// Split a prompt into ordered, trimmed, non-empty tokens.
///
/// Duplicates are kept; order follows the source text.
pub fn tokenize(prompt: &str) -> Vec<String>
{
    prompt
        .split(',')
        .flat_map(|segment| SEPARATOR.split(segment))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
