//! Reattaching unclassified tokens and near-duplicate removal.
//!
//! Duplicates are detected with a one-suffix stemmer and a 70% word-overlap rule.
//! Their thresholds are part of the output contract.

use std::collections::HashSet;

use itertools::Itertools;

/// Suffixes tried in order; the first one that may be stripped is stripped.
const SUFFIXES: [&str; 4] = ["ing", "ed", "ly", "s"];

/// Minimum share of the smaller word set two segments must share to count as duplicates.
const OVERLAP_THRESHOLD: f64 = 0.7;

/// Append unclassified tokens (trigger words and the like) verbatim.
pub fn merge_unclassified(
    rendered: String,
    unclassified: &[String],
) -> String
{
    if unclassified.is_empty()
    {
        return rendered;
    }
    format!(
        "{rendered}, {}",
        unclassified
            .iter()
            .join(", ")
    )
}

/// Lower-case the segment and strip at most one suffix.
///
/// A suffix is stripped only when the segment is more than two characters longer
/// than the suffix.
pub fn stem(segment: &str) -> String
{
    let lowered = segment.to_lowercase();
    let len = lowered
        .chars()
        .count();
    for suffix in SUFFIXES
    {
        if lowered.ends_with(suffix) && len > suffix.len() + 2
        {
            return lowered[..lowered.len() - suffix.len()].to_string();
        }
    }
    lowered
}

struct Seen
{
    stem: String,
    words: HashSet<String>,
}

fn words_of(stem: &str) -> HashSet<String>
{
    stem.split_whitespace()
        .map(str::to_string)
        .collect()
}

fn overlaps(
    a: &HashSet<String>,
    b: &HashSet<String>,
) -> bool
{
    let shared = a
        .intersection(b)
        .count();
    shared as f64 >= a.len().min(b.len()) as f64 * OVERLAP_THRESHOLD
}

/// Drop comma segments that repeat an earlier one; first occurrence wins.
pub fn deduplicate(text: &str) -> String
{
    let mut seen: Vec<Seen> = Vec::new();
    let mut kept: Vec<&str> = Vec::new();

    for segment in text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let stem = stem(segment);
        let words = words_of(&stem);

        let duplicate = seen
            .iter()
            .any(|s| s.stem == stem)
            || (!words.is_empty()
                && seen
                    .iter()
                    .any(|s| overlaps(&words, &s.words)));

        if !duplicate
        {
            seen.push(Seen { stem, words });
            kept.push(segment);
        }
    }

    kept.join(", ")
}
