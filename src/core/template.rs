//! Template selection, placeholder substitution and punctuation cleanup.

use std::{borrow::Cow, sync::LazyLock};

use indexmap::IndexMap;
use itertools::Itertools;
use regex::{Captures, Regex};

use crate::core::{
    classify::{Classification, UNCLASSIFIED},
    hash::{Coordinate, SelectionKey},
};

/// Any `{...}` group; unknown names resolve to empty.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern compiles"));

/// Cleanup passes, applied in this order.
static CLEANUP: LazyLock<[(Regex, &'static str); 7]> = LazyLock::new(|| {
    let re = |p: &str| Regex::new(p).expect("cleanup pattern compiles");
    [
        (re(r"\s+"), " "),
        (re(r"\s*,\s*"), ", "),
        (re(r"(,\s*)+"), ", "),
        (re(r"^\s*,\s*"), ""),
        (re(r"\s*,\s*$"), ""),
        (re(r"\s*atmosphere\s*$"), " atmosphere"),
        (re(r"^\s*scene\s*,"), ""),
    ]
});

/// Pick the template for this call at coordinate 0. `templates` must be non-empty.
pub fn choose<'a>(
    key: &SelectionKey,
    templates: &'a [String],
) -> (usize, &'a str)
{
    let idx = key.pick(Coordinate::TEMPLATE, templates.len());
    (idx, &templates[idx])
}

/// Resolve a category: user tokens first, then the selected enhancement, else empty.
fn component<'a>(
    name: &str,
    classification: &'a Classification,
    picks: &'a IndexMap<String, String>,
) -> Cow<'a, str>
{
    if name != UNCLASSIFIED
    {
        let supplied = classification.tokens(name);
        if !supplied.is_empty()
        {
            return Cow::Owned(
                supplied
                    .iter()
                    .join(", "),
            );
        }
    }
    picks
        .get(name)
        .map(|s| Cow::Borrowed(s.as_str()))
        .unwrap_or(Cow::Borrowed(""))
}

/// Substitute every placeholder in one pass, then normalize the result.
///
/// Only innermost `{name}` groups are placeholders. Braces that are part of the
/// template text itself pass through, so `{{subject}}` renders as `{a knight}`.
pub fn render(
    template: &str,
    classification: &Classification,
    picks: &IndexMap<String, String>,
) -> String
{
    let filled = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        component(&caps[1], classification, picks).into_owned()
    });
    normalize(&filled)
}

/// Repair whitespace and comma artifacts left by empty placeholders.
pub fn normalize(text: &str) -> String
{
    let mut out = text.to_string();
    for (re, replacement) in CLEANUP.iter()
    {
        let next = re
            .replace_all(&out, *replacement)
            .into_owned();
        out = next;
    }

    let mut out = out
        .trim()
        .to_string();
    while out.contains(",,") || out.contains(", ,")
    {
        out = out
            .replace(",,", ",")
            .replace(", ,", ",");
    }
    out
}
