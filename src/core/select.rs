//! Enhancement selection with anti-pair avoidance.

use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::core::{
    classify::Classification,
    hash::{Coordinate, SelectionKey},
};

/// Cap on fallback attempts per category.
const MAX_FALLBACK_ATTEMPTS: usize = 50;

/// Terms that must not appear in any added phrase, implied by the input tokens.
#[derive(Debug)]
pub struct ForbiddenTerms
{
    terms: BTreeSet<String>,
    matcher: Option<AhoCorasick>,
}

impl ForbiddenTerms
{
    /// Collect incompatible terms for every trigger found in any classified token.
    pub fn collect(
        classification: &Classification,
        anti_pairs: &IndexMap<String, Vec<String>>,
    ) -> Self
    {
        let mut terms = BTreeSet::new();
        for token in classification.all_tokens()
        {
            let lowered = token.to_lowercase();
            for (trigger, incompatible) in anti_pairs
            {
                if lowered.contains(trigger.as_str())
                {
                    terms.extend(
                        incompatible
                            .iter()
                            .map(|t| t.to_lowercase()),
                    );
                }
            }
        }
        Self::from_terms(terms)
    }

    pub fn from_terms(terms: BTreeSet<String>) -> Self
    {
        let matcher = if terms.is_empty()
        {
            None
        }
        else
        {
            match AhoCorasick::new(&terms)
            {
                Ok(m) => Some(m),
                Err(e) =>
                {
                    // Linear scan below gives the same answer
                    warn!(error = %e, "forbidden-term matcher unavailable, scanning linearly");
                    None
                }
            }
        };
        Self { terms, matcher }
    }

    pub fn is_empty(&self) -> bool
    {
        self.terms
            .is_empty()
    }

    pub fn terms(&self) -> &BTreeSet<String>
    {
        &self.terms
    }

    /// Whether the lower-cased phrase contains any forbidden term.
    pub fn conflicts(
        &self,
        phrase: &str,
    ) -> bool
    {
        if self.is_empty()
        {
            return false;
        }
        let lowered = phrase.to_lowercase();
        match &self.matcher
        {
            Some(m) => m.is_match(&lowered),
            None => self
                .terms
                .iter()
                .any(|t| lowered.contains(t.as_str())),
        }
    }
}

/// Pick one phrase from a non-empty pool for the `ordinal`-th gap (1-based).
///
/// The primary pick wins unless it conflicts; then up to `min(len, 50)` fallback
/// coordinates are tried. If every attempt conflicts the primary pick is kept.
pub fn select<'a>(
    key: &SelectionKey,
    ordinal: u32,
    pool: &'a [String],
    forbidden: &ForbiddenTerms,
) -> &'a str
{
    let primary = &pool[key.pick(Coordinate::pick(ordinal), pool.len())];
    if !forbidden.conflicts(primary)
    {
        return primary;
    }

    let attempts = pool
        .len()
        .min(MAX_FALLBACK_ATTEMPTS);
    for attempt in 0..attempts
    {
        let alt = &pool[key.pick(Coordinate::fallback(ordinal, attempt as u32), pool.len())];
        if !forbidden.conflicts(alt)
        {
            trace!(ordinal, attempt, primary = %primary, chosen = %alt, "anti-pair fallback");
            return alt;
        }
    }

    warn!(ordinal, primary = %primary, "no conflict-free alternative, keeping primary pick");
    primary
}

/// Choose a phrase for every gap, in name order, keyed by category.
pub fn select_all(
    key: &SelectionKey,
    gaps: &[String],
    pools: &IndexMap<String, Vec<String>>,
    forbidden: &ForbiddenTerms,
) -> IndexMap<String, String>
{
    let mut sorted: Vec<&String> = gaps
        .iter()
        .collect();
    sorted.sort();

    let mut picks = IndexMap::with_capacity(sorted.len());
    for (i, gap) in sorted
        .into_iter()
        .enumerate()
    {
        let Some(pool) = pools
            .get(gap)
            .filter(|p| !p.is_empty())
        else
        {
            continue;
        };
        let phrase = select(key, (i + 1) as u32, pool, forbidden);
        trace!(category = %gap, phrase, "selected enhancement");
        picks.insert(gap.clone(), phrase.to_string());
    }
    picks
}
