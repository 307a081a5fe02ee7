//! Gap detection, category policy and intensity thinning.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::{
    classify::Classification,
    hash::{Coordinate, SelectionKey},
    profile::{CategoryRules, Profile},
};

/// Named fill-rate tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity
{
    Minimal,
    Light,
    #[default]
    Moderate,
    Full,
}

impl Intensity
{
    pub const ALL: [Intensity; 4] =
        [Intensity::Minimal, Intensity::Light, Intensity::Moderate, Intensity::Full];

    /// Fraction of eligible gaps that get filled.
    pub const fn fill_rate(self) -> f64
    {
        match self
        {
            Intensity::Minimal => 0.25,
            Intensity::Light => 0.50,
            Intensity::Moderate => 0.75,
            Intensity::Full => 1.00,
        }
    }

    /// Optional categories are eligible only at moderate and above.
    pub const fn admits_optional(self) -> bool
    {
        matches!(self, Intensity::Moderate | Intensity::Full)
    }

    pub const fn as_str(self) -> &'static str
    {
        match self
        {
            Intensity::Minimal => "minimal",
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Full => "full",
        }
    }
}

impl fmt::Display for Intensity
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intensity `{0}` (expected minimal, light, moderate or full)")]
pub struct IntensityParseError(pub String);

impl FromStr for Intensity
{
    type Err = IntensityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        Intensity::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| IntensityParseError(s.to_string()))
    }
}

/// Pool categories the input leaves empty, sorted by name.
///
/// Categories with an empty pool can never be filled and are not gaps.
pub fn find_gaps(
    classification: &Classification,
    profile: &Profile,
) -> Vec<String>
{
    let mut gaps: Vec<String> = profile
        .pools
        .iter()
        .filter(|(name, pool)| !pool.is_empty() && !classification.is_present(name))
        .map(|(name, _)| name.clone())
        .collect();
    gaps.sort();
    gaps
}

/// Keep mandatory and standard gaps; optional ones only when intensity admits them.
pub fn apply_policy(
    gaps: Vec<String>,
    rules: &CategoryRules,
    intensity: Intensity,
) -> Vec<String>
{
    gaps.into_iter()
        .filter(|gap| {
            rules
                .mandatory
                .contains(gap)
                || rules
                    .standard
                    .contains(gap)
                || (intensity.admits_optional()
                    && rules
                        .optional
                        .contains(gap))
        })
        .collect()
}

/// Deterministically keep `max(1, floor(len * rate))` gaps, ranked by hash score.
///
/// Input must be sorted; the result is sorted again by name.
pub fn thin(
    gaps: Vec<String>,
    key: &SelectionKey,
    intensity: Intensity,
) -> Vec<String>
{
    let rate = intensity.fill_rate();
    if rate >= 1.0
    {
        return gaps;
    }

    let keep = ((gaps.len() as f64 * rate).floor() as usize).max(1);
    if keep >= gaps.len()
    {
        return gaps;
    }

    let mut scored: Vec<(u32, String)> = gaps
        .into_iter()
        .enumerate()
        .map(|(i, gap)| (key.hash(Coordinate::gap_rank(i as u32)), gap))
        .collect();
    // Stable: equal scores keep name order
    scored.sort_by_key(|(score, _)| *score);

    let mut kept: Vec<String> = scored
        .into_iter()
        .take(keep)
        .map(|(_, gap)| gap)
        .collect();
    kept.sort();
    kept
}
