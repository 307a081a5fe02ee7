//! Vocabulary profile data model.
//!
//! A profile bundles templates, category pools, classification rules, category policy
//! and the anti-pair table. The engine only ever reads a resolved profile; loading,
//! inheritance and discovery belong to the host.

use std::{fmt, sync::LazyLock};

use indexmap::{IndexMap, IndexSet};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Keyword and pattern rules for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule
{
    /// Substrings matched against the lower-cased token
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Regular expressions, consulted only when no keyword matched
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Fill policy per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules
{
    #[serde(default)]
    pub mandatory: IndexSet<String>,

    #[serde(default)]
    pub standard: IndexSet<String>,

    /// Filled only at moderate or full intensity
    #[serde(default)]
    pub optional: IndexSet<String>,

    /// Informational; categories present in the input are never overwritten anyway
    #[serde(default)]
    pub never_override: IndexSet<String>,
}

/// A fully resolved vocabulary profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile
{
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub version: String,

    #[serde(default, rename = "type")]
    pub kind: String,

    /// Template skeletons with `{category}` placeholders
    #[serde(default)]
    pub templates: Vec<String>,

    /// Candidate phrases per category; order defines hash addressing
    #[serde(default)]
    pub pools: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub classification: IndexMap<String, ClassificationRule>,

    #[serde(default)]
    pub rules: CategoryRules,

    /// Trigger substring -> terms that must not be added alongside it
    #[serde(default)]
    pub anti_pairs: IndexMap<String, Vec<String>>,
}

/// Problems that make a profile unusable. Raised before any enhancement runs.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum ProfileError
{
    #[error("profile `{name}` has no templates")]
    #[diagnostic(
        code(seedwright::profile::no_templates),
        help("add at least one template string to \"templates\"")
    )]
    MissingTemplates
    {
        name: String
    },

    #[error("profile `{name}` has no pools")]
    #[diagnostic(
        code(seedwright::profile::no_pools),
        help("add at least one category pool under \"pools\"")
    )]
    MissingPools
    {
        name: String
    },

    #[error("invalid classification pattern for category `{category}`")]
    #[diagnostic(code(seedwright::profile::bad_pattern))]
    InvalidPattern
    {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("could not build term matcher for `{context}`")]
    #[diagnostic(code(seedwright::profile::matcher))]
    Matcher
    {
        context: String,
        #[source]
        source: aho_corasick::BuildError,
    },

    #[error("profile document is not valid JSON")]
    #[diagnostic(code(seedwright::profile::parse))]
    Parse(#[from] serde_json::Error),
}

static BUILTIN: LazyLock<Profile> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../profiles/default.json"))
        .expect("built-in profile is valid JSON")
});

impl Profile
{
    /// The built-in general-purpose profile.
    pub fn builtin() -> Profile
    {
        BUILTIN.clone()
    }

    /// Parse a profile document and validate it.
    pub fn from_json_str(doc: &str) -> Result<Profile, ProfileError>
    {
        let profile: Profile = serde_json::from_str(doc)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check the structural preconditions the engine relies on.
    pub fn validate(&self) -> Result<(), ProfileError>
    {
        if self
            .templates
            .is_empty()
        {
            return Err(ProfileError::MissingTemplates { name: self.name.clone() });
        }
        if self
            .pools
            .is_empty()
        {
            return Err(ProfileError::MissingPools { name: self.name.clone() });
        }
        Ok(())
    }

    /// Summary of pool sizes and the size of the output space.
    pub fn stats(&self) -> ProfileStats
    {
        let combinations = self
            .pools
            .values()
            .filter(|pool| !pool.is_empty())
            .fold(self.templates.len() as u128, |acc, pool| {
                acc.saturating_mul(pool.len() as u128)
            });

        ProfileStats {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            kind: self.kind.clone(),
            pool_sizes: self
                .pools
                .iter()
                .map(|(k, v)| (k.clone(), v.len()))
                .collect(),
            templates: self.templates.len(),
            mandatory: self.rules.mandatory.iter().cloned().collect(),
            optional: self.rules.optional.iter().cloned().collect(),
            anti_pair_triggers: self.anti_pairs.len(),
            combinations,
        }
    }
}

/// Profile statistics for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStats
{
    pub name: String,
    pub description: String,
    pub version: String,
    pub kind: String,
    pub pool_sizes: IndexMap<String, usize>,
    pub templates: usize,
    pub mandatory: Vec<String>,
    pub optional: Vec<String>,
    pub anti_pair_triggers: usize,
    /// Templates times the product of non-empty pool sizes (saturating)
    pub combinations: u128,
}

impl fmt::Display for ProfileStats
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        writeln!(f, "Profile: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f)?;
        writeln!(f, "Pool Sizes:")?;
        for (name, size) in &self.pool_sizes
        {
            writeln!(f, "  {name}: {size} entries")?;
        }
        writeln!(f, "  templates: {} variations", self.templates)?;
        writeln!(f)?;
        writeln!(f, "Rules:")?;
        writeln!(f, "  mandatory: {:?}", self.mandatory)?;
        writeln!(f, "  optional: {:?}", self.optional)?;
        writeln!(f)?;
        writeln!(f, "Anti-pairs: {} trigger rules", self.anti_pair_triggers)?;
        writeln!(f)?;
        writeln!(f, "Total unique enhancements: {}", group_thousands(self.combinations))?;
        write!(f, "Scientific notation: {:.2e}", self.combinations as f64)
    }
}

fn group_thousands(n: u128) -> String
{
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits
        .chars()
        .enumerate()
    {
        if i > 0 && (digits.len() - i) % 3 == 0
        {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
