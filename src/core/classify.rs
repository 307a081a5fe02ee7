//! Multi-label token classification.
//!
//! Each category is compiled once into an Aho-Corasick keyword matcher and a
//! `RegexSet` of patterns. A token matches a category when any keyword is a substring
//! of the lower-cased token; patterns are consulted only when no keyword matched.

use aho_corasick::AhoCorasick;
use indexmap::IndexMap;
use regex::RegexSet;
use smallvec::SmallVec;

use crate::core::profile::{ClassificationRule, ProfileError};

/// Bucket name for tokens no category claims.
pub const UNCLASSIFIED: &str = "unclassified";

/// Category indices a single token was assigned to.
pub type Tags = SmallVec<[usize; 4]>;

#[derive(Debug)]
struct CategoryMatcher
{
    name: String,
    keywords: AhoCorasick,
    patterns: RegexSet,
}

impl CategoryMatcher
{
    fn matches(
        &self,
        lowered: &str,
    ) -> bool
    {
        // Keyword hit short-circuits the pattern check
        self.keywords
            .is_match(lowered)
            || self
                .patterns
                .is_match(lowered)
    }
}

/// Compiled classification rules for one profile.
#[derive(Debug)]
pub struct Classifier
{
    categories: Vec<CategoryMatcher>,
}

impl Classifier
{
    pub fn compile(rules: &IndexMap<String, ClassificationRule>) -> Result<Self, ProfileError>
    {
        let mut categories = Vec::with_capacity(rules.len());
        for (name, rule) in rules
        {
            let keywords =
                AhoCorasick::new(&rule.keywords).map_err(|source| ProfileError::Matcher {
                    context: format!("classification.{name}.keywords"),
                    source,
                })?;
            let patterns =
                RegexSet::new(&rule.patterns).map_err(|source| ProfileError::InvalidPattern {
                    category: name.clone(),
                    source,
                })?;
            categories.push(CategoryMatcher { name: name.clone(), keywords, patterns });
        }
        Ok(Self { categories })
    }

    /// Indices of every category the token belongs to, in profile order.
    pub fn tags(
        &self,
        token: &str,
    ) -> Tags
    {
        let lowered = token.to_lowercase();
        self.categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(&lowered))
            .map(|(i, _)| i)
            .collect()
    }

    /// Assign every token to its categories, or to the unclassified bucket.
    pub fn classify(
        &self,
        tokens: &[String],
    ) -> Classification
    {
        let mut buckets: IndexMap<String, Vec<String>> = self
            .categories
            .iter()
            .map(|c| (c.name.clone(), Vec::new()))
            .collect();
        let mut unclassified = Vec::new();

        for token in tokens
        {
            let tags = self.tags(token);
            if tags.is_empty()
            {
                unclassified.push(token.clone());
                continue;
            }
            for idx in tags
            {
                if let Some((_, bucket)) = buckets.get_index_mut(idx)
                {
                    bucket.push(token.clone());
                }
            }
        }

        Classification { buckets, unclassified }
    }
}

/// Tokens grouped by category. A token may sit in several buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification
{
    buckets: IndexMap<String, Vec<String>>,
    unclassified: Vec<String>,
}

impl Classification
{
    /// Tokens assigned to `category`; the synthetic unclassified bucket is addressable too.
    pub fn tokens(
        &self,
        category: &str,
    ) -> &[String]
    {
        if category == UNCLASSIFIED
        {
            return &self.unclassified;
        }
        self.buckets
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the input already supplies this category.
    pub fn is_present(
        &self,
        category: &str,
    ) -> bool
    {
        category != UNCLASSIFIED && !self.tokens(category).is_empty()
    }

    pub fn unclassified(&self) -> &[String]
    {
        &self.unclassified
    }

    /// Every assigned token across all buckets, unclassified last.
    pub fn all_tokens(&self) -> impl Iterator<Item = &String>
    {
        self.buckets
            .values()
            .flatten()
            .chain(self.unclassified.iter())
    }
}
