//! Enhancement pipeline.
//!
//! tokenize -> classify -> gaps -> policy -> thin -> select -> render -> merge ->
//! dedupe -> enforce length. Every stage is a pure function of its inputs; the only
//! state kept across calls is the compiled, read-only profile.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{Span, debug, field, instrument};

use crate::{
    core::{
        classify::Classifier,
        dedupe, gaps,
        gaps::Intensity,
        hash::SelectionKey,
        length,
        profile::{Profile, ProfileError},
        select::{self, ForbiddenTerms},
        template,
        tokenize::tokenize,
    },
    infra::config::EnhanceOptions,
};

/// Default word budget.
pub const DEFAULT_MAX_WORDS: usize = 150;

/// One prompt to enhance in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceRequest
{
    pub prompt: String,
    pub seed: u32,
}

impl EnhanceRequest
{
    pub fn new(
        prompt: impl Into<String>,
        seed: u32,
    ) -> Self
    {
        Self { prompt: prompt.into(), seed }
    }
}

/// A validated profile with its classification rules compiled.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug)]
pub struct Enhancer
{
    profile: Profile,
    classifier: Classifier,
}

impl Enhancer
{
    /// Validate and compile a profile. This is the only fallible step.
    pub fn new(profile: Profile) -> Result<Self, ProfileError>
    {
        profile.validate()?;
        let classifier = Classifier::compile(&profile.classification)?;
        Ok(Self { profile, classifier })
    }

    pub fn profile(&self) -> &Profile
    {
        &self.profile
    }

    /// Enhance a prompt. Identical arguments always give identical output.
    ///
    /// Blank input is returned unchanged. A `max_words` of 0 is treated as 1.
    #[instrument(
        level = "debug",
        skip_all,
        fields(seed = seed, intensity = %intensity, max_words = max_words, fingerprint = field::Empty)
    )]
    pub fn enhance(
        &self,
        prompt: &str,
        seed: u32,
        intensity: Intensity,
        max_words: usize,
    ) -> String
    {
        if prompt
            .trim()
            .is_empty()
        {
            return prompt.to_string();
        }

        let key = SelectionKey::new(seed, prompt);
        Span::current().record("fingerprint", key.fingerprint);

        let tokens = tokenize(prompt);
        let classification = self
            .classifier
            .classify(&tokens);

        let candidates = gaps::find_gaps(&classification, &self.profile);
        let eligible = gaps::apply_policy(candidates, &self.profile.rules, intensity);
        let chosen = gaps::thin(eligible, &key, intensity);
        debug!(tokens = tokens.len(), gaps = ?chosen, "gaps resolved");

        let forbidden = ForbiddenTerms::collect(&classification, &self.profile.anti_pairs);
        let picks = select::select_all(&key, &chosen, &self.profile.pools, &forbidden);

        let (template_idx, skeleton) = template::choose(&key, &self.profile.templates);
        debug!(template_idx, forbidden = forbidden.terms().len(), "template chosen");

        let rendered = template::render(skeleton, &classification, &picks);
        let merged = dedupe::merge_unclassified(rendered, classification.unclassified());
        let deduped = dedupe::deduplicate(&merged);
        length::enforce(deduped, max_words.max(1))
    }

    /// Enhance using intensity and word budget from `options`.
    pub fn enhance_with(
        &self,
        prompt: &str,
        seed: u32,
        options: &EnhanceOptions,
    ) -> String
    {
        self.enhance(prompt, seed, options.intensity, options.max_words)
    }

    /// Enhance many prompts in parallel. Output order matches input order.
    pub fn enhance_batch(
        &self,
        requests: &[EnhanceRequest],
        options: &EnhanceOptions,
    ) -> Vec<String>
    {
        requests
            .par_iter()
            .map(|r| self.enhance_with(&r.prompt, r.seed, options))
            .collect()
    }
}

/// One-shot enhancement against an uncompiled profile.
///
/// Errors only when the profile fails validation; hosts enhancing repeatedly should
/// build an [`Enhancer`] once instead.
pub fn enhance(
    prompt: &str,
    seed: u32,
    profile: &Profile,
    intensity: Intensity,
    max_words: usize,
) -> Result<String, ProfileError>
{
    let enhancer = Enhancer::new(profile.clone())?;
    Ok(enhancer.enhance(prompt, seed, intensity, max_words))
}
