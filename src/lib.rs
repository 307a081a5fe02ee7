//! **seedwright** - Deterministic prompt augmentation from vocabulary profiles
//!
//! `(prompt, seed, intensity, profile)` maps to exactly one output string on every
//! machine. All variation comes from a position-keyed xxHash32, never from a PRNG.

/// Enhancement engine - pure, single-call pipeline stages
pub mod core {
    /// Seeded coordinate hash and prompt fingerprint
    pub mod hash;
    pub use hash::{Coordinate, SelectionKey};

    /// Comma / spaced-separator tokenizer
    pub mod tokenize;
    pub use tokenize::tokenize;

    /// Multi-label classification with compiled keyword and pattern rules
    pub mod classify;
    pub use classify::{Classification, Classifier, UNCLASSIFIED};

    /// Gap detection, category policy and intensity thinning
    pub mod gaps;
    pub use gaps::{Intensity, IntensityParseError};

    /// Anti-pair aware enhancement selection
    pub mod select;
    pub use select::ForbiddenTerms;

    /// Template selection, substitution and punctuation cleanup
    pub mod template;

    /// Unclassified-token merge and near-duplicate removal
    pub mod dedupe;

    /// Tail truncation to a word budget
    pub mod length;

    /// Orchestrator and public entry points
    pub mod engine;
    pub use engine::{DEFAULT_MAX_WORDS, EnhanceRequest, Enhancer, enhance};

    /// Profile data model, validation, built-in vocabulary and statistics
    pub mod profile;
    pub use profile::{CategoryRules, ClassificationRule, Profile, ProfileError, ProfileStats};
}

/// Infrastructure - configuration and host-side caching
pub mod infra {
    /// Layered option loading (files + environment)
    pub mod config;
    pub use self::config::{EnhanceOptions, load_options, load_options_from};

    /// Bounded concurrent cache of compiled profiles
    pub mod cache;
    pub use cache::ProfileCache;
}

// Strategic re-exports for hosts
pub use crate::core::{
    DEFAULT_MAX_WORDS, EnhanceRequest, Enhancer, Intensity, Profile, ProfileError, ProfileStats,
    enhance,
};
pub use crate::infra::{EnhanceOptions, ProfileCache, load_options};
