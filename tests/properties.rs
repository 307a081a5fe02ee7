//! Property tests: determinism, word budget, comma hygiene and token preservation.

mod util;

use proptest::prelude::*;
use seedwright::Intensity;

/// Prompt fragments the built-in profile has opinions about
const PHRASES: [&str; 12] = [
    "a knight",
    "underwater scene",
    "neon lighting",
    "in a dark forest",
    "oil painting",
    "close-up portrait",
    "8k",
    "epic",
    "walking through",
    "a cat",
    "golden hour",
    "pixel art style",
];

fn intensity() -> impl Strategy<Value = Intensity>
{
    prop::sample::select(Intensity::ALL.to_vec())
}

fn known_prompt() -> impl Strategy<Value = String>
{
    prop::collection::vec(prop::sample::select(PHRASES.to_vec()), 0..5)
        .prop_map(|parts| parts.join(", "))
}

fn noisy_prompt() -> impl Strategy<Value = String>
{
    prop_oneof![known_prompt(), "[a-z ,|\\-]{0,60}"]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_output_is_deterministic(
        prompt in noisy_prompt(),
        seed in any::<u32>(),
        level in intensity(),
        max_words in 1usize..200,
    )
    {
        let e = util::builtin();
        let a = e.enhance(&prompt, seed, level, max_words);
        let b = e.enhance(&prompt, seed, level, max_words);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_word_budget_is_respected(
        prompt in noisy_prompt(),
        seed in any::<u32>(),
        level in intensity(),
        max_words in 1usize..20,
    )
    {
        let out = util::builtin().enhance(&prompt, seed, level, max_words);
        prop_assert!(out.split_whitespace().count() <= max_words, "{:?}", out);
    }

    #[test]
    fn prop_no_comma_artifacts(
        prompt in noisy_prompt(),
        seed in any::<u32>(),
        level in intensity(),
        max_words in 1usize..200,
    )
    {
        let out = util::builtin().enhance(&prompt, seed, level, max_words);
        let trimmed = out.trim();
        prop_assert!(!out.contains(",,"), "{:?}", out);
        prop_assert!(!out.contains(", ,"), "{:?}", out);
        prop_assert!(!trimmed.starts_with(','), "{:?}", out);
        prop_assert!(!trimmed.ends_with(','), "{:?}", out);
    }

    #[test]
    fn prop_opaque_tokens_survive(
        prefix in known_prompt(),
        token in "[q-z]{4}_[0-9]{2}",
        seed in any::<u32>(),
        level in intensity(),
    )
    {
        let prompt = if prefix.is_empty() { token.clone() } else { format!("{prefix}, {token}") };
        let out = util::builtin().enhance(&prompt, seed, level, 150);
        prop_assert!(out.contains(&token), "{:?} lost from {:?}", token, out);
    }
}
