//! Shared test utilities for integration tests
//!
//! Provides the compiled built-in profile, a small hand-written profile
//! for edge cases, and opt-in tracing output.

#![allow(dead_code)]

use seedwright::{Enhancer, Profile};

/// Compiled built-in profile
pub fn builtin() -> Enhancer
{
    Enhancer::new(Profile::builtin()).expect("built-in profile compiles")
}

/// Small profile exercising empty pools, unknown placeholders and anti-pairs
pub fn tiny_profile() -> Profile
{
    Profile::from_json_str(include_str!("fixtures/tiny_profile.json")).expect("fixture parses")
}

/// Route engine spans to the test writer; honours RUST_LOG
pub fn init_tracing()
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
