//! Option loading from config files in a fixture directory.
//!
//! Environment variables and the working directory are process-wide, so every
//! test here holds `ENV_LOCK` while it loads.

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use assert_fs::prelude::*;
use seedwright::{EnhanceOptions, Intensity, infra::load_options_from, load_options};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()>
{
    ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets environment variables for the guard's lifetime, restoring prior values on drop.
struct EnvVars
{
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvVars
{
    fn set(vars: &[(&'static str, &str)]) -> Self
    {
        let saved = vars
            .iter()
            .map(|(k, v)| {
                let prev = std::env::var(k).ok();
                // SAFETY: callers hold ENV_LOCK, so no other test thread touches the environment
                unsafe { std::env::set_var(k, v) };
                (*k, prev)
            })
            .collect();
        Self { saved }
    }
}

impl Drop for EnvVars
{
    fn drop(&mut self)
    {
        for (k, prev) in self
            .saved
            .drain(..)
        {
            // SAFETY: still under ENV_LOCK
            unsafe {
                match prev
                {
                    Some(v) => std::env::set_var(k, v),
                    None => std::env::remove_var(k),
                }
            }
        }
    }
}

/// Switches the working directory for the guard's lifetime.
struct CwdGuard
{
    prev: PathBuf,
}

impl CwdGuard
{
    fn enter(dir: &std::path::Path) -> Self
    {
        let prev = std::env::current_dir().expect("cwd");
        std::env::set_current_dir(dir).expect("chdir");
        Self { prev }
    }
}

impl Drop for CwdGuard
{
    fn drop(&mut self)
    {
        let _ = std::env::set_current_dir(&self.prev);
    }
}

#[test]
fn test_missing_files_give_defaults()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let opts = load_options_from(tmp.path()).expect("defaults load");
    assert_eq!(opts, EnhanceOptions::default());
}

#[test]
fn test_toml_file_is_read()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("seedwright.toml")
        .write_str("intensity = \"full\"\nmax_words = 40\n")
        .expect("write config");

    let opts = load_options_from(tmp.path()).expect("config loads");
    assert_eq!(opts, EnhanceOptions { intensity: Intensity::Full, max_words: 40 });
}

#[test]
fn test_toml_wins_over_json()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("seedwright.toml")
        .write_str("intensity = \"light\"\n")
        .expect("write toml");
    tmp.child("seedwright.json")
        .write_str(r#"{"intensity": "minimal", "max_words": 12}"#)
        .expect("write json");

    let opts = load_options_from(tmp.path()).expect("config loads");
    assert_eq!(opts.intensity, Intensity::Light);
    assert_eq!(opts.max_words, 150);
}

#[test]
fn test_unknown_intensity_is_an_error()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("seedwright.toml")
        .write_str("intensity = \"extreme\"\n")
        .expect("write config");

    let err = load_options_from(tmp.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse configuration"));
}

#[test]
fn test_environment_overrides_file()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("seedwright.toml")
        .write_str("intensity = \"light\"\nmax_words = 12\n")
        .expect("write config");

    let _env = EnvVars::set(&[("SEEDWRIGHT__MAX_WORDS", "40"), ("SEEDWRIGHT__INTENSITY", "full")]);
    let opts = load_options_from(tmp.path()).expect("config loads");
    assert_eq!(opts, EnhanceOptions { intensity: Intensity::Full, max_words: 40 });
}

#[test]
fn test_environment_fills_keys_the_file_omits()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("seedwright.toml")
        .write_str("intensity = \"minimal\"\n")
        .expect("write config");

    let _env = EnvVars::set(&[("SEEDWRIGHT__MAX_WORDS", "25")]);
    let opts = load_options_from(tmp.path()).expect("config loads");
    assert_eq!(opts, EnhanceOptions { intensity: Intensity::Minimal, max_words: 25 });
}

#[test]
fn test_load_options_reads_working_directory()
{
    let _lock = lock();
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child(".seedwright.toml")
        .write_str("max_words = 64\n")
        .expect("write config");

    let _cwd = CwdGuard::enter(tmp.path());
    let opts = load_options().expect("config loads");
    assert_eq!(opts, EnhanceOptions { intensity: Intensity::Moderate, max_words: 64 });
}
