//! TREEIZE_* environment overrides.
//!
//! Kept in its own test binary with a single test: environment variables are
//! process-wide and would leak into parallel config tests.

use std::env;
use std::fs;

use tempfile::TempDir;

use treeize::config::Settings;
use treeize::domain::OrphanPolicy;

#[test]
fn given_env_vars_when_load_then_override_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeize.toml");
    fs::write(&path, "forest = false\norphan_policy = \"top\"\nprefix = \"..\"\n").unwrap();

    env::set_var("TREEIZE_FOREST", "true");
    env::set_var("TREEIZE_ORPHAN_POLICY", "reject");
    env::set_var("TREEIZE_PATH_SEPARATOR", "::");
    let settings = Settings::load(Some(&path));
    env::remove_var("TREEIZE_FOREST");
    env::remove_var("TREEIZE_ORPHAN_POLICY");
    env::remove_var("TREEIZE_PATH_SEPARATOR");

    let settings = settings.unwrap();
    assert!(settings.forest);
    assert_eq!(settings.orphan_policy, Some(OrphanPolicy::Reject));
    assert_eq!(settings.path_separator, "::");
    // not overridden, file value stays
    assert_eq!(settings.prefix, "..");
}
