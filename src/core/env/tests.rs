// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::container::Env;
use super::current_env;

#[test]
fn test_env_lookup_is_case_insensitive() {
    let env = Env::new().with("DOTNET_MULTILEVEL_LOOKUP", "0");

    assert_eq!(env.get("DOTNET_MULTILEVEL_LOOKUP"), Some("0"));
    assert_eq!(env.get("dotnet_multilevel_lookup"), Some("0"));
    assert_eq!(env.get("DOTNET_ROOT"), None);
}

#[test]
fn test_env_set_replaces_differently_cased_key() {
    let mut env = Env::new();
    env.set("Path", "C:\\Windows");
    env.set("PATH", "/usr/bin");

    assert_eq!(env.len(), 1);
    let entries: Vec<_> = env.iter().collect();
    assert_eq!(entries, vec![("PATH", "/usr/bin")]);
}

#[test]
fn test_env_iter_is_sorted_ignoring_case() {
    let env: Env = [("beta", "2"), ("ALPHA", "1"), ("Gamma", "3")]
        .into_iter()
        .collect();
    let keys: Vec<_> = env.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["ALPHA", "beta", "Gamma"]);
}

#[test]
fn test_current_env_contains_path() {
    let env = current_env();
    assert!(!env.is_empty());
    assert!(env.get("PATH").is_some(), "PATH should be inherited");
}
