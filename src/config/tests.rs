// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{Config, ConfigLoader, normalize_separators};
use crate::error::{ConfigError, LayoutError};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(!config.global.dry);
    assert_eq!(config.layout.source_dir, None);
    assert_eq!(
        config.layout.netcoreapp_ref,
        PathBuf::from("artifacts/bin/ref/netcoreapp")
    );
    assert_eq!(config.layout.out_dir, PathBuf::from("PlatformExtensions"));
    assert!(!config.layout.just_external);
    assert_eq!(config.layout.exclude, vec!["Native", "Private"]);
    assert_eq!(config.restore.framework, "netcoreapp3.0");
    assert_eq!(config.restore.rid, "win7-x64");
    assert_eq!(config.restore.runtime_version, "2.1");
    assert_eq!(config.restore.project_dir, PathBuf::from("obj/generated"));
    assert_eq!(config.tools.dotnet, PathBuf::from("dotnet"));
}

#[test]
fn test_format_options() {
    let config = Config::parse(
        r#"
[layout]
source_dir = "/src/corefx"

[restore]
external_index = "/src/index.json"
sources = "https://api.nuget.org/v3/index.json"
"#,
    )
    .unwrap();

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    global.dry              = false
    layout.exclude          = Native,Private
    layout.just_external    = false
    layout.netcoreapp_ref   = artifacts/bin/ref/netcoreapp
    layout.out_dir          = PlatformExtensions
    layout.source_dir       = /src/corefx
    restore.external_index  = /src/index.json
    restore.framework       = netcoreapp3.0
    restore.project_dir     = obj/generated
    restore.rid             = win7-x64
    restore.runtime_version = 2.1
    restore.sources         = https://api.nuget.org/v3/index.json
    tools.dotnet            = dotnet
    ");
}

#[test]
fn test_required_paths_report_missing_key() {
    let config = Config::default();

    let err = config.source_dir().unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey { .. }));
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'source_dir' in section '[layout]'"
    );
    assert!(config.external_index().is_err());
    assert!(config.netcoreapp_ref_dir().is_err());
}

#[test]
fn test_netcoreapp_ref_dir_accepts_backslashes() {
    let config = Config::parse(
        r#"
[layout]
source_dir = "corefx"
netcoreapp_ref = 'artifacts\bin\ref\netcoreapp'
"#,
    )
    .unwrap();

    let expected = Path::new("corefx")
        .join("artifacts")
        .join("bin")
        .join("ref")
        .join("netcoreapp");
    assert_eq!(config.netcoreapp_ref_dir().unwrap(), expected);
}

#[test]
fn test_normalize_separators_leaves_forward_slashes() {
    assert_eq!(
        normalize_separators(Path::new("obj/generated")),
        PathBuf::from("obj/generated")
    );
}

#[test]
fn test_exclude_accepts_comma_separated_string() {
    let config = Config::parse("[layout]\nexclude = \"Native, Tests,\"").unwrap();
    assert_eq!(config.layout.exclude, vec!["Native", "Tests"]);
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[layout]\nunknown = true").is_err());
    assert!(Config::parse("[paths]\nprefix = \"/x\"").is_err());
}

#[test]
fn test_validate_rejects_blank_framework() {
    let err = Config::parse("[restore]\nframework = \"  \"").unwrap_err();
    let err = err.downcast::<LayoutError>().unwrap();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'framework' in section '[restore]': must not be empty"
    );
}

// --- ConfigLoader Tests ---

#[test]
fn test_config_loader_add_toml_file_success() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[global]
dry = true

[restore]
rid = "linux-x64"
"#
    )
    .expect("failed to write temp file");

    let loader = ConfigLoader::new().add_toml_file(file.path());
    assert_eq!(loader.loaded_files().len(), 1);

    let config = loader.build().expect("build should succeed");
    assert!(config.global.dry);
    assert_eq!(config.restore.rid, "linux-x64");
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/path/to/oob-layout.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/oob-layout.toml");
    assert!(loader.format_loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_file("first.toml")
        .add_toml_str("[global]\ndry = true");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [file] first.toml
    2. [string] <string>
    ");
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable names are unique to this test.
    unsafe {
        std::env::set_var("OOBTEST_RESTORE__FRAMEWORK", "net8.0");
        std::env::set_var("OOBTEST_LAYOUT__EXCLUDE", "Native,Tests");
    }

    let result = ConfigLoader::new()
        .add_toml_str("[restore]\nframework = \"netcoreapp2.1\"")
        .with_env_prefix("OOBTEST")
        .build();

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("OOBTEST_RESTORE__FRAMEWORK");
        std::env::remove_var("OOBTEST_LAYOUT__EXCLUDE");
    }

    let config = result.expect("build should succeed");
    assert_eq!(config.restore.framework, "net8.0");
    assert_eq!(config.layout.exclude, vec!["Native", "Tests"]);
}

#[test]
fn test_config_loader_apply_overrides() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n[restore]\nrid = \"win7-x86\"")
        .apply_overrides(&[
            "global/dry=true",
            "restore/rid=linux-x64",
            "restore/rid=osx-arm64",
            "restore/sources=https://a/index.json;https://b/index.json",
            "layout/source_dir=C:/src/corefx",
        ])
        .expect("overrides should parse")
        .build()
        .expect("build should succeed");

    assert!(config.global.dry);
    assert_eq!(config.restore.rid, "osx-arm64");
    assert_eq!(
        config.restore.sources,
        "https://a/index.json;https://b/index.json"
    );
    assert_eq!(
        config.layout.source_dir,
        Some(PathBuf::from("C:/src/corefx"))
    );
}

#[test]
fn test_config_loader_rejects_malformed_override() {
    for bad in ["dry=true", "global/dry", "/dry=true", "a/b/c=1"] {
        let result = ConfigLoader::new().apply_overrides(&[bad]);
        assert!(result.is_err(), "'{bad}' should be rejected");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[layout]\njust_external = false")
        .set("layout.just_external", true)
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert!(config.layout.just_external);
}
