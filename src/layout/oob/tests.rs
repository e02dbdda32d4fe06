// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::{OobReport, is_excluded, run};
use crate::layout::test_utils::{FakeRunner, Fixture, props};
use crate::logging::test_utils::run_with_logs;

fn fixture_with_projects() -> Fixture {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.out_dir()).unwrap();

    fixture.add_project("Compat", "System.Oob", &props(Some(false), Some(true)));
    fixture.add_project("Core", "System.InBand", &props(Some(true), Some(true)));
    fixture.add_project("Legacy", "System.NoFlags", &props(None, None));
    fixture.add_project("Gone", "System.NoBinary", &props(None, Some(false)));
    fixture.add_project("Native", "System.Native", &props(None, None));

    fixture.add_ref("System.Oob");
    fixture.add_ref("System.InBand");
    fixture.add_ref("System.NoFlags");
    fixture.add_ref("System.Native");
    fixture
}

#[tokio::test]
async fn test_copies_only_out_of_band_assemblies() {
    let fixture = fixture_with_projects();
    let ctx = fixture.context(fixture.config(), Arc::new(FakeRunner::default()), false);

    let report = run(&ctx).await.unwrap();

    assert_eq!(
        report,
        OobReport {
            scanned: 5,
            excluded: 1,
            in_band: 1,
            copied: 2,
            missing: 1,
        }
    );
    assert_eq!(
        fixture.layout_files(),
        vec!["System.NoFlags.dll", "System.Oob.dll"]
    );
}

#[tokio::test]
async fn test_overwrites_and_is_repeatable() {
    let fixture = fixture_with_projects();
    fs::write(fixture.out_dir().join("System.Oob.dll"), "stale").unwrap();
    let ctx = fixture.context(fixture.config(), Arc::new(FakeRunner::default()), false);

    let first = run(&ctx).await.unwrap();
    let files = fixture.layout_files();
    let second = run(&ctx).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fixture.layout_files(), files);
    assert_eq!(
        fs::read_to_string(fixture.out_dir().join("System.Oob.dll")).unwrap(),
        "System.Oob"
    );
}

#[tokio::test]
async fn test_exclusion_uses_path_below_source_root() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.out_dir()).unwrap();
    fixture.add_project("Compat", "System.Oob", &props(None, None));
    fixture.add_ref("System.Oob");

    let mut config = fixture.config();
    let temp_name = fixture
        .dir
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    config.layout.exclude = vec![temp_name];
    let ctx = fixture.context(config, Arc::new(FakeRunner::default()), false);

    let report = run(&ctx).await.unwrap();
    assert_eq!(report.excluded, 0);
    assert_eq!(report.copied, 1);
}

#[test]
fn test_is_excluded() {
    let source = Path::new("/work/corefx");
    let exclude = vec!["Native".to_string(), "Private".to_string(), String::new()];

    assert!(is_excluded(
        Path::new("/work/corefx/src/Native/pkg/Native.pkgproj"),
        source,
        &exclude
    ));
    assert!(is_excluded(
        Path::new("/work/corefx/src/System.Private.Uri/pkg/System.Private.Uri.pkgproj"),
        source,
        &exclude
    ));
    assert!(!is_excluded(
        Path::new("/work/corefx/src/System.Json/pkg/System.Json.pkgproj"),
        source,
        &exclude
    ));
}

#[tokio::test]
async fn test_missing_source_dir_is_config_error() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.layout.source_dir = None;
    let ctx = fixture.context(config, Arc::new(FakeRunner::default()), false);

    let err = run(&ctx).await.unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: missing required config key 'source_dir' in section '[layout]'"
    );
}

#[tokio::test]
async fn test_unreadable_reference_folder_fails_the_stage() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.out_dir()).unwrap();
    fixture.add_project("Compat", "System.Oob", &props(Some(false), None));
    fs::remove_dir_all(fixture.ref_dir()).unwrap();
    fs::write(fixture.ref_dir(), "not a folder").unwrap();
    let ctx = fixture.context(fixture.config(), Arc::new(FakeRunner::default()), false);

    let err = run(&ctx).await.unwrap_err();

    assert!(err.to_string().starts_with("filesystem error: I/O error on"), "{err}");
    assert!(fixture.layout_files().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn test_copy_is_logged() {
    let fixture = fixture_with_projects();
    let ctx = fixture.context(fixture.config(), Arc::new(FakeRunner::default()), false);

    let (result, logs) = run_with_logs(|| run(&ctx)).await;
    result.unwrap();

    let src = fixture.ref_dir().join("System.Oob.dll");
    let dst = fixture.out_dir().join("System.Oob.dll");
    assert!(logs.contains("==== Copying OOB assemblies ===="));
    assert!(logs.contains(&format!("{} -> {}", src.display(), dst.display())));
    assert!(!logs.contains("System.InBand.dll"));
}

#[tokio::test(flavor = "current_thread")]
async fn test_dry_run_logs_without_copying() {
    let fixture = fixture_with_projects();
    let ctx = fixture.context(fixture.config(), Arc::new(FakeRunner::default()), true);

    let (result, logs) = run_with_logs(|| run(&ctx)).await;

    assert_eq!(result.unwrap().copied, 2);
    assert!(logs.contains("[dry-run] Would copy"));
    assert!(fixture.layout_files().is_empty());
}
