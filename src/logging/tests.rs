// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(6), Some(LogLevel::DUMP));
    assert_eq!(LogLevel::from_u8(7), None);
}

#[test]
fn test_filter_directive() {
    let directives: Vec<_> = (0..=6)
        .map(|level| {
            let level = LogLevel::from_u8(level).unwrap();
            format!("{level}: {}", level.filter_directive())
        })
        .collect();

    insta::assert_snapshot!(directives.join("\n"), @r"
    0: off
    1: error
    2: warn
    3: info,ignore=warn,globset=warn,config=warn
    4: debug,ignore=warn,globset=warn,config=warn
    5: trace,ignore=warn,globset=warn,config=warn
    6: trace
    ");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}
