//! Configuration resolution tests: CLI flags, environment, config files.

use clap::Parser;
use patomic_tsx_gen::{CliArgs, GeneratorConfig, GeneratorError, RunMode};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn parse(args: &[&str]) -> GeneratorConfig {
    let mut argv = vec!["patomic-tsx-gen"];
    argv.extend_from_slice(args);
    GeneratorConfig::from_args(CliArgs::try_parse_from(argv).expect("valid arguments"))
        .expect("valid configuration")
}

#[test]
#[serial]
fn test_yaml_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsx.yaml");
    fs::write(
        &path,
        "name: repeat\ncount: 0x100\noutput_dir: include/tsx\nbackup: true\n",
    )
    .unwrap();

    let config = parse(&["--config", path.to_str().unwrap()]);

    assert_eq!(config.count.get(), 256);
    assert_eq!(config.output_dir, PathBuf::from("include/tsx"));
    assert!(config.create_backups);
    assert_eq!(config.mode, RunMode::Write);
}

#[test]
#[serial]
fn test_json_config_numeric_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsx.json");
    fs::write(&path, r#"{ "name": "My Header", "count": 2 }"#).unwrap();

    let config = parse(&["--config", path.to_str().unwrap()]);

    assert_eq!(config.spec.name, "My Header");
    assert_eq!(config.count.get(), 2);
    assert_eq!(config.output_dir, PathBuf::from("."));
}

#[test]
#[serial]
fn test_cli_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsx.yml");
    fs::write(&path, "count: 99\nname: other\n").unwrap();

    let config = parse(&["--config", path.to_str().unwrap(), "--count", "4"]);

    assert_eq!(config.count.get(), 4);
    assert_eq!(config.spec.name, "other");
}

#[test]
#[serial]
fn test_unknown_config_key_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsx.yaml");
    fs::write(&path, "repeats: 16\n").unwrap();

    let args = CliArgs::try_parse_from(["patomic-tsx-gen", "--config", path.to_str().unwrap()])
        .unwrap();
    let result = GeneratorConfig::from_args(args);

    assert!(matches!(result, Err(GeneratorError::Config(_))));
}

#[test]
#[serial]
fn test_unsupported_config_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsx.toml");
    fs::write(&path, "count = 4\n").unwrap();

    let args = CliArgs::try_parse_from(["patomic-tsx-gen", "--config", path.to_str().unwrap()])
        .unwrap();
    let err = GeneratorConfig::from_args(args).unwrap_err();

    assert!(err.to_string().contains("unsupported config extension"));
}

#[test]
#[serial]
fn test_negative_count_rejected() {
    let args = CliArgs::try_parse_from(["patomic-tsx-gen", "--count=-5"]).unwrap();
    let result = GeneratorConfig::from_args(args);

    assert!(matches!(result, Err(GeneratorError::InvalidCount { .. })));
}

#[test]
#[serial]
fn test_environment_variables_fill_flags() {
    unsafe {
        std::env::set_var("PATOMIC_TSX_COUNT", "0x20");
        std::env::set_var("PATOMIC_TSX_NAME", "repeat wide");
    }

    let config = parse(&[]);

    unsafe {
        std::env::remove_var("PATOMIC_TSX_COUNT");
        std::env::remove_var("PATOMIC_TSX_NAME");
    }

    assert_eq!(config.count.get(), 32);
    assert_eq!(config.spec.file_name(), "repeat wide.h");
    assert_eq!(config.spec.guard_symbol(), "REPEAT_WIDE");
}

#[test]
#[serial]
fn test_check_flag_selects_check_mode() {
    let config = parse(&["--check"]);
    assert_eq!(config.mode, RunMode::Check);
    assert_eq!(config.count.get(), 16384);
}
