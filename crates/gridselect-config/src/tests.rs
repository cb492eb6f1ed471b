//! Tests for selection configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = SelectionConfig::default();
    assert_eq!(config.rounding.cutoff, 0.5);
    assert_eq!(config.rounding.tie_break, TieBreak::Exclude);
    assert_eq!(config.diagnostics.non_binary_lower, 0.0001);
    assert_eq!(config.diagnostics.non_binary_upper, 0.99);
    assert_eq!(config.extraction.precision, 3);
    assert_eq!(config.backend.tolerance, 1e-6);
    assert_eq!(config.time_limit(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_matches_default() {
    let config = SelectionConfig::from_toml_str("").unwrap();
    assert_eq!(config, SelectionConfig::default());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [rounding]
        cutoff = 0.4
        tie_break = "include"

        [diagnostics]
        non_binary_lower = 0.01
        non_binary_upper = 0.95

        [extraction]
        precision = 5

        [backend]
        tolerance = 1e-4

        [termination]
        millis_spent_limit = 250
    "#;

    let config = SelectionConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.rounding.cutoff, 0.4);
    assert_eq!(config.rounding.tie_break, TieBreak::Include);
    assert_eq!(config.diagnostics.non_binary_lower, 0.01);
    assert_eq!(config.diagnostics.non_binary_upper, 0.95);
    assert_eq!(config.extraction.precision, 5);
    assert_eq!(config.backend.tolerance, 1e-4);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        rounding:
          cutoff: 0.5
          tie_break: exclude
        diagnostics:
          non_binary_upper: 0.9
        termination:
          seconds_spent_limit: 10
    "#;

    let config = SelectionConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.rounding.tie_break, TieBreak::Exclude);
    assert_eq!(config.diagnostics.non_binary_lower, 0.0001);
    assert_eq!(config.diagnostics.non_binary_upper, 0.9);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
}

#[test]
fn test_rejects_out_of_range_values() {
    let bad_cutoff = SelectionConfig::from_toml_str("[rounding]\ncutoff = 1.0\n");
    assert!(matches!(bad_cutoff, Err(ConfigError::Invalid(_))));

    let inverted_band = SelectionConfig::new().with_non_binary_band(0.9, 0.1);
    assert!(matches!(inverted_band.validate(), Err(ConfigError::Invalid(_))));

    let too_precise = SelectionConfig::new().with_precision(40);
    assert!(too_precise.validate().is_err());

    let mut zero_tolerance = SelectionConfig::new();
    zero_tolerance.backend.tolerance = 0.0;
    assert!(zero_tolerance.validate().is_err());
}

#[test]
fn test_rejects_unknown_tie_break() {
    let result = SelectionConfig::from_toml_str("[rounding]\ntie_break = \"coin_flip\"\n");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SelectionConfig::load("does/not/exist.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_builder() {
    let config = SelectionConfig::new()
        .with_cutoff(0.7)
        .with_tie_break(TieBreak::Include)
        .with_precision(4)
        .with_termination_seconds(1)
        .with_termination_millis(500);

    assert_eq!(config.rounding.cutoff, 0.7);
    assert_eq!(config.extraction.precision, 4);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
}

#[test]
fn test_invalid_config_converts_to_selection_error() {
    let err: SelectionError = ConfigError::Invalid("bad".into()).into();
    assert_eq!(err, SelectionError::InvalidConfig("bad".into()));
}
