use pretty_assertions::assert_eq;
use workbench_inspect::config::{DEFAULT_MAX_DEPTH, DEFAULT_TRUNCATION_MARKER};
use workbench_inspect::{BuildOptions, OptionalPolicy};

#[test]
fn test_defaults() {
    let options = BuildOptions::default();
    assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(options.max_depth, 32);
    assert_eq!(options.truncation_marker, DEFAULT_TRUNCATION_MARKER);
    assert_eq!(options.optional_policy, OptionalPolicy::NameConvention);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let options = BuildOptions::from_json_str(r#"{"max_depth": 4}"#).unwrap();
    assert_eq!(
        options,
        BuildOptions {
            max_depth: 4,
            ..BuildOptions::default()
        }
    );
}

#[test]
fn test_full_config() {
    let options = BuildOptions::from_json_str(
        r#"{"max_depth": 2, "truncation_marker": "...", "optional_policy": "explicit-only"}"#,
    )
    .unwrap();
    assert_eq!(options.max_depth, 2);
    assert_eq!(options.truncation_marker, "...");
    assert_eq!(options.optional_policy, OptionalPolicy::ExplicitOnly);
}

#[test]
fn test_config_file() {
    let path = std::env::temp_dir().join(format!("workbench-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"optional_policy": "name-convention"}"#).unwrap();

    let options = BuildOptions::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(options, BuildOptions::default());
}

#[test]
fn test_config_errors() {
    let err = BuildOptions::from_json_str(r#"{"optional_policy": "sometimes"}"#).unwrap_err();
    assert!(err.to_string().contains("Failed to parse build options"));

    let err = BuildOptions::from_json_file("/nonexistent/workbench.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
