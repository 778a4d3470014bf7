//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_points_at_pagestrip_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("pagestrip") && path_str.ends_with("config.toml"),
            "Path should contain 'pagestrip' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_pagestrip_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("pagestrip.log"),
        "Default log path should end with 'pagestrip.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("pagestrip_test_config.toml");

    let toml_content = r#"
page_padding = 16.0
max_zoom_scale = 2.5
content_loading = "deferred"
log_file_path = "/tmp/pagestrip-test.log"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.page_padding, Some(16.0));
    assert_eq!(config.max_zoom_scale, Some(2.5));
    assert_eq!(config.content_loading, Some(ContentLoading::Deferred));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/pagestrip-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("pagestrip_test_invalid.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    match load_config_file(&config_path) {
        Err(ConfigError::ParseError { path, reason: _ }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = env::temp_dir().join("pagestrip_test_unknown.toml");
    fs::write(&config_path, "theme = \"monokai\"\n").expect("Failed to write config");

    assert!(matches!(
        load_config_file(&config_path),
        Err(ConfigError::ParseError { .. })
    ));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_loading_mode() {
    let config_path = env::temp_dir().join("pagestrip_test_bad_mode.toml");
    fs::write(&config_path, "content_loading = \"lazy\"\n").expect("Failed to write config");

    assert!(matches!(
        load_config_file(&config_path),
        Err(ConfigError::ParseError { .. })
    ));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = env::temp_dir().join("pagestrip_test_partial.toml");
    fs::write(&config_path, "page_padding = 4.0\n").expect("Failed to write config");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.page_padding, Some(4.0));
    assert_eq!(config.max_zoom_scale, None);
    assert_eq!(config.content_loading, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_none_yields_defaults() {
    let merged = merge_config(None);
    assert_eq!(merged, ResolvedConfig::default());
    assert_eq!(merged.page_padding, 10.0);
    assert_eq!(merged.max_zoom_scale, 1.0);
    assert_eq!(merged.content_loading, ContentLoading::Immediate);
}

#[test]
fn merge_config_prefers_file_values() {
    let merged = merge_config(Some(ConfigFile {
        page_padding: Some(0.0),
        max_zoom_scale: Some(3.0),
        content_loading: Some(ContentLoading::Deferred),
        log_file_path: Some(PathBuf::from("/custom/app.log")),
    }));
    assert_eq!(merged.page_padding, 0.0);
    assert_eq!(merged.max_zoom_scale, 3.0);
    assert_eq!(merged.content_loading, ContentLoading::Deferred);
    assert_eq!(merged.log_file_path, PathBuf::from("/custom/app.log"));
}

#[test]
fn merge_config_replaces_invalid_numbers_with_defaults() {
    let merged = merge_config(Some(ConfigFile {
        page_padding: Some(-5.0),
        max_zoom_scale: Some(0.0),
        ..ConfigFile::default()
    }));
    assert_eq!(merged.page_padding, DEFAULT_PAGE_PADDING);
    assert_eq!(merged.max_zoom_scale, DEFAULT_MAX_ZOOM_SCALE);
}

#[test]
#[serial(pagestrip_env)]
fn env_override_sets_padding() {
    env::set_var(PADDING_ENV_VAR, "24");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(PADDING_ENV_VAR);
    assert_eq!(config.page_padding, 24.0);
}

#[test]
#[serial(pagestrip_env)]
fn env_override_ignores_garbage() {
    env::set_var(PADDING_ENV_VAR, "wide");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(PADDING_ENV_VAR);
    assert_eq!(config.page_padding, DEFAULT_PAGE_PADDING);
}

#[test]
#[serial(pagestrip_env)]
fn precedence_uses_env_config_path() {
    let config_path = env::temp_dir().join("pagestrip_test_env_path.toml");
    fs::write(&config_path, "page_padding = 7.0\n").expect("Failed to write config");

    env::set_var(CONFIG_ENV_VAR, &config_path);
    let result = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV_VAR);

    let config = result.unwrap().expect("env config should load");
    assert_eq!(config.page_padding, Some(7.0));

    fs::remove_file(config_path).ok();
}

#[test]
#[serial(pagestrip_env)]
fn precedence_explicit_path_beats_env() {
    let explicit = env::temp_dir().join("pagestrip_test_explicit.toml");
    let from_env = env::temp_dir().join("pagestrip_test_from_env.toml");
    fs::write(&explicit, "page_padding = 1.0\n").expect("Failed to write config");
    fs::write(&from_env, "page_padding = 2.0\n").expect("Failed to write config");

    env::set_var(CONFIG_ENV_VAR, &from_env);
    let result = load_config_with_precedence(Some(explicit.clone()));
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(result.unwrap().unwrap().page_padding, Some(1.0));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
fn cli_overrides_win() {
    let base = ResolvedConfig {
        page_padding: 20.0,
        ..ResolvedConfig::default()
    };
    let config = apply_cli_overrides(base, Some(5.0), Some(ContentLoading::Deferred));
    assert_eq!(config.page_padding, 5.0);
    assert_eq!(config.content_loading, ContentLoading::Deferred);
}

#[test]
fn cli_overrides_absent_keep_base() {
    let base = ResolvedConfig {
        page_padding: 20.0,
        content_loading: ContentLoading::Deferred,
        ..ResolvedConfig::default()
    };
    let config = apply_cli_overrides(base.clone(), None, None);
    assert_eq!(config, base);
}

#[test]
fn tiler_options_follow_config() {
    let config = ResolvedConfig {
        page_padding: 6.0,
        content_loading: ContentLoading::Deferred,
        ..ResolvedConfig::default()
    };
    let options = config.tiler_options();
    assert_eq!(options.page_padding, 6.0);
    assert_eq!(options.content_loading, ContentLoading::Deferred);
}
