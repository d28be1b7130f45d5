use atscope_explorer::{ConfigError, Explorer, ExplorerConfig, Theme, CONFIG_ENV};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn loads_yaml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "plc_directory: https://plc.example\ncdn_base: https://cdn.example\ntheme: dark"
    )
    .unwrap();

    let config = ExplorerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.plc_directory, "https://plc.example");
    assert_eq!(config.cdn_base, "https://cdn.example");
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.timeout_secs, 30);
}

#[test]
fn explicit_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("atscope.yaml");
    assert!(matches!(
        ExplorerConfig::load(Some(&missing)),
        Err(ConfigError::Io { .. })
    ));
}

// The only test in this binary that touches the environment.
#[test]
fn environment_path_is_optional() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("atscope.yaml");

    std::env::set_var(CONFIG_ENV, &path);
    assert_eq!(ExplorerConfig::load(None).unwrap(), ExplorerConfig::default());

    std::fs::write(&path, "max_depth: 8\n").unwrap();
    assert_eq!(ExplorerConfig::load(None).unwrap().max_depth, 8);

    std::env::remove_var(CONFIG_ENV);
}

#[tokio::test]
async fn explorer_starts_with_configured_theme() {
    let config = ExplorerConfig {
        theme: Theme::Dark,
        max_depth: 3,
        ..Default::default()
    };
    let explorer = Explorer::from_config(&config).unwrap();
    assert_eq!(explorer.state().snapshot().theme, Theme::Dark);
    assert_eq!(explorer.renderer().options().max_depth, 3);
    assert_eq!(explorer.resolver().cache_len().await, 0);
}
