//! Integration tests for layered configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::Path;
use th_config::{ConfigError, TailConfig};

fn project_dir(jail: &Jail) -> figment::error::Result<()> {
    std::fs::create_dir_all(jail.directory().join(".tailhouse")).map_err(|e| e.to_string())?;
    Ok(())
}

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
url = "libsql://reptiles.turso.io"
auth_token = "turso-token"
local_replica_path = "./replica.db"
"#,
        )?;

        let config: TailConfig = Figment::from(Serialized::defaults(TailConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.url, "libsql://reptiles.turso.io");
        assert_eq!(config.database.auth_token, "turso-token");
        assert!(config.database.is_configured());
        assert!(config.database.has_local_replica());
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[general]
page_size = 25
",
        )?;

        let config: TailConfig = Figment::from(Serialized::defaults(TailConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.page_size, 25);
        assert_eq!(config.general.max_page_size, 100);
        assert!(config.display.color);
        assert!(!config.database.is_configured());
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_from_project_dir() {
    Jail::expect_with(|jail| {
        project_dir(jail)?;
        jail.create_file(
            ".tailhouse/config.toml",
            r"
[display]
color = false
",
        )?;

        let config = TailConfig::load().expect("config loads");
        assert!(!config.display.color);

        let rooted = TailConfig::load_for(jail.directory()).expect("config loads");
        assert!(!rooted.display.color);
        Ok(())
    });
}

#[test]
fn env_overrides_project_toml() {
    Jail::expect_with(|jail| {
        project_dir(jail)?;
        jail.create_file(
            ".tailhouse/config.toml",
            r#"
[database]
url = "libsql://from-toml.turso.io"
"#,
        )?;
        jail.set_env("TAILHOUSE_DATABASE__URL", "libsql://from-env.turso.io");
        jail.set_env("TAILHOUSE_GENERAL__PAGE_SIZE", "50");

        let config = TailConfig::load_for(Path::new(".")).expect("config loads");
        assert_eq!(config.database.url, "libsql://from-env.turso.io");
        assert_eq!(config.general.page_size, 50);
        Ok(())
    });
}

#[test]
fn env_only_provider_maps_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("TAILHOUSE_DATABASE__AUTH_TOKEN", "env-token");

        let config: TailConfig = Figment::from(Serialized::defaults(TailConfig::default()))
            .merge(Env::prefixed("TAILHOUSE_").split("__"))
            .extract()?;

        assert_eq!(config.database.auth_token, "env-token");
        Ok(())
    });
}

#[test]
fn invalid_page_size_is_rejected_on_load() {
    Jail::expect_with(|jail| {
        jail.set_env("TAILHOUSE_GENERAL__PAGE_SIZE", "0");

        let err = TailConfig::load().expect_err("zero page size must fail");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        project_dir(jail)?;
        jail.create_file(".tailhouse/config.toml", "[general\npage_size = ")?;

        let err = TailConfig::load().expect_err("malformed toml must fail");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
