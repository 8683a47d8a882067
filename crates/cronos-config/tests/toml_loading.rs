//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` so files and env vars stay sandboxed per test.

use cronos_config::{CronosConfig, PROJECT_CONFIG};
use cronos_core::enums::View;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_database_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "./data/board.db"
url = "libsql://cronos-acme.turso.io"
auth_token = "db-token"
sync_interval_secs = 15
read_your_writes = false
"#,
        )?;

        let config: CronosConfig = Figment::from(Serialized::defaults(CronosConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "./data/board.db");
        assert_eq!(config.database.url, "libsql://cronos-acme.turso.io");
        assert_eq!(config.database.auth_token, "db-token");
        assert_eq!(config.database.sync_interval_secs, 15);
        assert!(!config.database.read_your_writes);
        assert!(config.database.is_remote());
        Ok(())
    });
}

#[test]
fn loads_auth_and_general_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
user_id = "user_ci"
email = "ci@example.com"

[general]
history_limit = 20
default_view = "timeline"
"#,
        )?;

        let config: CronosConfig = Figment::from(Serialized::defaults(CronosConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.auth.is_configured());
        assert_eq!(config.auth.email, "ci@example.com");
        assert_eq!(config.general.history_limit, 20);
        assert_eq!(config.general.default_view, View::Timeline);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "tasks.db"
"#,
        )?;

        let config: CronosConfig = Figment::from(Serialized::defaults(CronosConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "tasks.db");
        assert_eq!(config.database.sync_interval_secs, 60);
        assert!(config.database.read_your_writes);
        assert_eq!(config.general.history_limit, 50);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cronos")?;
        jail.create_file(
            PROJECT_CONFIG,
            r#"
[general]
default_view = "history"
"#,
        )?;

        let config = CronosConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.default_view, View::History);
        Ok(())
    });
}

#[test]
fn unknown_view_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_view = "calendar"
"#,
        )?;

        let result: Result<CronosConfig, _> =
            Figment::from(Serialized::defaults(CronosConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
