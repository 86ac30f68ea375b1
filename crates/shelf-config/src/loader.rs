// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shelf.toml` > `~/.config/shelf/shelf.toml` > `/etc/shelf/shelf.toml`
//! with environment variable overrides via `SHELF_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShelfConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/shelf/shelf.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "shelf.toml";

/// Top-level sections, used to map `SHELF_<SECTION>_<KEY>` env vars.
const SECTIONS: &[&str] = &["app", "server", "storage"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shelf/shelf.toml` (system-wide)
/// 3. `~/.config/shelf/shelf.toml` (user XDG config)
/// 4. `./shelf.toml` (local directory)
/// 5. `SHELF_*` environment variables
pub fn load_config() -> Result<ShelfConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ShelfConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShelfConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shelf/shelf.toml"))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SHELF_STORAGE_DATABASE_FILE` must map to
/// `storage.database_file`, not `storage.database.file`.
fn env_provider() -> Env {
    Env::prefixed("SHELF_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_var_overrides_database_file() {
        Jail::expect_with(|jail| {
            jail.set_env("SHELF_STORAGE_DATABASE_FILE", "/srv/shelf/items.json");
            let config = load_config()?;
            assert_eq!(
                config.storage.database_file,
                PathBuf::from("/srv/shelf/items.json")
            );
            Ok(())
        });
    }

    #[test]
    fn env_var_overrides_nested_underscore_key() {
        Jail::expect_with(|jail| {
            jail.set_env("SHELF_SERVER_API_PREFIX", "/v2");
            jail.set_env("SHELF_SERVER_PORT", "9100");
            let config = load_config()?;
            assert_eq!(config.server.api_prefix, "/v2");
            assert_eq!(config.server.port, 9100);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults_and_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_PATH,
                r#"
[app]
name = "Local Shelf"

[server]
port = 7000
"#,
            )?;
            jail.set_env("SHELF_SERVER_PORT", "7001");
            let config = load_config()?;
            assert_eq!(config.app.name, "Local Shelf");
            assert_eq!(config.server.port, 7001);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_is_loaded() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[storage]\ndatabase_file = \"custom.json\"\n")?;
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.storage.database_file, PathBuf::from("custom.json"));
            Ok(())
        });
    }
}
