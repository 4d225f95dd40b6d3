//! Shared application settings (default DAT path, config file location).
//!
//! The settings file is always `~/.config/rom-audit/settings.toml` so the
//! `audit`, `info` and `config` commands agree on where defaults live.

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the settings file: `~/.config/rom-audit/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("rom-audit").join("settings.toml")
}

/// Resolve the DAT path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `dat.default_path` in `settings.toml`
pub(crate) fn resolve_dat_path(cli_override: Option<PathBuf>) -> Option<PathBuf> {
    if cli_override.is_some() {
        return cli_override;
    }
    load_default_dat_path()
}

/// Read `dat.default_path` from `settings.toml`, if set.
fn load_default_dat_path() -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("dat")?.get("default_path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save (or clear) the default DAT path in `settings.toml`.
///
/// Uses `toml::Value` for a surgical update so unrelated settings are
/// preserved.
pub(crate) fn save_default_dat_path(path: Option<&Path>) -> io::Result<()> {
    let settings = settings_path();
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(&settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let dat = table
        .entry("dat")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let dat_table = dat
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[dat] is not a table"))?;

    match path {
        Some(p) => {
            dat_table.insert(
                "default_path".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            dat_table.remove("default_path");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, &settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
