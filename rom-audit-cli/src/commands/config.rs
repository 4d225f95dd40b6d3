use std::path::Path;

use crate::error::CliError;
use crate::settings;

pub(crate) fn run_config_show() -> Result<(), CliError> {
    match settings::load_settings_string() {
        Some(contents) => log::info!("{}", contents.trim_end()),
        None => log::info!(
            "No settings saved yet ({})",
            settings::settings_path().display(),
        ),
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

pub(crate) fn run_config_set_dat(path: &Path) -> Result<(), CliError> {
    if !path.is_file() {
        return Err(CliError::config(format!(
            "DAT file not found: {}",
            path.display(),
        )));
    }
    settings::save_default_dat_path(Some(path))?;
    log::info!("Default DAT set to {}", path.display());
    Ok(())
}

pub(crate) fn run_config_clear_dat() -> Result<(), CliError> {
    settings::save_default_dat_path(None)?;
    log::info!("Default DAT cleared");
    Ok(())
}
