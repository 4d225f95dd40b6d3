pub(crate) mod audit;
pub(crate) mod config;
pub(crate) mod info;

use rom_audit_lib::TestSdk;

use crate::cli_types::{DatArgs, DialectArg};
use crate::error::CliError;
use crate::settings;

/// Resolve the DAT path (CLI flag or saved default) and load the catalog.
pub(crate) fn load_sdk(dat: DatArgs) -> Result<TestSdk, CliError> {
    let dat_path = settings::resolve_dat_path(dat.dat).ok_or_else(|| {
        CliError::config(
            "no DAT file given; pass --dat or save one with `rom-audit config set-dat`",
        )
    })?;
    log::info!("Loading DAT: {}", dat_path.display());
    let sdk = match dat.dialect {
        DialectArg::Fbneo => TestSdk::from_fbneo(&dat_path)?,
        DialectArg::Mame => TestSdk::from_mame(&dat_path)?,
    };
    Ok(sdk)
}
