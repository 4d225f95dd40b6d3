use crate::cli_types::DatArgs;
use crate::error::CliError;

/// Print catalog statistics for the loaded DAT.
pub(crate) fn run_info(dat: DatArgs) -> Result<(), CliError> {
    let sdk = super::load_sdk(dat)?;
    let catalog = sdk.catalog();

    let header = &catalog.header;
    if !header.name.is_empty() {
        log::info!("Name:        {}", header.name);
    }
    if !header.description.is_empty() {
        log::info!("Description: {}", header.description);
    }
    if !header.version.is_empty() {
        log::info!("Version:     {}", header.version);
    }
    crate::log_blank();

    let sub_roms: usize = catalog.iter().map(|d| d.roms.len()).sum();
    let optional: usize = catalog
        .iter()
        .map(|d| d.roms.iter().filter(|r| r.optional).count())
        .sum();
    let clones = catalog.iter().filter(|d| !d.parent.is_empty()).count();

    log::info!("Games:          {}", catalog.len());
    log::info!("Sub-roms:       {} ({} optional)", sub_roms, optional);
    log::info!("Clones (romof): {}", clones);

    let mut missing_parents: Vec<&str> = catalog
        .iter()
        .filter(|d| !d.parent.is_empty() && catalog.get(&d.parent).is_none())
        .map(|d| d.parent.as_str())
        .collect();
    missing_parents.sort_unstable();
    missing_parents.dedup();
    if !missing_parents.is_empty() {
        log::warn!(
            "Parents missing from the DAT: {}",
            missing_parents.join(", "),
        );
    }

    Ok(())
}
