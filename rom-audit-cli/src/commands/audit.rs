use std::fs;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_audit_lib::{CancelToken, RomFileTestResult, TestState};

use crate::cli_types::DatArgs;
use crate::error::CliError;
use crate::spinner::ScanSpinner;

/// Run the audit command.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_audit(
    dat: DatArgs,
    roms: PathBuf,
    bios: Option<PathBuf>,
    ext: Vec<String>,
    json: bool,
    output: Option<PathBuf>,
    problems_only: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let sdk = super::load_sdk(dat)?;
    log::info!("{} game definitions loaded", sdk.catalog().len());
    log::info!("Auditing ROMs in: {}", roms.display());
    if let Some(ref b) = bios {
        log::info!("BIOS directory: {}", b.display());
    }
    crate::log_blank();

    let spinner = ScanSpinner::new(quiet || json);
    let cancel = CancelToken::new();
    let scan = sdk.test_dir_with_progress(&roms, bios.as_deref(), &ext, &cancel, |path| {
        spinner.set_current(path);
    });
    spinner.finish();
    let report = scan?;

    if let Some(ref out) = output {
        fs::write(out, serde_json::to_string_pretty(&report)?)?;
        log::info!("Report written to {}", out.display());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for result in report.iter() {
        print_result(result, problems_only);
    }

    crate::log_blank();
    log::info!(
        "{} sets: {} complete, {} partial, {} broken",
        report.len(),
        report
            .count(TestState::Green)
            .if_supports_color(Stdout, |t| t.green()),
        report
            .count(TestState::Yellow)
            .if_supports_color(Stdout, |t| t.yellow()),
        report
            .count(TestState::Red)
            .if_supports_color(Stdout, |t| t.red()),
    );
    Ok(())
}

/// Print one archive's verdict and, for problem sets, the per-sub-rom detail.
fn print_result(result: &RomFileTestResult, problems_only: bool) {
    match result.state() {
        TestState::Green => {
            if !problems_only {
                log::info!(
                    "  {} {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    result.rom_name.if_supports_color(Stdout, |t| t.bold()),
                );
            }
        }
        TestState::Yellow => {
            log::warn!(
                "  {} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                result.rom_name.if_supports_color(Stdout, |t| t.bold()),
            );
            print_problems(result);
        }
        TestState::Red => {
            log::warn!(
                "  {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                result.rom_name.if_supports_color(Stdout, |t| t.bold()),
            );
            print_problems(result);
        }
    }

    for parent in result.parents.iter().filter(|p| !p.exist) {
        log::warn!(
            "    {} parent archive {} not found",
            "\u{2014}".if_supports_color(Stdout, |t| t.dimmed()),
            parent.name.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

fn print_problems(result: &RomFileTestResult) {
    for sub in result.results.iter().filter(|r| r.state != TestState::Green) {
        let glyph = match sub.state {
            TestState::Red => format!("{}", "\u{2718}".if_supports_color(Stdout, |t| t.red())),
            _ => format!("{}", "\u{26A0}".if_supports_color(Stdout, |t| t.yellow())),
        };
        log::warn!(
            "    {} {}: {}",
            glyph,
            sub.sub_rom.normalized_name(),
            sub.message,
        );
    }
}
