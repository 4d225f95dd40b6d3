//! rom-audit CLI
//!
//! Command-line interface for auditing arcade ROM sets against DAT catalogs.

mod cli_types;
mod commands;
mod error;
mod settings;
mod spinner;

use std::fs;
use std::io::Write;
use std::sync::Mutex;

use clap::Parser;
use log::LevelFilter;

use cli_types::*;

// -- Custom logger --

struct CliLogger {
    level: LevelFilter,
    logfile: Option<Mutex<fs::File>>,
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();

        // Terminal: warn/error to stderr, info to stdout
        if record.level() <= log::Level::Warn {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }

        // Logfile: ANSI-stripped
        if let Some(ref file) = self.logfile {
            let stripped = strip_ansi_escapes::strip(&msg);
            let text = String::from_utf8_lossy(&stripped);
            let mut guard = file.lock().unwrap();
            let _ = writeln!(guard, "{}", text);
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.logfile {
            let _ = std::io::Write::flush(&mut *file.lock().unwrap());
        }
    }
}

/// Blank separator line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

// -- Main --

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let logfile = cli.logfile.map(|p| {
        let file = fs::File::create(&p).unwrap_or_else(|e| {
            eprintln!("Error: could not create logfile {}: {}", p.display(), e);
            std::process::exit(1);
        });
        Mutex::new(file)
    });
    let logger = Box::new(CliLogger { level, logfile });
    log::set_boxed_logger(logger).expect("Failed to set logger");
    log::set_max_level(level);

    let result = match cli.command {
        Commands::Audit {
            dat,
            roms,
            bios,
            ext,
            json,
            output,
            problems_only,
        } => commands::audit::run_audit(dat, roms, bios, ext, json, output, problems_only, quiet),
        Commands::Info { dat } => commands::info::run_info(dat),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDat { path } => commands::config::run_config_set_dat(&path),
            ConfigAction::ClearDat => commands::config::run_config_clear_dat(),
        },
    };

    if let Err(e) = result {
        log::error!("Error: {}", e);
        std::process::exit(1);
    }
}
