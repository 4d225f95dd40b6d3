//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rom-audit")]
#[command(about = "Audit arcade ROM sets against DAT catalogs", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Common arguments for commands that load a DAT catalog.
#[derive(Args, Clone)]
pub(crate) struct DatArgs {
    /// Path to the DAT catalog (defaults to dat.default_path from settings.toml)
    #[arg(long)]
    pub dat: Option<PathBuf>,

    /// DAT dialect
    #[arg(long, value_enum, default_value = "fbneo")]
    pub dialect: DialectArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DialectArg {
    /// FinalBurn Neo (`game` entries)
    Fbneo,
    /// MAME (`machine` entries)
    Mame,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Audit a directory of ROM archives against the DAT catalog
    Audit {
        #[command(flatten)]
        dat: DatArgs,

        /// Directory of ROM archives to audit
        roms: PathBuf,

        /// Directory of BIOS/parent archives
        #[arg(long)]
        bios: Option<PathBuf>,

        /// Archive extensions to include (e.g., zip,7z); empty accepts everything
        #[arg(long, value_delimiter = ',')]
        ext: Vec<String>,

        /// Print the report as JSON instead of formatted text
        #[arg(long)]
        json: bool,

        /// Write a JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only list sets that are not fully complete
        #[arg(long)]
        problems_only: bool,
    },

    /// Show DAT catalog statistics
    Info {
        #[command(flatten)]
        dat: DatArgs,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings
    Show,

    /// Print the settings file path
    Path,

    /// Save a default DAT path used when --dat is omitted
    SetDat {
        /// DAT file to use by default
        path: PathBuf,
    },

    /// Clear the saved default DAT path
    ClearDat,
}
