//! ROM-set auditing engine.
//!
//! Loads a DAT catalog (see `rom-audit-dat`), walks a directory of compressed
//! ROM archives plus an optional BIOS directory, follows parent/BIOS merge
//! chains, and classifies every archive's declared sub-files as Green
//! (complete), Yellow (partial/repairable) or Red (missing or unusable).

pub mod archive;
pub mod cancel;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod sdk;

pub use archive::ArchiveFile;
pub use cancel::CancelToken;
pub use error::AuditError;
pub use matcher::{SubRomTestResult, TestState};
pub use report::{ParentInfo, RomFileTestResult, RomTestReport};
pub use sdk::TestSdk;

// The catalog types flow through results, so re-export them for callers.
pub use rom_audit_dat::{DatDialect, DatError, DefinitionCatalog, RomDefinition, SubRomFile};
