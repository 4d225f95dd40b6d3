pub mod catalog;
pub mod dat;
pub mod error;

pub use catalog::{DatHeader, DefinitionCatalog, RomDefinition, SubRomFile};
pub use dat::{DatDialect, from_fbneo, from_mame, load_catalog};
pub use error::DatError;
