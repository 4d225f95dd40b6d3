//! DAT catalog parsing for the FinalBurn Neo and MAME XML dialects.
//!
//! Both dialects share the `datafile` root; only the per-game entry element
//! differs (`game` vs `machine`). Parsing is deliberately lenient: DOCTYPE
//! declarations, comments, processing instructions and unknown elements or
//! attributes are skipped without error, and attribute values are taken raw
//! so unexpanded entities cannot abort a load.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::catalog::{DatHeader, DefinitionCatalog, RomDefinition, SubRomFile};
use crate::error::DatError;

/// Which entry element a DAT dialect uses for its games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatDialect {
    /// FinalBurn Neo: `<game name=.. romof=..>`.
    FbNeo,
    /// MAME: `<machine name=.. romof=..>` plus extra elements the audit ignores.
    Mame,
}

impl DatDialect {
    fn entry_tag(self) -> &'static [u8] {
        match self {
            DatDialect::FbNeo => b"game",
            DatDialect::Mame => b"machine",
        }
    }
}

/// Load a FinalBurn Neo DAT.
pub fn from_fbneo(path: impl AsRef<Path>) -> Result<DefinitionCatalog, DatError> {
    load_catalog(path, DatDialect::FbNeo)
}

/// Load a MAME DAT.
pub fn from_mame(path: impl AsRef<Path>) -> Result<DefinitionCatalog, DatError> {
    load_catalog(path, DatDialect::Mame)
}

/// Parse the DAT at `path` into a catalog of game definitions.
pub fn load_catalog(
    path: impl AsRef<Path>,
    dialect: DatDialect,
) -> Result<DefinitionCatalog, DatError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatError::open(path, e))?;
    parse_datafile(BufReader::new(file), dialect)
}

fn parse_datafile<R: BufRead>(
    reader: R,
    dialect: DatDialect,
) -> Result<DefinitionCatalog, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let entry_tag = dialect.entry_tag();
    let mut buf = Vec::new();

    let mut header = DatHeader::default();
    let mut games: HashMap<String, RomDefinition> = HashMap::new();

    let mut saw_datafile = false;
    let mut in_header = false;
    let mut header_tag = String::new();
    // None while outside an entry, or inside one whose `name` was missing.
    let mut current: Option<RomDefinition> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"datafile" => saw_datafile = true,
                b"header" => in_header = true,
                tag if tag == entry_tag => current = start_entry(e),
                b"rom" => push_rom(&mut current, e),
                tag if in_header => header_tag = String::from_utf8_lossy(tag).into_owned(),
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"datafile" => saw_datafile = true,
                tag if tag == entry_tag => {
                    if let Some(def) = start_entry(e) {
                        games.insert(def.name.clone(), def);
                    }
                }
                b"rom" => push_rom(&mut current, e),
                _ => {}
            },
            Event::Text(ref e) if in_header => {
                let text = e
                    .unescape()
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(e.as_ref()).into_owned());
                let text = text.trim();
                match header_tag.as_str() {
                    "name" => header.name = text.to_string(),
                    "description" => header.description = text.to_string(),
                    "version" => header.version = text.to_string(),
                    _ => {}
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"header" => in_header = false,
                tag if tag == entry_tag => {
                    if let Some(def) = current.take() {
                        games.insert(def.name.clone(), def);
                    }
                }
                _ if in_header => header_tag.clear(),
                _ => {}
            },
            Event::Eof => break,
            // DOCTYPE (including inline DTDs), comments, PIs, CDATA: ignored.
            _ => {}
        }
        buf.clear();
    }

    if !saw_datafile {
        return Err(DatError::invalid_dat("no datafile root element"));
    }

    Ok(DefinitionCatalog::new(header, games))
}

/// Read `name`/`romof` off a game entry. Entries without a name are skipped.
fn start_entry(e: &BytesStart<'_>) -> Option<RomDefinition> {
    let mut name = String::new();
    let mut parent = String::new();
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value);
        match attr.key.as_ref() {
            b"name" => name = value.trim().to_string(),
            b"romof" => parent = value.trim().to_string(),
            // `cloneof`, `sampleof`, `isbios`, `isdevice` etc. don't affect
            // the audit
            _ => {}
        }
    }
    if name.is_empty() {
        return None;
    }
    Some(RomDefinition {
        name,
        parent,
        roms: Vec::new(),
    })
}

fn push_rom(current: &mut Option<RomDefinition>, e: &BytesStart<'_>) {
    let Some(def) = current.as_mut() else { return };

    let mut rom = SubRomFile::default();
    let mut status = String::new();
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value);
        match attr.key.as_ref() {
            b"name" => rom.name = value.trim().to_string(),
            b"size" => rom.size = value.trim().parse().unwrap_or(0),
            b"crc" => rom.crc = normalize_crc(&value),
            b"merge" => rom.merge_name = value.trim().to_string(),
            b"status" => status = value.trim().to_string(),
            _ => {}
        }
    }
    if rom.name.is_empty() {
        return;
    }
    rom.optional = derive_optional(&rom.name, rom.size, &status);
    def.roms.push(rom);
}

/// Lowercase a declared CRC and left-pad it to 8 hex digits so it compares
/// directly against `format!("{:08x}", crc32)` of an archive entry.
fn normalize_crc(raw: &str) -> String {
    let trimmed = raw.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{trimmed:0>8}")
}

const OPTIONAL_SUFFIXES: &[&str] = &[".mcu", ".pld", ".prom"];
const OPTIONAL_PREFIXES: &[&str] = &[
    "pal", "gal", "i8751", "68705", "6805", "i80c51", "pic", "mcs51",
];
/// Declared sizes below this are microcontroller blobs most dumps lack.
const TINY_BLOB_LIMIT: u64 = 512;

fn derive_optional(name: &str, size: u64, status: &str) -> bool {
    if status.eq_ignore_ascii_case("nodump") {
        return true;
    }
    let lower = name.to_ascii_lowercase();
    if OPTIONAL_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return true;
    }
    if OPTIONAL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return true;
    }
    size > 0 && size < TINY_BLOB_LIMIT
}
