//! Deterministic directory walking and name indexing for archive sets.
//!
//! The walk is lexicographic per directory and depth-first, which makes every
//! downstream ordering guarantee (result order, first-seen-wins indexing)
//! reproducible across runs.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Normalize a user-supplied extension list: trim, strip a leading dot,
/// lowercase, drop blanks.
pub fn normalize_extensions(raw: &[String]) -> HashSet<String> {
    raw.iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Recursively collect files under `root` whose extension is in `extensions`.
///
/// An empty set accepts every file. A non-existent root is an error, as are
/// unreadable subdirectories.
pub fn collect_archives(root: &Path, extensions: &HashSet<String>) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk_dir(root, extensions, &mut found)?;
    Ok(found)
}

fn walk_dir(dir: &Path, extensions: &HashSet<String>, found: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, extensions, found)?;
        } else if has_matching_extension(&path, extensions) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_matching_extension(path: &Path, extensions: &HashSet<String>) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_lowercase()))
        .unwrap_or(false)
}

/// Index paths by lowercased game name (file stem). First-seen wins, which is
/// deterministic because the walk order is sorted.
pub fn index_by_game(paths: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        index
            .entry(stem.to_lowercase())
            .or_insert_with(|| path.clone());
    }
    index
}

/// Fold `extra` into `base` without overwriting: a game present in the ROM
/// directory takes precedence over the same name in the BIOS directory.
pub fn merge_index(base: &mut HashMap<String, PathBuf>, extra: HashMap<String, PathBuf>) {
    for (name, path) in extra {
        base.entry(name).or_insert(path);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn exts(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn normalize_strips_dots_and_blanks() {
        let raw = vec![
            " .ZIP ".to_string(),
            "7z".to_string(),
            "".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_extensions(&raw), exts(&["zip", "7z"]));
    }

    #[test]
    fn walk_is_sorted_and_recursive() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("b_sub")).unwrap();
        touch(&root.join("c.zip"));
        touch(&root.join("a.zip"));
        touch(&root.join("b_sub/nested.zip"));

        let paths = collect_archives(root, &exts(&["zip"])).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.zip", "b_sub/nested.zip", "c.zip"]);
    }

    #[test]
    fn walk_filters_by_extension_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("game.ZIP"));
        touch(&root.join("game.7z"));
        touch(&root.join("readme.txt"));
        touch(&root.join("noext"));

        let paths = collect_archives(root, &exts(&["zip", "7z"])).unwrap();
        assert_eq!(paths.len(), 2);

        // empty set accepts everything
        let all = collect_archives(root, &HashSet::new()).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn walk_errors_on_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(collect_archives(&missing, &HashSet::new()).is_err());
    }

    #[test]
    fn index_lowercases_and_keeps_first() {
        let paths = vec![
            PathBuf::from("/roms/MsLug.zip"),
            PathBuf::from("/roms/sub/mslug.7z"),
        ];
        let index = index_by_game(&paths);
        assert_eq!(index.len(), 1);
        assert_eq!(index["mslug"], PathBuf::from("/roms/MsLug.zip"));
    }

    #[test]
    fn merge_does_not_overwrite_rom_entries() {
        let mut base = index_by_game(&[PathBuf::from("/roms/neogeo.zip")]);
        let bios = index_by_game(&[
            PathBuf::from("/bios/neogeo.zip"),
            PathBuf::from("/bios/other.zip"),
        ]);
        merge_index(&mut base, bios);
        assert_eq!(base["neogeo"], PathBuf::from("/roms/neogeo.zip"));
        assert_eq!(base["other"], PathBuf::from("/bios/other.zip"));
    }
}
