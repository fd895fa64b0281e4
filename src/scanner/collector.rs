use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, trace};
use parser_dump::DumpKind;
use walkdir::WalkDir;

use crate::error::{Result, ScanError};

/// Work out which dump a file holds from its name.
///
/// Matches the admin command name (`ListPlayers.txt`) as well as plain
/// words (`players_2024-05-01.log`), case-insensitively.
pub fn classify_dump_file(path: &Path) -> Option<DumpKind> {
    let stem = path.file_stem()?.to_string_lossy().to_lowercase();

    DumpKind::ALL.into_iter().find(|kind| {
        stem.contains(&kind.command().to_lowercase()) || stem.contains(kind.label().trim_end_matches('s'))
    })
}

fn has_allowed_extension(path: &Path, allowed_extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| allowed_extensions.iter().any(|allowed| *allowed == ext))
}

/// Find the dump files in a directory, one per kind.
///
/// When several files hold the same kind the most recently modified one
/// wins, since a newer dump replaces the older records entirely.
pub fn collect_dump_files(dir: &Path, allowed_extensions: &[String]) -> Result<BTreeMap<DumpKind, PathBuf>> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }

    let mut found: BTreeMap<DumpKind, (SystemTime, PathBuf)> = BTreeMap::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !has_allowed_extension(path, allowed_extensions) {
            continue;
        }

        let Some(kind) = classify_dump_file(path) else {
            trace!("Ignoring unrecognised file: {}", path.display());
            continue;
        };

        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        debug!("Found {} dump: {}", kind, path.display());

        // Ties go to the later file name
        if found.get(&kind).is_none_or(|(previous, _)| modified >= *previous) {
            found.insert(kind, (modified, path.to_path_buf()));
        }
    }

    Ok(found.into_iter().map(|(kind, (_, path))| (kind, path)).collect())
}
