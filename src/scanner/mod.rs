mod collector;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use parser_dump::DumpKind;

use crate::error::{Result, ScanError};
use crate::types::{DumpSet, ScannerConfig};

pub use collector::{classify_dump_file, collect_dump_files};

/// Read a dump file as text, replacing invalid UTF-8
pub fn read_dump_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse a `KIND=PATH` command line argument
pub fn parse_dump_arg(arg: &str) -> Result<(DumpKind, PathBuf)> {
    let (kind, path) = arg
        .split_once('=')
        .filter(|(_, path)| !path.trim().is_empty())
        .ok_or_else(|| ScanError::InvalidDumpArg(arg.to_string()))?;

    Ok((kind.parse()?, PathBuf::from(path.trim())))
}

/// Work out which file to read for each dump kind.
///
/// Files found in the input directory come first; explicitly configured
/// files replace them.
pub fn resolve_dump_files(config: &ScannerConfig) -> Result<BTreeMap<DumpKind, PathBuf>> {
    let mut files = match &config.input_dir {
        Some(dir) => {
            info!("Collecting dump files from {}", dir.display());
            collect_dump_files(dir, &config.file_extensions)?
        }
        None => BTreeMap::new(),
    };

    for (kind, path) in &config.dump_files {
        if let Some(previous) = files.insert(*kind, path.clone()) {
            debug!("{} dump {} overridden by {}", kind, previous.display(), path.display());
        }
    }

    Ok(files)
}

/// Read and parse every configured dump
pub fn load_dumps(config: &ScannerConfig) -> Result<DumpSet> {
    let files = resolve_dump_files(config)?;
    let mut dumps = DumpSet::new();

    for (kind, path) in &files {
        let text = read_dump_file(path)?;
        let count = dumps.load(*kind, &text);
        info!("{} ({}): parsed {} records from {}", kind, kind.command(), count, path.display());

        if count == 0 && !text.trim().is_empty() {
            warn!(
                "{} produced no records; is it really {} output?",
                path.display(),
                kind.command()
            );
        }
    }

    Ok(dumps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_dump_arg() {
        assert_eq!(
            parse_dump_arg("players=dumps/players.txt").unwrap(),
            (DumpKind::Players, PathBuf::from("dumps/players.txt"))
        );
        assert_eq!(
            parse_dump_arg("ListSpawnedVehicles=v.txt").unwrap(),
            (DumpKind::Vehicles, PathBuf::from("v.txt"))
        );
    }

    #[test]
    fn test_parse_dump_arg_errors() {
        assert!(matches!(parse_dump_arg("players"), Err(ScanError::InvalidDumpArg(_))));
        assert!(matches!(parse_dump_arg("players= "), Err(ScanError::InvalidDumpArg(_))));
        assert!(matches!(parse_dump_arg("loot=x.txt"), Err(ScanError::UnknownKind(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_dump_file(Path::new("/no/such/dump.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/dump.txt"));
    }

    #[test]
    fn test_load_without_inputs() {
        let dumps = load_dumps(&ScannerConfig::default()).unwrap();
        assert_eq!(dumps.loaded_count(), 0);
    }
}
