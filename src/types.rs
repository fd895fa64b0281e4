use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use parser_dump::{DumpKind, Flag, ParsedDump, Player, Squad, Vehicle};

/// Rows per page of the player listing unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// File extensions the collector treats as dump files
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &["txt", "log"];

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain-text overview
    #[default]
    Summary,
    /// Pretty-printed JSON document
    Json,
}

/// Configuration for a scan run
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Directory searched for dump files
    pub input_dir: Option<PathBuf>,
    /// Explicit dump files, these override anything found in `input_dir`
    pub dump_files: BTreeMap<DumpKind, PathBuf>,
    /// File extensions considered when walking `input_dir`
    pub file_extensions: Vec<String>,
    pub format: OutputFormat,
    /// Filter applied to the player listing
    pub search: Option<String>,
    /// Zero-based page of the player listing
    pub page: usize,
    pub per_page: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            dump_files: BTreeMap::new(),
            file_extensions: DEFAULT_FILE_EXTENSIONS.iter().map(|&s| s.to_string()).collect(),
            format: OutputFormat::default(),
            search: None,
            page: 0,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Latest records of every dump kind
#[derive(Debug, Clone, Default)]
pub struct DumpSet {
    pub players: Vec<Player>,
    pub squads: Vec<Squad>,
    pub flags: Vec<Flag>,
    pub vehicles: Vec<Vehicle>,
    loaded: BTreeSet<DumpKind>,
}

impl DumpSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` as a dump of `kind`, replacing the previous records of
    /// that kind. Returns the number of records produced.
    pub fn load(&mut self, kind: DumpKind, text: &str) -> usize {
        let parsed = parser_dump::parse_dump(kind, text);
        let count = parsed.len();
        self.insert(parsed);
        count
    }

    /// Replace the records of the parsed dump's kind
    pub fn insert(&mut self, parsed: ParsedDump) {
        self.loaded.insert(parsed.kind());
        match parsed {
            ParsedDump::Players(players) => self.players = players,
            ParsedDump::Squads(squads) => self.squads = squads,
            ParsedDump::Flags(flags) => self.flags = flags,
            ParsedDump::Vehicles(vehicles) => self.vehicles = vehicles,
        }
    }

    pub fn is_loaded(&self, kind: DumpKind) -> bool {
        self.loaded.contains(&kind)
    }

    /// Kinds loaded so far, in display order
    pub fn loaded(&self) -> impl Iterator<Item = DumpKind> + '_ {
        self.loaded.iter().copied()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn count(&self, kind: DumpKind) -> usize {
        match kind {
            DumpKind::Players => self.players.len(),
            DumpKind::Squads => self.squads.len(),
            DumpKind::Flags => self.flags.len(),
            DumpKind::Vehicles => self.vehicles.len(),
        }
    }
}
