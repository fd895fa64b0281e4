pub mod correlation;
pub mod error;
pub mod query;
pub mod report;
pub mod scanner;
pub mod types;

pub use correlation::{Correlation, DumpStats, Ownership, PlayerView, SquadView};
pub use error::ScanError;
pub use parser_dump::{DumpKind, Flag, Location, Member, Player, Squad, SteamId, Vehicle};
pub use query::{paginate, search_players};
pub use scanner::{load_dumps, parse_dump_arg};
pub use types::{DumpSet, OutputFormat, ScannerConfig};

use anyhow::{Context, Result};
use log::{info, warn};

/// Load the configured dumps and render the report
pub fn scan_dumps(config: &ScannerConfig) -> Result<String> {
    info!("Starting dump scan with configuration:");
    if let Some(dir) = &config.input_dir {
        info!("  Input directory: {}", dir.display());
    }
    for (kind, path) in &config.dump_files {
        info!("  {} dump: {}", kind, path.display());
    }
    info!("  Format: {:?}", config.format);

    let dumps = load_dumps(config).context("Failed to load dumps")?;
    if dumps.loaded_count() == 0 {
        warn!("No dump files found; pass --dir or one of --players/--squads/--flags/--vehicles");
    }

    report::render(&dumps, config).context("Failed to render report")
}
