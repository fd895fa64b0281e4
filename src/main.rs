use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use parser_dump::DumpKind;

use scum_dump_scanner::{parse_dump_arg, scan_dumps, OutputFormat, ScannerConfig};

/// Parse SCUM admin console dumps and cross-reference players, squads,
/// flags and vehicles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to search for dump files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// ListPlayers output
    #[arg(long)]
    players: Option<PathBuf>,

    /// DumpAllSquadsInfoList output
    #[arg(long)]
    squads: Option<PathBuf>,

    /// ListFlags output
    #[arg(long)]
    flags: Option<PathBuf>,

    /// ListSpawnedVehicles output
    #[arg(long)]
    vehicles: Option<PathBuf>,

    /// Extra dump as KIND=PATH, e.g. players=today.txt
    #[arg(long = "dump", value_name = "KIND=PATH", value_parser = parse_dump_arg)]
    dumps: Vec<(DumpKind, PathBuf)>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Only list players whose name, Steam name or Steam ID matches
    #[arg(short, long)]
    search: Option<String>,

    /// Page of the player listing, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = scum_dump_scanner::types::DEFAULT_PAGE_SIZE)]
    per_page: usize,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> ScannerConfig {
        let mut config = ScannerConfig {
            input_dir: self.dir,
            format: self.format,
            search: self.search,
            page: self.page.saturating_sub(1),
            per_page: self.per_page,
            ..Default::default()
        };

        config.dump_files.extend(self.dumps);
        let named = [
            (DumpKind::Players, self.players),
            (DumpKind::Squads, self.squads),
            (DumpKind::Flags, self.flags),
            (DumpKind::Vehicles, self.vehicles),
        ];
        for (kind, path) in named {
            if let Some(path) = path {
                config.dump_files.insert(kind, path);
            }
        }

        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let output = scan_dumps(&cli.into_config())?;
    print!("{}", output);

    Ok(())
}
