use anyhow::{anyhow, Context};
use config::{Config, File};
use hexgrid::{
    field_of_view, filled_ring, find_path, line, path_cost, reachable, ring,
    timed, GridConfig, HexCoordinateValue, HexGrid, TilePoint,
};
use log::{info, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};
use structopt::{clap::AppSettings, StructOpt};
use strum::{Display, EnumString};

/// CLI for running geometry and search operations on a hex grid. Points are
/// given in cube coordinates, as `x,y,z`.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "hexgrid",
    // Points often start with a minus sign
    global_setting = AppSettings::AllowLeadingHyphen
)]
struct Opt {
    /// Path to a config file that defines the grid to search. Supported
    /// formats: JSON, TOML. If not given, an open grid of radius 10 is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// The format to print results in. Supported formats:
    ///
    /// json - A single line of JSON
    ///
    /// pretty_json - Indented JSON
    ///
    /// toml - TOML
    #[structopt(short = "f", long, default_value = "json")]
    format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Every tile exactly `radius` steps from the origin, in walk order
    Ring {
        origin: TilePoint,
        radius: i32,
    },

    /// Every tile within `radius` steps of the origin
    FilledRing {
        origin: TilePoint,
        radius: i32,
    },

    /// Every tile on a straight line between two tiles, in order
    Line {
        from: TilePoint,
        to: TilePoint,
    },

    /// Every tile that can be walked to within `steps` moves
    Reach {
        origin: TilePoint,
        steps: i32,
    },

    /// Every tile within `radius` that can be seen from the origin
    Fov {
        origin: TilePoint,
        radius: i32,

        /// Include tiles that are only partially hidden
        #[structopt(long)]
        partial: bool,
    },

    /// The cheapest path between two tiles
    Path {
        start: TilePoint,
        goal: TilePoint,
    },

    /// Print the full grid config, with defaults filled in
    Config,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for `--format`!
    Json,
    PrettyJson,
    Toml,
}

/// Output of any command that produces a group of tiles
#[derive(Debug, Serialize)]
struct TilesOutput {
    tiles: Vec<TilePoint>,
}

/// Output of the path command
#[derive(Debug, Serialize)]
struct PathOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<TilePoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

fn load_config(config_path: &Path) -> anyhow::Result<GridConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Collect unordered tiles into a list with a stable order, so output is
/// reproducible
fn sorted(tiles: impl IntoIterator<Item = TilePoint>) -> TilesOutput {
    let mut tiles: Vec<_> = tiles.into_iter().collect();
    tiles.sort_by_key(|tile| (tile.x(), tile.y()));
    TilesOutput { tiles }
}

fn write_output(
    format: OutputFormat,
    value: &impl Serialize,
) -> anyhow::Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::PrettyJson => serde_json::to_string_pretty(value)?,
        OutputFormat::Toml => toml::to_string_pretty(value)?,
    };
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text).context("error writing output")?;
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => {
            let config = load_config(config_path)?;
            info!("Loaded config from {:?}", config_path);
            config
        }
        None => GridConfig::default(),
    };

    let format = opt.format;
    match opt.command {
        Command::Ring { origin, radius } => {
            let tiles = ring(origin, radius)?.into_iter().collect();
            write_output(format, &TilesOutput { tiles })
        }
        Command::Line { from, to } => {
            let tiles = line(from, to)?.into_iter().collect();
            write_output(format, &TilesOutput { tiles })
        }
        Command::FilledRing { origin, radius } => {
            write_output(format, &sorted(filled_ring(origin, radius)?))
        }
        Command::Reach { origin, steps } => {
            let grid = HexGrid::new(config)?;
            write_output(format, &sorted(reachable(origin, steps, &grid)?))
        }
        Command::Fov {
            origin,
            radius,
            partial,
        } => {
            let grid = HexGrid::new(config)?;
            let visible = field_of_view(origin, radius, &grid, partial)?;
            write_output(format, &sorted(visible))
        }
        Command::Path { start, goal } => {
            let grid = HexGrid::new(config)?;
            let path = timed!(
                format!("Path from {} to {}", start, goal),
                log::Level::Info,
                find_path(start, goal, &grid)?
            );
            let cost = path.as_ref().map(|path| path_cost(path, &grid));
            write_output(format, &PathOutput { path, cost })
        }
        Command::Config => write_output(format, &config),
    }
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
