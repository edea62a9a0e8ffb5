use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tas_calculator::config::{FlightTestConfig, SpeedUnit, find_flight_test, load_flight_tests};
use tas_calculator::export::{self, csv, json, report};
use tas_calculator::solver::{Observation, SolutionResult, solve};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "True airspeed, heading, and wind from three GPS legs"
)]
struct Cli {
    /// GPS leg as SPEED@TRACK, e.g. 140@192 (give exactly three)
    #[arg(long = "leg", value_name = "SPEED@TRACK", value_parser = parse_leg, conflicts_with = "config")]
    legs: Vec<Observation>,

    /// Flight-test manifest (YAML list, TOML file, or directory of TOML files)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Flight test name within the manifest (defaults to the first entry)
    #[arg(long, requires = "config", conflicts_with = "all")]
    test: Option<String>,

    /// Solve every flight test in the manifest
    #[arg(long, requires = "config", default_value_t = false)]
    all: bool,

    /// Speed unit of --leg input: kt, mph, kmh or mps (manifests carry their own)
    #[arg(long, default_value = "kt")]
    units: SpeedUnit,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Text,
    Csv,
    Json,
}

struct Solved {
    name: String,
    units: String,
    result: SolutionResult,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let solved = if let Some(path) = &cli.config {
        let tests = load_flight_tests(path)
            .with_context(|| format!("loading manifest {}", path.display()))?;
        info!(count = tests.len(), path = %path.display(), "manifest loaded");
        let selected: Vec<&FlightTestConfig> = if cli.all {
            tests.iter().collect()
        } else {
            vec![find_flight_test(&tests, cli.test.as_deref())?]
        };
        selected
            .into_iter()
            .map(|test| -> anyhow::Result<Solved> {
                let result = tas_calculator::solve_flight_test(test)?;
                Ok(Solved {
                    name: test.name.clone(),
                    units: test.units.label().to_string(),
                    result,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    } else {
        if cli.legs.is_empty() {
            bail!("provide three --leg SPEED@TRACK values or --config PATH");
        }
        let result = solve(&cli.legs).context("solving command-line legs")?;
        vec![Solved {
            name: "command line".to_string(),
            units: cli.units.label().to_string(),
            result,
        }]
    };

    let mut writer = export::writer_for_path(&cli.output)
        .with_context(|| format!("opening output {}", cli.output.display()))?;
    match cli.format {
        Format::Text => {
            for s in &solved {
                write!(writer, "{}", report::render_text(&s.name, &s.units, &s.result))?;
            }
        }
        Format::Csv => {
            csv::write_header(&mut writer)?;
            for s in &solved {
                csv::Record {
                    name: &s.name,
                    units: &s.units,
                    result: &s.result,
                }
                .write_to(&mut writer)?;
            }
        }
        Format::Json => {
            for s in &solved {
                json::write_json(&mut writer, &json::Summary::new(&s.name, &s.units, &s.result))?;
            }
        }
    }
    writer.flush()?;
    debug!(count = solved.len(), "results written");

    Ok(())
}

/// `RUST_LOG` wins when set; `-v` raises both crates to debug on top of it.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tas=info,tas_solver=info"));
    if verbose {
        filter = filter
            .add_directive("tas=debug".parse()?)
            .add_directive("tas_solver=debug".parse()?);
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn parse_leg(raw: &str) -> Result<Observation, String> {
    let (speed, track) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected SPEED@TRACK, got '{raw}'"))?;
    let speed: f64 = speed
        .trim()
        .parse()
        .map_err(|e| format!("invalid speed '{speed}': {e}"))?;
    let track: f64 = track
        .trim()
        .parse()
        .map_err(|e| format!("invalid track '{track}': {e}"))?;
    Ok(Observation::new(speed, track))
}
