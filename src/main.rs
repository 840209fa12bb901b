mod catalog;
mod ephemeris;
mod sampler;
mod sky;
mod web;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use thiserror::Error;

use crate::sampler::moment_at;
use crate::ephemeris::Observer;
use crate::sky::{compute_positions, compute_report, SkyError, SkyReport, SkyRequest, SkySnapshot};
use crate::web::config::ConfigError;
use crate::web::{AppState, Config};

#[derive(Parser)]
#[command(name = "sky-o-mat")]
#[command(about = "Where the Sun, the Moon and bright stars stand in the sky")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Altitude and azimuth of every body at one moment
    Now {
        #[command(flatten)]
        sky: SkyArgs,
        /// Print the positions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Altitude of every body over a whole UTC day
    Sweep {
        #[command(flatten)]
        sky: SkyArgs,
        /// Number of samples between 00:00 and 24:00
        #[arg(long)]
        samples: Option<usize>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the stars that can be named in `bodies`
    Stars {
        /// Configuration file (YAML)
        #[arg(long)]
        config: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Configuration file (YAML)
        #[arg(long)]
        config: Option<String>,
        /// Address to listen on, overrides the configuration
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args)]
struct SkyArgs {
    /// Configuration file (YAML)
    #[arg(long)]
    config: Option<String>,
    /// UTC date, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// UTC time of day, HH:MM (default: now)
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,
    /// Observer latitude in degrees, overrides the configuration
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,
    /// Observer longitude in degrees, overrides the configuration
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Sky(#[from] SkyError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Now { sky, json } => now(&sky, json),
        Commands::Sweep { sky, samples, json } => sweep(&sky, samples, json),
        Commands::Stars { config } => stars(config.as_deref()),
        Commands::Serve { config, bind } => serve(config.as_deref(), bind),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn now(args: &SkyArgs, json: bool) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let snapshot = build_snapshot(config, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_header(&snapshot.observer, snapshot.moment);
    for line in snapshot.summary_lines() {
        println!("{}", line);
    }
    Ok(())
}

fn sweep(args: &SkyArgs, samples: Option<usize>, json: bool) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let report = build_report(config, args, samples)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_header(&report.observer, report.moment);
    print_sweep(&report);
    Ok(())
}

fn stars(config_path: Option<&str>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let catalog = config.star_catalog()?;
    if catalog.is_empty() {
        println!("No stars in catalog");
        return Ok(());
    }

    println!("{} stars", catalog.len());
    for star in catalog.stars() {
        println!(
            "HIP {:>6}  {:<12} RA {:>9.4}  Dec {:>8.4}",
            star.hip, star.name, star.ra_deg, star.dec_deg
        );
    }
    Ok(())
}

fn serve(config_path: Option<&str>, bind: Option<String>) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    if let Some(bind) = bind {
        config.web.bind = bind;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::run_server(config))?;
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn resolve(config: Config, args: &SkyArgs) -> Result<(AppState, SkyRequest), CliError> {
    let state = AppState::from_config(config)?;
    let request = SkyRequest::resolve(
        &state.observer,
        args.date,
        args.time,
        args.latitude,
        args.longitude,
        Utc::now(),
    )
    .map_err(SkyError::from)?;
    Ok((state, request))
}

fn build_snapshot(config: Config, args: &SkyArgs) -> Result<SkySnapshot, CliError> {
    let (state, request) = resolve(config, args)?;
    Ok(compute_positions(
        state.ephemeris.as_ref(),
        &state.bodies,
        &request,
    )?)
}

fn build_report(
    config: Config,
    args: &SkyArgs,
    samples: Option<usize>,
) -> Result<SkyReport, CliError> {
    let sample_count = samples.unwrap_or(config.sweep.sample_count);
    let (state, request) = resolve(config, args)?;
    Ok(compute_report(
        state.ephemeris.as_ref(),
        &state.bodies,
        &request,
        sample_count,
    )?)
}

fn print_header(observer: &Observer, moment: DateTime<Utc>) {
    println!(
        "Observer {:.4}, {:.4} at {}",
        observer.latitude_deg,
        observer.longitude_deg,
        moment.format("%Y-%m-%d %H:%M UTC")
    );
}

fn print_sweep(report: &SkyReport) {
    let sweep = &report.sweep;

    let mut header = format!("{:>7}  {:>5}", "hour", "UTC");
    for series in &sweep.series {
        header.push_str(&format!("  {:>9}", series.body));
    }
    println!("{}", header);

    for (i, hour) in sweep.hours().into_iter().enumerate() {
        let clock = moment_at(sweep.date, hour)
            .map(|m| m.format("%H:%M").to_string())
            .unwrap_or_default();
        let mut row = format!("{:>7.3}  {:>5}", hour, clock);
        for series in &sweep.series {
            row.push_str(&format!("  {:>9.2}", series.samples[i].altitude_deg));
        }
        if i == sweep.nearest_index {
            row.push_str("  <");
        }
        println!("{}", row);
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM: {}", e))
}
