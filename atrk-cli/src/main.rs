//! atrk: inspect, tag, and export airborne track files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Cell, Table};

use atrk_core::config::{self, TagConfig};
use atrk_core::report::{generate_tags, TagStatistics};
use atrk_core::{TagClassifier, Track};

mod error;
mod export;
mod sample;

use error::Result;

#[derive(Parser)]
#[command(name = "atrk", version, about = "Airborne track codec and behavioral tagger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tracks in a binary track file
    Inspect {
        /// Path to .bin track file
        file: PathBuf,
    },

    /// Generate behavioral tags for every track
    Tag {
        /// Path to .bin track file
        file: PathBuf,

        /// Threshold config (defaults to ~/.atrk/config.yaml)
        #[arg(long, env = "ATRK_CONFIG")]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write tracks plus their tag column to CSV or JSON
    Export {
        /// Path to .bin track file
        file: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, env = "ATRK_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show tag frequencies across a file
    Stats {
        /// Path to .bin track file
        file: PathBuf,

        #[arg(long, env = "ATRK_CONFIG")]
        config: Option<PathBuf>,

        /// Number of most common tags to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Write the two reference tracks to a binary file
    Sample {
        /// Output .bin path
        output: PathBuf,

        /// End time of both tracks, epoch seconds (defaults to now)
        #[arg(long)]
        end_time: Option<f64>,
    },

    /// Print the effective threshold config as YAML
    Config {
        #[arg(long, env = "ATRK_CONFIG")]
        config: Option<PathBuf>,

        /// Write the defaults to ~/.atrk/config.yaml
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { file } => cmd_inspect(&file),
        Commands::Tag { file, config, json } => cmd_tag(&file, config.as_deref(), json),
        Commands::Export {
            file,
            output,
            format,
            config,
        } => cmd_export(&file, &output, format, config.as_deref()),
        Commands::Stats { file, config, top } => cmd_stats(&file, config.as_deref(), top),
        Commands::Sample { output, end_time } => cmd_sample(&output, end_time),
        Commands::Config { config, init } => cmd_config(config.as_deref(), init),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(path: Option<&Path>) -> Result<TagConfig> {
    let config = match path {
        Some(p) => config::load_config_from(p)?,
        None => config::load_config()?,
    };
    Ok(config)
}

fn load_classifier(path: Option<&Path>) -> Result<TagClassifier> {
    Ok(TagClassifier::new(resolve_config(path)?))
}

fn cmd_inspect(file: &Path) -> Result<()> {
    let tracks = export::read_tracks(file)?;

    println!();
    println!("File: {}", file.display());
    println!("Tracks: {}", tracks.len());
    println!();

    if tracks.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "Type", "Aircraft", "Start", "End", "Lifetime (min)", "Points",
    ]);
    for t in &tracks {
        table.add_row(vec![
            Cell::new(t.track_id),
            Cell::new(&t.track_name),
            Cell::new(t.track_type),
            Cell::new(if t.aircraft_type.is_empty() {
                "-"
            } else {
                t.aircraft_type.as_str()
            }),
            Cell::new(export::iso_time(t.start_time)),
            Cell::new(export::iso_time(t.end_time)),
            Cell::new(format!("{:.1}", t.lifetime / 60.0)),
            Cell::new(t.positions.len()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_tag(file: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let classifier = load_classifier(config)?;
    let tracks = export::read_tracks(file)?;
    let results = generate_tags(&classifier, &tracks);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "Speed (kts)", "Max G", "Hdg std", "Alt chg (ft)", "Tags",
    ]);
    for r in &results {
        let f = &r.features;
        let has_samples = f.sample_count > 0;
        let metric = |v: f64, precision: usize| {
            if has_samples {
                format!("{v:.precision$}")
            } else {
                "-".to_string()
            }
        };
        table.add_row(vec![
            Cell::new(r.track_id),
            Cell::new(&r.track_name),
            Cell::new(metric(f.speed_mean, 1)),
            Cell::new(metric(f.max_g_force, 2)),
            Cell::new(metric(f.heading_std, 1)),
            Cell::new(metric(f.altitude_change, 0)),
            Cell::new(r.tag_column()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_export(
    file: &Path,
    output: &Path,
    format: ExportFormat,
    config: Option<&Path>,
) -> Result<()> {
    let classifier = load_classifier(config)?;
    let tracks = export::read_tracks(file)?;
    let results = generate_tags(&classifier, &tracks);

    match format {
        ExportFormat::Csv => export::write_csv(output, &tracks, &results)?,
        ExportFormat::Json => export::write_json(output, &tracks, &results)?,
    }

    println!(
        "Exported {} tracks ({} positions) to {}",
        tracks.len(),
        tracks.iter().map(|t| t.positions.len()).sum::<usize>(),
        output.display()
    );
    Ok(())
}

fn cmd_stats(file: &Path, config: Option<&Path>, top: usize) -> Result<()> {
    let classifier = load_classifier(config)?;
    let tracks = export::read_tracks(file)?;
    let results = generate_tags(&classifier, &tracks);
    let stats = TagStatistics::from_results(&results);

    println!();
    println!("File: {}", file.display());
    println!();
    println!("  Tracks:              {}", stats.tracks);
    println!("  Unique combinations: {}", stats.unique_combinations);
    println!("  Unique tags:         {}", stats.unique_tags());
    println!();

    let common = stats.most_common(top);
    if common.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Tag", "Tracks"]);
    for (tag, count) in common {
        table.add_row(vec![Cell::new(tag), Cell::new(count)]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_sample(output: &Path, end_time: Option<f64>) -> Result<()> {
    let end_time = end_time.unwrap_or_else(|| Utc::now().timestamp_millis() as f64 / 1000.0);
    let tracks: Vec<Track> = sample::sample_tracks(end_time);
    export::write_tracks(output, &tracks)?;

    println!("Wrote {} tracks to {}", tracks.len(), output.display());
    for t in &tracks {
        println!(
            "  - {} ({}): {} positions",
            t.track_name,
            t.track_type,
            t.positions.len()
        );
    }
    Ok(())
}

fn cmd_config(config: Option<&Path>, init: bool) -> Result<()> {
    if init {
        let path = config::save_config(&TagConfig::default())?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }
    let effective = resolve_config(config)?;
    print!("{}", config::serialize_config(&effective)?);
    Ok(())
}
