//! Scene compiler CLI.
//!
//! Turns a scene descriptor JSON into `space_areas.json`,
//! `area_properties.json`, and `links.json` under an output directory.
//!
//! ```bash
//! envsim-compile --infile scene.json --outdir generated/
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "envsim-compile")]
#[command(about = "Compiles a scene descriptor into area/property/link tables")]
struct Args {
    /// Path to the scene descriptor JSON
    #[arg(long)]
    infile: PathBuf,

    /// Output directory for the compiled tables
    #[arg(long)]
    outdir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install tracing subscriber");
    }

    info!(infile = %args.infile.display(), outdir = %args.outdir.display(), "starting compile");

    match envsim_compiler::compile_file(&args.infile, &args.outdir) {
        Ok(compiled) => {
            info!(
                areas = compiled.areas.len(),
                properties = compiled.properties.len(),
                links = compiled.links.len(),
                "compile finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "compile failed");
            ExitCode::FAILURE
        }
    }
}
