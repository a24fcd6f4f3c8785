use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use radial_source::config::{Params, SourceParams};
use radial_source::OutputPaths;

/// Generate topography, initial condition and input deck for a radial
/// source run.
#[derive(Parser, Debug)]
#[command(name = "radial-source", version, allow_negative_numbers = true)]
struct Args {
    /// Number of cells in x
    nx_cells: usize,
    /// Source radius (>0)
    r_init: f64,
    /// Initial thickness (>0)
    h_init: f64,
    /// Temperature (>0)
    #[arg(value_name = "T_INIT")]
    t_init: f64,
    /// Radial velocity
    vel_init: f64,
    /// Solid volume fraction (0,1)
    alfas_init: f64,

    /// Directory the output files are written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Input deck template.
    #[arg(short, long, default_value = "SW_VAR_DENS_MODEL.template")]
    template: PathBuf,

    /// JSON file overriding scenario constants.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write preview.png of the initial free surface.
    #[arg(long)]
    preview: bool,

    /// Write a JSON run summary to this path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = match (args.quiet, args.verbose) {
        (true, _) => Some(LevelFilter::Warn),
        (false, 0) => None,
        (false, 1) => Some(LevelFilter::Debug),
        (false, _) => Some(LevelFilter::Trace),
    };
    let level = level
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let source = SourceParams {
        nx_cells: args.nx_cells,
        r_init: args.r_init,
        h_init: args.h_init,
        t_init: args.t_init,
        vel_init: args.vel_init,
        alfas_init: args.alfas_init,
    };
    let params = match &args.config {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("loading scenario config {}", path.display()))?,
        None => Params::default(),
    };

    let (scenario, timings) = radial_source::generate(&source, &params)?;

    log::info!("Timings:");
    for t in &timings {
        log::info!("  {:20} {:8.3} ms", t.name, t.ms);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating output directory {}", args.output_dir.display()))?;
    let mut outputs = OutputPaths::in_dir(&args.output_dir, &params);
    if args.preview {
        outputs = outputs.with_preview(args.output_dir.join("preview.png"));
    }
    if let Some(path) = &args.summary {
        outputs = outputs.with_summary(path);
    }
    radial_source::write_outputs(
        &scenario,
        &source,
        &params,
        &args.template,
        &outputs,
        &timings,
    )?;

    Ok(())
}
