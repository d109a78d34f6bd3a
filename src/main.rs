use clap::Parser;
use std::path::PathBuf;
use topicplot::report::{self, Summary};
use topicplot::{BandConfig, Config, PathMode, Pipeline, PngRenderer, RunOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "topicplot")]
#[command(
    author,
    version,
    about = "Plot topic-model diversity and coherence across topic counts"
)]
struct Args {
    /// JSON config file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the .jsonl result files (default: ./results)
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Result file name inside the results directory (repeatable)
    #[arg(short, long = "file")]
    files: Vec<String>,

    /// Use every *.jsonl file in the results directory
    #[arg(long, conflicts_with = "files")]
    discover: bool,

    /// Directory for the generated figures (default: working directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Open result files by bare name from the working directory
    /// (the existence check still looks in the results directory)
    #[arg(long)]
    legacy_open: bool,

    /// Don't open figures after saving
    #[arg(long)]
    no_open: bool,

    /// Also write aggregated statistics (.json or .csv)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Seed for the bootstrap confidence bands
    #[arg(long)]
    seed: Option<u64>,

    /// Bootstrap resamples per point
    #[arg(long)]
    n_boot: Option<usize>,

    /// Confidence level in percent
    #[arg(long)]
    ci: Option<f64>,

    /// Show debug logging (skipped lines, blank panels)
    #[arg(short, long)]
    verbose: bool,

    /// Only warnings and the saved-plot lines
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = Pipeline::new(config).with_progress(!args.quiet);
    let outcome = match pipeline.run(&mut PngRenderer::new()) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let (Some(path), RunOutcome::Rendered { stats, figures, .. }) = (&args.summary, &outcome) {
        let summary = Summary::from_figures(figures).with_load_stats(
            stats.files_read.clone(),
            stats.records,
            stats.lines_skipped,
        );
        if let Err(e) = report::generate(path, &summary) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        info!("Summary saved: {}", path.display());
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "topicplot=debug"
    } else if quiet {
        "topicplot=warn"
    } else {
        "topicplot=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn build_config(args: &Args) -> topicplot::Result<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(ref dir) = args.results_dir {
        config = config.with_results_dir(dir);
    }
    if !args.files.is_empty() {
        config = config.with_input_files(args.files.iter().cloned());
    }
    if let Some(ref dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    if args.legacy_open {
        config = config.with_path_mode(PathMode::BareFilename);
    }
    if args.no_open {
        config = config.with_show(false);
    }

    let band = BandConfig {
        n_boot: args.n_boot.unwrap_or(config.band.n_boot),
        level: args.ci.unwrap_or(config.band.level),
        seed: args.seed.unwrap_or(config.band.seed),
    };
    config = config.with_band(band);

    if args.discover {
        config = config.discover_inputs()?;
    }

    config.validate()?;
    Ok(config)
}
