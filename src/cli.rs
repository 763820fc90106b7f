//! Command-line interface implementation

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::batch::{
    BatchContext, BatchPipeline, ConsoleProgress, JsonProgress, NullProgress, ProgressReporter,
};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, IconConfig, ProgressFormat};
use crate::renderer::TextureRenderer;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Iconbake - Render an icon PNG for every known item and block
#[derive(Parser, Debug)]
#[command(name = "iconbake")]
#[command(about = "Iconbake - Render an icon PNG for every known item and block")]
#[command(version)]
pub struct Cli {
    /// Asset data directory (must contain textures/item or textures/block)
    pub data_dir: PathBuf,

    /// Output directory, created if missing. One {name}.png per item or block
    pub output_dir: PathBuf,

    /// Width and height of every icon, in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Config file (default: nearest iconbake.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Remove existing PNGs from the output directory before rendering
    #[arg(long)]
    pub clean: bool,

    /// Render armor trim variants instead of skipping them
    #[arg(long)]
    pub keep_trim_variants: bool,

    /// Strict mode: exit with an error if any icon failed to render
    #[arg(long)]
    pub strict: bool,

    /// Progress output format
    #[arg(long, value_enum)]
    pub progress: Option<ProgressFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the names that would be rendered and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config overrides given on the command line. Unset flags leave the config alone.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            clean: self.clean.then_some(true),
            skip_trim_variants: self.keep_trim_variants.then_some(false),
            strict: self.strict.then_some(true),
            progress: self.progress,
            color: self.no_color.then_some(false),
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run_batch(&cli)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}

/// Execute a batch run for parsed arguments
pub fn run_batch(cli: &Cli) -> ExitCode {
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    merge_cli_overrides(&mut config, &cli.overrides());

    println!("Loading renderer from: {}", cli.data_dir.display());
    let renderer = match TextureRenderer::from_data_dir(&cli.data_dir) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let context =
        BatchContext::from_config(&config, cli.data_dir.clone(), cli.output_dir.clone(), cli.size);
    let pipeline = BatchPipeline::new(context);

    let resolved = match pipeline.discover(&renderer) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if resolved.filtered_count() > 0 {
        println!(
            "Filtered out {} armor trim variants (rendered dynamically)",
            resolved.filtered_count()
        );
    }
    println!("Total unique names to render: {}", resolved.len());

    if cli.dry_run {
        for name in resolved.names() {
            println!("{}", name);
        }
        return ExitCode::from(EXIT_SUCCESS);
    }
    println!();

    let reporter = make_reporter(&config);
    let summary = match pipeline.render(&renderer, &resolved, reporter.as_ref()) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    println!("{}", summary.summary(config.progress.max_failures));

    if pipeline.context().is_strict() && !summary.is_success() {
        eprintln!("Error: {} icon(s) failed to render (strict mode)", summary.failed);
        return ExitCode::from(EXIT_ERROR);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Build the progress reporter selected by the config.
fn make_reporter(config: &IconConfig) -> Box<dyn ProgressReporter> {
    match config.progress.format {
        ProgressFormat::Console => {
            let use_colors = config.progress.color && atty::is(atty::Stream::Stderr);
            Box::new(ConsoleProgress::new().with_colors(use_colors))
        }
        ProgressFormat::Json => Box::new(JsonProgress::new()),
        ProgressFormat::None => Box::new(NullProgress::new()),
    }
}
