mod cli_logger;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use sortreel::{
    ChaChaSource, Config, InputArgs, LogCommand, NoDelayPacer, NullRenderer, Pacer,
    PlaybackController, Renderer, Script, ScriptPath, Speed, TerminalRenderer, ThreadPacer, drive,
    log_command, schema_doc,
};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use cli_logger::CliLogger;

#[derive(Debug, Parser)]
#[command(name = "sortreel", version, about = "Step through sorting algorithms one operation at a time")]
struct Cli {
    /// Config file; missing files fall back to defaults.
    #[arg(long, global = true, default_value = "sortreel.toml")]
    config: PathBuf,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate an input and play the chosen algorithm to completion
    Play {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        speed: Option<Speed>,
        /// Skip the per-tick delay
        #[arg(long)]
        no_delay: bool,
        /// Bar height in terminal rows
        #[arg(long, default_value_t = 16)]
        height: usize,
    },
    /// Build, export, and verify event logs
    Log {
        #[command(subcommand)]
        command: LogCommand,
    },
    /// Run a JSON control script against the playback controller
    Script {
        path: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print algorithms, event kinds and script step types
    Schema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load_optional(&cli.config);
    let logger = CliLogger::new(cli.json, cli.no_color || config.no_color);
    if let Err(err) = run(&cli, &config, &logger) {
        logger.print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SORTREEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, config: &Config, logger: &CliLogger) -> Result<()> {
    config.validate().context("invalid config")?;

    match &cli.command {
        Command::Play {
            input,
            speed,
            no_delay,
            height,
        } => {
            let (algorithm, values) = input.resolve(config)?;
            if values.is_empty() {
                logger.print_warning("empty input: the log is a single done event");
            }
            let mut controller =
                PlaybackController::new(algorithm, values, speed.unwrap_or(config.speed));

            let no_color = cli.no_color || config.no_color;
            let mut renderer: Box<dyn Renderer> = if logger.is_json() {
                Box::new(NullRenderer)
            } else {
                Box::new(TerminalRenderer::new(std::io::stdout(), *height, no_color))
            };
            let mut pacer: Box<dyn Pacer> = if *no_delay {
                Box::new(NoDelayPacer)
            } else {
                Box::new(ThreadPacer)
            };

            controller.start();
            drive(&mut controller, renderer.as_mut(), pacer.as_mut())?;
            logger.print_summary(&controller.summary())
        }

        Command::Log { command } => {
            let out = log_command(config, command)?;
            logger.print_serialized(&out)
        }

        Command::Script { path, seed } => {
            let script = Script::load(&ScriptPath::new(path.clone()))
                .with_context(|| format!("loading script {}", path.display()))?;
            let range = config.value_range()?;
            let mut source = match seed.or(config.seed) {
                Some(seed) => ChaChaSource::seeded(seed, range),
                None => ChaChaSource::from_entropy(range),
            };
            let mut controller = PlaybackController::new(config.algorithm, Vec::new(), config.speed);
            controller.regenerate(&mut source, config.size);
            let report = script.run(&mut controller, &mut source, &mut NullRenderer)?;
            logger.print_script_report(&report)
        }

        Command::Schema => logger.print_serialized(&schema_doc()),
    }
}
