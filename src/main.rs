mod sample;
mod script;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use slide_canvas::config::{ConfigError, EditorConfig};
use slide_canvas::consts::EXPORT_FILE_NAME;
use slide_canvas::doc::DeckError;
use slide_canvas::engine::EngineCore;
use slide_canvas::export::{ExportError, ExportFile};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("script: {0}")]
    Script(#[from] script::ScriptError),
    #[error("deck: {0}")]
    Deck(#[from] DeckError),
    #[error("export: {0}")]
    Export(#[from] ExportError),
}

#[derive(Parser, Debug)]
#[command(name = "slidecanvas", about = "Replay slide editor sessions and export presentation.json")]
struct Cli {
    /// JSON editor config; environment variables are used when absent.
    #[arg(long, env = "SLIDES_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted session against a fresh deck and export the result.
    Replay(ReplayArgs),
    /// Export the built-in demo deck.
    Sample {
        #[arg(long, default_value = EXPORT_FILE_NAME, help = "Output path, or - for stdout")]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON array of steps.
    script: PathBuf,

    #[arg(long, default_value = EXPORT_FILE_NAME, help = "Output path, or - for stdout")]
    out: PathBuf,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay(args) => run_replay(config, &args),
        Command::Sample { out } => run_sample(config, &out),
    }
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, CliError> {
    match path {
        Some(path) => Ok(EditorConfig::from_json(&read(path)?)?),
        None => Ok(EditorConfig::from_env()?),
    }
}

fn run_replay(config: EditorConfig, args: &ReplayArgs) -> Result<(), CliError> {
    let steps = script::parse(&read(&args.script)?)?;
    let mut core = EngineCore::new(config);
    let summary = script::replay(&mut core, &steps)?;
    write_export(&core.export()?, &args.out)?;
    eprintln!(
        "replayed {} steps ({} effective), {} slides",
        summary.steps,
        summary.effective,
        core.deck().len()
    );
    Ok(())
}

fn run_sample(config: EditorConfig, out: &Path) -> Result<(), CliError> {
    let deck = sample::sample_deck(&config)?;
    let core = EngineCore::new(config).with_deck(deck);
    write_export(&core.export()?, out)
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn write_export(file: &ExportFile, out: &Path) -> Result<(), CliError> {
    if out == Path::new("-") {
        println!("{}", file.contents);
        return Ok(());
    }
    fs::write(out, &file.contents).map_err(|source| CliError::Write { path: out.to_owned(), source })?;
    tracing::info!(path = %out.display(), "wrote {}", file.file_name);
    Ok(())
}
