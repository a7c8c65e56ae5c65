use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in artwork catalog as JSON.
    Catalog(CatalogArgs),
    /// Drive a scripted input sequence through a headless page and write frame snapshots.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input script JSON (viewport, duration, timed input events).
    #[arg(long)]
    script: PathBuf,

    /// Shell config JSON. Defaults are used for anything omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog JSON. Defaults to the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Override the script's frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Catalog(args) => cmd_catalog(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&folio::Catalog::builtin())
        .context("serialize built-in catalog")?;
    emit(&json, args.out.as_deref())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut script = folio::ScrollScript::from_json(&read(&args.script)?)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;
    if let Some(fps) = args.fps {
        script.fps = fps;
    }
    let config = match &args.config {
        Some(path) => folio::ShellConfig::from_json(&read(path)?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => folio::ShellConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => folio::Catalog::from_json(&read(path)?)
            .with_context(|| format!("parse catalog '{}'", path.display()))?,
        None => folio::Catalog::builtin(),
    };

    let run = folio::run_script(&script, catalog, config)?;
    if run.after_shutdown.triggers > 0 || run.after_shutdown.frame_subscriptions > 0 {
        tracing::warn!(stats = ?run.after_shutdown, "registrations left after shutdown");
    }
    let json = serde_json::to_string_pretty(&run).context("serialize snapshots")?;
    emit(&json, args.out.as_deref())?;
    eprintln!(
        "simulated {} frames ({} snapshots)",
        run.stats.frames,
        run.snapshots.len()
    );
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn emit(json: &str, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
