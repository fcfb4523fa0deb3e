//! contentcraft - lays out a content repository's folder tree as voxel structures
//!
//! `build` renders one site from a JSON catalog into an in-memory world; `macros` lists the
//! block macros available to the builder.

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::ContentCraftConfig;
use contentcraft_assets::MacroStore;
use contentcraft_builder::{BuildError, BuildReport, BuildRequest, SiteBuilder};
use contentcraft_core::BlockPos;
use contentcraft_repo::SiteCatalog;
use contentcraft_testkit::JsonlSink;
use contentcraft_world::VoxelWorld;
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Folder tree to voxel structure layout engine", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./contentcraft.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one site into a fresh world
    Build(BuildArgs),
    /// List the available block macros
    Macros {
        /// Directory of `<name>.json` macro sources
        #[arg(long)]
        macros: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// JSON site catalog
    #[arg(long)]
    catalog: PathBuf,

    /// Site id to build
    #[arg(long)]
    site: String,

    /// Start position as `x,y,z`
    #[arg(long, default_value = "0,64,0")]
    origin: BlockPos,

    /// Directory of `<name>.json` macro sources (overrides the config file)
    #[arg(long)]
    macros: Option<PathBuf>,

    /// Write the build report as JSON lines
    #[arg(long)]
    events: Option<PathBuf>,

    /// Write the resulting world as JSON
    #[arg(long)]
    world_out: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let usage = err
                .downcast_ref::<BuildError>()
                .is_some_and(BuildError::is_usage_error);
            if usage {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ContentCraftConfig::load_from_path(path),
        None => ContentCraftConfig::load(),
    };
    match cli.command {
        Command::Build(args) => build(args, config),
        Command::Macros { macros } => list_macros(macros.or(config.macros_dir)),
    }
}

fn macro_store(dir: Option<PathBuf>) -> MacroStore {
    match dir {
        Some(dir) => {
            info!("Loading macros from {}", dir.display());
            MacroStore::from_dir(dir)
        }
        None => MacroStore::builtin(),
    }
}

fn build(args: BuildArgs, config: ContentCraftConfig) -> Result<()> {
    let catalog = SiteCatalog::from_file(&args.catalog)
        .with_context(|| format!("failed to load catalog from {}", args.catalog.display()))?;
    let store = macro_store(args.macros.or(config.macros_dir));
    let builder = SiteBuilder::new(store, config.layout, config.signs)
        .context("failed to prepare site macros")?;

    let mut world = VoxelWorld::new();
    let request = BuildRequest::new(args.site.as_str(), args.origin);
    let report = builder
        .build(&catalog, &catalog, &mut world, &request)
        .with_context(|| format!("failed to build site `{}`", args.site))?;

    if let Some(path) = &args.events {
        write_events(path, &report)
            .with_context(|| format!("failed to write events to {}", path.display()))?;
    }
    if let Some(path) = &args.world_out {
        let json = world.to_json_pretty().context("serialize world")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    println!(
        "built site {}: {} macro runs, {} blocks, {} member markers",
        report.site,
        report.invocations.len(),
        report.blocks_placed(),
        report.members.spawned.len()
    );
    if let Some((min, max)) = world.bounds() {
        println!("bounds {min} .. {max}");
    }
    if let Some(err) = &report.members.error {
        println!("member markers incomplete: {err}");
    }
    Ok(())
}

fn write_events(path: &std::path::Path, report: &BuildReport) -> Result<()> {
    let mut sink = JsonlSink::create(path)?;
    for invocation in &report.invocations {
        sink.write("MacroRun", invocation)?;
    }
    sink.write("MemberMarkers", &report.members)?;
    Ok(())
}

fn list_macros(dir: Option<PathBuf>) -> Result<()> {
    let store = macro_store(dir);
    let sources = store.source().list().context("failed to list macro sources")?;
    store
        .load_all(sources.iter().map(String::as_str))
        .context("failed to load macros")?;
    for name in store.names() {
        let template = store.lookup(&name)?;
        println!(
            "{name}\t{}\t{} blocks\t{} signs",
            template.orientation().as_str(),
            template.entries().len(),
            template.signage_count()
        );
    }
    Ok(())
}
