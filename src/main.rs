use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wut::{ensure_universe, regenerate_universe, render, OutputFormat};
use wut_core::{config::Config, IngestPlan, Universe};
use wut_harvest::FacetSearch;

#[derive(Parser)]
#[command(name = "wut", about = "What's in the ESGF controlled vocabulary universe?")]
struct Cli {
    /// Write debug logs to stderr (filter with RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/wut/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up vocabulary terms; `*` matches any run of characters.
    Query {
        /// Term patterns, e.g. `CESM*` or `tas`.
        #[arg(required = true)]
        terms: Vec<String>,

        /// Only report terms from projects matching this pattern.
        #[arg(long)]
        project: Option<String>,

        /// Rebuild the local universe before querying.
        #[arg(long)]
        regen_database: bool,

        /// Output format (defaults to `output.format` from the config).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Query {
            terms,
            project,
            regen_database,
            format,
        } => {
            let format = match format {
                Some(format) => format,
                None => config.output.format.parse()?,
            };
            // The plan and the remote are only needed to build the universe.
            let path = config.store.universe_path();
            if regen_database || !path.is_file() {
                let plan = match config.store.plan_path() {
                    Some(plan) => IngestPlan::from_path(plan)?,
                    None => IngestPlan::bundled()?,
                };
                let source = FacetSearch::from_config(&config.remote)
                    .context("building facet search client")?;
                if regen_database {
                    regenerate_universe(&path, &plan, &source)?;
                } else {
                    ensure_universe(&path, &plan, &source)?;
                }
            }

            let universe = Universe::open(&path)?;
            let view = universe.query(&terms, project.as_deref())?;
            println!("{}", render(&view, format)?);
        }
    }

    Ok(())
}
