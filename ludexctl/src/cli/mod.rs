pub mod prompt;
pub mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use ludex_core::{
    AutoSkipResolver, CatalogProvider, FolderRenameOrchestrator, IgdbProvider, LocalFs,
    Resolver, ResolverMode, TitleCleaner,
};
use ludex_model::CleanedQuery;
use tracing::warn;

use crate::loader::{self, CliOverrides};
use crate::models::RenamerConfig;
use prompt::InteractiveResolver;

#[derive(Debug, Parser)]
#[command(
    name = "ludexctl",
    version,
    about = "Clean release-styled game folder names and rename them from IGDB"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Match every folder under ROOT against IGDB and rename it to "<title> (<year>)"
    Rename(RenameArgs),
    /// Print the cleaned search query for each raw folder name
    Clean {
        /// Raw folder names, e.g. Dead.Space-RUNE
        #[arg(required = true)]
        names: Vec<String>,
        /// Config file with extra release groups and edition markers
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Library root holding one folder per game [default: $GAMES_FOLDER, then /games]
    pub root: Option<PathBuf>,
    /// Show planned renames without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
    /// How ambiguous matches are settled: interactive, auto-skip or scripted
    #[arg(long, value_name = "MODE")]
    pub mode: Option<ResolverMode>,
    /// Folders processed concurrently (interactive mode always uses 1)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
    /// Stop after the first failed folder
    #[arg(long)]
    pub fail_fast: bool,
    /// Also re-check folders already named "<title> (<year>)"
    #[arg(long)]
    pub no_skip_canonical: bool,
    /// Config file (TOML or JSON) [default: $LUDEX_CONFIG_PATH, then ./ludex.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// JSON answers for --mode scripted
    #[arg(long, value_name = "PATH")]
    pub answers: Option<PathBuf>,
    /// Write every folder's decision as JSON to PATH
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl From<&RenameArgs> for CliOverrides {
    fn from(args: &RenameArgs) -> Self {
        Self {
            root: args.root.clone(),
            config: args.config.clone(),
            answers: args.answers.clone(),
            mode: args.mode,
            workers: args.workers,
            dry_run: args.dry_run,
            fail_fast: args.fail_fast,
            no_skip_canonical: args.no_skip_canonical,
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Rename(args) => rename(args).await,
        Command::Clean { names, config } => clean(&names, config),
    }
}

async fn rename(args: RenameArgs) -> Result<()> {
    let loaded = loader::load_config(&CliOverrides::from(&args))
        .context("configuration rejected")?;
    report::print_warnings(&loaded.warnings);

    let config = loaded.config;
    let catalog = IgdbProvider::new(config.catalog.clone(), loaded.credentials)
        .context("failed to build IGDB client")?;
    catalog
        .verify()
        .await
        .context("IGDB authentication failed; check IGDB_CLIENT_ID and IGDB_CLIENT_SECRET")?;

    let resolver: Arc<dyn Resolver> = match config.options.resolver_mode {
        ResolverMode::Interactive => Arc::new(InteractiveResolver::new()),
        ResolverMode::AutoSkip => Arc::new(AutoSkipResolver),
        ResolverMode::Scripted => {
            let path = config
                .answers
                .as_deref()
                .ok_or_else(|| anyhow!("scripted mode requires --answers"))?;
            Arc::new(loader::load_answers(path)?)
        }
    };

    let orchestrator = FolderRenameOrchestrator::new(
        Arc::new(catalog),
        Arc::new(LocalFs::new()),
        resolver,
        TitleCleaner::new(&config.cleaner),
        config.options.clone(),
    );

    // Ctrl-C lets in-flight folders finish; the rest are reported as aborted.
    let cancel = orchestrator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; finishing in-flight folders");
            cancel.cancel();
        }
    });

    let started = Instant::now();
    let summary = orchestrator
        .run(&loaded.root)
        .await
        .with_context(|| format!("failed to list {}", loaded.root.display()))?;
    report::print_summary(&summary, started.elapsed());

    if let Some(path) = &args.report {
        report::write_report(path, &summary)?;
    }
    Ok(())
}

fn clean(names: &[String], config_path: Option<PathBuf>) -> Result<()> {
    let (config, _) =
        RenamerConfig::load_layered(config_path.as_deref(), |key| std::env::var(key).ok())?;
    let cleaner = TitleCleaner::new(&config.cleaner);
    for name in names {
        println!("{}", describe_cleaned(name, &cleaner.clean(name)));
    }
    Ok(())
}

/// `raw -> title [year 2008] [edition GOTY]`
pub fn describe_cleaned(raw: &str, cleaned: &CleanedQuery) -> String {
    let mut line = format!("{raw} -> {}", cleaned.search_title);
    if let Some(year) = cleaned.hinted_year {
        line.push_str(&format!(" [year {year}]"));
    }
    if let Some(edition) = &cleaned.hinted_edition {
        line.push_str(&format!(" [edition {edition}]"));
    }
    line
}
