//! CLI binary for SiteForge: generate, recover, classify, and score web projects.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use siteforge_core::config::SiteforgeConfig;
use siteforge_core::{Artifact, QualityReport};
use siteforge_recover::{
    CompletionClient, LlmClient, ModelError, OfflineClient, Orchestrator, RecoveryOutcome,
};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

#[derive(Parser)]
#[command(name = "siteforge", about = "Generate multi-file web projects from a description")]
struct Cli {
    /// Project root holding `.siteforge/config.toml` (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a site: model call, recovery, scoring, fallback on failure
    Generate {
        /// Free-text description of the website
        text: String,

        /// Write files under this directory instead of printing JSON
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Skip the model and synthesize from templates
        #[arg(long)]
        offline: bool,
    },

    /// Recover an artifact from saved raw model output (`-` reads stdin)
    Recover {
        /// File containing the raw model response
        input: String,

        /// Write files under this directory instead of printing JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the requirements inferred from a description
    Classify {
        /// Free-text description of the website
        text: String,
    },

    /// Score an artifact JSON file (`{"/path": {"code": "..."}}`)
    Score {
        /// Artifact JSON file (`-` reads stdin)
        artifact: String,
    },

    /// Build the template site for a description without calling a model
    Synthesize {
        /// Free-text description of the website
        text: String,

        /// Write files under this directory instead of printing JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    match cli.command {
        Commands::Generate { text, out, offline } => {
            cmd_generate(&project_root, &text, out.as_deref(), offline)
        }
        Commands::Recover { input, out } => cmd_recover(&input, out.as_deref()),
        Commands::Classify { text } => cmd_classify(&text),
        Commands::Score { artifact } => cmd_score(&artifact),
        Commands::Synthesize { text, out } => cmd_synthesize(&text, out.as_deref()),
    }
}

fn cmd_generate(project_root: &Path, text: &str, out: Option<&Path>, offline: bool) -> Result<()> {
    let config = SiteforgeConfig::load(project_root)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let outcome = if offline {
        runtime.block_on(run_pipeline(OfflineClient, &config, text))
    } else {
        match LlmClient::from_config(&config.llm) {
            Ok(client) => {
                eprintln!(
                    "Using {} ({})",
                    client.provider_name(),
                    client.model_name()
                );
                runtime.block_on(run_pipeline(client, &config, text))
            }
            Err(ModelError::NotConfigured(reason)) => {
                tracing::warn!(%reason, "no model configured, synthesizing offline");
                runtime.block_on(run_pipeline(OfflineClient, &config, text))
            }
            Err(e) => return Err(e.into()),
        }
    };

    match &outcome {
        RecoveryOutcome::Validated {
            report, enhanced, ..
        } => {
            eprintln!(
                "Validated model output (score {}{})",
                report.score,
                if *enhanced { ", enhanced" } else { "" }
            );
            print_issues(report);
        }
        RecoveryOutcome::Fallback { reason, .. } => {
            eprintln!("Used template fallback: {reason}");
        }
    }

    emit(&outcome.into_artifact(), out)
}

async fn run_pipeline<C: CompletionClient>(
    client: C,
    config: &SiteforgeConfig,
    text: &str,
) -> RecoveryOutcome {
    Orchestrator::new(client, config.generation.clone())
        .run(text)
        .await
}

fn cmd_recover(input: &str, out: Option<&Path>) -> Result<()> {
    let raw = read_input(input)?;
    let artifact = siteforge_recover::recover(&raw).context("model output could not be recovered")?;

    let report = siteforge_recover::score(&artifact);
    eprintln!(
        "Recovered {} files (score {})",
        artifact.len(),
        report.score
    );
    print_issues(&report);
    emit(&artifact, out)
}

fn cmd_classify(text: &str) -> Result<()> {
    let requirements = siteforge_recover::classify(text);
    println!("{}", serde_json::to_string_pretty(&requirements)?);
    Ok(())
}

fn cmd_score(input: &str) -> Result<()> {
    let text = read_input(input)?;
    let artifact = siteforge_recover::validate(&text).context("not a valid artifact")?;
    let report = siteforge_recover::score(&artifact);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_synthesize(text: &str, out: Option<&Path>) -> Result<()> {
    let requirements = siteforge_recover::classify(text);
    eprintln!("Synthesizing {} site", requirements.website_type);
    let artifact = siteforge_recover::synthesize(&requirements, text);
    emit(&artifact, out)
}

fn print_issues(report: &QualityReport) {
    for issue in &report.issues {
        eprintln!("  - {issue}");
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

/// Print the artifact as JSON, or write it under `out`.
fn emit(artifact: &Artifact, out: Option<&Path>) -> Result<()> {
    match out {
        Some(dir) => {
            let written = write_artifact(artifact, dir)?;
            eprintln!("Wrote {written} files to {}", dir.display());
        }
        None => println!("{}", artifact.to_json_pretty()?),
    }
    Ok(())
}

/// Write every file under `dir`. Paths are checked before anything is
/// written, so an artifact with one unsafe path leaves `dir` untouched.
fn write_artifact(artifact: &Artifact, dir: &Path) -> Result<usize> {
    let targets = artifact
        .files()
        .map(|(path, file)| Ok((dir.join(safe_relative_path(path)?), &file.code)))
        .collect::<Result<Vec<_>>>()?;

    for (target, code) in &targets {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(target, code)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }
    Ok(targets.len())
}

/// Artifact path relative to the output directory; rejects anything that
/// could leave it.
fn safe_relative_path(path: &str) -> Result<&Path> {
    let relative = Path::new(path.trim_start_matches('/'));
    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        anyhow::bail!("refusing to write unsafe artifact path: {path}");
    }
    Ok(relative)
}
