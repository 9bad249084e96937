use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_tags::config::{self, Overrides};
use release_tags::git::{self, Backend};
use release_tags::{report, ui, ReleaseTagsError};

#[derive(clap::Parser)]
#[command(
    name = "release-tags",
    version,
    about = "Print the latest stable and the latest overall semver tag of a git repository"
)]
struct Args {
    #[arg(short = 'C', long, help = "Repository directory (defaults to the current directory)")]
    repo: Option<PathBuf>,

    #[arg(short, long, help = "Tag pattern with a {version} placeholder [default: v{version}]")]
    pattern: Option<String>,

    #[arg(short, long, value_enum, help = "How to read tags [default: git]")]
    backend: Option<Backend>,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Log pipeline details to stderr")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    if let Err(e) = run(args) {
        let exit_code = match e.downcast_ref::<ReleaseTagsError>() {
            Some(err) => {
                ui::display_failure(err);
                err.exit_code()
            }
            None => {
                ui::display_error(&format!("{:#}", e));
                1
            }
        };
        process::exit(exit_code);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?.with_overrides(Overrides {
        pattern: args.pattern,
        backend: args.backend,
        repo: args.repo,
    });
    tracing::debug!(?config, "resolved configuration");

    let pattern = config.tag_pattern()?;
    let source = git::open_tag_source(config.backend, config.repo.as_deref())?;

    // Both versions are known before anything reaches stdout
    let report = report::report_from_source(source.as_ref(), &pattern)?;
    report
        .write_to(io::stdout().lock())
        .context("Failed to write report")?;

    Ok(())
}
