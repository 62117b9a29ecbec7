// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the banner renderer.
//!
//! Each invocation renders one banner layout in the selected themes and exits
//! non-zero when any variant failed.

use std::{path::PathBuf, process, sync::Arc};

use clap::{Args, Parser, Subcommand, ValueEnum};
use repo_banner::{
    BannerKind, Error, Overrides, RunContext, Theme, ThemeOutcome, load_config, run_themes,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Render PNG banners for a GitHub account.
#[derive(Debug, Parser,)]
#[command(name = "repo-banner", version, about = "Render GitHub account banners")]
struct Cli
{
    #[command(flatten)]
    options: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every layout.
#[derive(Debug, Args,)]
struct CommonArgs
{
    /// Path to the YAML configuration document.
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf,>,

    /// GitHub account to render.
    #[arg(long = "user", value_name = "NAME", env = "GITHUB_USERNAME", global = true)]
    user: Option<String,>,

    /// Token used for authenticated API requests.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String,>,

    /// Theme variants to render.
    #[arg(long = "theme", value_enum, default_value_t = ThemeSelection::All, global = true)]
    theme: ThemeSelection,

    /// Directory receiving the rendered images.
    #[arg(long = "output", value_name = "DIR", global = true)]
    output: Option<PathBuf,>,
}

#[derive(Debug, Subcommand,)]
enum Command
{
    /// Render the account summary banner.
    Summary,
    /// Render the ranked repositories banner.
    Repositories,
}

impl From<&Command,> for BannerKind
{
    fn from(command: &Command,) -> Self
    {
        match command {
            Command::Summary => BannerKind::Summary,
            Command::Repositories => BannerKind::Repositories,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum,)]
enum ThemeSelection
{
    Light,
    Dark,
    All,
}

impl ThemeSelection
{
    fn themes(self,) -> &'static [Theme]
    {
        match self {
            ThemeSelection::Light => &[Theme::Light],
            ThemeSelection::Dark => &[Theme::Dark],
            ThemeSelection::All => &Theme::ALL,
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false,).with_writer(std::io::stderr,),)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .init();
}

/// Renders the requested layout in every selected theme.
///
/// # Errors
///
/// Returns configuration, font and client errors directly and a summary
/// error when at least one theme variant failed.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let kind = BannerKind::from(&cli.command,);
    let context = build_context(&cli.options, kind,)?;

    let outcomes = run_themes(Arc::new(context,), kind, cli.options.theme.themes(),).await;
    check_outcomes(kind, &outcomes,)
}

fn build_context(options: &CommonArgs, kind: BannerKind,) -> Result<RunContext, Error,>
{
    let config = load_config(options.config.as_deref(),)?.with_overrides(Overrides {
        user:       options.user.clone(),
        token:      options.token.clone(),
        output_dir: options.output.clone(),
    },);

    RunContext::new(config, kind,)
}

/// Fails when any theme run did not produce a banner.
fn check_outcomes(kind: BannerKind, outcomes: &[ThemeOutcome],) -> Result<(), Error,>
{
    let failed: Vec<String,> = outcomes
        .iter()
        .filter(|outcome| !outcome.is_success(),)
        .map(|outcome| outcome.theme.to_string(),)
        .collect();

    if failed.is_empty() {
        Ok((),)
    } else {
        Err(Error::ThemeRuns {
            kind:   kind.to_string(),
            themes: failed.join(", ",),
        },)
    }
}
