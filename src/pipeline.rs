// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-theme banner runs.
//!
//! A run fetches the account data, loads the theme's assets, draws the banner
//! and writes it. Runs for different themes share nothing mutable and execute
//! as independent tasks, so a failing variant never aborts its sibling.

use std::{fmt, sync::Arc};

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::{
    aggregate::{aggregate, rank_repositories, visible_repositories},
    assets::{RepositoryAssets, SummaryAssets},
    config::{BannerConfig, Theme},
    domains::{build_http_client, fetch_secondary_metric},
    error::Error,
    fonts::{FontRegistry, FontWeight},
    github::GitHubClient,
    output::{WrittenBanner, write_banner},
    render::{
        REPOSITORIES_FONT_FAMILY, SUMMARY_FONT_FAMILY, SummaryBanner, render_repositories,
        render_summary,
    },
};

/// Banner layouts that can be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum BannerKind
{
    /// Account totals over a background template.
    Summary,
    /// Ranked list of repositories under a logo header.
    Repositories,
}

impl fmt::Display for BannerKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            BannerKind::Summary => f.write_str("summary",),
            BannerKind::Repositories => f.write_str("repositories",),
        }
    }
}

/// Immutable state shared by every theme run.
#[derive(Debug,)]
pub struct RunContext
{
    config: BannerConfig,
    user:   String,
    github: GitHubClient,
    http:   reqwest::Client,
    fonts:  FontRegistry,
    today:  NaiveDate,
}

impl RunContext
{
    /// Validates `config`, loads the fonts `kind` needs and builds the
    /// network clients.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an invalid configuration,
    /// [`Error::AssetLoad`] for a missing font and [`Error::Network`] when a
    /// client cannot be initialized.
    pub fn new(config: BannerConfig, kind: BannerKind,) -> Result<Self, Error,>
    {
        config.validate()?;
        let fonts = register_fonts(&config, kind,)?;
        Self::build(config, fonts,)
    }

    /// Validates `config` and builds the network clients around an already
    /// populated font registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an invalid configuration and
    /// [`Error::Network`] when a client cannot be initialized.
    pub fn with_fonts(config: BannerConfig, fonts: FontRegistry,) -> Result<Self, Error,>
    {
        config.validate()?;
        Self::build(config, fonts,)
    }

    fn build(config: BannerConfig, fonts: FontRegistry,) -> Result<Self, Error,>
    {
        let user = config.account()?.to_owned();
        let timeout = config.request_timeout();
        let github = GitHubClient::new(&config.api_base_url, config.token.as_deref(), timeout,)?;
        let http = build_http_client(timeout,)?;

        Ok(Self {
            config,
            user,
            github,
            http,
            fonts,
            today: Local::now().date_naive(),
        },)
    }

    /// Overrides the date printed in the summary footer.
    pub fn with_date(mut self, today: NaiveDate,) -> Self
    {
        self.today = today;
        self
    }
}

/// Loads the fonts used by `kind` into a fresh registry.
///
/// # Errors
///
/// Returns [`Error::AssetLoad`] when a font file is missing or unreadable.
pub fn register_fonts(config: &BannerConfig, kind: BannerKind,) -> Result<FontRegistry, Error,>
{
    let mut fonts = FontRegistry::new();

    match kind {
        BannerKind::Summary => {
            let pair = &config.summary.fonts;
            fonts.register(SUMMARY_FONT_FAMILY, FontWeight::Regular, &pair.regular,)?;
            fonts.register(SUMMARY_FONT_FAMILY, FontWeight::Bold, &pair.bold,)?;
        }
        BannerKind::Repositories => {
            fonts.register(
                REPOSITORIES_FONT_FAMILY,
                FontWeight::Regular,
                &config.repositories.font,
            )?;
        }
    }

    Ok(fonts,)
}

/// Renders and writes the summary banner for `theme`.
///
/// The repository listing, the domain list and the background are fetched
/// concurrently. A failed domain list degrades to zero; every other failure
/// aborts the run.
///
/// # Errors
///
/// Propagates acquisition, asset, render and write failures.
pub async fn run_summary(ctx: &RunContext, theme: Theme,) -> Result<WrittenBanner, Error,>
{
    let summary = &ctx.config.summary;

    let (repositories, domains, assets,) = tokio::join!(
        ctx.github.fetch_repositories(&ctx.user),
        fetch_secondary_metric(&ctx.http, &summary.domain_list_url),
        SummaryAssets::load(summary, theme),
    );
    let repositories = visible_repositories(repositories?,);
    let assets = assets?;

    let banner = SummaryBanner {
        totals: aggregate(&repositories,),
        domains,
        source_label: &summary.domain_list_label,
        mark_unavailable: summary.mark_unavailable,
        date: ctx.today,
    };

    let png = render_summary(&banner, &assets, theme, &ctx.fonts,)?.encode_png()?;
    write_banner(&ctx.config.output_dir, &summary.file_stem, theme, &png,)
}

/// Renders and writes the repositories banner for `theme`.
///
/// # Errors
///
/// Propagates acquisition, asset, render and write failures.
pub async fn run_repositories(ctx: &RunContext, theme: Theme,) -> Result<WrittenBanner, Error,>
{
    let config = &ctx.config.repositories;

    let (repositories, assets,) = tokio::try_join!(
        ctx.github.fetch_repositories(&ctx.user),
        RepositoryAssets::load(&ctx.http, config, theme),
    )?;
    let ranked = rank_repositories(visible_repositories(repositories,),);

    let png = render_repositories(&ranked, &assets, theme, &ctx.fonts,)?.encode_png()?;
    write_banner(&ctx.config.output_dir, &config.file_stem, theme, &png,)
}

/// Result of a single theme run.
#[derive(Debug,)]
pub struct ThemeOutcome
{
    pub theme:  Theme,
    pub result: Result<WrittenBanner, Error,>,
}

impl ThemeOutcome
{
    pub fn is_success(&self,) -> bool
    {
        self.result.is_ok()
    }
}

/// Runs `kind` for every theme in `themes` as independent tasks.
///
/// Waits for all tasks and returns their outcomes in the order of `themes`.
pub async fn run_themes(
    ctx: Arc<RunContext,>,
    kind: BannerKind,
    themes: &[Theme],
) -> Vec<ThemeOutcome,>
{
    let handles: Vec<_,> = themes
        .iter()
        .map(|&theme| {
            let ctx = Arc::clone(&ctx,);
            let handle = tokio::spawn(async move {
                match kind {
                    BannerKind::Summary => run_summary(&ctx, theme,).await,
                    BannerKind::Repositories => run_repositories(&ctx, theme,).await,
                }
            },);
            (theme, handle,)
        },)
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len(),);
    for (theme, handle,) in handles {
        let result = handle.await.unwrap_or_else(|join_error| {
            Err(Error::TaskAborted {
                kind:    kind.to_string(),
                theme:   theme.to_string(),
                message: join_error.to_string(),
            },)
        },);

        match &result {
            Ok(written,) => info!("Rendered {} banner ({}) to {}", kind, theme, written.path.display()),
            Err(error,) => error!("Failed to render {} banner ({}): {}", kind, theme, error),
        }

        outcomes.push(ThemeOutcome {
            theme,
            result,
        },);
    }

    outcomes
}
