// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Renders PNG banners summarizing a GitHub account.
//!
//! Two layouts are available: a summary banner with account-wide totals and a
//! secondary metric drawn over a background template, and a repositories
//! banner listing every visible repository in popularity order under a logo.
//! Both are produced in a light and a dark variant. Each variant run fetches
//! its data, loads its assets, draws with `tiny-skia`/`resvg` and writes the
//! encoded image atomically.

mod aggregate;
mod assets;
mod canvas;
mod config;
mod domains;
mod error;
mod fonts;
mod format;
mod github;
mod output;
mod pipeline;
mod render;

pub use aggregate::{AccountAggregate, aggregate, is_hidden, rank_repositories, visible_repositories};
pub use assets::{
    IconSource, LanguageColours, RepositoryAssets, STAR_ICON_SIZE, SummaryAssets, decode_png,
    load_icon, load_png, svg_to_png,
};
pub use canvas::{Canvas, Colour, TextAlign, TextStyle, UNKNOWN_LANGUAGE_COLOUR};
pub use config::{
    BannerConfig, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, FontPair, Overrides,
    RepositoriesConfig, SummaryConfig, Theme, Themed, load_config, parse_config,
};
pub use domains::{
    SecondaryMetric, build_http_client, count_entries, fetch_entry_count, fetch_secondary_metric,
};
pub use error::{Error, io_error};
pub use fonts::{FontFace, FontRegistry, FontWeight};
pub use format::{format_grouped, format_number, generated_on, pluralize, truncate_name};
pub use github::{GitHubClient, RepositorySummary};
pub use output::{WrittenBanner, write_banner};
pub use pipeline::{
    BannerKind, RunContext, ThemeOutcome, register_fonts, run_repositories, run_summary, run_themes,
};
pub use render::{
    EntryLayout, Fragment, HEADER_HEIGHT, MAX_NAME_LENGTH, Placement, REPOSITORIES_FONT_FAMILY,
    REPOSITORIES_WIDTH, SUMMARY_FONT_FAMILY, SUMMARY_HEIGHT, SUMMARY_WIDTH, SummaryBanner,
    domain_fragments, entry_layout, layout_domain_fragments, layout_fragments, placements,
    render_repositories, render_summary, repositories_height, summary_fragments, text_colour,
};
