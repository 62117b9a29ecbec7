// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Layouts of the summary and repositories banners.
//!
//! Positions are derived from fixed origins and a constant per-character
//! advance rather than measured glyph widths. The background templates were
//! designed around that monospace approximation, so keeping it keeps the text
//! aligned with the artwork.

use chrono::NaiveDate;
use crate::{
    aggregate::AccountAggregate,
    assets::{RepositoryAssets, STAR_ICON_SIZE, SummaryAssets},
    canvas::{Canvas, Colour, TextAlign, TextStyle},
    config::Theme,
    domains::SecondaryMetric,
    error::Error,
    fonts::{FontRegistry, FontWeight},
    format::{format_grouped, format_number, generated_on, pluralize, truncate_name},
    github::RepositorySummary,
};

/// Logical family of the summary banner text.
pub const SUMMARY_FONT_FAMILY: &str = "Space Mono";
/// Logical family of the repositories banner text.
pub const REPOSITORIES_FONT_FAMILY: &str = "Ubuntu Mono";

pub const SUMMARY_WIDTH: u32 = 1087;
pub const SUMMARY_HEIGHT: u32 = 367;
const SUMMARY_FONT_SIZE: f32 = 15.5;
const SUMMARY_GLYPH_ADVANCE: f32 = 9.0;
const SUMMARY_ORIGIN_X: f32 = 340.0;
const STATS_BASELINE: f32 = 85.0;
const DOMAINS_BASELINE: f32 = 130.0;
const DOMAIN_LABEL_SHIFT: f32 = -1.0;
const SOURCE_BASELINE: f32 = 145.0;
const SOURCE_FONT_SIZE: f32 = 12.0;
const FOOTER_FONT_SIZE: f32 = 10.0;
const FOOTER_MARGIN: f32 = 20.0;
const UNAVAILABLE_MARKER: &str = " (data unavailable)";

pub const REPOSITORIES_WIDTH: u32 = 1640;
/// Height of the logo header above the repository rows.
pub const HEADER_HEIGHT: u32 = 664;
const ROW_HEIGHT: u32 = 100;
const BOTTOM_MARGIN: u32 = 40;
const DIVIDER_THICKNESS: f32 = 2.0;
const FIRST_BASELINE_OFFSET: f32 = 90.0;
const ROW_ADVANCE: f32 = 80.0;
const COLUMN_MARGIN: f32 = 20.0;
const ENTRY_FONT_SIZE: f32 = 40.0;
const ENTRY_GLYPH_ADVANCE: f32 = 20.0;
const MARKER_RADIUS: f32 = 15.0;
const MARKER_RAISE: f32 = 13.0;
const NAME_OFFSET: f32 = 40.0;
const STAR_GAP: f32 = 20.0;
const STAR_RAISE: f32 = 35.0;
const STARS_GAP: f32 = 70.0;
/// Longest repository name drawn before truncation.
pub const MAX_NAME_LENGTH: usize = 26;

/// Run of text drawn in a single weight.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Fragment
{
    pub text:   String,
    pub weight: FontWeight,
}

impl Fragment
{
    fn bold(text: String,) -> Self
    {
        Self {
            text,
            weight: FontWeight::Bold,
        }
    }

    fn regular(text: String,) -> Self
    {
        Self {
            text,
            weight: FontWeight::Regular,
        }
    }
}

/// Statistics sentence: `<n> repos, <n> stars, <n> forks, <n> issues`.
///
/// Counts are bold, labels regular.
pub fn summary_fragments(totals: &AccountAggregate,) -> Vec<Fragment,>
{
    let entries = [
        (totals.repository_count, "repo", ", ",),
        (totals.star_total, "star", ", ",),
        (totals.fork_total, "fork", ", ",),
        (totals.issue_total, "issue", "",),
    ];

    entries
        .into_iter()
        .flat_map(|(count, unit, separator,)| {
            [
                Fragment::bold(format_number(count,),),
                Fragment::regular(format!(" {}{separator}", pluralize(count, unit,)),),
            ]
        },)
        .collect()
}

/// Secondary metric line: `<n> disposable email domains`.
pub fn domain_fragments(metric: SecondaryMetric,) -> Vec<Fragment,>
{
    vec![
        Fragment::bold(format_grouped(metric.value(),),),
        Fragment::regular(" disposable email domains".to_owned(),),
    ]
}

/// Assigns each fragment its x coordinate, advancing by a fixed width per
/// character.
pub fn layout_fragments(fragments: &[Fragment], origin_x: f32,) -> Vec<(f32, &Fragment,),>
{
    let mut cursor = origin_x;
    fragments
        .iter()
        .map(|fragment| {
            let x = cursor;
            cursor += fragment.text.chars().count() as f32 * SUMMARY_GLYPH_ADVANCE;
            (x, fragment,)
        },)
        .collect()
}

/// Positions of the secondary metric line.
///
/// The count starts at the text origin; the label is drawn one pixel left of
/// the monospace advance.
pub fn layout_domain_fragments(fragments: &[Fragment],) -> Vec<(f32, &Fragment,),>
{
    layout_fragments(fragments, SUMMARY_ORIGIN_X,)
        .into_iter()
        .enumerate()
        .map(|(index, (x, fragment,),)| {
            if index == 0 { (x, fragment,) } else { (x + DOMAIN_LABEL_SHIFT, fragment,) }
        },)
        .collect()
}

/// Data drawn on the summary banner.
#[derive(Debug, Clone,)]
pub struct SummaryBanner<'a,>
{
    pub totals:           AccountAggregate,
    pub domains:          SecondaryMetric,
    pub source_label:     &'a str,
    pub mark_unavailable: bool,
    pub date:             NaiveDate,
}

impl SummaryBanner<'_,>
{
    /// Subtitle naming the source of the secondary metric.
    pub fn source_line(&self,) -> String
    {
        let mut line = format!("- {}", self.source_label);
        if self.mark_unavailable && self.domains.is_unavailable() {
            line.push_str(UNAVAILABLE_MARKER,);
        }
        line
    }
}

/// Draws the summary banner.
///
/// # Errors
///
/// Returns [`Error::Render`] when the surface cannot be allocated.
pub fn render_summary(
    banner: &SummaryBanner<'_,>,
    assets: &SummaryAssets,
    theme: Theme,
    fonts: &FontRegistry,
) -> Result<Canvas, Error,>
{
    let width = SUMMARY_WIDTH as f32;
    let height = SUMMARY_HEIGHT as f32;
    let mut canvas = Canvas::new(SUMMARY_WIDTH, SUMMARY_HEIGHT, fonts,)?;

    canvas.draw_image(&assets.background, 0.0, 0.0, width, height,);
    canvas.set_fill(text_colour(theme,),);

    let stats = summary_fragments(&banner.totals,);
    draw_fragments(&mut canvas, fonts, &layout_fragments(&stats, SUMMARY_ORIGIN_X,), STATS_BASELINE,);
    let domains = domain_fragments(banner.domains,);
    draw_fragments(&mut canvas, fonts, &layout_domain_fragments(&domains,), DOMAINS_BASELINE,);

    canvas.set_font(summary_style(fonts, FontWeight::Regular, SOURCE_FONT_SIZE, TextAlign::Left,),);
    canvas.fill_text(&banner.source_line(), SUMMARY_ORIGIN_X, SOURCE_BASELINE,);

    canvas.set_font(summary_style(fonts, FontWeight::Regular, FOOTER_FONT_SIZE, TextAlign::Right,),);
    canvas.fill_text(
        &generated_on(banner.date,),
        width - FOOTER_MARGIN,
        height - FOOTER_MARGIN,
    );

    Ok(canvas,)
}

/// Surface height of a repositories banner with `count` entries.
///
/// # Examples
///
/// ```
/// use repo_banner::repositories_height;
///
/// assert_eq!(repositories_height(0), 704);
/// assert_eq!(repositories_height(2), 804);
/// assert_eq!(repositories_height(3), 904);
/// ```
pub fn repositories_height(count: usize,) -> u32
{
    let rows = count.div_ceil(2,) as u32;
    HEADER_HEIGHT + rows * ROW_HEIGHT + BOTTOM_MARGIN
}

/// Anchor of one repository entry: left edge and text baseline.
#[derive(Debug, Clone, Copy, PartialEq,)]
pub struct Placement
{
    pub x:        f32,
    pub baseline: f32,
}

/// Anchors of `count` entries filled left column first, two per row.
pub fn placements(count: usize,) -> Vec<Placement,>
{
    let mut baseline = HEADER_HEIGHT as f32 + FIRST_BASELINE_OFFSET;
    let mut anchors = Vec::with_capacity(count,);

    for index in 0..count {
        let on_right = index % 2 == 1;
        let x = COLUMN_MARGIN + if on_right { REPOSITORIES_WIDTH as f32 / 2.0 } else { 0.0 };
        anchors.push(Placement {
            x,
            baseline,
        },);
        if on_right {
            baseline += ROW_ADVANCE;
        }
    }

    anchors
}

/// Resolved geometry of one repository entry.
#[derive(Debug, Clone, PartialEq,)]
pub struct EntryLayout
{
    pub marker_centre: (f32, f32,),
    pub name:          String,
    pub name_x:        f32,
    pub star_origin:   (f32, f32,),
    pub stars:         String,
    pub stars_x:       f32,
    pub baseline:      f32,
}

/// Computes the geometry of `repository` anchored at `placement`.
pub fn entry_layout(repository: &RepositorySummary, placement: Placement,) -> EntryLayout
{
    let Placement {
        x,
        baseline,
    } = placement;
    let name = truncate_name(&repository.name, MAX_NAME_LENGTH,);
    let name_width = name.chars().count() as f32 * ENTRY_GLYPH_ADVANCE;
    let name_x = x + NAME_OFFSET;

    EntryLayout {
        marker_centre: (x, baseline - MARKER_RAISE,),
        star_origin: (name_x + name_width + STAR_GAP, baseline - STAR_RAISE,),
        stars: format_number(repository.stars,),
        stars_x: name_x + name_width + STARS_GAP,
        name,
        name_x,
        baseline,
    }
}

/// Draws the repositories banner for `repositories` in the given order.
///
/// # Errors
///
/// Returns [`Error::Render`] when the surface cannot be allocated.
pub fn render_repositories(
    repositories: &[RepositorySummary],
    assets: &RepositoryAssets,
    theme: Theme,
    fonts: &FontRegistry,
) -> Result<Canvas, Error,>
{
    let width = REPOSITORIES_WIDTH as f32;
    let header = HEADER_HEIGHT as f32;
    let text = text_colour(theme,);
    let icon = STAR_ICON_SIZE as f32;

    let mut canvas =
        Canvas::new(REPOSITORIES_WIDTH, repositories_height(repositories.len(),), fonts,)?;

    canvas.draw_image(&assets.logo, 0.0, 0.0, width, header,);
    canvas.set_fill(text,);
    canvas.fill_rect(0.0, header, width, DIVIDER_THICKNESS,);
    canvas.set_font(TextStyle {
        face:  fonts.resolve(REPOSITORIES_FONT_FAMILY, FontWeight::Regular,),
        size:  ENTRY_FONT_SIZE,
        align: TextAlign::Left,
    },);

    for (repository, placement,) in repositories.iter().zip(placements(repositories.len(),),) {
        let layout = entry_layout(repository, placement,);
        let (cx, cy,) = layout.marker_centre;
        let (star_x, star_y,) = layout.star_origin;

        canvas.set_fill(assets.colours.colour_for(repository.primary_language.as_deref(),),);
        canvas.fill_circle(cx, cy, MARKER_RADIUS,);

        canvas.set_fill(text,);
        canvas.fill_text(&layout.name, layout.name_x, layout.baseline,);
        canvas.draw_image(&assets.star, star_x, star_y, icon, icon,);
        canvas.fill_text(&layout.stars, layout.stars_x, layout.baseline,);
    }

    Ok(canvas,)
}

/// Default text colour of `theme`.
pub fn text_colour(theme: Theme,) -> Colour
{
    match theme {
        Theme::Light => Colour {
            r: 0, g: 0, b: 0,
        },
        Theme::Dark => Colour {
            r: 255, g: 255, b: 255,
        },
    }
}

fn draw_fragments(
    canvas: &mut Canvas,
    fonts: &FontRegistry,
    positions: &[(f32, &Fragment,)],
    baseline: f32,
)
{
    for &(x, fragment,) in positions {
        canvas.set_font(summary_style(fonts, fragment.weight, SUMMARY_FONT_SIZE, TextAlign::Left,),);
        canvas.fill_text(&fragment.text, x, baseline,);
    }
}

fn summary_style(fonts: &FontRegistry, weight: FontWeight, size: f32, align: TextAlign,) -> TextStyle
{
    TextStyle {
        face: fonts.resolve(SUMMARY_FONT_FAMILY, weight,),
        size,
        align,
    }
}
