// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use repo_banner::{
    AccountAggregate, FontRegistry, LanguageColours, REPOSITORIES_WIDTH, RepositoryAssets,
    RepositorySummary, STAR_ICON_SIZE, Theme, format_number, rank_repositories,
    render_repositories, summary_fragments,
};
use tiny_skia::{Color, Pixmap};

fn repositories(count: u64,) -> Vec<RepositorySummary,>
{
    (0..count)
        .map(|i| RepositorySummary {
            name:             format!("repository-{i}"),
            primary_language: Some(if i % 3 == 0 { "Rust" } else { "Go" }.to_owned(),),
            stars:            (i * 7919) % 5000,
            watchers:         (i * 104_729) % 5000,
            forks:            i % 97,
            open_issues:      i % 13,
        },)
        .collect()
}

fn benchmark_format_number(c: &mut Criterion,)
{
    let values = [0u64, 999, 1_000, 1_549, 12_345, 999_949, 1_000_000, 7_250_000_000];

    c.bench_function("format_number", |b| {
        b.iter(|| {
            for value in values {
                black_box(format_number(black_box(value,),),);
            }
        },)
    },);
}

fn benchmark_summary_fragments(c: &mut Criterion,)
{
    let totals = AccountAggregate {
        repository_count: 120,
        star_total:       48_213,
        fork_total:       1_504,
        issue_total:      1,
    };

    c.bench_function("summary_fragments", |b| {
        b.iter(|| black_box(summary_fragments(black_box(&totals,),),),)
    },);
}

fn benchmark_ranking(c: &mut Criterion,)
{
    let input = repositories(1_000,);

    c.bench_function("rank_repositories_1000", |b| {
        b.iter(|| black_box(rank_repositories(black_box(input.clone(),),).len(),),)
    },);
}

fn benchmark_render_repositories(c: &mut Criterion,)
{
    let mut logo = Pixmap::new(REPOSITORIES_WIDTH, 664,).expect("logo",);
    logo.fill(Color::from_rgba8(24, 24, 24, 255,),);
    let mut star = Pixmap::new(STAR_ICON_SIZE, STAR_ICON_SIZE,).expect("star",);
    star.fill(Color::from_rgba8(227, 179, 65, 255,),);
    let assets = RepositoryAssets {
        logo,
        star,
        colours: LanguageColours::parse("bench", r##"{ "Rust": "#dea584", "Go": "#00ADD8" }"##,)
            .expect("colours",),
    };
    let fonts = FontRegistry::new();
    let ranked = rank_repositories(repositories(20,),);

    c.bench_function("render_repositories_20", |b| {
        b.iter(|| {
            let canvas = render_repositories(black_box(&ranked,), &assets, Theme::Dark, &fonts,)
                .expect("render failed",);
            black_box(canvas.height(),)
        },)
    },);
}

criterion_group!(
    benches,
    benchmark_format_number,
    benchmark_summary_fragments,
    benchmark_ranking,
    benchmark_render_repositories
);
criterion_main!(benches);
