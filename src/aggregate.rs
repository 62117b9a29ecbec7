// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Reductions over the fetched repository list.
///
/// Hidden repositories (names starting with [`HIDDEN_PREFIX`]) are removed
/// once, before both the totals and the ranked list are computed, so the two
/// banners always agree on what they count.
use serde::Serialize;

use crate::github::RepositorySummary;

/// Name prefix marking repositories that never appear on a banner.
pub const HIDDEN_PREFIX: char = '.';

/// Scalar totals drawn on the summary banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize,)]
pub struct AccountAggregate
{
    /// Number of visible repositories.
    pub repository_count: u64,
    /// Sum of stargazers.
    pub star_total:       u64,
    /// Sum of forks.
    pub fork_total:       u64,
    /// Sum of open issues.
    pub issue_total:      u64,
}

/// Returns `true` when `name` marks a hidden repository.
pub fn is_hidden(name: &str,) -> bool
{
    name.starts_with(HIDDEN_PREFIX,)
}

/// Drops hidden repositories while preserving API order.
pub fn visible_repositories(repositories: Vec<RepositorySummary,>,) -> Vec<RepositorySummary,>
{
    repositories.into_iter().filter(|repository| !is_hidden(&repository.name,),).collect()
}

/// Sums repository counters into an [`AccountAggregate`], saturating at
/// `u64::MAX`.
///
/// # Examples
///
/// ```
/// use repo_banner::{AccountAggregate, aggregate};
///
/// assert_eq!(aggregate(&[]), AccountAggregate::default());
/// ```
pub fn aggregate(repositories: &[RepositorySummary],) -> AccountAggregate
{
    repositories.iter().fold(AccountAggregate::default(), |totals, repository| AccountAggregate {
        repository_count: totals.repository_count.saturating_add(1,),
        star_total:       totals.star_total.saturating_add(repository.stars,),
        fork_total:       totals.fork_total.saturating_add(repository.forks,),
        issue_total:      totals.issue_total.saturating_add(repository.open_issues,),
    },)
}

/// Orders repositories by descending rank, keeping API order for ties.
pub fn rank_repositories(mut repositories: Vec<RepositorySummary,>,) -> Vec<RepositorySummary,>
{
    // `sort_by` is stable, which keeps equal ranks in input order.
    repositories.sort_by(|a, b| b.rank().cmp(&a.rank(),),);
    repositories
}
