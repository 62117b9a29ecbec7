// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Repository listing through the GitHub REST API.
///
/// Fetches every public repository of an account and reduces each record to
/// the counters drawn on the banners.
use std::time::Duration;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::Error;

const PER_PAGE: u8 = 100;
const MAX_PAGES: u32 = 10;

/// Raw repository record as returned by `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize,)]
struct RawRepository
{
    name:             String,
    #[serde(default)]
    language:         Option<String,>,
    #[serde(default)]
    stargazers_count: Option<u64,>,
    #[serde(default)]
    watchers_count:   Option<u64,>,
    #[serde(default)]
    forks_count:      Option<u64,>,
    #[serde(default)]
    open_issues:      Option<u64,>,
}

/// Compact summary of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RepositorySummary
{
    pub name:             String,
    pub primary_language: Option<String,>,
    pub stars:            u64,
    pub watchers:         u64,
    pub forks:            u64,
    pub open_issues:      u64,
}

impl RepositorySummary
{
    /// Popularity score used to order the repositories banner.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_banner::RepositorySummary;
    ///
    /// let summary = RepositorySummary {
    ///     name:             "demo".to_owned(),
    ///     primary_language: None,
    ///     stars:            2,
    ///     watchers:         2,
    ///     forks:            1,
    ///     open_issues:      3,
    /// };
    /// assert_eq!(summary.rank(), 2 * 4 + 2 * 3 + 1 * 2 + 3);
    /// ```
    pub fn rank(&self,) -> u64
    {
        self.stars
            .saturating_mul(4,)
            .saturating_add(self.watchers.saturating_mul(3,),)
            .saturating_add(self.forks.saturating_mul(2,),)
            .saturating_add(self.open_issues,)
    }
}

impl From<RawRepository,> for RepositorySummary
{
    fn from(raw: RawRepository,) -> Self
    {
        Self {
            name:             raw.name,
            primary_language: raw.language.filter(|language| !language.trim().is_empty(),),
            stars:            raw.stargazers_count.unwrap_or_default(),
            watchers:         raw.watchers_count.unwrap_or_default(),
            forks:            raw.forks_count.unwrap_or_default(),
            open_issues:      raw.open_issues.unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for RepositorySummary
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        write!(f, "{} ({} stars, rank {})", self.name, self.stars, self.rank())
    }
}

#[derive(Debug, Serialize,)]
struct PageParameters
{
    per_page: u8,
    page:     u32,
}

/// GitHub API client bounded by a per-request timeout.
#[derive(Debug, Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
    timeout:  Duration,
}

impl GitHubClient
{
    /// Builds a client for the API rooted at `base_url`.
    ///
    /// Requests are anonymous unless `token` is provided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the base URL is invalid or the client
    /// cannot be initialized.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use repo_banner::GitHubClient;
    ///
    /// # async fn example() -> Result<(), repo_banner::Error> {
    /// let client =
    ///     GitHubClient::new("https://api.github.com", None, Duration::from_secs(30),)?;
    /// let repositories = client.fetch_repositories("octocat",).await?;
    /// println!("{} repositories", repositories.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: &str, token: Option<&str,>, timeout: Duration,) -> Result<Self, Error,>
    {
        let mut builder = Octocrab::builder().base_uri(base_url,).map_err(|e| {
            Error::network(format!("invalid GitHub API base URL {base_url}: {e}"),)
        },)?;

        if let Some(token,) = token {
            builder = builder.personal_token(token,);
        }

        let octocrab = builder.build().map_err(|e| {
            Error::network(format!("failed to initialize GitHub client: {e}"),)
        },)?;

        Ok(Self::from_octocrab(octocrab, timeout,),)
    }

    /// Wraps an existing Octocrab instance.
    pub fn from_octocrab(octocrab: Octocrab, timeout: Duration,) -> Self
    {
        Self {
            octocrab,
            timeout,
        }
    }

    /// Fetches all repositories owned by `user`, in API order.
    ///
    /// Pages of 100 records are requested until a short page is returned or
    /// the page limit is reached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when a request fails, returns a non-success
    /// status, cannot be decoded, or exceeds the timeout.
    pub async fn fetch_repositories(&self, user: &str,) -> Result<Vec<RepositorySummary,>, Error,>
    {
        let route = format!("/users/{user}/repos");
        let mut repositories = Vec::with_capacity(PER_PAGE as usize,);
        let mut page = 1u32;

        loop {
            debug!("Fetching page {} of repositories for {}", page, user);

            let parameters = PageParameters {
                per_page: PER_PAGE,
                page,
            };
            let records: Vec<RawRepository,> =
                timeout(self.timeout, self.octocrab.get(&route, Some(&parameters,),),)
                    .await
                    .map_err(|_| {
                        Error::network(format!(
                            "listing repositories for {user} timed out after {}s",
                            self.timeout.as_secs()
                        ),)
                    },)?
                    .map_err(|e| {
                        Error::network(format!("failed to list repositories for {user}: {e}"),)
                    },)?;

            let count = records.len();
            repositories.extend(records.into_iter().map(RepositorySummary::from,),);

            if count < PER_PAGE as usize || page >= MAX_PAGES {
                break;
            }

            page += 1;
        }

        info!("Fetched {} repositories for {}", repositories.len(), user);

        Ok(repositories,)
    }
}
