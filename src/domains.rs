// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Secondary metric: number of entries in a raw, line-oriented text list.
///
/// The list is fetched over plain HTTP. Blank lines and lines starting with
/// `#` are not entries. A failed fetch never aborts a render: it degrades to
/// [`SecondaryMetric::Unavailable`], which banners draw as zero.
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Error;

const COMMENT_PREFIX: char = '#';
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Outcome of the secondary fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
pub enum SecondaryMetric
{
    /// The list was fetched and counted.
    Available(u64,),
    /// The list could not be fetched.
    Unavailable,
}

impl SecondaryMetric
{
    /// Value drawn on the banner.
    pub fn value(self,) -> u64
    {
        match self {
            SecondaryMetric::Available(count,) => count,
            SecondaryMetric::Unavailable => 0,
        }
    }

    /// Returns `true` when the fetch failed.
    pub fn is_unavailable(self,) -> bool
    {
        matches!(self, SecondaryMetric::Unavailable)
    }
}

/// Builds the HTTP client used for raw resources.
///
/// Every request issued through the client is bounded by `timeout`.
///
/// # Errors
///
/// Returns [`Error::Network`] when the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration,) -> Result<reqwest::Client, Error,>
{
    reqwest::Client::builder()
        .timeout(timeout,)
        .user_agent(USER_AGENT,)
        .build()
        .map_err(|e| Error::network(format!("failed to initialize HTTP client: {e}"),),)
}

/// Counts entries in a line-oriented list.
///
/// # Examples
///
/// ```
/// use repo_banner::count_entries;
///
/// assert_eq!(count_entries("# header\nexample.com\n\n  \nmail.test\n"), 2);
/// ```
pub fn count_entries(contents: &str,) -> u64
{
    contents
        .lines()
        .filter(|line| !line.starts_with(COMMENT_PREFIX,) && !line.trim().is_empty(),)
        .count() as u64
}

/// Fetches `url` and counts its entries.
///
/// # Errors
///
/// Returns [`Error::Network`] on transport failures, timeouts and
/// non-success statuses.
pub async fn fetch_entry_count(client: &reqwest::Client, url: &str,) -> Result<u64, Error,>
{
    debug!("Fetching list from {}", url);

    let body = client.get(url,).send().await?.error_for_status()?.text().await?;
    let count = count_entries(&body,);

    debug!("Counted {} entries in {}", count, url);
    Ok(count,)
}

/// Fetches the secondary metric, degrading to
/// [`SecondaryMetric::Unavailable`] on any failure.
pub async fn fetch_secondary_metric(client: &reqwest::Client, url: &str,) -> SecondaryMetric
{
    match fetch_entry_count(client, url,).await {
        Ok(count,) => SecondaryMetric::Available(count,),
        Err(error,) => {
            warn!("Falling back to zero entries for {}: {}", url, error);
            SecondaryMetric::Unavailable
        }
    }
}

#[cfg(test)]
mod tests
{
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    #[test]
    fn count_entries_skips_comments_and_blank_lines()
    {
        let contents = "# disposable domains\n#another comment\n0-mail.com\n\n   \n10minutemail.com\r\nyopmail.com";
        assert_eq!(count_entries(contents), 3);
    }

    #[test]
    fn count_entries_of_empty_document_is_zero()
    {
        assert_eq!(count_entries(""), 0);
        assert_eq!(count_entries("\n\n# only comments\n"), 0);
    }

    #[test]
    fn secondary_metric_value_defaults_to_zero()
    {
        assert_eq!(SecondaryMetric::Available(12,).value(), 12);
        assert_eq!(SecondaryMetric::Unavailable.value(), 0);
        assert!(SecondaryMetric::Unavailable.is_unavailable());
    }

    #[tokio::test]
    async fn fetch_entry_count_reads_remote_list()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/data/domains.txt",),)
            .respond_with(ResponseTemplate::new(200,).set_body_string("# list\na.com\nb.com\n",),)
            .mount(&server,)
            .await;

        let client = build_http_client(Duration::from_secs(5,),).expect("client",);
        let url = format!("{}/data/domains.txt", server.uri());
        let count = fetch_entry_count(&client, &url,).await.expect("fetch failed",);

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn secondary_metric_degrades_on_server_error()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/data/domains.txt",),)
            .respond_with(ResponseTemplate::new(503,),)
            .mount(&server,)
            .await;

        let client = build_http_client(Duration::from_secs(5,),).expect("client",);
        let url = format!("{}/data/domains.txt", server.uri());

        let error = fetch_entry_count(&client, &url,).await.expect_err("expected failure",);
        assert!(matches!(error, Error::Network { .. }));

        let metric = fetch_secondary_metric(&client, &url,).await;
        assert_eq!(metric, SecondaryMetric::Unavailable);
    }

    #[tokio::test]
    async fn secondary_metric_degrades_on_timeout()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .respond_with(
                ResponseTemplate::new(200,)
                    .set_body_string("a.com\n",)
                    .set_delay(Duration::from_secs(2,),),
            )
            .mount(&server,)
            .await;

        let client = build_http_client(Duration::from_millis(100,),).expect("client",);
        let metric = fetch_secondary_metric(&client, &server.uri(),).await;

        assert_eq!(metric, SecondaryMetric::Unavailable);
    }
}
