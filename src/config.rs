// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration document describing where banner inputs live.
//!
//! The types in this module mirror the structure of the optional YAML document
//! consumed by the CLI. Every field has a default matching the asset layout of
//! a banner repository checkout, so the document only needs to list the
//! values that differ. Command-line flags and environment variables are
//! applied on top through [`Overrides`].

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{self, Error};

/// Default GitHub REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Default timeout applied to every network request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DOMAIN_LIST_URL: &str = "https://raw.githubusercontent.com/doodad-labs/disposable-email-domains/refs/heads/main/data/domains.txt";
const DEFAULT_DOMAIN_LIST_LABEL: &str = "github.com/doodad-labs/disposable-email-domains";

/// Visual theme of a rendered banner.
///
/// # Examples
///
/// ```
/// use repo_banner::Theme;
///
/// assert_eq!(Theme::Dark.file_name("banner"), "banner@dark.png");
/// assert_eq!(Theme::Light.file_name("banner"), "banner.png");
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
#[serde(rename_all = "snake_case")]
pub enum Theme
{
    /// Dark text on light backgrounds.
    Light,
    /// Light text on dark backgrounds.
    Dark,
}

impl Theme
{
    /// Both themes in render order.
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark,];

    /// Output file name for a banner stem rendered in this theme.
    ///
    /// The light variant keeps the plain name; the dark variant gets an
    /// `@dark` suffix.
    pub fn file_name(self, stem: &str,) -> String
    {
        match self {
            Theme::Light => format!("{stem}.png"),
            Theme::Dark => format!("{stem}@dark.png"),
        }
    }
}

impl std::fmt::Display for Theme
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        match self {
            Theme::Light => f.write_str("light",),
            Theme::Dark => f.write_str("dark",),
        }
    }
}

/// A pair of values selected by [`Theme`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq,)]
pub struct Themed<T,>
{
    /// Value used for the light theme.
    pub light: T,
    /// Value used for the dark theme.
    pub dark:  T,
}

impl<T,> Themed<T,>
{
    /// Returns the value associated with `theme`.
    pub fn get(&self, theme: Theme,) -> &T
    {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use repo_banner::BannerConfig;
///
/// let yaml = r#"
/// user: octocat
/// summary:
///   file_stem: stats
/// "#;
/// let config: BannerConfig = serde_yaml::from_str(yaml,).expect("valid configuration",);
/// assert_eq!(config.user.as_deref(), Some("octocat"));
/// assert_eq!(config.summary.file_stem, "stats");
/// assert_eq!(config.repositories.file_stem, "repositories");
/// ```
#[derive(Debug, Deserialize, Serialize, Clone,)]
#[serde(default)]
pub struct BannerConfig
{
    /// GitHub account whose repositories are summarized.
    #[serde(alias = "username")]
    pub user:                 Option<String,>,
    /// Optional token used to authenticate API requests.
    pub token:                Option<String,>,
    /// Root of the GitHub REST API.
    pub api_base_url:         String,
    /// Timeout applied to every network request, in seconds.
    pub request_timeout_secs: u64,
    /// Directory receiving the rendered PNG files.
    pub output_dir:           PathBuf,
    /// Inputs of the summary banner.
    pub summary:              SummaryConfig,
    /// Inputs of the per-repository banner.
    pub repositories:         RepositoriesConfig,
}

impl Default for BannerConfig
{
    fn default() -> Self
    {
        Self {
            user:                 None,
            token:                None,
            api_base_url:         DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            output_dir:           PathBuf::from(".",),
            summary:              SummaryConfig::default(),
            repositories:         RepositoriesConfig::default(),
        }
    }
}

/// Font files of the summary banner.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq,)]
pub struct FontPair
{
    /// Regular weight font file.
    pub regular: PathBuf,
    /// Bold weight font file.
    pub bold:    PathBuf,
}

/// Inputs of the summary banner.
#[derive(Debug, Deserialize, Serialize, Clone,)]
#[serde(default)]
pub struct SummaryConfig
{
    /// File name stem of the rendered banner.
    pub file_stem:         String,
    /// Background templates stretched over the whole surface.
    pub background:        Themed<PathBuf,>,
    /// Font files used for the statistics sentence.
    pub fonts:             FontPair,
    /// Raw text resource whose entries are counted.
    pub domain_list_url:   String,
    /// Source label printed under the domain count.
    pub domain_list_label: String,
    /// Appends a visible marker when the domain count could not be fetched.
    pub mark_unavailable:  bool,
}

impl Default for SummaryConfig
{
    fn default() -> Self
    {
        Self {
            file_stem:         "banner".to_owned(),
            background:        Themed {
                light: PathBuf::from("imgs/template.png",),
                dark:  PathBuf::from("imgs/template-dark.png",),
            },
            fonts:             FontPair {
                regular: PathBuf::from("fonts/SpaceMono.ttf",),
                bold:    PathBuf::from("fonts/SpaceMono-Bold.ttf",),
            },
            domain_list_url:   DEFAULT_DOMAIN_LIST_URL.to_owned(),
            domain_list_label: DEFAULT_DOMAIN_LIST_LABEL.to_owned(),
            mark_unavailable:  false,
        }
    }
}

/// Inputs of the per-repository banner.
#[derive(Debug, Deserialize, Serialize, Clone,)]
#[serde(default)]
pub struct RepositoriesConfig
{
    /// File name stem of the rendered banner.
    pub file_stem:        String,
    /// Header image drawn above the repository rows.
    pub logo:             Themed<PathBuf,>,
    /// Star icon source, either a local SVG path or an `http(s)` URL.
    pub star_icon:        Themed<String,>,
    /// Font file used for repository rows.
    pub font:             PathBuf,
    /// JSON document mapping language names to hex colours.
    pub language_colours: PathBuf,
}

impl Default for RepositoriesConfig
{
    fn default() -> Self
    {
        Self {
            file_stem:        "repositories".to_owned(),
            logo:             Themed {
                light: PathBuf::from("logo.png",),
                dark:  PathBuf::from("logo@dark.png",),
            },
            star_icon:        Themed {
                light: "star.svg".to_owned(), dark: "star@dark.svg".to_owned(),
            },
            font:             PathBuf::from("UbuntuMono.ttf",),
            language_colours: PathBuf::from("language-colours.json",),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default,)]
pub struct Overrides
{
    /// Account override.
    pub user:       Option<String,>,
    /// Token override.
    pub token:      Option<String,>,
    /// Output directory override.
    pub output_dir: Option<PathBuf,>,
}

impl BannerConfig
{
    /// Applies CLI and environment overrides on top of the document.
    ///
    /// Blank override strings are ignored so an exported but empty variable
    /// does not erase a configured value.
    pub fn with_overrides(mut self, overrides: Overrides,) -> Self
    {
        if let Some(user,) = non_blank(overrides.user,) {
            self.user = Some(user,);
        }
        if let Some(token,) = non_blank(overrides.token,) {
            self.token = Some(token,);
        }
        if let Some(output_dir,) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        self
    }

    /// Returns the trimmed account name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when no account was configured.
    pub fn account(&self,) -> Result<&str, Error,>
    {
        self.user
            .as_deref()
            .map(str::trim,)
            .filter(|user| !user.is_empty(),)
            .ok_or_else(|| {
                Error::validation("missing GitHub account: pass --user or set GITHUB_USERNAME",)
            },)
    }

    /// Timeout applied to each network request.
    pub fn request_timeout(&self,) -> Duration
    {
        Duration::from_secs(self.request_timeout_secs,)
    }

    /// Checks the invariants the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the account is missing, the timeout
    /// is zero, or a file stem is blank.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        self.account()?;

        if self.request_timeout_secs == 0 {
            return Err(Error::validation("request_timeout_secs must be positive",),);
        }

        for stem in [&self.summary.file_stem, &self.repositories.file_stem,] {
            if stem.trim().is_empty() {
                return Err(Error::validation("file_stem cannot be empty",),);
            }
        }

        Ok((),)
    }
}

fn non_blank(value: Option<String,>,) -> Option<String,>
{
    value.map(|value| value.trim().to_owned(),).filter(|value| !value.is_empty(),)
}

/// Loads the configuration document, falling back to defaults when no path
/// is given.
///
/// # Errors
///
/// Returns [`Error::ConfigIo`] when the file cannot be read and
/// [`Error::Parse`] when the YAML cannot be decoded.
pub fn load_config(path: Option<&Path,>,) -> Result<BannerConfig, Error,>
{
    match path {
        Some(path,) => {
            let contents =
                fs::read_to_string(path,).map_err(|source| error::config_io_error(path, source,),)?;
            parse_config(&contents,)
        }
        None => Ok(BannerConfig::default(),),
    }
}

/// Parses a configuration document from a YAML string.
///
/// An empty document yields the defaults.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML cannot be decoded.
pub fn parse_config(contents: &str,) -> Result<BannerConfig, Error,>
{
    if contents.trim().is_empty() {
        return Ok(BannerConfig::default(),);
    }

    Ok(serde_yaml::from_str(contents,)?,)
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn empty_document_yields_defaults()
    {
        let config = parse_config("",).expect("empty document should parse",);
        assert!(config.user.is_none());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.summary.file_stem, "banner");
        assert_eq!(config.repositories.star_icon.dark, "star@dark.svg");
    }

    #[test]
    fn partial_document_keeps_nested_defaults()
    {
        let yaml = r"
username: doodad-labs
summary:
  background:
    light: a.png
    dark: b.png
repositories:
  font: fonts/UbuntuMono.ttf
";
        let config = parse_config(yaml,).expect("valid document",);

        assert_eq!(config.account().expect("account",), "doodad-labs");
        assert_eq!(config.summary.background.get(Theme::Dark), Path::new("b.png"));
        assert_eq!(config.summary.fonts.bold, PathBuf::from("fonts/SpaceMono-Bold.ttf"));
        assert_eq!(config.repositories.font, PathBuf::from("fonts/UbuntuMono.ttf"));
        assert_eq!(config.repositories.file_stem, "repositories");
    }

    #[test]
    fn malformed_document_maps_to_parse_error()
    {
        let error = parse_config("request_timeout_secs: [",).expect_err("expected parse failure",);
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn overrides_replace_document_values()
    {
        let config = BannerConfig {
            user: Some("from-file".to_owned(),), ..BannerConfig::default()
        };

        let config = config.with_overrides(Overrides {
            user:       Some(" from-cli ".to_owned(),),
            token:      Some("   ".to_owned(),),
            output_dir: Some(PathBuf::from("out",),),
        },);

        assert_eq!(config.account().expect("account",), "from-cli");
        assert!(config.token.is_none());
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn validate_rejects_missing_account()
    {
        let error = BannerConfig::default().validate().expect_err("expected validation error",);
        match error {
            Error::Validation {
                message,
            } => assert!(message.contains("missing GitHub account")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_timeout()
    {
        let config = BannerConfig {
            user: Some("octocat".to_owned(),),
            request_timeout_secs: 0,
            ..BannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_reads_file_and_reports_missing_path()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let path = dir.path().join("banner.yaml",);
        fs::write(&path, "user: octocat\nrequest_timeout_secs: 5\n",).expect("write config",);

        let config = load_config(Some(&path,),).expect("config should load",);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let missing = dir.path().join("missing.yaml",);
        let error = load_config(Some(&missing,),).expect_err("expected io error",);
        assert!(matches!(error, Error::ConfigIo { .. }));
    }

    #[test]
    fn theme_file_names_and_colours()
    {
        assert_eq!(Theme::Light.file_name("repositories"), "repositories.png");
        assert_eq!(Theme::Dark.file_name("repositories"), "repositories@dark.png");
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
