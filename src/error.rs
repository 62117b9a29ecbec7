#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the banner renderer."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type returned by every stage of the banner pipeline.
///
/// Network, asset and output failures each get their own variant so the CLI
/// can report which stage of a theme run aborted. Instances are usually
/// produced through the helper constructors below or the `From`
/// implementations for serde error types.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading the configuration document.
    #[error("failed to read configuration from {path:?}: {source}")]
    ConfigIo {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when the configuration or CLI input violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Transport failures, non-success statuses and timed out requests.
    #[error("network error: {message}")]
    Network {
        /// Human readable message describing the failed request.
        message: String
    },
    /// A required image, font or data file is missing or cannot be decoded.
    #[error("failed to load asset {asset}: {message}")]
    AssetLoad {
        /// Path or URL of the asset.
        asset:   String,
        /// Human readable message describing the failure.
        message: String
    },
    /// The drawing surface could not be created or encoded.
    #[error("failed to render banner: {message}")]
    Render {
        /// Human readable message describing the failure.
        message: String
    },
    /// One or more theme runs did not produce a banner.
    #[error("{kind} banner failed for theme(s): {themes}")]
    ThemeRuns {
        /// Banner layout that was requested.
        kind:   String,
        /// Comma separated themes that failed.
        themes: String
    },
    /// A theme task panicked or was cancelled before finishing.
    #[error("{kind} task for the {theme} theme aborted: {message}")]
    TaskAborted {
        /// Banner layout the task was rendering.
        kind:    String,
        /// Theme the task was rendering.
        theme:   String,
        /// Description reported by the runtime.
        message: String
    },
    /// Wraps I/O errors that occur while writing the rendered banner.
    #[error("failed to write banner at {path:?}: {source}")]
    Io {
        /// Location of the banner being written.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a network error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the failed request.
    pub fn network<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Network {
            message: message.into()
        }
    }

    /// Constructs a render error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the drawing failure.
    pub fn render<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Render {
            message: message.into()
        }
    }

    /// Constructs an asset loading error for the named asset.
    ///
    /// # Parameters
    ///
    /// * `asset` - Path or URL identifying the asset.
    /// * `message` - Human-readable description of the failure.
    pub fn asset<A, M>(asset: A, message: M) -> Self
    where
        A: Into<String>,
        M: Into<String>
    {
        Self::AssetLoad {
            asset:   asset.into(),
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::ConfigIo`] variant capturing the failing path and
/// source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn config_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::ConfigIo {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the banner that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::AssetLoad`] variant for a local file.
///
/// # Parameters
///
/// * `path` - Location of the asset that triggered the error.
/// * `message` - Displayable cause of the failure.
pub fn asset_error<M>(path: &Path, message: M) -> Error
where
    M: std::fmt::Display
{
    Error::asset(path.display().to_string(), message.to_string())
}
