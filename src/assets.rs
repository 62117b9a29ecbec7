// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Loading of the images and data files composited onto banners.
///
/// Raster assets are decoded into `tiny-skia` pixmaps. The star icon is kept
/// as SVG (local file or URL) and rasterized to PNG at the size it is drawn
/// before being decoded like any other image.
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tiny_skia::{Pixmap, Transform};
use tracing::{debug, warn};

use crate::{
    canvas::{Colour, UNKNOWN_LANGUAGE_COLOUR},
    config::{RepositoriesConfig, SummaryConfig, Theme},
    error::{self, Error},
};

/// Edge length, in pixels, of the rasterized star icon.
pub const STAR_ICON_SIZE: u32 = 40;

/// Location of an SVG icon.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum IconSource
{
    /// File on the local file system.
    Path(PathBuf,),
    /// Remote resource fetched over HTTP.
    Url(String,),
}

impl IconSource
{
    /// Interprets values starting with `http` as URLs and everything else as
    /// paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_banner::IconSource;
    ///
    /// assert!(matches!(IconSource::parse("https://example.com/star.svg"), IconSource::Url(_)));
    /// assert!(matches!(IconSource::parse("star.svg"), IconSource::Path(_)));
    /// ```
    pub fn parse(value: &str,) -> Self
    {
        if value.starts_with("http",) {
            IconSource::Url(value.to_owned(),)
        } else {
            IconSource::Path(PathBuf::from(value,),)
        }
    }
}

impl fmt::Display for IconSource
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            IconSource::Path(path,) => write!(f, "{}", path.display()),
            IconSource::Url(url,) => f.write_str(url,),
        }
    }
}

/// Reads and decodes a PNG file.
///
/// # Errors
///
/// Returns [`Error::AssetLoad`] when the file is missing or not a valid PNG.
pub async fn load_png(path: &Path,) -> Result<Pixmap, Error,>
{
    debug!("Loading image {}", path.display());
    let bytes =
        tokio::fs::read(path,).await.map_err(|source| error::asset_error(path, source,),)?;
    decode_png(&path.display().to_string(), &bytes,)
}

/// Decodes PNG bytes attributed to `asset`.
///
/// # Errors
///
/// Returns [`Error::AssetLoad`] when the bytes are not a valid PNG.
pub fn decode_png(asset: &str, bytes: &[u8],) -> Result<Pixmap, Error,>
{
    Pixmap::decode_png(bytes,).map_err(|e| Error::asset(asset, format!("undecodable image: {e}"),),)
}

/// Rasterizes SVG data into a `size` x `size` PNG.
///
/// # Errors
///
/// Returns [`Error::AssetLoad`] when the SVG cannot be parsed or the PNG
/// cannot be encoded.
pub fn svg_to_png(asset: &str, svg: &[u8], size: u32,) -> Result<Vec<u8,>, Error,>
{
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default(),)
        .map_err(|e| Error::asset(asset, format!("invalid SVG: {e}"),),)?;
    let mut pixmap = Pixmap::new(size, size,)
        .ok_or_else(|| Error::asset(asset, format!("invalid raster size {size}"),),)?;

    let source_size = tree.size();
    let transform = Transform::from_scale(
        size as f32 / source_size.width(),
        size as f32 / source_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut(),);

    pixmap.encode_png().map_err(|e| Error::asset(asset, format!("failed to encode PNG: {e}"),),)
}

/// Loads an SVG icon from a path or URL and rasterizes it.
///
/// # Errors
///
/// Returns [`Error::Network`] when a remote icon cannot be fetched and
/// [`Error::AssetLoad`] when a local icon is missing or either step of the
/// conversion fails.
pub async fn load_icon(
    client: &reqwest::Client,
    source: &IconSource,
    size: u32,
) -> Result<Pixmap, Error,>
{
    let name = source.to_string();
    debug!("Loading icon {}", name);

    let svg = match source {
        IconSource::Path(path,) => {
            tokio::fs::read(path,).await.map_err(|e| error::asset_error(path, e,),)?
        }
        IconSource::Url(url,) => {
            client.get(url,).send().await?.error_for_status()?.bytes().await?.to_vec()
        }
    };

    let png = svg_to_png(&name, &svg, size,)?;
    decode_png(&name, &png,)
}

#[derive(Debug, Deserialize,)]
#[serde(untagged)]
enum ColourEntry
{
    Hex(String,),
    Detailed
    {
        color: Option<String,>,
    },
}

/// Language name to marker colour lookup.
#[derive(Debug, Clone, Default, PartialEq,)]
pub struct LanguageColours
{
    colours: HashMap<String, Colour,>,
}

impl LanguageColours
{
    /// Parses a JSON object mapping language names to `#rrggbb` strings.
    ///
    /// Entries may also be objects with a `color` field. Null or malformed
    /// colours are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetLoad`] when the document is not a JSON object.
    pub fn parse(asset: &str, json: &str,) -> Result<Self, Error,>
    {
        let entries: HashMap<String, Option<ColourEntry,>,> = serde_json::from_str(json,)
            .map_err(|e| Error::asset(asset, format!("invalid language colours: {e}"),),)?;

        let colours = entries
            .into_iter()
            .filter_map(|(language, entry,)| {
                let hex = match entry? {
                    ColourEntry::Hex(hex,) => hex,
                    ColourEntry::Detailed {
                        color,
                    } => color?,
                };
                Colour::from_hex(&hex,).map(|colour| (language, colour,),)
            },)
            .collect();

        Ok(Self {
            colours,
        },)
    }

    /// Reads and parses the colour table at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetLoad`] when the file is missing or malformed.
    pub async fn load(path: &Path,) -> Result<Self, Error,>
    {
        let json = tokio::fs::read_to_string(path,)
            .await
            .map_err(|source| error::asset_error(path, source,),)?;
        let colours = Self::parse(&path.display().to_string(), &json,)?;

        if colours.is_empty() {
            warn!("No language colours in {}; every marker uses the fallback", path.display());
        } else {
            debug!("Loaded {} language colours from {}", colours.len(), path.display());
        }
        Ok(colours,)
    }

    /// Marker colour for `language`, gray when unknown or absent.
    pub fn colour_for(&self, language: Option<&str,>,) -> Colour
    {
        language
            .and_then(|language| self.colours.get(language,),)
            .copied()
            .unwrap_or(UNKNOWN_LANGUAGE_COLOUR,)
    }

    pub fn len(&self,) -> usize
    {
        self.colours.len()
    }

    pub fn is_empty(&self,) -> bool
    {
        self.colours.is_empty()
    }
}

/// Images required by one summary banner render.
pub struct SummaryAssets
{
    pub background: Pixmap,
}

impl SummaryAssets
{
    /// Loads the background template for `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetLoad`] when the template is missing or corrupt.
    pub async fn load(config: &SummaryConfig, theme: Theme,) -> Result<Self, Error,>
    {
        let background = load_png(config.background.get(theme,),).await?;
        Ok(Self {
            background,
        },)
    }
}

/// Images and lookup tables required by one repositories banner render.
pub struct RepositoryAssets
{
    pub logo:    Pixmap,
    pub star:    Pixmap,
    pub colours: LanguageColours,
}

impl RepositoryAssets
{
    /// Loads the logo, star icon and colour table for `theme` concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first failure among the three loads.
    pub async fn load(
        client: &reqwest::Client,
        config: &RepositoriesConfig,
        theme: Theme,
    ) -> Result<Self, Error,>
    {
        let star_source = IconSource::parse(config.star_icon.get(theme,),);

        let (logo, star, colours,) = tokio::try_join!(
            load_png(config.logo.get(theme,)),
            load_icon(client, &star_source, STAR_ICON_SIZE),
            LanguageColours::load(&config.language_colours),
        )?;

        Ok(Self {
            logo,
            star,
            colours,
        },)
    }
}

#[cfg(test)]
mod tests
{
    use std::{fs, time::Duration};

    use tempfile::tempdir;
    use tiny_skia::Color;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::domains::build_http_client;

    const STAR_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16"><path fill="#e3b341" d="M8 .25l2.33 4.73 5.22.76-3.78 3.68.9 5.2L8 12.17l-4.67 2.45.9-5.2L.45 5.74l5.22-.76z"/></svg>"##;

    fn write_png(path: &Path, width: u32, height: u32,)
    {
        let mut pixmap = Pixmap::new(width, height,).expect("pixmap",);
        pixmap.fill(Color::from_rgba8(10, 20, 30, 255,),);
        fs::write(path, pixmap.encode_png().expect("encode",),).expect("write png",);
    }

    #[tokio::test]
    async fn load_png_decodes_existing_file()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let path = dir.path().join("template.png",);
        write_png(&path, 8, 4,);

        let image = load_png(&path,).await.expect("image should load",);
        assert_eq!((image.width(), image.height()), (8, 4));
    }

    #[tokio::test]
    async fn load_png_reports_missing_and_corrupt_files()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let missing = dir.path().join("missing.png",);
        let error = load_png(&missing,).await.expect_err("expected missing file error",);
        assert!(matches!(error, Error::AssetLoad { .. }));

        let corrupt = dir.path().join("corrupt.png",);
        fs::write(&corrupt, b"not a png",).expect("write",);
        let error = load_png(&corrupt,).await.expect_err("expected decode error",);
        assert!(error.to_string().contains("undecodable image"));
    }

    #[test]
    fn svg_to_png_rasterizes_at_requested_size()
    {
        let png = svg_to_png("star.svg", STAR_SVG.as_bytes(), STAR_ICON_SIZE,).expect("convert",);
        let image = decode_png("star.svg", &png,).expect("decode",);

        assert_eq!((image.width(), image.height()), (STAR_ICON_SIZE, STAR_ICON_SIZE));
        assert!(image.pixels().iter().any(|pixel| pixel.alpha() > 0));
    }

    #[test]
    fn svg_to_png_rejects_invalid_svg()
    {
        let error = svg_to_png("broken.svg", b"<svg", 40,).expect_err("expected parse failure",);
        assert!(matches!(error, Error::AssetLoad { .. }));
    }

    #[tokio::test]
    async fn load_icon_reads_local_and_remote_sources()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let local = dir.path().join("star.svg",);
        fs::write(&local, STAR_SVG,).expect("write svg",);

        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/star.svg",),)
            .respond_with(ResponseTemplate::new(200,).set_body_string(STAR_SVG,),)
            .mount(&server,)
            .await;

        let client = build_http_client(Duration::from_secs(5,),).expect("client",);

        let from_path = load_icon(&client, &IconSource::Path(local,), 20,).await.expect("local",);
        assert_eq!(from_path.width(), 20);

        let url = IconSource::parse(&format!("{}/star.svg", server.uri()),);
        let from_url = load_icon(&client, &url, 20,).await.expect("remote",);
        assert_eq!(from_url.height(), 20);

        let missing = IconSource::parse(&format!("{}/missing.svg", server.uri()),);
        let error = load_icon(&client, &missing, 20,).await.expect_err("expected 404",);
        assert!(matches!(error, Error::Network { .. }));
    }

    #[test]
    fn language_colours_accept_strings_objects_and_nulls()
    {
        let json = r##"{
            "Rust": "#dea584",
            "TypeScript": { "color": "#3178c6", "url": "https://github.com/trending?l=TypeScript" },
            "Text": null,
            "Broken": "blue"
        }"##;
        let colours = LanguageColours::parse("colours.json", json,).expect("parse",);

        assert_eq!(colours.len(), 2);
        assert_eq!(colours.colour_for(Some("Rust")).to_hex(), "#dea584");
        assert_eq!(colours.colour_for(Some("TypeScript")).to_hex(), "#3178c6");
        assert_eq!(colours.colour_for(Some("Text")), UNKNOWN_LANGUAGE_COLOUR);
        assert_eq!(colours.colour_for(None), UNKNOWN_LANGUAGE_COLOUR);
    }

    #[tokio::test]
    async fn language_colours_load_from_file()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let path = dir.path().join("colours.json",);
        fs::write(&path, r##"{ "Go": "#00ADD8", "Text": null }"##,).expect("write colours",);

        let colours = LanguageColours::load(&path,).await.expect("load",);
        assert_eq!(colours.len(), 1);
        assert_eq!(colours.colour_for(Some("Go")).to_hex(), "#00add8");

        fs::write(&path, "{}",).expect("write empty colours",);
        assert!(LanguageColours::load(&path,).await.expect("load empty",).is_empty());
    }

    #[test]
    fn language_colours_reject_non_objects()
    {
        let error = LanguageColours::parse("colours.json", "[1, 2]",).expect_err("expected error",);
        assert!(matches!(error, Error::AssetLoad { .. }));
    }
}
