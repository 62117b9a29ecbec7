// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Raster drawing surface used by the banner layouts.
//!
//! [`Canvas`] wraps a `tiny-skia` pixmap together with the current fill
//! colour and text style, mirroring a 2D canvas context: shapes and images are
//! drawn directly with `tiny-skia`, text is shaped and rasterized by `resvg`
//! against the registered font database.

use std::{borrow::Cow, fmt::Write as _, sync::Arc};

use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform,
};
use tracing::warn;
use usvg::fontdb::Database;

use crate::{
    error::Error,
    fonts::{FontFace, FontRegistry}
};

/// Fallback marker colour for repositories without a known language.
pub const UNKNOWN_LANGUAGE_COLOUR: Colour = Colour {
    r: 0x6e,
    g: 0x6e,
    b: 0x6e
};

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Colour {
    /// Parses `#rgb` or `#rrggbb` notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_banner::Colour;
    ///
    /// assert_eq!(Colour::from_hex("#dea584"), Some(Colour { r: 0xde, g: 0xa5, b: 0x84 }));
    /// assert_eq!(Colour::from_hex("#fff"), Some(Colour { r: 255, g: 255, b: 255 }));
    /// assert_eq!(Colour::from_hex("blue"), None);
    /// ```
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

        match digits.len() {
            3 => {
                let expand = |index: usize| channel(index..index + 1).map(|v| v * 17);
                Some(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?
                })
            }
            6 => Some(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?
            }),
            _ => None
        }
    }

    /// Lowercase `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn to_skia(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right
}

/// Font, size and alignment applied to subsequent text runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub face:  FontFace,
    pub size:  f32,
    pub align: TextAlign
}

/// Drawing surface plus the current fill colour and text style.
pub struct Canvas {
    pixmap: Pixmap,
    fill:   Colour,
    style:  Option<TextStyle>,
    fonts:  Arc<Database>
}

impl Canvas {
    /// Allocates a transparent surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when either dimension is zero.
    pub fn new(width: u32, height: u32, fonts: &FontRegistry) -> Result<Self, Error> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::render(format!("invalid surface size {width}x{height}")))?;

        Ok(Self {
            pixmap,
            fill: Colour {
                r: 0,
                g: 0,
                b: 0
            },
            style: None,
            fonts: fonts.database()
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Read access to the pixels.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Sets the colour used by shapes and text.
    pub fn set_fill(&mut self, colour: Colour) {
        self.fill = colour;
    }

    /// Sets the style used by [`Canvas::fill_text`].
    pub fn set_font(&mut self, style: TextStyle) {
        self.style = Some(style);
    }

    /// Fills an axis-aligned rectangle. Degenerate rectangles draw nothing.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let paint = self.solid_paint();
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Fills a circle centred on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };
        let paint = self.solid_paint();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Draws `image` scaled into the destination rectangle.
    pub fn draw_image(&mut self, image: &Pixmap, x: f32, y: f32, width: f32, height: f32) {
        let scale_x = width / image.width() as f32;
        let scale_y = height / image.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };

        self.pixmap.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &paint,
            Transform::from_row(scale_x, 0.0, 0.0, scale_y, x, y),
            None
        );
    }

    /// Draws `text` with its baseline at `y`, anchored at `x` according to
    /// the current style. Whitespace is preserved verbatim.
    ///
    /// Nothing is drawn before a style has been set.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let Some(style) = self.style.as_ref() else {
            warn!("Skipping text {:?}: no font selected", text);
            return;
        };

        let document = text_document(
            text,
            x,
            y,
            style,
            self.fill,
            self.pixmap.width(),
            self.pixmap.height()
        );
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fonts),
            ..usvg::Options::default()
        };

        match usvg::Tree::from_str(&document, &options) {
            Ok(tree) => resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut()),
            Err(error) => warn!("Skipping text {:?}: {}", text, error)
        }
    }

    /// Encodes the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::render(format!("failed to encode PNG: {e}")))
    }

    fn solid_paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.fill.to_skia());
        paint.anti_alias = true;
        paint
    }
}

fn text_document(
    text: &str,
    x: f32,
    y: f32,
    style: &TextStyle,
    fill: Colour,
    width: u32,
    height: u32
) -> String {
    let anchor = match style.align {
        TextAlign::Left => "start",
        TextAlign::Right => "end"
    };

    let mut document = String::with_capacity(256 + text.len());
    let _ = write!(
        document,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = write!(
        document,
        "<text x=\"{x}\" y=\"{y}\" font-family=\"'{}'\" font-weight=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\" xml:space=\"preserve\">{}</text>",
        escape_xml(&style.face.family),
        style.face.weight.numeric(),
        style.size,
        fill.to_hex(),
        escape_xml(text)
    );
    document.push_str("</svg>");
    document
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}
