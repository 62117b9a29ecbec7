// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Process-wide font registration.
//!
//! Fonts are registered once at start-up, before any banner is drawn. Each
//! registration binds a logical family name and weight (what the layouts ask
//! for) to the family name stored inside the font file (what the text shaper
//! matches on). After start-up the registry is frozen behind an [`Arc`] and
//! shared read-only between theme runs.

use std::{collections::HashMap, fmt, fs, path::Path, sync::Arc};

use tracing::{debug, info};
use usvg::fontdb::{Database, Source};

use crate::error::{self, Error};

/// Font weights used by the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold
}

impl FontWeight {
    /// CSS numeric weight.
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700
        }
    }
}

/// A resolved font selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    /// Family name as known to the font database.
    pub family: String,
    /// Requested weight.
    pub weight: FontWeight
}

/// Registry of loaded fonts.
#[derive(Clone)]
pub struct FontRegistry {
    database: Arc<Database>,
    faces:    HashMap<(String, FontWeight), String>
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("faces", &self.faces)
            .field("loaded", &self.database.len())
            .finish()
    }
}

impl FontRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            database: Arc::new(Database::new()),
            faces:    HashMap::new()
        }
    }

    /// Loads the font file at `path` and binds it to `family` / `weight`.
    ///
    /// Registering a pair that is already bound is a no-op, so callers may
    /// register shared fonts once per banner kind without loading them twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetLoad`] when the file is missing or contains no
    /// parseable font face.
    pub fn register(&mut self, family: &str, weight: FontWeight, path: &Path) -> Result<(), Error> {
        if self.is_registered(family, weight) {
            debug!("Font {} ({:?}) already registered", family, weight);
            return Ok(());
        }

        let data = fs::read(path).map_err(|source| error::asset_error(path, source))?;
        let database = Arc::make_mut(&mut self.database);
        let ids = database.load_font_source(Source::Binary(Arc::new(data)));

        let loaded_family = ids
            .first()
            .and_then(|id| database.face(*id))
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .ok_or_else(|| error::asset_error(path, "no font faces found"))?;

        info!(
            "Registered font {} ({:?}) from {} as {}",
            family,
            weight,
            path.display(),
            loaded_family
        );
        self.faces.insert((family.to_owned(), weight), loaded_family);
        Ok(())
    }

    /// Resolves the face to draw `family` / `weight` with.
    ///
    /// Unregistered pairs resolve to the logical name itself, which the text
    /// shaper may still match against system fonts.
    pub fn resolve(&self, family: &str, weight: FontWeight) -> FontFace {
        let family = self
            .faces
            .get(&(family.to_owned(), weight))
            .cloned()
            .unwrap_or_else(|| family.to_owned());

        FontFace {
            family,
            weight
        }
    }

    /// Returns `true` when `family` / `weight` has been registered.
    pub fn is_registered(&self, family: &str, weight: FontWeight) -> bool {
        self.faces.contains_key(&(family.to_owned(), weight))
    }

    /// Shared handle to the font database used by the text shaper.
    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn unregistered_family_resolves_to_logical_name() {
        let registry = FontRegistry::new();
        let face = registry.resolve("Space Mono", FontWeight::Bold);

        assert_eq!(face.family, "Space Mono");
        assert_eq!(face.weight, FontWeight::Bold);
        assert!(!registry.is_registered("Space Mono", FontWeight::Bold));
    }

    #[test]
    fn register_reports_missing_file() {
        let mut registry = FontRegistry::new();
        let error = registry
            .register("Ubuntu Mono", FontWeight::Regular, Path::new("/nonexistent/font.ttf"))
            .expect_err("expected asset error");

        match error {
            Error::AssetLoad {
                asset, ..
            } => assert_eq!(asset, "/nonexistent/font.ttf"),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn register_rejects_files_without_faces() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").expect("write font");

        let mut registry = FontRegistry::new();
        let error = registry
            .register("Broken", FontWeight::Regular, &path)
            .expect_err("expected asset error");

        assert!(error.to_string().contains("no font faces found"));
        assert!(!registry.is_registered("Broken", FontWeight::Regular));
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/fonts")
            .join(name)
    }

    #[test]
    fn register_binds_logical_family_to_loaded_face() {
        let mut registry = FontRegistry::new();
        registry
            .register("Space Mono", FontWeight::Regular, &fixture("DejaVuSansMono.ttf"))
            .expect("fixture font should load");

        assert!(registry.is_registered("Space Mono", FontWeight::Regular));
        assert!(!registry.is_registered("Space Mono", FontWeight::Bold));

        let face = registry.resolve("Space Mono", FontWeight::Regular);
        assert_eq!(face.family, "DejaVu Sans Mono");
        assert_eq!(face.weight, FontWeight::Regular);
    }

    #[test]
    fn registering_the_same_pair_twice_loads_once() {
        let mut registry = FontRegistry::new();
        let path = fixture("DejaVuSansMono-Bold.ttf");

        registry
            .register("Space Mono", FontWeight::Bold, &path)
            .expect("first registration");
        let loaded = registry.database().len();
        registry
            .register("Space Mono", FontWeight::Bold, &path)
            .expect("second registration");

        assert_eq!(loaded, 1);
        assert_eq!(registry.database().len(), loaded);
    }

    #[test]
    fn numeric_weights_follow_css() {
        assert_eq!(FontWeight::Regular.numeric(), 400);
        assert_eq!(FontWeight::Bold.numeric(), 700);
    }
}
