// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Writes encoded banners to the output directory.
///
/// Each banner is written to a temporary file next to its destination and
/// renamed into place, so readers never observe a partially written image.
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    config::Theme,
    error::{self, Error},
};

/// Location and size of a written banner.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct WrittenBanner
{
    /// Final path of the image.
    pub path:  PathBuf,
    /// Number of bytes written.
    pub bytes: usize,
}

/// Writes `png` as the `theme` variant of `stem` inside `directory`.
///
/// Missing parent directories are created. An existing file at the
/// destination is replaced.
///
/// # Errors
///
/// Returns [`Error::Io`] when the directory cannot be created or the file
/// cannot be written or moved into place.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use repo_banner::{Theme, write_banner};
///
/// # fn example(png: &[u8]) -> Result<(), repo_banner::Error> {
/// let written = write_banner(Path::new("out"), "banner", Theme::Dark, png)?;
/// assert!(written.path.ends_with("banner@dark.png"));
/// # Ok(())
/// # }
/// ```
pub fn write_banner(
    directory: &Path,
    stem: &str,
    theme: Theme,
    png: &[u8],
) -> Result<WrittenBanner, Error,>
{
    let path = directory.join(theme.file_name(stem,),);

    fs::create_dir_all(directory,).map_err(|source| error::io_error(directory, source,),)?;

    let mut staged =
        NamedTempFile::new_in(directory,).map_err(|source| error::io_error(&path, source,),)?;
    staged.write_all(png,).map_err(|source| error::io_error(&path, source,),)?;
    staged.flush().map_err(|source| error::io_error(&path, source,),)?;
    staged.persist(&path,).map_err(|persist| error::io_error(&path, persist.error,),)?;

    info!("Wrote {} ({} bytes)", path.display(), png.len());
    Ok(WrittenBanner {
        path,
        bytes: png.len(),
    },)
}

#[cfg(test)]
mod tests
{
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn writes_light_and_dark_variants()
    {
        let dir = tempdir().expect("failed to create tempdir",);

        let light = write_banner(dir.path(), "banner", Theme::Light, b"light",).expect("light",);
        let dark = write_banner(dir.path(), "banner", Theme::Dark, b"dark",).expect("dark",);

        assert_eq!(light.path, dir.path().join("banner.png"));
        assert_eq!(dark.path, dir.path().join("banner@dark.png"));
        assert_eq!(fs::read(&light.path,).expect("read light",), b"light");
        assert_eq!(fs::read(&dark.path,).expect("read dark",), b"dark");
        assert_eq!(dark.bytes, 4);
    }

    #[test]
    fn creates_missing_directories_and_replaces_existing_files()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let nested = dir.path().join("a",).join("b",);

        write_banner(&nested, "repositories", Theme::Light, b"first",).expect("first write",);
        let written =
            write_banner(&nested, "repositories", Theme::Light, b"second",).expect("second write",);

        assert_eq!(fs::read(&written.path,).expect("read",), b"second");
        let entries = fs::read_dir(&nested,).expect("read dir",).count();
        assert_eq!(entries, 1, "temporary files must not be left behind");
    }

    #[test]
    fn reports_unwritable_directory()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let blocker = dir.path().join("file",);
        fs::write(&blocker, b"x",).expect("write blocker",);

        let error = write_banner(&blocker, "banner", Theme::Light, b"png",)
            .expect_err("expected io error",);

        assert!(matches!(error, Error::Io { .. }));
    }
}
