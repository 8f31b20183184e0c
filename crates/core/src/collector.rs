//! Discovery of icon files in the source directory.

use std::{
    fs::read_dir,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{Error, Result};

const ICON_EXTENSION: &str = "svg";

/// An icon file and the glyph name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub path: PathBuf,
    /// File stem, e.g. `home` for `home.svg`.
    pub name: String,
}

/// List the `*.svg` files directly inside `src`, sorted by file name.
pub fn collect_icons(src: &Path) -> Result<Vec<IconSource>> {
    let read_source = |source| Error::ReadSource {
        path: src.to_path_buf(),
        source,
    };
    let dir = src.canonicalize().map_err(read_source)?;

    let mut paths = Vec::new();
    for entry in read_dir(&dir).map_err(read_source)? {
        let path = entry.map_err(read_source)?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(ICON_EXTENSION) {
            debug!("Skipping {}", path.display());
            continue;
        }
        paths.push(path);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    paths.dedup();

    if paths.is_empty() {
        return Err(Error::SourceEmpty(src.to_path_buf()));
    }

    Ok(paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            IconSource { path, name }
        })
        .collect())
}
