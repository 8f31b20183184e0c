//! Output file helpers.

use std::{
    fs::{File, create_dir_all, metadata, write},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use crate::report::FontArtifact;

/// A file in the output directory.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Write `data`, replacing any existing file.
    pub fn write(&self, data: impl AsRef<[u8]>) -> io::Result<FontArtifact> {
        let data = data.as_ref();
        self.ensure_parent_dir()?;
        write(&self.path, data)?;
        Ok(self.artifact(data.len() as u64))
    }

    /// Open the file for buffered streaming output.
    pub fn create(&self) -> io::Result<BufWriter<File>> {
        self.ensure_parent_dir()?;
        File::create(&self.path).map(BufWriter::new)
    }

    /// Describe the file as it currently exists on disk.
    pub fn finish(&self) -> io::Result<FontArtifact> {
        let size = metadata(&self.path)?.len();
        Ok(self.artifact(size))
    }

    fn artifact(&self, size: u64) -> FontArtifact {
        FontArtifact {
            path: self.path.clone(),
            file_name: self.file_name(),
            size,
        }
    }

    fn ensure_parent_dir(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }
        Ok(())
    }
}
