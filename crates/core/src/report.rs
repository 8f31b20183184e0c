//! Build results and their console output.

use std::{fmt, path::PathBuf};

use indexmap::IndexMap;

const SIZE_UNITS: [&str; 4] = ["bytes", "KiB", "MiB", "GiB"];

/// A file written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontArtifact {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl fmt::Display for FontArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]  {}  {}",
            self.path.display(),
            self.file_name,
            format_size(self.size)
        )
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Artifacts in the order they were produced.
    pub artifacts: Vec<FontArtifact>,
    /// Code point of every icon, in collection order.
    pub codepoints: IndexMap<String, char>,
    /// Generation time in Unix milliseconds, as passed to the templates.
    pub timestamp: i64,
}

impl BuildReport {
    pub fn artifact(&self, file_name: &str) -> Option<&FontArtifact> {
        self.artifacts.iter().find(|a| a.file_name == file_name)
    }
}

/// Receives every artifact as soon as it has been written.
pub trait Reporter {
    fn report(&self, artifact: &FontArtifact);
}

/// Prints `[path]  file_name  size` for each artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, artifact: &FontArtifact) {
        println!("  {artifact}");
    }
}

/// Human readable size with three significant digits, e.g. `1.5 KiB`.
pub fn format_size(size: u64) -> String {
    if size == 0 {
        return "0 bytes".to_string();
    }
    let index = ((size as f64).log2() / 10.0).floor() as usize;
    let index = index.min(SIZE_UNITS.len() - 1);
    let value = size as f64 / 1024f64.powi(index as i32);
    format!("{} {}", significant(value, 3), SIZE_UNITS[index])
}

fn significant(value: f64, digits: i32) -> String {
    let magnitude = value.log10().floor() as i32;
    let scale = 10f64.powi(magnitude - digits + 1);
    let rounded = (value / scale).round() * scale;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let text = format!("{rounded:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
