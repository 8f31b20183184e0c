//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iconfont_core::{BuildHook, Compilation, IconFontPlugin, Options, clean};
use log::info;

#[derive(Parser)]
#[command(name = "iconfont", version)]
#[command(about = "Build web icon fonts from a directory of SVG icons")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags override values from the config file, which override the defaults.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// JSON config file with camelCase option keys
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory containing the SVG icons
    #[arg(long)]
    pub src: Option<PathBuf>,
    /// Output directory, emptied before the build
    #[arg(long)]
    pub dist: Option<PathBuf>,
    /// Font family and base name of the font files
    #[arg(long)]
    pub font_name: Option<String>,
    /// Stylesheet file name
    #[arg(long)]
    pub file_name: Option<String>,
    /// Preview page file name
    #[arg(long)]
    pub html_file_name: Option<String>,
    /// First code point, e.g. 60001 or 0xea61
    #[arg(long, value_parser = parse_codepoint)]
    pub unicode_start: Option<u32>,
    /// CSS class prefix
    #[arg(long)]
    pub prefix: Option<String>,
    /// Tera template for the stylesheet
    #[arg(long)]
    pub css_template: Option<PathBuf>,
    /// Tera template for the preview page
    #[arg(long)]
    pub html_template: Option<PathBuf>,
}

impl BuildArgs {
    pub fn options(self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };

        if let Some(src) = self.src {
            options.src = src;
        }
        if let Some(dist) = self.dist {
            options.dist = dist;
        }
        if let Some(font_name) = self.font_name {
            options.font_name = font_name;
        }
        if let Some(file_name) = self.file_name {
            options.file_name = file_name;
        }
        if let Some(html_file_name) = self.html_file_name {
            options.html_file_name = html_file_name;
        }
        if let Some(unicode_start) = self.unicode_start {
            options.unicode_start = unicode_start;
        }
        if let Some(prefix) = self.prefix {
            options.class_name_prefix = prefix;
        }
        if self.css_template.is_some() {
            options.template.css = self.css_template;
        }
        if self.html_template.is_some() {
            options.template.html = self.html_template;
        }
        Ok(options)
    }
}

fn parse_codepoint(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    let codepoint = parsed.map_err(|e| format!("invalid code point '{value}': {e}"))?;
    char::from_u32(codepoint)
        .map(|_| codepoint)
        .ok_or_else(|| format!("U+{codepoint:X} is not a valid code point"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the font files, stylesheet and preview page
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Remove the output directory
    Clean {
        #[arg(long, default_value = "dist")]
        dist: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => {
                let options = args.options()?;
                info!("Building '{}' from {}", options.font_name, options.src.display());
                let plugin = IconFontPlugin::new(options)?;
                let report = plugin
                    .on_run(&Compilation)
                    .context("Icon font build failed")?;
                println!(
                    "\nBuilt {} icons into {}",
                    report.codepoints.len(),
                    plugin.options().dist.display()
                );
            }
            Commands::Clean { dist } => {
                clean(&dist)?;
            }
        }
        Ok(())
    }
}
