//! Build options and their defaults.
//!
//! Options can be constructed in code or loaded from a JSON file using the
//! camelCase keys below. Missing keys take their default value.
//!
//! ```json
//! {
//!   "src": "svgs",
//!   "dist": "dist",
//!   "fontName": "iconfont",
//!   "unicodeStart": 60001,
//!   "clssaNamePrefix": "icon",
//!   "template": { "css": "template/style.css.tera" },
//!   "svgicons2svgfont": { "fontHeight": 1000, "normalize": true },
//!   "svg2ttf": { "copyright": "Copyright (c) Example" }
//! }
//! ```

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use font_svg::SvgFontOptions;
use font_ttf::TtfOptions;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SRC: &str = "svgs";
pub const DEFAULT_DIST: &str = "dist";
pub const DEFAULT_FONT_NAME: &str = "iconfont";
pub const DEFAULT_CSS_FILE_NAME: &str = "iconfont.css";
pub const DEFAULT_HTML_FILE_NAME: &str = "index.html";
pub const DEFAULT_UNICODE_START: u32 = 10000;
pub const DEFAULT_CLASS_NAME_PREFIX: &str = "icon";
pub const DEFAULT_FONT_HEIGHT: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Directory scanned for `*.svg` icons.
    pub src: PathBuf,
    /// Output directory. Emptied when the plugin is created.
    pub dist: PathBuf,
    /// Font family name and base name of the font files.
    pub font_name: String,
    /// Stylesheet file name inside `dist`.
    pub file_name: String,
    /// Preview page file name inside `dist`.
    pub html_file_name: String,
    /// First code point handed out.
    pub unicode_start: u32,
    /// CSS class prefix. An empty prefix falls back to the font name.
    #[serde(rename = "clssaNamePrefix", alias = "classNamePrefix")]
    pub class_name_prefix: String,
    pub template: TemplatePaths,
    #[serde(rename = "svgicons2svgfont")]
    pub svg_font: SvgFontConfig,
    #[serde(rename = "svg2ttf")]
    pub ttf: TtfConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            src: PathBuf::from(DEFAULT_SRC),
            dist: PathBuf::from(DEFAULT_DIST),
            font_name: DEFAULT_FONT_NAME.to_string(),
            file_name: DEFAULT_CSS_FILE_NAME.to_string(),
            html_file_name: DEFAULT_HTML_FILE_NAME.to_string(),
            unicode_start: DEFAULT_UNICODE_START,
            class_name_prefix: DEFAULT_CLASS_NAME_PREFIX.to_string(),
            template: TemplatePaths::default(),
            svg_font: SvgFontConfig::default(),
            ttf: TtfConfig::default(),
        }
    }
}

impl Options {
    /// Load options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn prefix(&self) -> &str {
        if self.class_name_prefix.is_empty() {
            &self.font_name
        } else {
            &self.class_name_prefix
        }
    }

    pub fn svg_font_path(&self) -> PathBuf {
        self.font_path("svg")
    }

    pub fn ttf_path(&self) -> PathBuf {
        self.font_path("ttf")
    }

    pub fn eot_path(&self) -> PathBuf {
        self.font_path("eot")
    }

    pub fn woff_path(&self) -> PathBuf {
        self.font_path("woff")
    }

    pub fn css_path(&self) -> PathBuf {
        self.dist.join(&self.file_name)
    }

    pub fn html_path(&self) -> PathBuf {
        self.dist.join(&self.html_file_name)
    }

    fn font_path(&self, extension: &str) -> PathBuf {
        self.dist.join(format!("{}.{extension}", self.font_name))
    }
}

/// User-supplied template files. `None` selects the built-in template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatePaths {
    pub css: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

/// Options for merging icons into the SVG font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgFontConfig {
    pub font_id: Option<String>,
    pub font_height: Option<f64>,
    pub normalize: bool,
    pub descent: f64,
    pub ascent: Option<f64>,
    pub fixed_width: bool,
    pub center_horizontally: bool,
}

impl Default for SvgFontConfig {
    fn default() -> Self {
        Self {
            font_id: None,
            font_height: Some(DEFAULT_FONT_HEIGHT),
            normalize: true,
            descent: 0.0,
            ascent: None,
            fixed_width: false,
            center_horizontally: false,
        }
    }
}

impl SvgFontConfig {
    pub fn to_options(&self, font_name: &str) -> SvgFontOptions {
        SvgFontOptions {
            font_name: font_name.to_string(),
            font_id: self.font_id.clone(),
            font_height: self.font_height,
            normalize: self.normalize,
            descent: self.descent,
            ascent: self.ascent,
            fixed_width: self.fixed_width,
            center_horizontally: self.center_horizontally,
        }
    }
}

/// Metadata for the compiled TrueType font.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtfConfig {
    pub copyright: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub version: Option<String>,
    /// Creation timestamp in Unix seconds.
    pub ts: Option<i64>,
}

impl From<&TtfConfig> for TtfOptions {
    fn from(config: &TtfConfig) -> Self {
        TtfOptions {
            copyright: config.copyright.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
            version: config.version.clone(),
            ts: config.ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.src, PathBuf::from("svgs"));
        assert_eq!(options.unicode_start, 10000);
        assert_eq!(options.prefix(), "icon");
        assert_eq!(options.svg_font.font_height, Some(1000.0));
        assert!(options.svg_font.normalize);
        assert_eq!(options.ttf_path(), PathBuf::from("dist/iconfont.ttf"));
        assert_eq!(options.css_path(), PathBuf::from("dist/iconfont.css"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: Options = serde_json::from_str(
            r#"{
                "fontName": "glyphs",
                "unicodeStart": 60001,
                "clssaNamePrefix": "gl",
                "svgicons2svgfont": { "fixedWidth": true },
                "svg2ttf": { "ts": 1700000000 }
            }"#,
        )
        .unwrap();

        assert_eq!(options.font_name, "glyphs");
        assert_eq!(options.unicode_start, 60001);
        assert_eq!(options.prefix(), "gl");
        assert_eq!(options.file_name, "iconfont.css");
        assert!(options.svg_font.fixed_width);
        assert!(options.svg_font.normalize);
        assert_eq!(options.ttf.ts, Some(1_700_000_000));
        assert_eq!(options.woff_path(), PathBuf::from("dist/glyphs.woff"));
    }

    #[test]
    fn test_class_name_prefix_alias() {
        let options: Options = serde_json::from_str(r#"{ "classNamePrefix": "ui" }"#).unwrap();
        assert_eq!(options.class_name_prefix, "ui");
    }

    #[test]
    fn test_empty_prefix_falls_back_to_font_name() {
        let options = Options {
            class_name_prefix: String::new(),
            font_name: "glyphs".to_string(),
            ..Default::default()
        };
        assert_eq!(options.prefix(), "glyphs");
    }

    #[test]
    fn test_load_errors_are_config_errors() {
        let dir = tempdir().unwrap();
        let missing = Options::load(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Config);

        let path = dir.path().join("broken.json");
        write(&path, "{ not json").unwrap();
        let broken = Options::load(&path).unwrap_err();
        assert!(matches!(broken, Error::ParseConfig { .. }));
    }
}
