//! Stylesheet and preview page rendering with Tera.

use std::{
    borrow::Cow,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{Error, Result};

pub const DEFAULT_CSS_TEMPLATE: &str = include_str!("../templates/style.css.tera");
pub const DEFAULT_HTML_TEMPLATE: &str = include_str!("../templates/index.html.tera");

/// Where a template comes from.
///
/// Tera escapes output for templates whose name ends in `.html`, so the
/// built-in preview page is escaped and the built-in stylesheet is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin {
        name: &'static str,
        content: &'static str,
    },
    File(PathBuf),
}

impl TemplateSource {
    pub fn css(path: Option<&Path>) -> Self {
        match path {
            Some(path) => TemplateSource::File(path.to_path_buf()),
            None => TemplateSource::Builtin {
                name: "style.css",
                content: DEFAULT_CSS_TEMPLATE,
            },
        }
    }

    pub fn html(path: Option<&Path>) -> Self {
        match path {
            Some(path) => TemplateSource::File(path.to_path_buf()),
            None => TemplateSource::Builtin {
                name: "index.html",
                content: DEFAULT_HTML_TEMPLATE,
            },
        }
    }

    fn name(&self) -> Cow<'_, str> {
        match self {
            TemplateSource::Builtin { name, .. } => Cow::Borrowed(*name),
            TemplateSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or(Cow::Borrowed("template")),
        }
    }

    fn load(&self) -> Result<Cow<'static, str>> {
        match self {
            TemplateSource::Builtin { content, .. } => Ok(Cow::Borrowed(*content)),
            TemplateSource::File(path) => read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| Error::TemplateNotFound {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// Rendered template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content: String,
    /// Size of `content` in bytes.
    pub size: usize,
}

/// Values available to the stylesheet template.
#[derive(Debug, Serialize)]
pub struct StylesheetData<'a> {
    pub fontname: &'a str,
    pub css_string: String,
    pub timestamp: i64,
    pub prefix: &'a str,
}

/// Values available to the preview page template.
#[derive(Debug, Serialize)]
pub struct PreviewData<'a> {
    pub fontname: &'a str,
    pub prefix: &'a str,
    pub link: &'a str,
    pub icons: Vec<PreviewIcon>,
    pub title: &'a str,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct PreviewIcon {
    pub name: String,
    /// Lowercase hexadecimal code point.
    pub code: String,
}

/// One stylesheet rule mapping a class to its glyph.
pub fn css_rule(prefix: &str, name: &str, codepoint: char) -> String {
    format!(".{prefix}-{name}:before {{ content: \"\\{:x}\"; }}\n", codepoint as u32)
}

pub fn render(source: &TemplateSource, data: &impl Serialize) -> Result<Rendered> {
    let context = Context::from_serialize(data)?;
    render_context(source, &context)
}

fn render_context(source: &TemplateSource, context: &Context) -> Result<Rendered> {
    let name = source.name();
    let content = source.load()?;
    debug!("Rendering template '{name}'");

    let mut tera = Tera::default();
    tera.add_raw_template(&name, &content)?;
    let content = tera.render(&name, context)?;
    let size = content.len();
    Ok(Rendered { content, size })
}
