//! The individual build stages. Each stage writes its files and returns what
//! later stages need.

use std::{
    error::Error as StdError,
    fs::{File, read_to_string},
};

use font_svg::{Glyph, GlyphMetadata, SvgFontStream};
use font_ttf::{TtfOptions, svg_font_to_ttf};
use iconfont_font_eot::ttf_to_eot;
use iconfont_font_woff::ttf_to_woff;
use indexmap::IndexMap;
use log::{debug, info};

use crate::{
    collector::IconSource,
    config::Options,
    error::{Error, Result},
    io::OutputFile,
    report::FontArtifact,
    template::{PreviewData, PreviewIcon, StylesheetData, TemplateSource, css_rule, render},
    unicode::UnicodeAllocator,
};

pub type Codepoints = IndexMap<String, char>;

/// Merge all icons into `dist/<fontName>.svg`.
pub fn build_svg_font(
    options: &Options,
    icons: &[IconSource],
) -> Result<(FontArtifact, Codepoints)> {
    let output = OutputFile::new(options.svg_font_path());
    let write_error = |source| Error::WriteSvgFont {
        path: output.path().to_path_buf(),
        source,
    };

    let writer = output.create().map_err(write_error)?;
    let mut stream = SvgFontStream::new(writer, options.svg_font.to_options(&options.font_name));
    let mut allocator = UnicodeAllocator::new(options.unicode_start);

    for icon in icons {
        let unicode = allocator.allocate(&icon.name)?;
        let contents = File::open(&icon.path).map_err(|source| Error::OpenIcon {
            path: icon.path.clone(),
            source,
        })?;
        debug!("Adding '{}' as U+{:04X}", icon.name, unicode as u32);
        stream.write(Glyph::new(GlyphMetadata::new(&icon.name, unicode), contents))?;
    }
    stream.finish()?;
    drop(stream);

    let artifact = output.finish().map_err(write_error)?;
    info!("Merged {} icons into {}", allocator.len(), artifact.file_name);
    Ok((artifact, allocator.into_assignments()))
}

/// Compile the SVG font into `dist/<fontName>.ttf`.
pub fn build_ttf(options: &Options) -> Result<(FontArtifact, Vec<u8>)> {
    let svg_path = options.svg_font_path();
    let svg = read_to_string(&svg_path).map_err(|source| Error::ReadFont {
        path: svg_path.clone(),
        source,
    })?;

    let ttf = svg_font_to_ttf(&svg, &TtfOptions::from(&options.ttf))?;

    let output = OutputFile::new(options.ttf_path());
    let artifact = output.write(&ttf).map_err(|source| Error::WriteFont {
        path: output.path().to_path_buf(),
        source,
    })?;
    Ok((artifact, ttf))
}

/// Convert the TrueType font to EOT and WOFF in parallel.
pub fn build_web_fonts(options: &Options, ttf: &[u8]) -> Result<(FontArtifact, FontArtifact)> {
    let (eot, woff) = rayon::join(
        || convert(ttf, "EOT", ttf_to_eot, OutputFile::new(options.eot_path())),
        || convert(ttf, "WOFF", ttf_to_woff, OutputFile::new(options.woff_path())),
    );
    Ok((eot?, woff?))
}

fn convert<E>(
    ttf: &[u8],
    format: &'static str,
    f: impl FnOnce(&[u8]) -> std::result::Result<Vec<u8>, E>,
    output: OutputFile,
) -> Result<FontArtifact>
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let data = f(ttf).map_err(|e| Error::Convert {
        format,
        source: e.into(),
    })?;
    output.write(&data).map_err(|source| Error::WriteFont {
        path: output.path().to_path_buf(),
        source,
    })
}

/// Render the stylesheet into `dist/<fileName>`.
pub fn render_stylesheet(
    options: &Options,
    codepoints: &Codepoints,
    timestamp: i64,
) -> Result<FontArtifact> {
    let prefix = options.prefix();
    let css_string: String = codepoints
        .iter()
        .map(|(name, &c)| css_rule(prefix, name, c))
        .collect();

    let data = StylesheetData {
        fontname: &options.font_name,
        css_string,
        timestamp,
        prefix,
    };
    let rendered = render(&TemplateSource::css(options.template.css.as_deref()), &data)?;

    let output = OutputFile::new(options.css_path());
    output
        .write(&rendered.content)
        .map_err(|e| Error::io(output.path(), e))
}

/// Render the preview page into `dist/<htmlFileName>`.
pub fn render_preview(
    options: &Options,
    codepoints: &Codepoints,
    timestamp: i64,
) -> Result<FontArtifact> {
    let icons = codepoints
        .iter()
        .map(|(name, &c)| PreviewIcon {
            name: name.clone(),
            code: format!("{:x}", c as u32),
        })
        .collect();

    let data = PreviewData {
        fontname: &options.font_name,
        prefix: options.prefix(),
        link: &options.file_name,
        icons,
        title: &options.font_name,
        timestamp,
    };
    let rendered = render(&TemplateSource::html(options.template.html.as_deref()), &data)?;

    let output = OutputFile::new(options.html_path());
    output
        .write(&rendered.content)
        .map_err(|e| Error::io(output.path(), e))
}
