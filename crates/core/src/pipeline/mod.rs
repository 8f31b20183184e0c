//! The icon font build pipeline.
//!
//! Stages run strictly in order and the first failure aborts the build.
//! Files written by earlier stages are left in place.

mod clean;
mod stages;

use std::time::Instant;

use chrono::Utc;

pub use clean::{clean, empty_dir};
pub use stages::{
    Codepoints, build_svg_font, build_ttf, build_web_fonts, render_preview, render_stylesheet,
};

use crate::{
    collector::collect_icons,
    config::Options,
    error::Result,
    report::{BuildReport, FontArtifact, Reporter},
};

const TOTAL_STEPS: usize = 6;

/// Run a named pipeline step with timing
fn run_step<T>(name: &str, step_num: usize, f: impl FnOnce() -> Result<T>) -> Result<T> {
    println!("\n[{step_num}/{TOTAL_STEPS}] {name}");
    let start = Instant::now();
    let value = f()?;
    println!("  ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(value)
}

/// Pipeline execution context
pub struct PipelineContext<'a> {
    pub options: &'a Options,
    pub reporter: &'a dyn Reporter,
    artifacts: Vec<FontArtifact>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(options: &'a Options, reporter: &'a dyn Reporter) -> Self {
        Self {
            options,
            reporter,
            artifacts: Vec::new(),
        }
    }

    fn emit(&mut self, artifact: FontArtifact) {
        self.reporter.report(&artifact);
        self.artifacts.push(artifact);
    }

    /// Build every output file from the icons in `options.src`.
    pub fn run(mut self) -> Result<BuildReport> {
        let options = self.options;
        let timestamp = Utc::now().timestamp_millis();

        let icons = run_step("Collect icons", 1, || collect_icons(&options.src))?;
        println!("  Found {} icons in {}", icons.len(), options.src.display());

        let (svg_font, codepoints) =
            run_step("Build SVG font", 2, || build_svg_font(options, &icons))?;
        self.emit(svg_font);

        let (ttf_artifact, ttf) = run_step("Compile TrueType font", 3, || build_ttf(options))?;
        self.emit(ttf_artifact);

        let (eot, woff) =
            run_step("Convert to EOT and WOFF", 4, || build_web_fonts(options, &ttf))?;
        self.emit(eot);
        self.emit(woff);

        let css = run_step("Render stylesheet", 5, || {
            render_stylesheet(options, &codepoints, timestamp)
        })?;
        self.emit(css);

        let html = run_step("Render preview page", 6, || {
            render_preview(options, &codepoints, timestamp)
        })?;
        self.emit(html);

        Ok(BuildReport {
            artifacts: self.artifacts,
            codepoints,
            timestamp,
        })
    }
}

/// Run the full pipeline with `reporter` receiving each artifact.
pub fn build(options: &Options, reporter: &dyn Reporter) -> Result<BuildReport> {
    PipelineContext::new(options, reporter).run()
}
