//! Build-tool integration.
//!
//! A host build tool creates one [`IconFontPlugin`] and calls
//! [`BuildHook::on_run`] when its run phase starts.

use crate::{
    config::Options,
    error::Result,
    pipeline::{build, empty_dir},
    report::{BuildReport, ConsoleReporter, Reporter},
};

/// Context handed to hooks by the host build. Only signals that a run started.
#[derive(Debug, Clone, Default)]
pub struct Compilation;

/// Lifecycle hook invoked by the host build.
pub trait BuildHook {
    fn on_run(&self, compilation: &Compilation) -> Result<BuildReport>;
}

pub struct IconFontPlugin {
    options: Options,
    reporter: Box<dyn Reporter>,
}

impl IconFontPlugin {
    /// Create the plugin and empty the output directory.
    pub fn new(options: Options) -> Result<Self> {
        empty_dir(&options.dist)?;
        Ok(Self {
            options,
            reporter: Box::new(ConsoleReporter),
        })
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn run(&self) -> Result<BuildReport> {
        build(&self.options, self.reporter.as_ref())
    }
}

impl BuildHook for IconFontPlugin {
    fn on_run(&self, _compilation: &Compilation) -> Result<BuildReport> {
        self.run()
    }
}
