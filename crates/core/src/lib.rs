//! Iconfont Core - turns a directory of SVG icons into a web font bundle.
//!
//! The build writes `<fontName>.svg`, `.ttf`, `.eot` and `.woff` plus a
//! stylesheet and an HTML preview page into the output directory.
//!
//! ```no_run
//! use iconfont_core::{BuildHook, Compilation, IconFontPlugin, Options};
//!
//! let options = Options {
//!     unicode_start: 0xEA61,
//!     ..Default::default()
//! };
//! let plugin = IconFontPlugin::new(options)?;
//! let report = plugin.on_run(&Compilation)?;
//! for (name, codepoint) in &report.codepoints {
//!     println!("{name}: U+{:04X}", *codepoint as u32);
//! }
//! # Ok::<(), iconfont_core::Error>(())
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod plugin;
pub mod report;
pub mod template;
pub mod unicode;

pub use collector::{IconSource, collect_icons};
pub use config::{Options, SvgFontConfig, TemplatePaths, TtfConfig};
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{PipelineContext, build, clean};
pub use plugin::{BuildHook, Compilation, IconFontPlugin};
pub use report::{BuildReport, ConsoleReporter, FontArtifact, Reporter, format_size};
pub use unicode::UnicodeAllocator;
