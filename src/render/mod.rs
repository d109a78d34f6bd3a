//! Figure rendering
//!
//! The pipeline hands each [`Figure`] and its target path to a
//! [`FigureRenderer`]. [`PngRenderer`] draws it with plotters; tests swap in
//! a renderer that only records what it was given.

pub mod png;
pub mod style;

pub use png::PngRenderer;

use crate::aggregate::figure::Figure;
use crate::error::Result;
use std::path::Path;

pub trait FigureRenderer {
    /// Write `figure` to `path`. Any failure is fatal for the run.
    fn render(&mut self, figure: &Figure, path: &Path) -> Result<()>;
}
