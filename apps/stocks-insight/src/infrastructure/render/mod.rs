//! Output renderers.
//!
//! - `PlotlyFigure`: Plotly figure JSON for a [`ChartSpec`](crate::domain::chart::ChartSpec)
//! - `SvgRenderer`: self-contained two-panel SVG
//! - `render_table`: `tabled` text table of a quote series

mod plotly;
mod svg;
mod table;

use std::path::Path;

use thiserror::Error;

pub use plotly::PlotlyFigure;
pub use svg::SvgRenderer;
pub use table::{format_volume, render_table};

/// Errors writing rendered output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output file could not be written.
    #[error("Failed to write '{path}': {source}")]
    Io {
        /// Output path.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The figure could not be serialized.
    #[error("Failed to serialize figure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write `contents` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the file cannot be written.
pub fn write_output(path: &Path, contents: &str) -> Result<(), RenderError> {
    std::fs::write(path, contents).map_err(|e| RenderError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
