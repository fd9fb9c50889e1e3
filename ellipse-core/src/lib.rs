#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod boundary;
pub mod ellipse;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod params;
pub mod raster;
pub mod render;

// Re-export key types for external use
pub use boundary::{BoundaryFn, Rounding};
pub use ellipse::{EllipseSpec, Orientation};
pub use error::{EllipseError, GridError, RenderError};
pub use grid::{Cell, Grid, GridSpec};
pub use highlight::HighlightSet;
pub use params::QueryParams;
pub use raster::{rasterize, RasterConfig};
pub use render::{GridView, Renderer, StyleSheet};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => {
            log::warn!("invalid log level {:?}, using info", level);
            log::LevelFilter::Info
        }
    }
}
