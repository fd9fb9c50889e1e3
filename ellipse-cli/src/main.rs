//! CLI for grid-rasterized ellipses.
//!
//! Provides:
//! - Rendering an ellipse inscribed in an R×C grid as text, SVG, CSS or JSON
//! - Reading and updating grid dimensions persisted in a query string

mod render;

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};

use ellipse_core::{
    parse_log_level, rasterize, GridSpec, GridView, QueryParams, RasterConfig, Renderer, Rounding,
    StyleSheet,
};
use render::{render_css, render_svg, SvgConfig};

/// Grid used when neither the query string nor flags give a dimension.
const DEFAULT_GRID: GridSpec = GridSpec { rows: 10, columns: 10 };

#[derive(Parser)]
#[command(name = "ellipse")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ELLIPSE_BUILD_SHA"), ")"))]
#[command(about = "Rasterize an ellipse inscribed in a grid of cells", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug or trace (RUST_LOG also applies)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Svg,
    Css,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingArg {
    Ceil,
    Nearest,
}

impl From<RoundingArg> for Rounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Ceil => Rounding::Ceil,
            RoundingArg::Nearest => Rounding::Nearest,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize and render the ellipse inscribed in a grid
    Render {
        /// Number of rows (overrides the query string)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Number of columns (overrides the query string)
        #[arg(short, long)]
        columns: Option<usize>,

        /// Query string to read dimensions from, e.g. "rows=4&columns=10"
        #[arg(short, long, default_value = "")]
        query: String,

        /// Mark the interior as well as the boundary
        #[arg(short, long)]
        fill: bool,

        /// How boundary offsets snap to cells
        #[arg(long, value_enum, default_value = "ceil")]
        rounding: RoundingArg,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Label cells with their ids (SVG only)
        #[arg(long)]
        labels: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Read grid dimensions from a query string, optionally updating them
    Params {
        /// Query string, with or without a leading '?'
        query: String,

        /// New row count to write
        #[arg(short, long)]
        rows: Option<usize>,

        /// New column count to write
        #[arg(short, long)]
        columns: Option<usize>,
    },
}

/// Dimensions from `query` (falling back to defaults), overridden by explicit flags.
fn resolve(params: &QueryParams, rows: Option<usize>, columns: Option<usize>) -> Result<GridSpec> {
    let persisted = GridSpec::read(params, DEFAULT_GRID);
    let spec = GridSpec::new(rows.unwrap_or(persisted.rows), columns.unwrap_or(persisted.columns))?;
    debug!("resolved {} (persisted {})", spec, persisted);
    Ok(spec)
}

/// Rasterize `spec` and render it in `format`.
fn render(spec: GridSpec, config: &RasterConfig, format: Format, labels: bool) -> Result<String> {
    let highlights = rasterize(spec, config)?;
    info!("{}: {} cells highlighted", spec, highlights.len());

    let mut view = GridView::new();
    view.build(spec)?;
    view.replace_highlights(&highlights)?;
    let grid = view.grid().context("grid view was not built")?;

    let style = StyleSheet::default();
    Ok(match format {
        Format::Text => view.to_text('#', '.'),
        Format::Svg => {
            let config = SvgConfig { show_labels: labels, ..SvgConfig::from(&style) };
            render_svg(grid, &config)
        }
        Format::Css => render_css(grid, &style),
        Format::Json => format!("{}\n", serde_json::to_string_pretty(&highlights)?),
    })
}

/// The dimensions persisted in `query` (as JSON), then the query string with any new
/// dimensions written back.
fn params(query: &str, rows: Option<usize>, columns: Option<usize>) -> Result<String> {
    let mut params = QueryParams::parse(query);
    let persisted = GridSpec::read(&params, DEFAULT_GRID);
    if rows.is_some() || columns.is_some() {
        resolve(&params, rows, columns)?.write(&mut params);
    }
    Ok(format!("{}\n?{}\n", serde_json::to_string(&persisted)?, params))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(parse_log_level(cli.log_level.as_deref()))
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Render {
            rows,
            columns,
            query,
            fill,
            rounding,
            format,
            labels,
            output,
        } => {
            let mut params = QueryParams::parse(&query);
            let spec = resolve(&params, rows, columns)?;
            spec.write(&mut params);
            eprintln!("?{}", params);

            let config = RasterConfig { fill_interior: fill, rounding: rounding.into() };
            let rendered = render(spec, &config, format, labels)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered).with_context(|| format!("writing {}", path))?;
                    info!("wrote {}", path);
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Params { query, rows, columns } => {
            print!("{}", params(&query, rows, columns)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let params = QueryParams::parse("rows=4&columns=10");
        assert_eq!(resolve(&params, None, None).unwrap(), GridSpec { rows: 4, columns: 10 });
        assert_eq!(resolve(&params, Some(6), None).unwrap(), GridSpec { rows: 6, columns: 10 });
        assert_eq!(resolve(&QueryParams::new(), None, None).unwrap(), DEFAULT_GRID);
        assert!(resolve(&params, Some(0), None).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["ellipse", "render", "-r", "4", "-c", "10", "--fill", "--format", "svg"]).unwrap();
        match cli.command {
            Commands::Render { rows, columns, fill, format, .. } => {
                assert_eq!((rows, columns, fill), (Some(4), Some(10), true));
                assert!(matches!(format, Format::Svg));
            }
            Commands::Params { .. } => panic!("expected render"),
        }
    }

    #[test]
    fn test_render_text() {
        let spec = GridSpec { rows: 4, columns: 10 };
        let text = render(spec, &RasterConfig::default(), Format::Text, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        // Tips fill the whole first and last columns; the middle only touches top and bottom rows.
        assert!(lines.iter().all(|line| line.starts_with('#') && line.ends_with('#')));
        assert_eq!(&lines[1][4..6], "..");
        assert_eq!(&lines[0][4..6], "##");
        assert_eq!(lines[0], lines[3]);
    }

    #[test]
    fn test_render_json_and_css() {
        let spec = GridSpec { rows: 1, columns: 1 };
        let json = render(spec, &RasterConfig::default(), Format::Json, false).unwrap();
        let cells: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(cells, serde_json::json!([{"row": 0, "column": 0}]));

        let css = render(spec, &RasterConfig::default(), Format::Css, false).unwrap();
        assert_eq!(css, ".square{background-color: lightgray;}\n#\\30 -0{background-color: red;}\n");
    }

    #[test]
    fn test_render_rejects_empty_grid() {
        let spec = GridSpec { rows: 0, columns: 5 };
        assert!(render(spec, &RasterConfig::default(), Format::Text, false).is_err());
    }

    #[test]
    fn test_params() {
        assert_eq!(
            params("?rows=7&columns=3&theme=dark", None, None).unwrap(),
            "{\"rows\":7,\"columns\":3}\n?rows=7&columns=3&theme=dark\n"
        );
        assert_eq!(
            params("rows=7&columns=3", Some(9), None).unwrap(),
            "{\"rows\":7,\"columns\":3}\n?rows=9&columns=3\n"
        );
        assert_eq!(
            params("", None, Some(4)).unwrap(),
            "{\"rows\":10,\"columns\":10}\n?rows=10&columns=4\n"
        );
        assert!(params("", Some(0), None).is_err());
    }
}
