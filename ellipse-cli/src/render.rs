//! SVG, CSS and text output for rasterized grids.

use std::fmt::Write;

use ellipse_core::{Grid, StyleSheet};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Side length of one cell in pixels
    pub cell_size: f64,
    /// Gap between adjacent cells in pixels
    pub gap: f64,
    /// Fill for plain cells
    pub base_color: String,
    /// Fill for highlighted cells
    pub highlight_color: String,
    /// Whether to label each cell with its `row-column` id
    pub show_labels: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            gap: 2.0,
            base_color: "lightgray".to_string(),
            highlight_color: "red".to_string(),
            show_labels: false,
        }
    }
}

impl From<&StyleSheet> for SvgConfig {
    fn from(style: &StyleSheet) -> Self {
        Self {
            base_color: style.base_color.clone(),
            highlight_color: style.highlight_color.clone(),
            ..Self::default()
        }
    }
}

/// Render a grid of highlight flags to an SVG string, one `<rect>` per cell.
pub fn render_svg(grid: &Grid<bool>, config: &SvgConfig) -> String {
    let pitch = config.cell_size + config.gap;
    let width = grid.spec.columns as f64 * pitch + config.gap;
    let height = grid.spec.rows as f64 * pitch + config.gap;

    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    ).unwrap();

    writeln!(&mut svg, r#"  <rect x="0" y="0" width="{}" height="{}" fill="white"/>"#, width, height).unwrap();

    for (cell, &lit) in grid.iter() {
        let x = config.gap + cell.column as f64 * pitch;
        let y = config.gap + cell.row as f64 * pitch;
        let fill = if lit { &config.highlight_color } else { &config.base_color };
        writeln!(
            &mut svg,
            r#"  <rect id="{}" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            cell, x, y, config.cell_size, config.cell_size, fill
        ).unwrap();

        if config.show_labels {
            writeln!(
                &mut svg,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                x + config.cell_size / 2.0, y + config.cell_size / 2.0, config.cell_size / 4.0, cell
            ).unwrap();
        }
    }

    writeln!(&mut svg, "</svg>").unwrap();

    svg
}

/// The page stylesheet: base rule, then one rule per highlighted cell.
pub fn render_css(grid: &Grid<bool>, style: &StyleSheet) -> String {
    let highlights = grid.iter().filter(|(_, lit)| **lit).map(|(cell, _)| cell).collect();
    let rules = style.highlight_rules(&highlights);
    if rules.is_empty() {
        format!("{}\n", style.base_rule())
    } else {
        format!("{}\n{}\n", style.base_rule(), rules)
    }
}
