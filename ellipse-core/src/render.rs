//! Display-side collaborators: anything that lays out a grid and marks highlighted cells.

use std::fmt::Write;

use itertools::Itertools;

use crate::{
    error::RenderError,
    grid::{Cell, Grid, GridSpec},
    highlight::HighlightSet,
};

pub trait Renderer {
    /// Lay out an empty `spec.rows × spec.columns` grid, discarding any previous one.
    fn build(&mut self, spec: GridSpec) -> Result<(), RenderError>;

    /// Clear existing markers, then mark exactly `highlights`. Implementations must not
    /// expose a partially-updated grid.
    fn replace_highlights(&mut self, highlights: &HighlightSet) -> Result<(), RenderError>;
}

/// Base rule for every cell, and the rule applied to highlighted ones.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub class: String,
    pub base_color: String,
    pub highlight_color: String,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            class: "square".to_string(),
            base_color: "lightgray".to_string(),
            highlight_color: "red".to_string(),
        }
    }
}

impl StyleSheet {
    pub fn base_rule(&self) -> String {
        format!(".{}{{background-color: {};}}", self.class, self.base_color)
    }

    /// One `#row-column` rule per highlighted cell. Cell ids start with a digit, so they are
    /// escaped for use in a CSS id selector.
    pub fn highlight_rules(&self, highlights: &HighlightSet) -> String {
        highlights
            .iter()
            .map(|cell| format!("#{}{{background-color: {};}}", css_id(cell), self.highlight_color))
            .join("\n")
    }
}

/// Markup for an empty table: one `<div class="{class}" id="{row}-{column}">` per cell.
pub fn table_html(spec: GridSpec, class: &str) -> String {
    let mut html = String::from("<table>");
    for row in 0..spec.rows {
        html.push_str("<tr>");
        for column in 0..spec.columns {
            write!(&mut html, r#"<td><div class="{}" id="{}"></div></td>"#, class, Cell::new(row, column)).unwrap();
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// CSS selector form of a cell's element id (`"3-12"` → `"\33 -12"`).
pub fn css_id(cell: &Cell) -> String {
    let id = cell.to_string();
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => format!("\\{:x} {}", first as u32, chars.as_str()),
        None => id,
    }
}

/// In-memory renderer; the CLI prints it, tests inspect it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    grid: Option<Grid<bool>>,
}

impl GridView {
    pub fn new() -> Self {
        GridView { grid: None }
    }

    pub fn grid(&self) -> Option<&Grid<bool>> {
        self.grid.as_ref()
    }

    pub fn highlights(&self) -> HighlightSet {
        self.grid
            .iter()
            .flat_map(|grid| grid.iter().filter(|(_, on)| **on).map(|(cell, _)| cell))
            .collect()
    }

    /// One line per row: `on` for highlighted cells, `off` otherwise.
    pub fn to_text(&self, on: char, off: char) -> String {
        let mut text = String::new();
        if let Some(grid) = &self.grid {
            for row in grid.rows() {
                let line: String = row.iter().map(|&lit| if lit { on } else { off }).collect();
                writeln!(&mut text, "{}", line).unwrap();
            }
        }
        text
    }
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for GridView {
    fn build(&mut self, spec: GridSpec) -> Result<(), RenderError> {
        self.grid = Some(Grid::new(spec, false));
        Ok(())
    }

    fn replace_highlights(&mut self, highlights: &HighlightSet) -> Result<(), RenderError> {
        let current = self.grid.as_ref().ok_or_else(|| RenderError::MissingHostElement("grid".to_string()))?;
        let mut next = Grid::new(current.spec, false);
        for cell in highlights {
            if !next.set(cell, true) {
                return Err(RenderError::Host(format!("cell {} outside {} grid", cell, current.spec)));
            }
        }
        self.grid = Some(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{rasterize, RasterConfig};

    #[test]
    fn test_replace_requires_build() {
        let mut view = GridView::new();
        let set: HighlightSet = [Cell::new(0, 0)].into_iter().collect();
        assert_eq!(
            view.replace_highlights(&set),
            Err(RenderError::MissingHostElement("grid".to_string()))
        );
        assert_eq!(view.grid(), None);
    }

    #[test]
    fn test_replace_clears_previous() {
        let spec = GridSpec { rows: 2, columns: 3 };
        let mut view = GridView::new();
        view.build(spec).unwrap();
        let first: HighlightSet = [Cell::new(0, 0), Cell::new(1, 1)].into_iter().collect();
        view.replace_highlights(&first).unwrap();
        assert_eq!(view.to_text('#', '.'), "#..\n.#.\n");

        let second: HighlightSet = [Cell::new(0, 2)].into_iter().collect();
        view.replace_highlights(&second).unwrap();
        assert_eq!(view.to_text('#', '.'), "..#\n...\n");
        assert_eq!(view.highlights(), second);
    }

    #[test]
    fn test_out_of_bounds_leaves_view_untouched() {
        let spec = GridSpec { rows: 2, columns: 2 };
        let mut view = GridView::new();
        view.build(spec).unwrap();
        let good: HighlightSet = [Cell::new(1, 1)].into_iter().collect();
        view.replace_highlights(&good).unwrap();

        let bad: HighlightSet = [Cell::new(0, 0), Cell::new(5, 0)].into_iter().collect();
        assert!(view.replace_highlights(&bad).is_err());
        assert_eq!(view.highlights(), good);
    }

    #[test]
    fn test_wide_ellipse_text() {
        let spec = GridSpec { rows: 4, columns: 10 };
        let mut view = GridView::new();
        view.build(spec).unwrap();
        view.replace_highlights(&rasterize(spec, &RasterConfig::filled()).unwrap()).unwrap();
        let text = view.to_text('#', '.');
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], lines[3]);
        assert_eq!(lines[1], lines[2]);
        assert!(lines.iter().all(|line| line.len() == 10));
    }

    #[test]
    fn test_table_html() {
        let html = table_html(GridSpec { rows: 2, columns: 2 }, "square");
        assert_eq!(html.matches("<tr>").count(), 2);
        assert_eq!(html.matches("<td>").count(), 4);
        assert!(html.starts_with(r#"<table><tr><td><div class="square" id="0-0"></div></td>"#));
        assert!(html.ends_with(r#"<td><div class="square" id="1-1"></div></td></tr></table>"#));
    }

    #[test]
    fn test_style_sheet() {
        let style = StyleSheet::default();
        assert_eq!(style.base_rule(), ".square{background-color: lightgray;}");
        let set: HighlightSet = [Cell::new(3, 12), Cell::new(0, 1)].into_iter().collect();
        assert_eq!(
            style.highlight_rules(&set),
            "#\\30 -1{background-color: red;}\n#\\33 -12{background-color: red;}"
        );
        assert_eq!(style.highlight_rules(&HighlightSet::new()), "");
    }
}
