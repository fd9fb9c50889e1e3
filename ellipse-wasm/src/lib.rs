//! WASM bindings for grid-rasterized ellipses.
//!
//! This crate drives the ellipse-core rasterizer from a browser page: it builds the cell
//! table, keeps the grid dimensions in the page's query string, and highlights the
//! rasterized cells through a generated stylesheet.

use std::fmt::Display;

use ellipse_core::{
    parse_log_level,
    render::table_html,
    Cell, GridSpec, HighlightSet, QueryParams, RasterConfig, RenderError, Renderer, StyleSheet,
};
use log::{debug, error, info};
use tsify::declare;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;
use web_sys::{Document, Element, History, HtmlHeadElement, Window};

#[declare]
pub type Highlights = Vec<Cell>;

/// Id of the element the table is built inside.
pub const HOST_ID: &str = "ellipseGrid";
/// Id of the `<style>` holding the base `.square` rule.
pub const TABLE_STYLE_ID: &str = "styleTable";
/// Id of the `<style>` holding the per-cell highlight rules.
pub const HIGHLIGHT_STYLE_ID: &str = "styleSquares";

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) {
    let level: Option<String> = serde_wasm_bindgen::from_value(level).ok().flatten();
    log::set_max_level(parse_log_level(level.as_deref()));
}

/// Renders a grid and its highlights into the current page.
///
/// The table is regenerated as one markup string and swapped in with a single
/// `innerHTML` assignment; each stylesheet is likewise rewritten in one step.
pub struct DomRenderer {
    pub host_id: String,
    pub style: StyleSheet,
}

impl Default for DomRenderer {
    fn default() -> Self {
        Self { host_id: HOST_ID.to_string(), style: StyleSheet::default() }
    }
}

fn host_err(e: JsValue) -> RenderError {
    RenderError::Host(format!("{:?}", e))
}

fn document() -> Result<Document, RenderError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| RenderError::MissingHostElement("document".to_string()))
}

/// A `<style id={id}>` resolved ahead of any page mutation. A missing style element is
/// created detached and attached to `<head>` on [`StyleSlot::write`].
struct StyleSlot {
    style: Element,
    head: Option<HtmlHeadElement>,
}

impl StyleSlot {
    fn resolve(document: &Document, id: &str) -> Result<Self, RenderError> {
        if let Some(style) = document.get_element_by_id(id) {
            return Ok(StyleSlot { style, head: None });
        }
        let head = document.head().ok_or_else(|| RenderError::MissingHostElement("head".to_string()))?;
        let style = document.create_element("style").map_err(host_err)?;
        style.set_id(id);
        style.set_attribute("type", "text/css").map_err(host_err)?;
        Ok(StyleSlot { style, head: Some(head) })
    }

    fn write(self, css: &str) -> Result<(), RenderError> {
        self.style.set_text_content(Some(css));
        if let Some(head) = self.head {
            head.append_child(&self.style).map_err(host_err)?;
        }
        Ok(())
    }
}

/// A table rebuild whose host and stylesheet have already been found.
pub struct TableUpdate {
    host: Element,
    style: StyleSlot,
    html: String,
    base_rule: String,
}

impl TableUpdate {
    pub fn apply(self) -> Result<(), RenderError> {
        self.style.write(&self.base_rule)?;
        self.host.set_inner_html(&self.html);
        Ok(())
    }
}

impl DomRenderer {
    fn host(&self, document: &Document) -> Result<Element, RenderError> {
        document
            .get_element_by_id(&self.host_id)
            .ok_or_else(|| RenderError::MissingHostElement(self.host_id.clone()))
    }

    /// Resolve everything a rebuild touches; the page is unchanged until [`TableUpdate::apply`].
    pub fn prepare_build(&self, spec: GridSpec) -> Result<TableUpdate, RenderError> {
        let document = document()?;
        Ok(TableUpdate {
            host: self.host(&document)?,
            style: StyleSlot::resolve(&document, TABLE_STYLE_ID)?,
            html: table_html(spec, &self.style.class),
            base_rule: self.style.base_rule(),
        })
    }
}

impl Renderer for DomRenderer {
    fn build(&mut self, spec: GridSpec) -> Result<(), RenderError> {
        self.prepare_build(spec)?.apply()?;
        debug!("built {} table in #{}", spec, self.host_id);
        Ok(())
    }

    fn replace_highlights(&mut self, highlights: &HighlightSet) -> Result<(), RenderError> {
        let document = document()?;
        self.host(&document)?;
        let slot = StyleSlot::resolve(&document, HIGHLIGHT_STYLE_ID)?;
        slot.write(&self.style.highlight_rules(highlights))?;
        debug!("highlighted {} cells", highlights.len());
        Ok(())
    }
}

/// Log an error and convert it for JS.
fn js_err(e: impl Display) -> JsValue {
    error!("{}", e);
    JsValue::from_str(&e.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_err(RenderError::MissingHostElement("window".to_string())))
}

/// The page URL with `spec` upserted into its query string, and the history to push it to.
fn url_for(spec: GridSpec) -> Result<(History, String), JsValue> {
    let window = window()?;
    let location = window.location();
    let mut params = QueryParams::parse(&location.search()?);
    spec.write(&mut params);
    let url = format!("{}?{}", location.pathname()?, params);
    Ok((window.history()?, url))
}

/// Rebuild the table at `spec` and record it in the URL (no reload). Nothing changes if the
/// host, stylesheet target or history cannot be resolved.
fn rebuild(spec: GridSpec) -> Result<(), JsValue> {
    let (history, url) = url_for(spec)?;
    let update = DomRenderer::default().prepare_build(spec).map_err(js_err)?;
    history.push_state_with_url(&JsValue::NULL, "", Some(&url))?;
    update.apply().map_err(js_err)?;
    debug!("built {} table, url {}", spec, url);
    Ok(())
}

/// Computes the cells of the ellipse inscribed in a `rows × columns` grid.
///
/// # Returns
/// The highlighted cells as `{row, column}` objects, row-major.
///
/// # Errors
/// If either dimension is not a finite number ≥ 1.
#[wasm_bindgen]
pub fn rasterize(rows: f64, columns: f64, fill: bool) -> Result<JsValue, JsValue> {
    let spec = GridSpec::from_f64(rows, columns).map_err(js_err)?;
    let config = RasterConfig { fill_interior: fill, ..RasterConfig::default() };
    let highlights = ellipse_core::rasterize(spec, &config).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&highlights).map_err(js_err)
}

/// Builds the table from the dimensions in the page's query string.
///
/// Missing or invalid `rows`/`columns` parameters fall back to the given defaults; the
/// resolved values are written back to the URL.
///
/// # Returns
/// The resolved grid spec, so the page can fill in its inputs.
#[wasm_bindgen]
pub fn init_table(default_rows: f64, default_columns: f64) -> Result<JsValue, JsValue> {
    let defaults = GridSpec::from_f64(default_rows, default_columns).map_err(js_err)?;
    let params = QueryParams::parse(&window()?.location().search()?);
    let spec = GridSpec::read(&params, defaults);
    rebuild(spec)?;
    serde_wasm_bindgen::to_value(&spec).map_err(js_err)
}

/// Rebuilds the table at a new size and records it in the URL.
#[wasm_bindgen]
pub fn update_table(rows: f64, columns: f64) -> Result<(), JsValue> {
    let spec = GridSpec::from_f64(rows, columns).map_err(js_err)?;
    rebuild(spec)
}

/// Highlights the ellipse inscribed in the current `rows × columns` table.
#[wasm_bindgen]
pub fn gen_ellipse(rows: f64, columns: f64, fill: bool) -> Result<(), JsValue> {
    let spec = GridSpec::from_f64(rows, columns).map_err(js_err)?;
    let config = RasterConfig { fill_interior: fill, ..RasterConfig::default() };
    let highlights = ellipse_core::rasterize(spec, &config).map_err(js_err)?;
    info!("{}: {} cells highlighted", spec, highlights.len());
    DomRenderer::default().replace_highlights(&highlights).map_err(js_err)
}
