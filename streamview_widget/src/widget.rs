// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The streamgraph widget state machine.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Size};
use streamview_charts::{HeuristicTextMeasurer, StreamgraphFrame, StreamgraphSpec, TooltipSpec};
use streamview_data::{
    CsvOptions, DEFAULT_CATEGORY_PRIORITY, DatedValue, SeriesTable, parse_records,
};

use crate::error::WidgetError;
use crate::surface::{ListenerId, PointerHost, SurfaceHost, SurfaceId};

/// Widget configuration.
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    /// CSV parsing options.
    pub csv: CsvOptions,
    /// Category stacking priority, bottom first.
    pub priority: Vec<String>,
    /// Streamgraph and legend rendering.
    pub streamgraph: StreamgraphSpec,
    /// Tooltip rendering and placement.
    pub tooltip: TooltipSpec,
    /// Viewport size used to keep the tooltip on screen.
    pub viewport: Size,
    /// Position of the chart surface's top-left corner in the viewport.
    pub chart_origin: Point,
    /// Whether [`StreamGraphWidget::pointer_move`] hit-tests the layers to synthesize hover
    /// transitions. Hosts with native per-shape hover events turn this off and call
    /// [`StreamGraphWidget::hover_enter`]/[`StreamGraphWidget::hover_leave`] themselves.
    pub hit_testing: bool,
    /// Page heading.
    pub heading: String,
    /// Label of the file picker.
    pub picker_label: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            priority: DEFAULT_CATEGORY_PRIORITY
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            streamgraph: StreamgraphSpec::default(),
            tooltip: TooltipSpec::default(),
            viewport: Size::new(1280.0, 800.0),
            chart_origin: Point::ZERO,
            hit_testing: true,
            heading: String::from("LLM Hashtag Usage Over Time"),
            picker_label: String::from("Upload CSV File:"),
        }
    }
}

impl WidgetConfig {
    /// Sets the CSV options.
    pub fn with_csv_options(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }

    /// Sets the category stacking priority.
    pub fn with_priority<S: Into<String>>(mut self, priority: impl IntoIterator<Item = S>) -> Self {
        self.priority = priority.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the streamgraph spec.
    pub fn with_streamgraph(mut self, streamgraph: StreamgraphSpec) -> Self {
        self.streamgraph = streamgraph;
        self
    }

    /// Sets the tooltip spec.
    pub fn with_tooltip(mut self, tooltip: TooltipSpec) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Sets the viewport size.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets where the chart surface sits in the viewport.
    pub fn with_chart_origin(mut self, chart_origin: Point) -> Self {
        self.chart_origin = chart_origin;
        self
    }

    /// Enables or disables pointer hit testing.
    pub fn with_hit_testing(mut self, hit_testing: bool) -> Self {
        self.hit_testing = hit_testing;
        self
    }
}

/// The category under the pointer and its full series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipState {
    /// Hovered category.
    pub category: String,
    /// The category's value at every date, in date order.
    pub values: Vec<DatedValue>,
    /// Index of the date nearest to the pointer when the hover started.
    pub anchor_index: usize,
    /// The date at `anchor_index`.
    pub anchor_date: String,
}

/// The streamgraph widget.
///
/// Owns the loaded dataset, the rendered frame and the tooltip state, and pushes every visual
/// change to its host. Data flows one way: a file is parsed and normalized, the state is
/// committed, and only then are the surfaces redrawn.
#[derive(Debug)]
pub struct StreamGraphWidget<H> {
    host: H,
    config: WidgetConfig,
    pending_file: Option<String>,
    table: Option<SeriesTable>,
    frame: Option<StreamgraphFrame>,
    tooltip: Option<TooltipState>,
    tooltip_position: Option<Point>,
    pointer: Point,
    listener: Option<ListenerId>,
}

impl<H: SurfaceHost + PointerHost> StreamGraphWidget<H> {
    /// Creates an unmounted widget with no data.
    pub fn new(host: H, config: WidgetConfig) -> Self {
        Self {
            host,
            config,
            pending_file: None,
            table: None,
            frame: None,
            tooltip: None,
            tooltip_position: None,
            pointer: Point::ZERO,
            listener: None,
        }
    }

    /// Attaches the widget: subscribes to pointer moves and sets up surface visibility.
    ///
    /// Chart and legend stay hidden until a file has been loaded. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.listener.is_some() {
            return;
        }
        self.listener = Some(self.host.subscribe_pointer_moves());
        let loaded = self.table.is_some();
        self.host.set_visible(SurfaceId::Chart, loaded);
        self.host.set_visible(SurfaceId::Legend, loaded);
        self.host.set_size(SurfaceId::Tooltip, self.config.tooltip.size);
        self.host.set_visible(SurfaceId::Tooltip, false);
        log::debug!("widget: mounted (data loaded: {loaded})");
    }

    /// Detaches the widget: drops the pointer subscription and hides the tooltip.
    pub fn unmount(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.host.unsubscribe_pointer_moves(listener);
            log::debug!("widget: unmounted");
        }
        self.hover_leave();
    }

    /// Returns `true` between [`mount`](Self::mount) and [`unmount`](Self::unmount).
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Returns `true` if pointer moves currently reposition a tooltip.
    pub fn needs_pointer_updates(&self) -> bool {
        self.listener.is_some() && self.tooltip.is_some()
    }

    /// Handles the file picker.
    ///
    /// `None` (the picker was dismissed) is a no-op and returns `Ok(false)`. A name without a
    /// `.csv` extension is rejected. Otherwise returns `Ok(true)`: the host should read the
    /// file and pass its contents to [`load_csv_text`](Self::load_csv_text).
    pub fn select_file(&mut self, name: Option<&str>) -> Result<bool, WidgetError> {
        let Some(name) = name else {
            log::debug!("widget: no file selected");
            return Ok(false);
        };
        if !is_csv_name(name) {
            log::warn!("widget: rejected {name:?}, not a .csv file");
            return Err(WidgetError::UnsupportedFile {
                name: name.to_string(),
            });
        }
        self.pending_file = Some(name.to_string());
        Ok(true)
    }

    /// Loads a dataset from CSV text, replacing the previous one, and redraws.
    ///
    /// Any tooltip is dismissed. On a parse error the previous dataset stays in place.
    pub fn load_csv_text(&mut self, text: &str) -> Result<(), WidgetError> {
        let records = parse_records(text, &self.config.csv)?;
        let priority: Vec<&str> = self.config.priority.iter().map(String::as_str).collect();
        let table = SeriesTable::normalize(&records, &priority);

        let source = self.pending_file.take();
        log::debug!(
            "widget: loaded {} ({} dates, {} categories)",
            source.as_deref().unwrap_or("<text>"),
            table.dates().len(),
            table.categories().len()
        );
        self.table = Some(table);
        self.tooltip = None;
        self.tooltip_position = None;

        self.render();
        Ok(())
    }

    /// Reports that the pointer entered the layer of `category` at `pointer` (viewport
    /// coordinates).
    ///
    /// Redraws the tooltip if it was hidden or showed another category, then positions it.
    /// Categories outside the current dataset are ignored.
    pub fn hover_enter(&mut self, category: &str, pointer: Point) {
        let (Some(table), Some(frame)) = (&self.table, &self.frame) else {
            return;
        };
        let Some(values) = table.series(category) else {
            log::warn!("widget: hover on unknown category {category:?}");
            return;
        };
        let anchor_index = frame.nearest_date_index(self.to_chart(pointer));
        let anchor_date = table
            .dates()
            .get(anchor_index)
            .cloned()
            .unwrap_or_default();
        let redraw = self
            .tooltip
            .as_ref()
            .is_none_or(|t| t.category != category);

        log::trace!("widget: hover enter {category:?} near {anchor_date:?}");
        self.pointer = pointer;
        self.tooltip = Some(TooltipState {
            category: category.to_string(),
            values,
            anchor_index,
            anchor_date,
        });
        if redraw {
            self.draw_tooltip();
        }
        self.position_tooltip();
    }

    /// Reports that the pointer left the hovered layer: clears and hides the tooltip.
    pub fn hover_leave(&mut self) {
        if let Some(state) = self.tooltip.take() {
            log::trace!("widget: hover leave {:?}", state.category);
        }
        self.tooltip_position = None;
        self.host.clear(SurfaceId::Tooltip);
        self.host.set_visible(SurfaceId::Tooltip, false);
    }

    /// Handles a global pointer move (viewport coordinates).
    ///
    /// Ignored while unmounted. With hit testing on, entering or leaving a layer triggers
    /// [`hover_enter`](Self::hover_enter)/[`hover_leave`](Self::hover_leave). A visible
    /// tooltip follows the pointer.
    pub fn pointer_move(&mut self, pointer: Point) {
        if self.listener.is_none() {
            log::trace!("widget: pointer move while unmounted");
            return;
        }
        self.pointer = pointer;

        if self.config.hit_testing {
            let local = self.to_chart(pointer);
            let hit = self
                .frame
                .as_ref()
                .and_then(|f| f.hit_test(local))
                .map(|l| l.category.clone());
            let current = self.tooltip.as_ref().map(|t| t.category.clone());
            match (hit, current) {
                (Some(hit), current) if current.as_deref() != Some(hit.as_str()) => {
                    if current.is_some() {
                        self.hover_leave();
                    }
                    self.hover_enter(&hit, pointer);
                    return;
                }
                (None, Some(_)) => {
                    self.hover_leave();
                    return;
                }
                _ => {}
            }
        }

        if self.needs_pointer_updates() {
            self.position_tooltip();
        }
    }

    /// Updates the viewport size and keeps a visible tooltip inside it.
    pub fn resize(&mut self, viewport: Size) {
        self.config.viewport = viewport;
        if self.tooltip.is_some() {
            self.position_tooltip();
        }
    }

    /// Updates where the chart surface sits in the viewport.
    pub fn set_chart_origin(&mut self, chart_origin: Point) {
        self.config.chart_origin = chart_origin;
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the widget and returns its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The file accepted by [`select_file`](Self::select_file) and not yet loaded.
    pub fn pending_file(&self) -> Option<&str> {
        self.pending_file.as_deref()
    }

    /// Returns `true` once a dataset has been loaded.
    pub fn is_file_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// The current dataset.
    pub fn table(&self) -> Option<&SeriesTable> {
        self.table.as_ref()
    }

    /// The current rendered frame (`None` for an empty dataset).
    pub fn frame(&self) -> Option<&StreamgraphFrame> {
        self.frame.as_ref()
    }

    /// The current tooltip state.
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    /// The tooltip's top-left corner in viewport coordinates, while visible.
    pub fn tooltip_position(&self) -> Option<Point> {
        self.tooltip_position
    }

    /// The last known pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    fn to_chart(&self, p: Point) -> Point {
        let o = self.config.chart_origin;
        Point::new(p.x - o.x, p.y - o.y)
    }

    fn render(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        // The legend lists the stacking priority categories the dataset contains.
        self.frame = self.config.streamgraph.render_with_legend(
            table,
            &self.config.priority,
            &HeuristicTextMeasurer,
        );

        for surface in SurfaceId::ALL {
            self.host.clear(surface);
        }
        self.host.set_visible(SurfaceId::Tooltip, false);
        self.host.set_size(SurfaceId::Chart, self.config.streamgraph.size);

        match &self.frame {
            Some(frame) => {
                self.host.draw(SurfaceId::Chart, &frame.chart_marks);
                self.host.set_size(SurfaceId::Legend, frame.legend_size);
                self.host.draw(SurfaceId::Legend, &frame.legend_marks);
            }
            None => {
                log::debug!("widget: empty dataset, surfaces left blank");
                self.host.set_size(SurfaceId::Legend, Size::ZERO);
            }
        }
        self.host.set_visible(SurfaceId::Chart, true);
        self.host.set_visible(SurfaceId::Legend, true);
    }

    fn draw_tooltip(&mut self) {
        let Some(state) = &self.tooltip else {
            return;
        };
        let color = self
            .frame
            .as_ref()
            .and_then(|f| f.layer(&state.category))
            .map(|l| l.color)
            .unwrap_or_else(|| self.config.streamgraph.palette.color(&state.category, 0));
        let marks = self
            .config
            .tooltip
            .marks(&state.category, &state.values, color);

        self.host.clear(SurfaceId::Tooltip);
        self.host.set_size(SurfaceId::Tooltip, self.config.tooltip.size);
        self.host.draw(SurfaceId::Tooltip, &marks);
    }

    fn position_tooltip(&mut self) {
        if self.tooltip.is_none() {
            return;
        }
        let position = self.config.tooltip.place(self.pointer, self.config.viewport);
        self.tooltip_position = Some(position);
        self.host.set_position(SurfaceId::Tooltip, position);
        self.host.set_visible(SurfaceId::Tooltip, true);
    }
}

/// Returns `true` if `name` ends in `.csv`, ignoring ASCII case.
pub fn is_csv_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".csv")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn csv_names_ignore_ascii_case() {
        assert!(is_csv_name("data.csv"));
        assert!(is_csv_name("DATA.CSV"));
        assert!(is_csv_name(".csv"));
        assert!(!is_csv_name("data.tsv"));
        assert!(!is_csv_name("csv"));
        assert!(!is_csv_name("data.csv.txt"));
        assert!(!is_csv_name("é"));
    }

    #[test]
    fn default_config_matches_the_page() {
        let config = WidgetConfig::default();
        assert_eq!(config.heading, "LLM Hashtag Usage Over Time");
        assert_eq!(config.picker_label, "Upload CSV File:");
        assert_eq!(config.priority, DEFAULT_CATEGORY_PRIORITY);
        assert!(config.hit_testing);
    }
}
