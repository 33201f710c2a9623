// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for the streamview widget.
//!
//! This crate sits between the data pipeline (`streamview_data`) and the draw-command model
//! (`streamview_core`):
//! - **Scales** map data values into plot coordinates.
//! - **Guides** (axes, legends) and **series marks** (stream layers, bars) are generated as
//!   `streamview_core::Mark`s.
//! - [`StreamgraphSpec`] renders a whole streamgraph with its legend and hover regions;
//!   [`TooltipSpec`] renders the per-category bar chart shown on hover and places it next to
//!   the pointer.
//!
//! Text shaping is out of scope; text marks store unshaped strings and guide layout goes
//! through a [`TextMeasurer`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bar_mark;
mod curve;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod legend;
mod measure;
mod palette;
mod primitives;
mod scale;
mod stream_mark;
mod streamgraph;
mod tooltip;
mod z_order;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle};
pub use bar_mark::BarMarkSpec;
pub use curve::{basis_area, basis_line};
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, Margin};
pub use legend::{LegendItem, LegendSwatchesSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use palette::{CATEGORY10, CategoryPalette, DEFAULT_CATEGORY_COLORS};
pub use primitives::{LabelStyle, StrokeStyle, filled_rect, rule, stroked_path};
pub use scale::{ScaleBand, ScaleLinear, ScalePoint};
pub use stream_mark::StreamMarkSpec;
pub use streamgraph::{LayerRegion, StreamgraphFrame, StreamgraphSpec, nearest_index};
pub use tooltip::{TooltipSpec, place_tooltip};
pub use z_order::*;

/// Stable mark id bases used by the renderers.
pub mod ids {
    pub use crate::streamgraph::{DATE_AXIS_ID_BASE, LAYER_ID_BASE, LEGEND_ID_BASE};
    pub use crate::tooltip::{
        BAR_ID_BASE, DATE_AXIS_ID_BASE as TOOLTIP_DATE_AXIS_ID_BASE, TITLE_ID,
        VALUE_AXIS_ID_BASE,
    };
}
