// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The streamview widget.
//!
//! [`StreamGraphWidget`] owns the whole interaction: a CSV file is picked and parsed, the
//! streamgraph and its legend are drawn, and hovering a layer shows a bar chart of that
//! category next to the pointer.
//!
//! Drawing goes through two small host traits:
//! - [`SurfaceHost`] receives marks for the chart, legend and tooltip surfaces, and their
//!   size, visibility and position.
//! - [`PointerHost`] manages the global pointer-move subscription, held while mounted.
//!
//! [`SvgSurface`] is an in-memory host that serializes surfaces as SVG, and [`html_page`]
//! composes them into a static page.

#![no_std]

extern crate alloc;

mod error;
mod html;
mod surface;
mod svg;
mod widget;

pub use error::WidgetError;
pub use html::html_page;
pub use surface::{ListenerId, PointerHost, SurfaceHost, SurfaceId};
pub use svg::{SurfaceState, SvgSurface};
pub use widget::{StreamGraphWidget, TooltipState, WidgetConfig, is_csv_name};
