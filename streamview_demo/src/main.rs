// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streamview demo.
//!
//! Loads the bundled sample CSV into the widget, moves the pointer over the chart until a
//! layer shows its tooltip, and writes the resulting page to `streamview_demo.html`.

use std::error::Error;
use std::io;

use kurbo::Point;
use streamview_widget::{StreamGraphWidget, SvgSurface, WidgetConfig, html_page};
use tracing_subscriber::EnvFilter;

const SAMPLE_NAME: &str = "llm_hashtags.csv";
const SAMPLE: &str = include_str!("../data/llm_hashtags.csv");
const OUTPUT: &str = "streamview_demo.html";

fn main() -> Result<(), Box<dyn Error>> {
    // The subscriber also installs the `log` bridge, so the libraries' records show up here.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_writer(io::stderr)
        .try_init();

    let mut widget = StreamGraphWidget::new(SvgSurface::new(), WidgetConfig::default());
    widget.mount();
    if widget.select_file(Some(SAMPLE_NAME))? {
        widget.load_csv_text(SAMPLE)?;
    }

    // Sweep the pointer across the middle of the chart and stop on the first layer hit, so the
    // page shows a tooltip.
    let plot = widget.frame().map(|f| f.layout.plot);
    if let Some(plot) = plot {
        let origin = widget.config().chart_origin;
        let y = origin.y + plot.center().y;
        let steps = 40;
        for i in 0..=steps {
            let x = origin.x + plot.x0 + plot.width() * f64::from(i) / f64::from(steps);
            widget.pointer_move(Point::new(x, y));
            if widget.tooltip().is_some() {
                break;
            }
        }
    }
    match widget.tooltip() {
        Some(state) => log::info!(
            "hovering {} near {} ({} dates)",
            state.category,
            state.anchor_date,
            state.values.len()
        ),
        None => log::info!("no layer under the pointer"),
    }

    let html = html_page(widget.config(), widget.host());
    std::fs::write(OUTPUT, html)?;
    println!("wrote {OUTPUT}");

    widget.unmount();
    Ok(())
}
