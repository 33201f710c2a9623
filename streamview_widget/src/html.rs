// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static HTML page composition.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::surface::SurfaceId;
use crate::svg::{SvgSurface, escape_xml};
use crate::widget::WidgetConfig;

/// Composes the widget page from the surfaces of `host`.
///
/// The page has the heading, the `.csv` file picker, the chart and legend (only once they are
/// visible) and the tooltip overlay. The overlay is absolutely positioned at the tooltip
/// surface position, ignores pointer events and stacks above the chart.
pub fn html_page(config: &WidgetConfig, host: &SvgSurface) -> String {
    let heading = escape_xml(&config.heading);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{heading}</title>\n"));
    out.push_str("</head>\n<body>\n<div>\n");
    out.push_str(&format!("<h2>{heading}</h2>\n"));
    out.push_str(&format!(
        "<div>\n<label>{}</label>\n<input type=\"file\" accept=\".csv\">\n</div>\n",
        escape_xml(&config.picker_label)
    ));

    if host.is_visible(SurfaceId::Chart) {
        out.push_str("<div>\n<div>\n");
        out.push_str(&host.svg(SurfaceId::Chart));
        out.push_str("</div>\n<div class=\"ml-4\">\n");
        out.push_str(&host.svg(SurfaceId::Legend));
        out.push_str("</div>\n</div>\n");
    }

    let tooltip_visible = host.is_visible(SurfaceId::Tooltip);
    let position = host.position(SurfaceId::Tooltip);
    out.push_str(&format!(
        "<div class=\"tooltip\" style=\"display: {}; pointer-events: none; position: absolute; \
         z-index: 1000; left: {}px; top: {}px\">\n",
        if tooltip_visible { "block" } else { "none" },
        position.x,
        position.y,
    ));
    if tooltip_visible {
        out.push_str(&host.svg(SurfaceId::Tooltip));
    }
    out.push_str("</div>\n</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;

    use super::*;
    use crate::surface::SurfaceHost;

    #[test]
    fn blank_page_has_picker_and_hidden_tooltip() {
        let html = html_page(&WidgetConfig::default(), &SvgSurface::new());
        assert!(html.contains("<h2>LLM Hashtag Usage Over Time</h2>"));
        assert!(html.contains("<label>Upload CSV File:</label>"));
        assert!(html.contains(r#"accept=".csv""#));
        assert!(!html.contains("<svg"));
        assert!(html.contains("display: none; pointer-events: none; position: absolute"));
    }

    #[test]
    fn visible_tooltip_is_placed() {
        let mut host = SvgSurface::new();
        host.set_visible(SurfaceId::Tooltip, true);
        host.set_position(SurfaceId::Tooltip, Point::new(115.0, 40.5));
        let html = html_page(&WidgetConfig::default(), &host);
        assert!(html.contains("display: block"));
        assert!(html.contains("left: 115px; top: 40.5px"));
        assert!(html.contains(r#"class="tooltip""#));
    }
}
