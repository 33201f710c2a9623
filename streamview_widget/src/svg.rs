// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory host that keeps one mark list per surface and serializes it to SVG.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{BezPath, PathEl, Point, Size};
use peniko::Brush;
use streamview_core::{Mark, MarkPayload, Scene, TextAnchor, TextBaseline};

use crate::surface::{ListenerId, PointerHost, SurfaceHost, SurfaceId};

/// The retained state of one surface.
#[derive(Clone, Debug, Default)]
pub struct SurfaceState {
    /// Current marks.
    pub scene: Scene,
    /// Surface size.
    pub size: Size,
    /// Visibility.
    pub visible: bool,
    /// Position of a floating surface, in viewport coordinates.
    pub position: Point,
}

/// A [`SurfaceHost`] and [`PointerHost`] that records everything in memory.
///
/// Used by the demo to write static HTML and by tests to observe the widget.
#[derive(Debug, Default)]
pub struct SvgSurface {
    surfaces: HashMap<SurfaceId, SurfaceState>,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl SvgSurface {
    /// Creates an empty host; surfaces start hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state of `surface`, if anything was ever done to it.
    pub fn state(&self, surface: SurfaceId) -> Option<&SurfaceState> {
        self.surfaces.get(&surface)
    }

    /// The marks of `surface`.
    pub fn scene(&self, surface: SurfaceId) -> Option<&Scene> {
        self.state(surface).map(|s| &s.scene)
    }

    /// Returns `true` if `surface` is shown.
    pub fn is_visible(&self, surface: SurfaceId) -> bool {
        self.state(surface).is_some_and(|s| s.visible)
    }

    /// The position of `surface`.
    pub fn position(&self, surface: SurfaceId) -> Point {
        self.state(surface).map_or(Point::ZERO, |s| s.position)
    }

    /// The size of `surface`.
    pub fn size(&self, surface: SurfaceId) -> Size {
        self.state(surface).map_or(Size::ZERO, |s| s.size)
    }

    /// Number of live pointer-move subscriptions.
    pub fn pointer_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Serializes `surface` as a standalone `<svg>` element.
    pub fn svg(&self, surface: SurfaceId) -> String {
        let size = self.size(surface);
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            surface.name(),
            num(size.width),
            num(size.height),
            num(size.width),
            num(size.height),
        ));
        out.push('\n');

        if let Some(scene) = self.scene(surface) {
            for mark in scene.paint_order() {
                write_payload(&mut out, &mark.payload);
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn entry(&mut self, surface: SurfaceId) -> &mut SurfaceState {
        self.surfaces.entry(surface).or_default()
    }
}

impl SurfaceHost for SvgSurface {
    fn clear(&mut self, surface: SurfaceId) {
        self.entry(surface).scene.clear();
    }

    fn draw(&mut self, surface: SurfaceId, marks: &[Mark]) {
        self.entry(surface).scene.extend(marks.iter().cloned());
    }

    fn set_size(&mut self, surface: SurfaceId, size: Size) {
        self.entry(surface).size = size;
    }

    fn set_visible(&mut self, surface: SurfaceId, visible: bool) {
        self.entry(surface).visible = visible;
    }

    fn set_position(&mut self, surface: SurfaceId, position: Point) {
        self.entry(surface).position = position;
    }
}

impl PointerHost for SvgSurface {
    fn subscribe_pointer_moves(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        id
    }

    fn unsubscribe_pointer_moves(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }
}

fn write_payload(out: &mut String, payload: &MarkPayload) {
    match payload {
        MarkPayload::Rect(r) => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(r.rect.x0),
                num(r.rect.y0),
                num(r.rect.width()),
                num(r.rect.height()),
            ));
            write_paint_attr(out, "fill", &r.fill);
            write_opacity(out, r.opacity);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                num(t.pos.x),
                num(t.pos.y),
                num(t.font_size),
                baseline
            ));
            if t.angle != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    num(t.angle),
                    num(t.pos.x),
                    num(t.pos.y)
                ));
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
        MarkPayload::Path(p) => {
            out.push_str(&format!(r#"<path d="{}""#, path_data(&p.path)));
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                out.push_str(&format!(r#" stroke-width="{}""#, num(p.stroke_width)));
            }
            write_opacity(out, p.opacity);
            out.push_str("/>\n");
        }
    }
}

/// SVG path data for `path`.
pub(crate) fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => d.push_str(&format!("M{},{}", num(p.x), num(p.y))),
            PathEl::LineTo(p) => d.push_str(&format!("L{},{}", num(p.x), num(p.y))),
            PathEl::QuadTo(p1, p2) => d.push_str(&format!(
                "Q{},{} {},{}",
                num(p1.x),
                num(p1.y),
                num(p2.x),
                num(p2.y)
            )),
            PathEl::CurveTo(p1, p2, p3) => d.push_str(&format!(
                "C{},{} {},{} {},{}",
                num(p1.x),
                num(p1.y),
                num(p2.x),
                num(p2.y),
                num(p3.x),
                num(p3.y)
            )),
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => (String::from("none"), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{}""#, num(o)));
    }
}

fn write_opacity(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{}""#, num(opacity)));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;
    use peniko::color::palette::css;
    use streamview_core::MarkId;

    use super::*;

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(0.9), "0.9");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-2.5), "-2.5");
    }

    #[test]
    fn path_data_covers_every_element() {
        let mut p = BezPath::new();
        p.move_to((0.0, 1.0));
        p.line_to((2.0, 3.0));
        p.quad_to((4.0, 5.0), (6.0, 7.0));
        p.curve_to((1.0, 1.0), (2.0, 2.0), (3.5, 3.0));
        p.close_path();
        assert_eq!(
            path_data(&p),
            "M0,1 L2,3 Q4,5 6,7 C1,1 2,2 3.5,3 Z"
        );
    }

    #[test]
    fn clear_then_draw_replaces_marks() {
        let mut host = SvgSurface::new();
        let rect = |id| {
            Mark::builder(MarkId(id))
                .rect()
                .x(1.0)
                .y(2.0)
                .w(3.0)
                .h(4.0)
                .fill(css::RED)
                .build()
        };
        host.draw(SurfaceId::Chart, &[rect(1), rect(2)]);
        host.clear(SurfaceId::Chart);
        host.draw(SurfaceId::Chart, &[rect(3)]);
        assert_eq!(host.scene(SurfaceId::Chart).map(Scene::len), Some(1));
        assert_eq!(
            host.scene(SurfaceId::Chart).and_then(Scene::bounds),
            Some(Rect::new(1.0, 2.0, 4.0, 6.0))
        );
    }

    #[test]
    fn svg_serializes_marks_in_paint_order() {
        let mut host = SvgSurface::new();
        host.set_size(SurfaceId::Legend, Size::new(200.0, 30.0));
        host.draw(
            SurfaceId::Legend,
            &[
                Mark::builder(MarkId(2))
                    .text()
                    .z_index(70)
                    .x(30.0)
                    .y(15.0)
                    .content("A & B")
                    .build(),
                Mark::builder(MarkId(1))
                    .rect()
                    .w(20.0)
                    .h(20.0)
                    .fill(css::RED)
                    .opacity(0.5)
                    .build(),
            ],
        );
        let svg = host.svg(SurfaceId::Legend);
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="legend" width="200" height="30""#
        ));
        let rect_at = svg.find("<rect").unwrap();
        let text_at = svg.find("<text").unwrap();
        assert!(rect_at < text_at);
        assert!(svg.contains(r##"fill="#ff0000" opacity="0.5""##));
        assert!(svg.contains(">A &amp; B</text>"));
    }

    #[test]
    fn listeners_subscribe_and_unsubscribe() {
        let mut host = SvgSurface::new();
        let a = host.subscribe_pointer_moves();
        let b = host.subscribe_pointer_moves();
        assert_ne!(a, b);
        assert_eq!(host.pointer_listeners(), 2);
        host.unsubscribe_pointer_moves(a);
        assert_eq!(host.pointer_listeners(), 1);
    }
}
