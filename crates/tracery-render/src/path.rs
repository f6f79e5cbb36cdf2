//! Orthogonal path construction, one handler per connection style.
//!
//! Every path starts at `(anchor_x, 0)`, descends vertically and then alternates horizontal and
//! vertical runs. Coordinates are written with JavaScript number formatting (`2040`, not
//! `2040.0`) so output matches what a browser would serialize.

use crate::model::{LayoutPoint, LayoutRect, ResolvedGeometry, StyleTarget};
use tracery_core::EngineConfig;

/// Incremental SVG path-data writer (`M`/`L` commands only).
pub struct PathData {
    out: String,
    buf: ryu_js::Buffer,
}

impl Default for PathData {
    fn default() -> Self {
        Self::new()
    }
}

impl PathData {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            buf: ryu_js::Buffer::new(),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.command('M', x, y)
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.command('L', x, y)
    }

    fn command(&mut self, cmd: char, x: f64, y: f64) -> &mut Self {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
        self.out.push(cmd);
        self.out.push(' ');
        push_number(&mut self.out, &mut self.buf, x);
        self.out.push(' ');
        push_number(&mut self.out, &mut self.buf, y);
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

pub(crate) fn push_number(out: &mut String, buf: &mut ryu_js::Buffer, mut v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    if v == 0.0 {
        // Also folds `-0`.
        v = 0.0;
    }
    out.push_str(buf.format_finite(v));
}

/// Builds the SVG path data for one resolved connection.
pub fn build_path(geometry: &ResolvedGeometry, config: &EngineConfig) -> String {
    let ax = geometry.anchor_x;
    let mut d = PathData::new();
    d.move_to(ax, 0.0);

    match &geometry.target {
        StyleTarget::CrossThrough { grid } => match grid {
            Some(grid) => {
                let y = grid.center_y();
                d.line_to(ax, y).line_to(grid.right(), y);
            }
            None => elbow(&mut d, ax, geometry.fallback),
        },
        StyleTarget::CenterPath { card, waypoint_x } => {
            let turn_y = geometry.section.top() + config.center_turn_offset;
            let end = card
                .map(|card| LayoutPoint {
                    x: card.left(),
                    y: card.center_y(),
                })
                .unwrap_or(geometry.fallback);
            d.line_to(ax, turn_y)
                .line_to(*waypoint_x, turn_y)
                .line_to(*waypoint_x, end.y)
                .line_to(end.x, end.y);
        }
        StyleTarget::HeadingConnect { heading } => match heading {
            Some(heading) => {
                let y = heading.center_y();
                d.line_to(ax, y).line_to(heading.left(), y);
            }
            None => elbow(&mut d, ax, geometry.fallback),
        },
        StyleTarget::HeadingToCards { heading, cards }
        | StyleTarget::HeadingToCardsContact { heading, cards } => {
            heading_to_cards(&mut d, ax, heading.as_ref(), cards.as_ref(), geometry.fallback)
        }
        StyleTarget::Default {
            container,
            fallback_x,
        } => {
            let y = geometry.section.top() + config.default_turn_offset;
            let x = container.map(|c| c.left()).unwrap_or(*fallback_x);
            d.line_to(ax, y).line_to(clamp_run(ax, x, config.min_gap), y);
        }
    }

    d.finish()
}

fn elbow(d: &mut PathData, ax: f64, to: LayoutPoint) {
    d.line_to(ax, to.y).line_to(to.x, to.y);
}

/// Horizontal end of a `default` run: never closer to the anchor column than `min_gap`.
pub fn clamp_run(anchor_x: f64, target_x: f64, min_gap: f64) -> f64 {
    target_x.max(anchor_x + min_gap)
}

/// Two disconnected segments: one stopping at the heading's left edge, and one re-emerging
/// below the heading at its centre and running across the card grid. The `M` between them
/// leaves the gap where the line passes behind the heading text.
fn heading_to_cards(
    d: &mut PathData,
    ax: f64,
    heading: Option<&LayoutRect>,
    cards: Option<&LayoutRect>,
    fallback: LayoutPoint,
) {
    match (heading, cards) {
        (Some(heading), Some(cards)) => {
            let hy = heading.center_y();
            let hx = heading.center_x();
            let gy = cards.center_y();
            d.line_to(ax, hy).line_to(heading.left(), hy);
            d.move_to(hx, heading.bottom())
                .line_to(hx, gy)
                .line_to(cards.left(), gy)
                .line_to(cards.right(), gy);
        }
        (Some(heading), None) => {
            let hy = heading.center_y();
            d.line_to(ax, hy).line_to(heading.left(), hy);
        }
        (None, Some(cards)) => {
            let gy = cards.center_y();
            d.line_to(ax, gy)
                .line_to(cards.left(), gy)
                .line_to(cards.right(), gy);
        }
        (None, None) => elbow(d, ax, fallback),
    }
}
