use serde::{Deserialize, Serialize};
use tracery_core::geom::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned box in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

impl From<Rect> for LayoutRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.origin.x,
            y: r.origin.y,
            width: r.size.width,
            height: r.size.height,
        }
    }
}

/// Per-style nested targets found inside a section.
///
/// Every nested rectangle is optional: `None` means the element was missing (or not laid out
/// yet) and the builder routes to [`ResolvedGeometry::fallback`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "kebab-case")]
pub enum StyleTarget {
    CrossThrough {
        grid: Option<LayoutRect>,
    },
    CenterPath {
        card: Option<LayoutRect>,
        /// Horizontal midpoint of the viewport.
        waypoint_x: f64,
    },
    HeadingConnect {
        /// Heading content box (vertical padding removed).
        heading: Option<LayoutRect>,
    },
    HeadingToCards {
        heading: Option<LayoutRect>,
        cards: Option<LayoutRect>,
    },
    HeadingToCardsContact {
        heading: Option<LayoutRect>,
        cards: Option<LayoutRect>,
    },
    Default {
        container: Option<LayoutRect>,
        /// Viewport-proportional horizontal target used when `container` is missing.
        fallback_x: f64,
    },
}

/// Overlay-relative geometry for one connection on one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub section_id: String,
    pub anchor_x: f64,
    pub section: LayoutRect,
    pub target: StyleTarget,
    pub fallback: LayoutPoint,
    /// Ids of the nested elements that were found, in lookup order.
    pub reached: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPath {
    pub section_id: String,
    pub color: String,
    /// SVG path data.
    pub d: String,
    /// Elements the line actually touches; hosts use this to mark them as connected.
    pub highlight: Vec<String>,
}

/// Result of one full render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub width: f64,
    pub height: f64,
    /// `false` below the viewport breakpoint; `paths` is empty in that case.
    pub visible: bool,
    pub paths: Vec<ConnectorPath>,
    /// Sections that could not be resolved on this pass.
    pub skipped: Vec<String>,
}

impl OverlayLayout {
    pub fn path(&self, section_id: &str) -> Option<&ConnectorPath> {
        self.paths.iter().find(|p| p.section_id == section_id)
    }
}
