//! Measurement interface standing in for a live DOM.
//!
//! Element boxes are reported the way `getBoundingClientRect` reports them: relative to the
//! current viewport. Converting them to document coordinates is the resolver's job.

use crate::geom::{self, Rect, Size};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scroll offsets and size of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn scrolled_to(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn to_rect(self) -> Rect {
        geom::rect(self.left, self.top, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn vertical(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            ..Default::default()
        }
    }
}

/// A rendered element: its viewport-relative border box plus computed padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBox {
    #[serde(flatten)]
    pub rect: ElementRect,
    #[serde(default)]
    pub padding: Padding,
}

impl ElementBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            rect: ElementRect::new(left, top, width, height),
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Whether the element has been laid out with a visible height.
    pub fn is_rendered(&self) -> bool {
        self.rect.height > 0.0
    }
}

/// Read-only view of the page used to measure connection targets.
pub trait LayoutSource {
    fn viewport(&self) -> Viewport;

    /// Looks up an element by id. `None` means the element is not in the document.
    fn element(&self, id: &str) -> Option<ElementBox>;

    /// Full scrollable size of the document.
    fn document_size(&self) -> Size;
}

impl<T: LayoutSource + ?Sized> LayoutSource for &T {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn element(&self, id: &str) -> Option<ElementBox> {
        (**self).element(id)
    }

    fn document_size(&self) -> Size {
        (**self).document_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentExtent {
    pub width: f64,
    pub height: f64,
}

/// A frozen measurement of a page, usually loaded from JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub viewport: Viewport,
    #[serde(default)]
    pub document: DocumentExtent,
    #[serde(default)]
    pub elements: IndexMap<String, ElementBox>,
}

impl DocumentSnapshot {
    pub fn new(viewport: Viewport, document_width: f64, document_height: f64) -> Self {
        Self {
            viewport,
            document: DocumentExtent {
                width: document_width,
                height: document_height,
            },
            elements: IndexMap::new(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn with_element(mut self, id: impl Into<String>, element: ElementBox) -> Self {
        self.insert(id, element);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, element: ElementBox) {
        self.elements.insert(id.into(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<ElementBox> {
        self.elements.shift_remove(id)
    }

    pub fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        for (name, v) in [
            ("viewport.scroll_x", vp.scroll_x),
            ("viewport.scroll_y", vp.scroll_y),
            ("viewport.width", vp.width),
            ("viewport.height", vp.height),
            ("document.width", self.document.width),
            ("document.height", self.document.height),
        ] {
            if !v.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
        }
        if vp.width < 0.0 || vp.height < 0.0 {
            return Err(invalid("viewport size must not be negative".to_string()));
        }

        for (id, el) in &self.elements {
            let r = &el.rect;
            let p = &el.padding;
            let all = [
                r.top, r.left, r.width, r.height, p.top, p.right, p.bottom, p.left,
            ];
            if all.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("element `{id}` has a non-finite box")));
            }
            if r.width < 0.0 || r.height < 0.0 {
                return Err(invalid(format!("element `{id}` has a negative size")));
            }
        }
        Ok(())
    }
}

impl LayoutSource for DocumentSnapshot {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element(&self, id: &str) -> Option<ElementBox> {
        self.elements.get(id).copied()
    }

    fn document_size(&self) -> Size {
        geom::size(self.document.width, self.document.height)
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidSnapshot { message }
}
