//! Geometry resolution: live (or snapshotted) element boxes to overlay coordinates.

use crate::model::{LayoutPoint, LayoutRect, ResolvedGeometry, StyleTarget};
use tracery_core::geom::{self, Rect, Vector};
use tracery_core::{Connection, ConnectionStyle, EngineConfig, LayoutSource, Viewport};

/// Measures connection targets against one [`LayoutSource`] state.
///
/// The scroll offset and overlay origin are read once at construction, so every connection of
/// a pass is resolved against the same document state.
pub struct GeometryResolver<'a, S: LayoutSource + ?Sized> {
    source: &'a S,
    config: &'a EngineConfig,
    viewport: Viewport,
    /// Viewport-relative to overlay-relative translation.
    offset: Vector,
}

impl<'a, S: LayoutSource + ?Sized> GeometryResolver<'a, S> {
    pub fn new(source: &'a S, config: &'a EngineConfig) -> Self {
        let viewport = source.viewport();
        let scroll = geom::vector(viewport.scroll_x, viewport.scroll_y);
        // The overlay box is itself viewport-relative; lift it into document space first.
        let overlay_origin = source
            .element(&config.overlay_id)
            .map(|el| el.rect.to_rect().origin + scroll)
            .unwrap_or_else(|| geom::point(0.0, 0.0));
        let offset = scroll - overlay_origin.to_vector();
        Self {
            source,
            config,
            viewport,
            offset,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Converts a viewport-relative rectangle to overlay coordinates.
    pub fn to_overlay(&self, r: Rect) -> Rect {
        r.translate(self.offset)
    }

    /// Overlay-relative x of a viewport-relative x coordinate.
    fn overlay_x(&self, viewport_x: f64) -> f64 {
        viewport_x + self.offset.x
    }

    fn measure(&self, id: &str) -> Option<Rect> {
        let el = self.source.element(id)?;
        el.is_rendered().then(|| self.to_overlay(el.rect.to_rect()))
    }

    /// Heading box with vertical padding stripped, so the line meets the text rather than the
    /// padding around it.
    fn measure_content(&self, id: &str) -> Option<Rect> {
        let el = self.source.element(id)?;
        if !el.is_rendered() {
            return None;
        }
        let content = geom::inset_vertical(el.rect.to_rect(), el.padding.top, el.padding.bottom);
        Some(self.to_overlay(content))
    }

    fn nested(
        &self,
        connection: &Connection,
        id: Option<&str>,
        content_box: bool,
        reached: &mut Vec<String>,
    ) -> Option<LayoutRect> {
        let id = id?;
        let found = if content_box {
            self.measure_content(id)
        } else {
            self.measure(id)
        };
        match found {
            Some(r) => {
                reached.push(id.to_string());
                Some(r.into())
            }
            None => {
                tracing::trace!(
                    section = %connection.section_id,
                    element = id,
                    "nested target missing; using fallback"
                );
                None
            }
        }
    }

    /// Resolves one connection, or `None` when its section is absent or not laid out yet.
    pub fn resolve(&self, connection: &Connection) -> Option<ResolvedGeometry> {
        let Some(section) = self.measure(&connection.section_id) else {
            tracing::debug!(
                section = %connection.section_id,
                "section missing or zero height; skipping connection"
            );
            return None;
        };
        let section = LayoutRect::from(section);

        let heading_id = connection.heading_id.as_deref();
        let target_id = connection.target_id.as_deref();
        let mut reached = Vec::new();

        let target = match connection.style {
            ConnectionStyle::CrossThrough => StyleTarget::CrossThrough {
                grid: self.nested(connection, target_id, false, &mut reached),
            },
            ConnectionStyle::CenterPath => StyleTarget::CenterPath {
                card: self.nested(connection, target_id, false, &mut reached),
                waypoint_x: self.overlay_x(self.viewport.width / 2.0),
            },
            ConnectionStyle::HeadingConnect => StyleTarget::HeadingConnect {
                heading: self.nested(connection, heading_id, true, &mut reached),
            },
            ConnectionStyle::HeadingToCards => StyleTarget::HeadingToCards {
                heading: self.nested(connection, heading_id, true, &mut reached),
                cards: self.nested(connection, target_id, false, &mut reached),
            },
            ConnectionStyle::HeadingToCardsContact => StyleTarget::HeadingToCardsContact {
                heading: self.nested(connection, heading_id, true, &mut reached),
                cards: self.nested(connection, target_id, false, &mut reached),
            },
            ConnectionStyle::Default => StyleTarget::Default {
                container: self.nested(connection, target_id, false, &mut reached),
                fallback_x: self
                    .overlay_x(self.viewport.width * self.config.fallback_x_ratio),
            },
        };

        Some(ResolvedGeometry {
            section_id: connection.section_id.to_string(),
            anchor_x: connection.anchor_x,
            section,
            target,
            fallback: LayoutPoint {
                x: section.left() + self.config.fallback_offset_x,
                y: section.top() + self.config.fallback_offset_y,
            },
            reached,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracery_core::{BUILTIN_CONNECTIONS, DocumentSnapshot, ElementBox, Padding};

    fn faq() -> &'static Connection {
        static CONNECTIONS: [Connection; 6] = BUILTIN_CONNECTIONS;
        &CONNECTIONS[4]
    }

    #[test]
    fn adds_scroll_offset_to_viewport_boxes() {
        let snapshot = DocumentSnapshot::new(Viewport::new(1600.0, 900.0).scrolled_to(0.0, 500.0), 1600.0, 4000.0)
            .with_element("faq", ElementBox::new(0.0, 100.0, 1600.0, 600.0));
        let config = EngineConfig::default();
        let geometry = GeometryResolver::new(&snapshot, &config)
            .resolve(faq())
            .unwrap();
        assert_eq!(geometry.section.top(), 600.0);
    }

    #[test]
    fn subtracts_overlay_document_origin() {
        let snapshot = DocumentSnapshot::new(Viewport::new(1600.0, 900.0).scrolled_to(0.0, 500.0), 1600.0, 4000.0)
            .with_element("decorative-lines", ElementBox::new(0.0, -420.0, 1600.0, 4000.0))
            .with_element("faq", ElementBox::new(0.0, 100.0, 1600.0, 600.0));
        let config = EngineConfig::default();
        let geometry = GeometryResolver::new(&snapshot, &config)
            .resolve(faq())
            .unwrap();
        // Overlay sits at document y = 80, the section at document y = 600.
        assert_eq!(geometry.section.top(), 520.0);
    }

    #[test]
    fn zero_height_section_is_unresolved() {
        let snapshot = DocumentSnapshot::new(Viewport::new(1600.0, 900.0), 1600.0, 4000.0)
            .with_element("faq", ElementBox::new(0.0, 100.0, 1600.0, 0.0));
        let config = EngineConfig::default();
        assert!(GeometryResolver::new(&snapshot, &config).resolve(faq()).is_none());
    }

    #[test]
    fn heading_target_uses_content_box() {
        let snapshot = DocumentSnapshot::new(Viewport::new(1600.0, 900.0), 1600.0, 4000.0)
            .with_element("faq", ElementBox::new(0.0, 1900.0, 1600.0, 700.0))
            .with_element(
                "faq-heading",
                ElementBox::new(300.0, 2000.0, 400.0, 80.0).with_padding(Padding::vertical(10.0, 10.0)),
            );
        let config = EngineConfig::default();
        let geometry = GeometryResolver::new(&snapshot, &config)
            .resolve(faq())
            .unwrap();
        let StyleTarget::HeadingConnect { heading: Some(h) } = geometry.target else {
            panic!("expected a resolved heading, got {:?}", geometry.target);
        };
        assert_eq!(h.top(), 2010.0);
        assert_eq!(h.height, 60.0);
        assert_eq!(geometry.reached, ["faq-heading"]);
    }

    #[test]
    fn missing_heading_falls_back_instead_of_skipping() {
        let snapshot = DocumentSnapshot::new(Viewport::new(1600.0, 900.0), 1600.0, 4000.0)
            .with_element("faq", ElementBox::new(0.0, 1900.0, 1600.0, 700.0));
        let config = EngineConfig::default();
        let geometry = GeometryResolver::new(&snapshot, &config)
            .resolve(faq())
            .unwrap();
        assert_eq!(geometry.target, StyleTarget::HeadingConnect { heading: None });
        assert_eq!(geometry.fallback, LayoutPoint { x: 160.0, y: 2000.0 });
        assert!(geometry.reached.is_empty());
    }

    #[test]
    fn center_path_waypoint_tracks_horizontal_scroll() {
        let snapshot = DocumentSnapshot::new(Viewport::new(1600.0, 900.0).scrolled_to(40.0, 0.0), 1700.0, 4000.0)
            .with_element("about", ElementBox::new(-40.0, 1200.0, 1700.0, 700.0));
        let config = EngineConfig::default();
        let geometry = GeometryResolver::new(&snapshot, &config)
            .resolve(&BUILTIN_CONNECTIONS[1])
            .unwrap();
        assert_eq!(geometry.section.left(), 0.0);
        assert_eq!(
            geometry.target,
            StyleTarget::CenterPath {
                card: None,
                waypoint_x: 840.0
            }
        );
    }
}
