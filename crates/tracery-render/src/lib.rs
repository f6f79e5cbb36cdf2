#![forbid(unsafe_code)]

//! Layout + SVG output for decorative connector lines.
//!
//! A render pass resolves every registry connection against a [`LayoutSource`], builds one
//! orthogonal path per resolved connection and collects the result into an [`OverlayLayout`].
//! Connections whose section is missing are skipped for the pass; nothing here fails because a
//! page element is absent.

pub mod model;
pub mod path;
pub mod resolve;
pub mod svg;

use crate::model::{ConnectorPath, OverlayLayout, ResolvedGeometry};
use crate::resolve::GeometryResolver;
use std::time::Instant;
use tracery_core::{DocumentSnapshot, EngineConfig, LayoutSource, Registry};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tracery_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Whether the viewport is wide enough for the overlay to be drawn at all.
pub fn overlay_enabled(source: &(impl LayoutSource + ?Sized), config: &EngineConfig) -> bool {
    source.viewport().width >= config.min_viewport_width
}

/// Resolves every connection, in registry order, dropping the unresolved ones.
pub fn resolve_all(
    source: &(impl LayoutSource + ?Sized),
    registry: &Registry,
    config: &EngineConfig,
) -> Vec<ResolvedGeometry> {
    let resolver = GeometryResolver::new(source, config);
    registry
        .iter()
        .filter_map(|c| resolver.resolve(c))
        .collect()
}

/// Runs one full render pass.
pub fn render_overlay(
    source: &(impl LayoutSource + ?Sized),
    registry: &Registry,
    config: &EngineConfig,
) -> OverlayLayout {
    let start = pass_timer();
    let viewport = source.viewport();
    let document = source.document_size();
    let mut overlay = OverlayLayout {
        width: document.width.max(viewport.width),
        height: document.height.max(viewport.height),
        visible: overlay_enabled(source, config),
        paths: Vec::new(),
        skipped: Vec::new(),
    };
    if !overlay.visible {
        tracing::debug!(
            viewport_width = viewport.width,
            min_viewport_width = config.min_viewport_width,
            "viewport below breakpoint; overlay hidden"
        );
        return overlay;
    }

    let resolver = GeometryResolver::new(source, config);
    for connection in registry {
        match resolver.resolve(connection) {
            Some(geometry) => overlay.paths.push(ConnectorPath {
                section_id: geometry.section_id.clone(),
                color: connection.color.to_string(),
                d: path::build_path(&geometry, config),
                highlight: geometry.reached,
            }),
            None => overlay.skipped.push(connection.section_id.to_string()),
        }
    }

    if let Some(start) = start {
        tracing::trace!(
            drawn = overlay.paths.len(),
            skipped = overlay.skipped.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "render pass"
        );
    }
    overlay
}

/// Only reads the clock when the pass timing would actually be logged; hosts without a
/// monotonic clock (browsers on `wasm32-unknown-unknown`) never reach `Instant::now`.
fn pass_timer() -> Option<Instant> {
    tracing::enabled!(tracing::Level::TRACE).then(Instant::now)
}

/// Render pass straight to SVG markup.
pub fn render_overlay_svg(
    source: &(impl LayoutSource + ?Sized),
    registry: &Registry,
    config: &EngineConfig,
    options: &svg::SvgRenderOptions,
) -> String {
    let overlay = render_overlay(source, registry, config);
    svg::render_overlay_svg(&overlay, config, options)
}

/// Parses a JSON [`DocumentSnapshot`] and runs one render pass over it.
pub fn render_snapshot_str(
    snapshot_json: &str,
    registry: &Registry,
    config: &EngineConfig,
) -> Result<OverlayLayout> {
    let snapshot = DocumentSnapshot::from_json_str(snapshot_json)?;
    Ok(render_overlay(&snapshot, registry, config))
}
