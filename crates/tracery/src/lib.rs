#![forbid(unsafe_code)]

//! `tracery` draws decorative connector lines from a comb of fixed anchor columns at the top of
//! a page down to headings, cards and grids inside named sections.
//!
//! - [`tracery_core`]: registry, document model, configuration
//! - [`tracery_render`]: geometry resolution, path building, SVG output
//! - [`driver`]: when to recompute (mount, frame budgets, observers) and teardown

pub use tracery_core::*;

pub mod budget;
pub mod driver;

pub mod render {
    pub use tracery_render::model::{
        ConnectorPath, LayoutPoint, LayoutRect, OverlayLayout, ResolvedGeometry, StyleTarget,
    };
    pub use tracery_render::path::{PathData, build_path, clamp_run};
    pub use tracery_render::resolve::GeometryResolver;
    pub use tracery_render::svg::{self, SvgRenderOptions};
    pub use tracery_render::{overlay_enabled, render_overlay, render_overlay_svg, resolve_all};
}

use render::{OverlayLayout, ResolvedGeometry, SvgRenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Core(#[from] tracery_core::Error),
    #[error(transparent)]
    Render(#[from] tracery_render::Error),
}

pub type HeadlessResult<T> = std::result::Result<T, HeadlessError>;

/// Bundles a registry, engine config and SVG options for one-shot rendering of snapshots.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub registry: Registry,
    pub config: EngineConfig,
    pub svg: SvgRenderOptions,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Applies a JSON config document over the defaults.
    pub fn with_config_json(self, text: &str) -> HeadlessResult<Self> {
        Ok(self.with_config(EngineConfig::from_json_str(text)?))
    }

    pub fn with_registry_json(self, text: &str) -> HeadlessResult<Self> {
        Ok(self.with_registry(Registry::from_json_str(text)?))
    }

    pub fn resolve(&self, source: &(impl LayoutSource + ?Sized)) -> Vec<ResolvedGeometry> {
        render::resolve_all(source, &self.registry, &self.config)
    }

    pub fn layout(&self, source: &(impl LayoutSource + ?Sized)) -> OverlayLayout {
        render::render_overlay(source, &self.registry, &self.config)
    }

    pub fn render_svg(&self, source: &(impl LayoutSource + ?Sized)) -> String {
        render::render_overlay_svg(source, &self.registry, &self.config, &self.svg)
    }

    pub fn resolve_snapshot_json(&self, text: &str) -> HeadlessResult<Vec<ResolvedGeometry>> {
        let snapshot = DocumentSnapshot::from_json_str(text)?;
        Ok(self.resolve(&snapshot))
    }

    pub fn layout_snapshot_json(&self, text: &str) -> HeadlessResult<OverlayLayout> {
        Ok(tracery_render::render_snapshot_str(
            text,
            &self.registry,
            &self.config,
        )?)
    }

    pub fn render_svg_snapshot_json(&self, text: &str) -> HeadlessResult<String> {
        let snapshot = DocumentSnapshot::from_json_str(text)?;
        Ok(self.render_svg(&snapshot))
    }

    pub fn driver(&self) -> driver::RenderDriver {
        driver::RenderDriver::new(self.registry.clone(), self.config.clone())
    }
}
