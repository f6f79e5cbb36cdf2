//! Decides when overlays are recomputed and committed.
//!
//! The driver is a single-threaded state machine. The host owns the real event sources
//! (window listeners, resize/intersection observers, font loading, animation frames) and
//! forwards them to [`RenderDriver::handle`] and [`RenderDriver::on_frame`]. Every trigger
//! performs a full, idempotent recompute; overlapping triggers are allowed and the last
//! commit wins.

use crate::budget::FrameBudget;
use rustc_hash::FxHashSet;
use std::time::Duration;
use tracery_core::{EngineConfig, LayoutSource, Registry};
use tracery_render::model::OverlayLayout;
use tracery_render::render_overlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEvent {
    Resize,
    Load,
    Scroll,
}

/// Event sources the driver listens to while mounted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subscription {
    Window(WindowEvent),
    /// Resize observation of the document body (content height changes, late images).
    BodyResize,
    /// One-shot notification that web fonts finished loading.
    FontsReady,
    /// Intersection observation of one section.
    Intersection { section_id: String },
}

/// An event delivered by the host for an active [`Subscription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Window(WindowEvent),
    BodyResized,
    FontsReady,
    /// A watched section entered the viewport.
    SectionVisible { section_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// The page the driver draws on.
pub trait Host: LayoutSource {
    /// Replaces the displayed overlay.
    fn commit(&mut self, overlay: &OverlayLayout);

    fn subscribe(&mut self, subscription: &Subscription) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Asks for [`RenderDriver::on_frame`] to be called on the next animation frame.
    fn request_frame(&mut self) -> FrameId;

    fn cancel_frame(&mut self, id: FrameId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Mounted,
    Unmounted,
}

pub struct RenderDriver {
    registry: Registry,
    config: EngineConfig,
    phase: Phase,
    subscriptions: Vec<SubscriptionId>,
    pending_frame: Option<FrameId>,
    budget: FrameBudget,
    seen_sections: FxHashSet<String>,
    passes: u64,
}

impl RenderDriver {
    pub fn new(registry: Registry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            phase: Phase::Idle,
            subscriptions: Vec::new(),
            pending_frame: None,
            budget: FrameBudget::default(),
            seen_sections: FxHashSet::default(),
            passes: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of render passes committed so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn budget(&self) -> FrameBudget {
        self.budget
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Subscribes to every trigger, renders once and starts the post-mount frame budget.
    pub fn mount<H: Host>(&mut self, host: &mut H, now: Duration) {
        if self.phase != Phase::Idle {
            tracing::debug!(phase = ?self.phase, "mount ignored");
            return;
        }
        self.phase = Phase::Mounted;

        let mut wanted = vec![
            Subscription::Window(WindowEvent::Resize),
            Subscription::Window(WindowEvent::Load),
            Subscription::Window(WindowEvent::Scroll),
            Subscription::BodyResize,
            Subscription::FontsReady,
        ];
        wanted.extend(self.registry.iter().map(|c| Subscription::Intersection {
            section_id: c.section_id.to_string(),
        }));
        for subscription in &wanted {
            let id = host.subscribe(subscription);
            self.subscriptions.push(id);
        }

        self.render(host);
        self.budget
            .extend(now, Duration::from_millis(self.config.mount_budget_ms));
        self.schedule_frame(host);
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event, now: Duration) {
        if self.phase != Phase::Mounted {
            tracing::trace!(?event, phase = ?self.phase, "event ignored");
            return;
        }

        if let Event::SectionVisible { section_id } = event {
            if self.registry.get(section_id).is_none() {
                tracing::trace!(section = %section_id, "visibility of unregistered section");
            } else if self.seen_sections.insert(section_id.clone()) {
                tracing::debug!(section = %section_id, "section entered viewport");
                self.budget.extend(
                    now,
                    Duration::from_millis(self.config.intersection_budget_ms),
                );
                self.schedule_frame(host);
            }
        }

        self.render(host);
    }

    /// Animation-frame callback. Stale or cancelled frames are ignored.
    pub fn on_frame<H: Host>(&mut self, host: &mut H, frame: FrameId, now: Duration) {
        if self.phase != Phase::Mounted || self.pending_frame != Some(frame) {
            return;
        }
        self.pending_frame = None;

        self.render(host);
        if self.budget.is_live(now) {
            self.schedule_frame(host);
        } else {
            self.budget.expire();
        }
    }

    /// Releases every subscription and pending frame. Later events and frames are no-ops.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        if self.phase != Phase::Mounted {
            self.phase = Phase::Unmounted;
            return;
        }
        if let Some(frame) = self.pending_frame.take() {
            host.cancel_frame(frame);
        }
        for id in self.subscriptions.drain(..) {
            host.unsubscribe(id);
        }
        self.budget.expire();
        self.phase = Phase::Unmounted;
        tracing::debug!(passes = self.passes, "driver unmounted");
    }

    fn schedule_frame<H: Host>(&mut self, host: &mut H) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(host.request_frame());
        }
    }

    fn render<H: Host>(&mut self, host: &mut H) {
        let overlay = render_overlay(&*host, &self.registry, &self.config);
        host.commit(&overlay);
        self.passes += 1;
    }
}
