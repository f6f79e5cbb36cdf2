#![forbid(unsafe_code)]

//! Headless model for decorative connector lines.
//!
//! This crate owns everything that does not depend on how paths are routed:
//! - the [`Registry`] of connections (which section each line targets, and how)
//! - the document model ([`LayoutSource`], [`DocumentSnapshot`]) that stands in for a live DOM
//! - [`EngineConfig`], the tunable constants shared by the resolver, builder and driver

pub mod config;
pub mod document;
pub mod error;
pub mod geom;
pub mod registry;

pub use config::EngineConfig;
pub use document::{DocumentSnapshot, ElementBox, ElementRect, LayoutSource, Padding, Viewport};
pub use error::{Error, Result};
pub use registry::{BUILTIN_CONNECTIONS, Connection, ConnectionStyle, Registry};
