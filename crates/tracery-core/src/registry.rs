//! Which page section each decorative line connects to, and how it gets there.

use crate::{Error, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Routing strategy for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStyle {
    /// One elbow ending at the right edge of a grid, vertically centred.
    CrossThrough,
    /// Routes through the viewport midpoint before reaching a card's left edge.
    CenterPath,
    /// One elbow ending at a heading's left edge, centred on its content box.
    HeadingConnect,
    /// Passes behind a heading, then runs across a grid of cards.
    HeadingToCards,
    /// Same as [`ConnectionStyle::HeadingToCards`] for the two-column contact grid.
    HeadingToCardsContact,
    #[serde(alias = "unclassified")]
    Default,
}

impl ConnectionStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrossThrough => "cross-through",
            Self::CenterPath => "center-path",
            Self::HeadingConnect => "heading-connect",
            Self::HeadingToCards => "heading-to-cards",
            Self::HeadingToCardsContact => "heading-to-cards-contact",
            Self::Default => "default",
        }
    }

    /// Whether connections of this style route to a heading and need `heading_id`.
    pub fn needs_heading(self) -> bool {
        matches!(
            self,
            Self::HeadingConnect | Self::HeadingToCards | Self::HeadingToCardsContact
        )
    }

    /// Whether connections of this style route to a grid or card and need `target_id`.
    pub fn needs_target(self) -> bool {
        matches!(
            self,
            Self::CrossThrough
                | Self::CenterPath
                | Self::HeadingToCards
                | Self::HeadingToCardsContact
        )
    }
}

impl std::fmt::Display for ConnectionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one decorative line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub section_id: Cow<'static, str>,
    /// Horizontal slot of the vertical entry segment, in overlay coordinates.
    pub anchor_x: f64,
    #[serde(default = "default_color")]
    pub color: Cow<'static, str>,
    pub style: ConnectionStyle,
    #[serde(default)]
    pub heading_id: Option<Cow<'static, str>>,
    /// Grid, card or inner container looked up inside the section, depending on `style`.
    #[serde(default)]
    pub target_id: Option<Cow<'static, str>>,
}

pub const LINE_COLOR: &str = "#F2CA50";

fn default_color() -> Cow<'static, str> {
    Cow::Borrowed(LINE_COLOR)
}

const fn builtin(
    section_id: &'static str,
    anchor_x: f64,
    style: ConnectionStyle,
    heading_id: Option<&'static str>,
    target_id: Option<&'static str>,
) -> Connection {
    Connection {
        section_id: Cow::Borrowed(section_id),
        anchor_x,
        color: Cow::Borrowed(LINE_COLOR),
        style,
        heading_id: match heading_id {
            Some(id) => Some(Cow::Borrowed(id)),
            None => None,
        },
        target_id: match target_id {
            Some(id) => Some(Cow::Borrowed(id)),
            None => None,
        },
    }
}

/// The six connections drawn on the home page, outermost anchor first.
pub const BUILTIN_CONNECTIONS: [Connection; 6] = [
    builtin(
        "statistics",
        72.0,
        ConnectionStyle::CrossThrough,
        None,
        Some("statistics-grid"),
    ),
    builtin(
        "about",
        64.0,
        ConnectionStyle::CenterPath,
        None,
        Some("about-card"),
    ),
    builtin(
        "services",
        56.0,
        ConnectionStyle::HeadingConnect,
        Some("services-heading"),
        None,
    ),
    builtin(
        "border-services",
        48.0,
        ConnectionStyle::HeadingToCards,
        Some("border-services-heading"),
        Some("border-services-grid"),
    ),
    builtin(
        "faq",
        40.0,
        ConnectionStyle::HeadingConnect,
        Some("faq-heading"),
        None,
    ),
    builtin(
        "contact-form",
        32.0,
        ConnectionStyle::HeadingToCardsContact,
        Some("contact-form-heading"),
        Some("contact-form-grid"),
    ),
];

/// Ordered, validated list of connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    connections: Vec<Connection>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    pub fn builtin() -> Self {
        Self {
            connections: BUILTIN_CONNECTIONS.to_vec(),
        }
    }

    /// Validates anchor ordering and section uniqueness.
    ///
    /// Anchors must be strictly monotonic (either direction) with a uniform step so the
    /// vertical runs form a comb and never overlap before they diverge.
    pub fn from_connections(connections: Vec<Connection>) -> Result<Self> {
        if connections.is_empty() {
            return Err(invalid("at least one connection is required"));
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for c in &connections {
            if c.section_id.trim().is_empty() {
                return Err(invalid("section_id must not be empty"));
            }
            if !seen.insert(c.section_id.as_ref()) {
                return Err(invalid(format!("duplicate section_id `{}`", c.section_id)));
            }
            if !c.anchor_x.is_finite() {
                return Err(invalid(format!(
                    "anchor_x of `{}` must be finite",
                    c.section_id
                )));
            }
            if c.style.needs_heading() && !has_id(c.heading_id.as_deref()) {
                return Err(invalid(format!(
                    "`{}` uses style {} and needs a heading_id",
                    c.section_id, c.style
                )));
            }
            if c.style.needs_target() && !has_id(c.target_id.as_deref()) {
                return Err(invalid(format!(
                    "`{}` uses style {} and needs a target_id",
                    c.section_id, c.style
                )));
            }
        }

        if let [first, second, ..] = connections.as_slice() {
            let step = second.anchor_x - first.anchor_x;
            if step == 0.0 {
                return Err(invalid(format!(
                    "`{}` and `{}` share anchor_x {}",
                    first.section_id, second.section_id, first.anchor_x
                )));
            }
            for pair in connections.windows(2) {
                let delta = pair[1].anchor_x - pair[0].anchor_x;
                if (delta - step).abs() > 1e-9 {
                    return Err(invalid(format!(
                        "anchor_x of `{}` breaks the fixed step of {step} (got {delta})",
                        pair[1].section_id
                    )));
                }
            }
        }

        tracing::debug!(connections = connections.len(), "registry loaded");
        Ok(Self { connections })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let connections: Vec<Connection> = serde_json::from_str(text)?;
        Self::from_connections(connections)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Connection> {
        self.connections.iter()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn get(&self, section_id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.section_id == section_id)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.connections.iter()
    }
}

fn has_id(id: Option<&str>) -> bool {
    id.is_some_and(|id| !id.trim().is_empty())
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidRegistry {
        message: message.into(),
    }
}
