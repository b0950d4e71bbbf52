//! Diagram value objects
//!
//! Value objects are immutable types that represent concepts in the diagram
//! domain. They are compared by value rather than identity and encapsulate
//! domain validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node, unique for the lifetime of a diagram session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Create an edge id from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Deterministic id for a directed node pair.
    ///
    /// Both the proximity suggester and the deletion reconnector synthesize
    /// edges through this, so the same ordered pair always yields the same id.
    pub fn directed(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("{source}->{target}"))
    }

    /// Get the string representation of the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Represents the position of a node in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Get the Euclidean distance to another position
    pub fn distance_to(&self, other: &Position2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Position2D {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents the rendered size of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size
    pub fn new(width: f64, height: f64) -> Result<Self, String> {
        if width <= 0.0 || height <= 0.0 {
            return Err("Size dimensions must be positive".to_string());
        }
        Ok(Self { width, height })
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
        }
    }
}

/// Represents a color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Common color constants
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Visual style attributes stored on a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    /// Fill color behind the node label, when overridden by the user
    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<Color>,
}

/// Side of a node where edges attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Pan and zoom state of the canvas, persisted alongside the graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
