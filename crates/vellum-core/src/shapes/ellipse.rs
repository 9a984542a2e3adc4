//! Ellipse shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse, positioned by the top-left corner of its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Left edge of the bounding box.
    pub left: f64,
    /// Top edge of the bounding box.
    pub top: f64,
    /// Horizontal radius.
    pub rx: f64,
    /// Vertical radius.
    pub ry: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse with its bounding box anchored at `origin`.
    pub fn new(origin: Point, rx: f64, ry: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            left: origin.x,
            top: origin.y,
            rx,
            ry,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle (equal radii).
    pub fn circle(origin: Point, radius: f64) -> Self {
        Self::new(origin, radius, radius)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.rx * 2.0,
            self.top + self.ry * 2.0,
        )
    }
}
