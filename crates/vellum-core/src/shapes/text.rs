//! Text shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text label. Layout is the renderer's job; bounds here are an
/// approximation from character count and font size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Left edge of the text box.
    pub left: f64,
    /// Top edge of the text box.
    pub top: f64,
    /// The text content.
    pub content: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Create a text shape at the given position.
    pub fn new(origin: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            left: origin.x,
            top: origin.y,
            content,
            font_size: 20.0,
            style: ShapeStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        let width = self.content.chars().count() as f64 * self.font_size * 0.6;
        let height = self.font_size * 1.2;
        Rect::new(self.left, self.top, self.left + width, self.top + height)
    }
}
