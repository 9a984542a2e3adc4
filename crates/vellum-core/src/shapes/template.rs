//! Template-path shape: a fixed path scaled from its native extent.

use super::{ShapeId, ShapeStyle};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// Native unscaled extent of the built-in star template.
pub const STAR_EXTENT: f64 = 22.0;

/// Stroke width of an unscaled template.
const TEMPLATE_STROKE_WIDTH: f64 = 0.5;

/// A shape defined by a fixed template path, grown by re-sampling the
/// template at the current scale factors rather than by a scene transform,
/// so stroke width stays visually consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatePath {
    pub(crate) id: ShapeId,
    /// Left edge of the bounding box.
    pub left: f64,
    /// Top edge of the bounding box.
    pub top: f64,
    /// The unscaled template path.
    pub template: BezPath,
    /// Center offset of the unscaled template's bounding box.
    pub template_offset: Point,
    /// Native size of the template, the denominator for drag-derived scale.
    pub reference_extent: f64,
    /// Stroke width of the unscaled template.
    pub original_stroke_width: f64,
    /// Current path, re-sampled from the template.
    pub path: BezPath,
    /// Current width (`scale_x * reference_extent`).
    pub width: f64,
    /// Current height (`scale_y * reference_extent`).
    pub height: f64,
    /// Current path offset (template offset scaled).
    pub path_offset: Point,
    /// Current horizontal scale factor.
    pub scale_x: f64,
    /// Current vertical scale factor.
    pub scale_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl TemplatePath {
    /// Create a template shape anchored at `origin`, at scale 1.
    pub fn new(origin: Point, template: BezPath, reference_extent: f64) -> Self {
        let bbox = template.bounding_box();
        let mut shape = Self {
            id: Uuid::new_v4(),
            left: origin.x,
            top: origin.y,
            template_offset: bbox.center(),
            reference_extent,
            original_stroke_width: TEMPLATE_STROKE_WIDTH,
            path: template.clone(),
            template,
            width: reference_extent,
            height: reference_extent,
            path_offset: Point::ZERO,
            scale_x: 1.0,
            scale_y: 1.0,
            style: ShapeStyle {
                stroke_width: TEMPLATE_STROKE_WIDTH,
                ..ShapeStyle::default()
            },
        };
        shape.set_scale(1.0, 1.0);
        shape
    }

    /// The built-in five-pointed star template (22x22 native extent).
    pub fn star(origin: Point) -> Self {
        Self::new(origin, star_path(), STAR_EXTENT)
    }

    /// Re-sample the path from the unscaled template at the given scale
    /// factors. Width, height, path offset, and stroke width are re-derived.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        let mut path = self.template.clone();
        path.apply_affine(Affine::scale_non_uniform(scale_x, scale_y));
        self.path = path;
        self.width = scale_x * self.reference_extent;
        self.height = scale_y * self.reference_extent;
        self.path_offset = Point::new(
            scale_x * self.template_offset.x,
            scale_y * self.template_offset.y,
        );
        self.style.stroke_width = self.original_stroke_width * (scale_x + scale_y) / 2.0;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.left + self.width, self.top + self.height)
    }
}

/// Build the five-pointed star polygon used as the default template.
/// Vertices alternate between the outer and inner radius, starting at the
/// top, inside a 22x22 box.
fn star_path() -> BezPath {
    let center = Point::new(STAR_EXTENT / 2.0, STAR_EXTENT / 2.0);
    let outer = STAR_EXTENT / 2.0;
    let inner = outer * 0.382;

    let mut path = BezPath::new();
    for i in 0..10 {
        let angle = -PI / 2.0 + (i as f64) * PI / 5.0;
        let radius = if i % 2 == 0 { outer } else { inner };
        let vertex = Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
        if i == 0 {
            path.move_to(vertex);
        } else {
            path.line_to(vertex);
        }
    }
    path.close_path();
    path
}
