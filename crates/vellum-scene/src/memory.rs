//! In-memory scene implementation.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vellum_core::scene::{RestoreDone, Scene, SceneResult, Snapshot};
use vellum_core::shapes::{Shape, ShapeId};

/// Snapshot payload: every object with its persisted attributes, in
/// z-order. Transient view state (selection mode, cached coordinates,
/// pending renders, viewport) is deliberately absent.
#[derive(Debug, Serialize, Deserialize)]
struct SceneDoc {
    objects: Vec<Shape>,
}

/// A scene collaborator backed by plain memory.
///
/// Restores complete synchronously; the completion callback still fires
/// after the rebuild, honoring the asynchronous contract.
pub struct MemoryScene {
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of objects (back to front).
    z_order: Vec<ShapeId>,
    /// Cached bounding geometry, refreshed by `recompute_coords`.
    coords: HashMap<ShapeId, Rect>,
    selection_enabled: bool,
    render_requested: bool,
    /// Viewport pan offset, in viewport units.
    pan: Vec2,
    /// Viewport zoom factor.
    zoom: f64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            coords: HashMap::new(),
            selection_enabled: true,
            render_requested: false,
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Set the viewport transform used for pointer translation.
    pub fn set_view(&mut self, pan: Vec2, zoom: f64) {
        self.pan = pan;
        self.zoom = if zoom.abs() < f64::EPSILON { 1.0 } else { zoom };
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Read access to an object.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Objects in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// The cached bounding geometry for an object. Stale until the next
    /// `recompute_coords` after a mutation.
    pub fn cached_coords(&self, id: ShapeId) -> Option<Rect> {
        self.coords.get(&id).copied()
    }

    /// Consume the pending render request, if one was batched.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for MemoryScene {
    fn insert(&mut self, shape: Shape) {
        let id = shape.id();
        self.coords.insert(id, shape.bounds());
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        self.render_requested = true;
    }

    fn remove_all(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.coords.clear();
        self.render_requested = true;
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn to_scene(&self, viewport: Point) -> Point {
        Point::new(
            (viewport.x - self.pan.x) / self.zoom,
            (viewport.y - self.pan.y) / self.zoom,
        )
    }

    fn serialize(&self) -> SceneResult<Snapshot> {
        let doc = SceneDoc {
            objects: self.shapes_ordered().cloned().collect(),
        };
        Ok(Snapshot::new(serde_json::to_string(&doc)?))
    }

    fn restore(&mut self, snapshot: &Snapshot, on_complete: RestoreDone) -> SceneResult<()> {
        // Parse before touching anything; a malformed snapshot must leave
        // the scene as it was.
        let doc: SceneDoc = serde_json::from_str(snapshot.as_str())?;

        self.shapes.clear();
        self.z_order.clear();
        self.coords.clear();
        for shape in doc.objects {
            let id = shape.id();
            self.coords.insert(id, shape.bounds());
            self.z_order.push(id);
            self.shapes.insert(id, shape);
        }
        self.render_requested = true;
        log::debug!("scene restored: {} objects", self.shapes.len());

        on_complete();
        Ok(())
    }

    fn recompute_coords(&mut self, id: ShapeId) {
        if let Some(shape) = self.shapes.get(&id) {
            self.coords.insert(id, shape.bounds());
        }
    }

    fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
    }

    fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::shapes::Ellipse;

    fn ellipse(x: f64, y: f64) -> Shape {
        Shape::Ellipse(Ellipse::new(Point::new(x, y), 10.0, 5.0))
    }

    #[test]
    fn test_insert_and_order() {
        let mut scene = MemoryScene::new();
        let first = ellipse(0.0, 0.0);
        let second = ellipse(50.0, 50.0);
        let ids = [first.id(), second.id()];

        scene.insert(first);
        scene.insert(second);

        let ordered: Vec<ShapeId> = scene.shapes_ordered().map(Shape::id).collect();
        assert_eq!(ordered, ids);
    }

    #[test]
    fn test_serialize_restore_round_trip() {
        let mut scene = MemoryScene::new();
        let shape = ellipse(10.0, 20.0);
        let id = shape.id();
        scene.insert(shape);

        let snapshot = scene.serialize().unwrap();
        scene.remove_all();
        assert!(scene.is_empty());

        scene.restore(&snapshot, Box::new(|| {})).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.shape(id).is_some(), "object identity survives restore");
    }

    #[test]
    fn test_restore_fires_completion() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut scene = MemoryScene::new();
        scene.insert(ellipse(0.0, 0.0));
        let snapshot = scene.serialize().unwrap();

        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        scene.restore(&snapshot, Box::new(move || flag.set(true))).unwrap();
        assert!(fired.get());
    }

    #[test]
    fn test_malformed_snapshot_leaves_scene_untouched() {
        let mut scene = MemoryScene::new();
        scene.insert(ellipse(0.0, 0.0));

        let result = scene.restore(&Snapshot::new("{broken".to_string()), Box::new(|| {}));
        assert!(result.is_err());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_coords_stale_until_recomputed() {
        let mut scene = MemoryScene::new();
        let shape = ellipse(0.0, 0.0);
        let id = shape.id();
        scene.insert(shape);

        let before = scene.cached_coords(id).unwrap();
        if let Some(Shape::Ellipse(e)) = scene.shape_mut(id) {
            e.left = 100.0;
        }
        assert_eq!(scene.cached_coords(id).unwrap(), before);

        scene.recompute_coords(id);
        assert!((scene.cached_coords(id).unwrap().x0 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_render_requests_batch() {
        let mut scene = MemoryScene::new();
        scene.request_render();
        scene.request_render();

        assert!(scene.take_render_request());
        assert!(!scene.take_render_request());
    }

    #[test]
    fn test_pointer_translation() {
        let mut scene = MemoryScene::new();
        scene.set_view(Vec2::new(100.0, 50.0), 2.0);

        let p = scene.to_scene(Point::new(300.0, 150.0));
        assert!((p.x - 100.0).abs() < f64::EPSILON);
        assert!((p.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_shape_kind_round_trips() {
        use vellum_core::shapes::{Freehand, TemplatePath, Text};

        let mut scene = MemoryScene::new();
        scene.insert(ellipse(0.0, 0.0));
        scene.insert(Shape::Template(TemplatePath::star(Point::new(5.0, 5.0))));
        scene.insert(Shape::Freehand(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        ])));
        scene.insert(Shape::Text(Text::new(Point::new(1.0, 2.0), "note".to_string())));

        let snapshot = scene.serialize().unwrap();
        scene.remove_all();
        scene.restore(&snapshot, Box::new(|| {})).unwrap();

        assert_eq!(scene.len(), 4);
        assert_eq!(scene.serialize().unwrap(), snapshot);
    }

    #[test]
    fn test_snapshot_carries_object_ids() {
        let mut scene = MemoryScene::new();
        let shape = ellipse(0.0, 0.0);
        let id = shape.id();
        scene.insert(shape);

        let snapshot = scene.serialize().unwrap();
        let value: serde_json::Value = serde_json::from_str(snapshot.as_str()).unwrap();
        let recorded = value["objects"][0]["Ellipse"]["id"].as_str().unwrap();
        assert_eq!(recorded, id.to_string());
    }
}
