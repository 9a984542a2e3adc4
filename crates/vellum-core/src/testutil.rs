//! Minimal in-memory scene used by unit tests across the crate.

use crate::scene::{RestoreDone, Scene, SceneResult, Snapshot};
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// A scene stub: shapes in a vec, JSON snapshots, and observable side
/// effects. Restores complete synchronously unless `defer_restore` is set,
/// in which case the completion callback is parked until
/// [`TestScene::complete_pending`].
pub(crate) struct TestScene {
    pub shapes: Vec<Shape>,
    pub selection: bool,
    pub render_requests: usize,
    pub coord_updates: Vec<ShapeId>,
    pub defer_restore: bool,
    pending: Option<RestoreDone>,
}

impl TestScene {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            selection: true,
            render_requests: 0,
            coord_updates: Vec::new(),
            defer_restore: false,
            pending: None,
        }
    }

    /// Fire the parked restore-completion callback, if any.
    pub fn complete_pending(&mut self) {
        if let Some(done) = self.pending.take() {
            done();
        }
    }
}

impl Scene for TestScene {
    fn insert(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    fn remove_all(&mut self) {
        self.shapes.clear();
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    fn to_scene(&self, viewport: Point) -> Point {
        viewport
    }

    fn serialize(&self) -> SceneResult<Snapshot> {
        Ok(Snapshot::new(serde_json::to_string(&self.shapes)?))
    }

    fn restore(&mut self, snapshot: &Snapshot, on_complete: RestoreDone) -> SceneResult<()> {
        let shapes: Vec<Shape> = serde_json::from_str(snapshot.as_str())?;
        self.shapes = shapes;
        if self.defer_restore {
            self.pending = Some(on_complete);
        } else {
            on_complete();
        }
        Ok(())
    }

    fn recompute_coords(&mut self, id: ShapeId) {
        self.coord_updates.push(id);
    }

    fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection = enabled;
    }

    fn selection_enabled(&self) -> bool {
        self.selection
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}
