//! The editing session context.
//!
//! One [`Session`] scopes a single editing session and owns everything that
//! used to be ambient state: the page registry, the history store, and the
//! active page/object markers. Components receive it explicitly, so there is
//! no hidden cross-module coupling.

use crate::history::HistoryStore;
use crate::pages::{PageId, PageRegistry};
use crate::palette;
use crate::scene::{Scene, SceneEvent, SceneResult};
use crate::shapes::{Ellipse, Shape, ShapeId, ShapeStyle};

/// Radius of circles placed via [`Session::place_circle`].
const CIRCLE_RADIUS: f64 = 20.0;

/// Stroke width of circles placed via [`Session::place_circle`].
const CIRCLE_STROKE_WIDTH: f64 = 4.0;

/// Mutable state for one editing session: pages, history, and what is
/// currently active. Operations that need an active page or an active
/// object are silent no-ops without one.
#[derive(Debug)]
pub struct Session {
    pages: PageRegistry,
    history: HistoryStore,
    active_page: Option<PageId>,
    active_object: Option<ShapeId>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            pages: PageRegistry::new(),
            history: HistoryStore::new(),
            active_page: None,
            active_object: None,
        }
    }

    /// Create a new page with empty stacks and make it active.
    pub fn create_page(&mut self) -> PageId {
        let page = self.pages.create_page();
        self.history.init_page(page);
        self.active_page = Some(page);
        page
    }

    pub fn active_page(&self) -> Option<PageId> {
        self.active_page
    }

    pub fn set_active_page(&mut self, page: Option<PageId>) {
        self.active_page = page;
    }

    pub fn active_object(&self) -> Option<ShapeId> {
        self.active_object
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Register a shape under the active page's registry.
    pub fn register_object(&mut self, shape: ShapeId) {
        if let Some(page) = self.active_page {
            self.pages.register(page, shape);
        }
    }

    /// Serialize the scene into the active page's history.
    pub fn record_snapshot(&mut self, scene: &dyn Scene) -> SceneResult<()> {
        let Some(page) = self.active_page else {
            log::debug!("snapshot ignored: no active page");
            return Ok(());
        };
        self.history.record(page, scene)
    }

    /// Track selection state and record direct scene modifications.
    ///
    /// Pointer events are not handled here; feed those to whichever shape
    /// editor is armed.
    pub fn handle_event(&mut self, scene: &mut dyn Scene, event: &SceneEvent) -> SceneResult<()> {
        match event {
            SceneEvent::SelectionCreated { id } | SceneEvent::SelectionUpdated { id } => {
                self.active_object = Some(*id);
            }
            SceneEvent::SelectionCleared => {
                self.active_object = None;
            }
            // Fired when an object is manipulated directly in the scene
            // (moved, rotated). Attribute edits made through this session
            // record their own snapshots.
            SceneEvent::ObjectModified { .. } => {
                self.record_snapshot(scene)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Place a circle at a pseudo-random position with a palette color
    /// pair, register it, and record a snapshot.
    pub fn place_circle(&mut self, scene: &mut dyn Scene) -> SceneResult<()> {
        let Some(page) = self.active_page else {
            log::debug!("place ignored: no active page");
            return Ok(());
        };
        let (fill, stroke) = palette::random_colors();
        let mut circle = Ellipse::circle(palette::random_position(palette::CANVAS_DIMS), CIRCLE_RADIUS);
        circle.style = ShapeStyle {
            stroke,
            stroke_width: CIRCLE_STROKE_WIDTH,
            fill: Some(fill),
        };
        let shape = Shape::Ellipse(circle);
        self.pages.register(page, shape.id());
        scene.insert(shape);
        self.history.record(page, scene)
    }

    /// Recolor the active object's fill from the palette and record.
    pub fn apply_fill(&mut self, scene: &mut dyn Scene) -> SceneResult<()> {
        let Some(id) = self.active_object else {
            log::debug!("fill ignored: nothing selected");
            return Ok(());
        };
        let (fill, _) = palette::random_colors();
        if let Some(shape) = scene.shape_mut(id) {
            shape.style_mut().fill = Some(fill);
        }
        self.record_snapshot(scene)
    }

    /// Recolor the active object's stroke from the palette and record.
    pub fn apply_stroke(&mut self, scene: &mut dyn Scene) -> SceneResult<()> {
        let Some(id) = self.active_object else {
            log::debug!("stroke ignored: nothing selected");
            return Ok(());
        };
        let (_, stroke) = palette::random_colors();
        if let Some(shape) = scene.shape_mut(id) {
            shape.style_mut().stroke = stroke;
        }
        self.record_snapshot(scene)
    }

    /// Remove every object from the scene and the active page's registry,
    /// keeping the most recent snapshot as the page's single restore point.
    pub fn clear_page(&mut self, scene: &mut dyn Scene) {
        let Some(page) = self.active_page else {
            log::debug!("clear ignored: no active page");
            return;
        };
        scene.remove_all();
        self.pages.clear_page(page);
        let last = self.history.pop_latest(page);
        self.history.clear_page(page, last);
        scene.request_render();
    }

    /// Restore the scene from the active page's most recent snapshot.
    pub fn recreate_page(&mut self, scene: &mut dyn Scene) -> SceneResult<bool> {
        let Some(page) = self.active_page else {
            log::debug!("recreate ignored: no active page");
            return Ok(false);
        };
        self.history.restore_latest(page, scene)
    }

    /// Undo the most recent edit on the active page.
    pub fn undo(&mut self, scene: &mut dyn Scene) -> SceneResult<bool> {
        let Some(page) = self.active_page else {
            log::debug!("undo ignored: no active page");
            return Ok(false);
        };
        self.history.undo(page, scene)
    }

    /// Redo the most recently undone edit on the active page.
    pub fn redo(&mut self, scene: &mut dyn Scene) -> SceneResult<bool> {
        let Some(page) = self.active_page else {
            log::debug!("redo ignored: no active page");
            return Ok(false);
        };
        self.history.redo(page, scene)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
