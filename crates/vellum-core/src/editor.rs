//! Drag-to-create shape editors.
//!
//! One generic [`ShapeEditor`] drives every shape kind, parameterized over a
//! [`GeometryPolicy`] that knows how to spawn a zero-size shape at the
//! gesture anchor and grow it as the pointer moves. The editor itself is an
//! explicit state machine: event processing is a function of the current
//! state, so a disarmed editor cannot react to input and arming twice is
//! rejected rather than double-subscribing.

use crate::palette;
use crate::scene::{Scene, SceneEvent, SceneResult};
use crate::session::Session;
use crate::shapes::{Ellipse, SerializableColor, Shape, ShapeId, TemplatePath};
use kurbo::Point;

/// Editor lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorState {
    /// Not listening for input.
    Disarmed,
    /// Armed, waiting for a gesture to start.
    Idle,
    /// A creation gesture is in progress.
    Dragging { anchor: Point, shape_id: ShapeId },
}

/// What a single event means for the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Begin { anchor: Point },
    Grow { shape_id: ShapeId, anchor: Point, pointer: Point },
    Commit,
    Release,
    Cancel,
    Ignore,
}

/// Pure transition table: `(state, event) -> gesture step`. Positions are
/// expected in scene coordinates. A pointer-down during an ongoing drag is
/// ignored (single-pointer input model), as is everything while disarmed.
fn transition(state: EditorState, event: &SceneEvent) -> Gesture {
    match (state, event) {
        (EditorState::Idle, SceneEvent::PointerDown { position }) => {
            Gesture::Begin { anchor: *position }
        }
        (EditorState::Idle, SceneEvent::PointerUp { .. }) => Gesture::Release,
        (EditorState::Dragging { anchor, shape_id }, SceneEvent::PointerMove { position }) => {
            Gesture::Grow {
                shape_id,
                anchor,
                pointer: *position,
            }
        }
        (EditorState::Dragging { .. }, SceneEvent::PointerUp { .. }) => Gesture::Commit,
        (EditorState::Dragging { .. }, SceneEvent::ObjectMoving { .. }) => Gesture::Cancel,
        _ => Gesture::Ignore,
    }
}

/// Shape-kind-specific creation and growth rules.
pub trait GeometryPolicy {
    /// Create the zero-size shape inserted at gesture start.
    fn spawn(&self, anchor: Point) -> Shape;

    /// Recompute the shape's geometry from the anchor and current pointer.
    fn grow(&self, shape: &mut Shape, anchor: Point, pointer: Point);

    /// Whether scene-level multi-select is suspended for the duration of
    /// the gesture.
    fn suspends_selection(&self) -> bool {
        false
    }
}

/// Grows an ellipse by half the drag extent along each axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct EllipsePolicy;

impl GeometryPolicy for EllipsePolicy {
    fn spawn(&self, anchor: Point) -> Shape {
        Shape::Ellipse(Ellipse::new(anchor, 0.0, 0.0))
    }

    fn grow(&self, shape: &mut Shape, anchor: Point, pointer: Point) {
        let Shape::Ellipse(ellipse) = shape else {
            return;
        };
        // Live-drag cosmetic override; the caller may restyle on commit.
        ellipse.style.stroke = SerializableColor::red();
        ellipse.style.stroke_width = 5.0;
        ellipse.style.fill = Some(SerializableColor::red());

        if anchor.x > pointer.x {
            ellipse.left = pointer.x.abs();
        }
        if anchor.y > pointer.y {
            ellipse.top = pointer.y.abs();
        }
        ellipse.rx = (anchor.x - pointer.x).abs() / 2.0;
        ellipse.ry = (anchor.y - pointer.y).abs() / 2.0;
    }
}

/// Grows a star template by scale factors derived from the drag extent over
/// the template's native size. Multi-select is suspended while dragging so
/// the rubber-band selection does not fight the gesture.
#[derive(Debug, Default, Clone, Copy)]
pub struct StarPolicy;

impl GeometryPolicy for StarPolicy {
    fn spawn(&self, anchor: Point) -> Shape {
        let mut star = TemplatePath::star(anchor);
        let (fill, stroke) = palette::random_colors();
        star.style.fill = Some(fill);
        star.style.stroke = stroke;
        star.set_scale(0.0, 0.0);
        Shape::Template(star)
    }

    fn grow(&self, shape: &mut Shape, anchor: Point, pointer: Point) {
        let Shape::Template(star) = shape else {
            return;
        };
        let scale_x = (anchor.x - pointer.x).abs() / star.reference_extent;
        let scale_y = (anchor.y - pointer.y).abs() / star.reference_extent;

        if anchor.x > pointer.x {
            star.left = pointer.x.abs();
        }
        if anchor.y > pointer.y {
            star.top = pointer.y.abs();
        }
        star.set_scale(scale_x, scale_y);
    }

    fn suspends_selection(&self) -> bool {
        true
    }
}

/// Interactive drag-to-create session for one shape kind.
///
/// Constructed once and re-armed per gesture cycle: `arm` starts listening,
/// each pointer-down/move*/up cycle creates exactly one shape, and the
/// editor disarms itself after committing. The `on_done` callback passed to
/// `arm` fires exactly once, at disarm.
pub struct ShapeEditor<P: GeometryPolicy> {
    policy: P,
    state: EditorState,
    on_done: Option<Box<dyn FnOnce()>>,
}

impl<P: GeometryPolicy> ShapeEditor<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            state: EditorState::Disarmed,
            on_done: None,
        }
    }

    /// Start listening for a gesture. Returns false (and changes nothing)
    /// when the editor is already armed.
    pub fn arm(&mut self, on_done: impl FnOnce() + 'static) -> bool {
        if self.is_armed() {
            log::debug!("arm ignored: editor already armed");
            return false;
        }
        self.state = EditorState::Idle;
        self.on_done = Some(Box::new(on_done));
        true
    }

    /// Stop listening, drop any live shape reference, restore suspended
    /// selection mode, and fire `on_done`.
    pub fn disarm(&mut self, scene: &mut dyn Scene) {
        if self.policy.suspends_selection() {
            scene.set_selection_enabled(true);
        }
        self.state = EditorState::Disarmed;
        if let Some(done) = self.on_done.take() {
            done();
        }
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self.state, EditorState::Disarmed)
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Feed one scene event through the state machine and apply its
    /// effects against the scene and session.
    pub fn handle_event(
        &mut self,
        scene: &mut dyn Scene,
        session: &mut Session,
        event: &SceneEvent,
    ) -> SceneResult<()> {
        // Pointer positions arrive in viewport coordinates.
        let event = match *event {
            SceneEvent::PointerDown { position } => SceneEvent::PointerDown {
                position: scene.to_scene(position),
            },
            SceneEvent::PointerMove { position } => SceneEvent::PointerMove {
                position: scene.to_scene(position),
            },
            SceneEvent::PointerUp { position } => SceneEvent::PointerUp {
                position: scene.to_scene(position),
            },
            other => other,
        };

        match transition(self.state, &event) {
            Gesture::Begin { anchor } => {
                if session.active_page().is_none() {
                    log::debug!("gesture ignored: no active page");
                    return Ok(());
                }
                let shape = self.policy.spawn(anchor);
                let shape_id = shape.id();
                scene.insert(shape);
                session.register_object(shape_id);
                if self.policy.suspends_selection() {
                    scene.set_selection_enabled(false);
                }
                self.state = EditorState::Dragging { anchor, shape_id };
            }
            Gesture::Grow {
                shape_id,
                anchor,
                pointer,
            } => {
                if let Some(shape) = scene.shape_mut(shape_id) {
                    self.policy.grow(shape, anchor, pointer);
                }
                scene.recompute_coords(shape_id);
                scene.request_render();
            }
            Gesture::Commit => {
                session.record_snapshot(scene)?;
                self.disarm(scene);
            }
            Gesture::Release => self.disarm(scene),
            Gesture::Cancel => {
                log::debug!("creation gesture cancelled by object move");
                self.state = EditorState::Idle;
            }
            Gesture::Ignore => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestScene;
    use std::cell::Cell;
    use std::rc::Rc;

    fn armed_session() -> Session {
        let mut session = Session::new();
        session.create_page();
        session
    }

    fn down(x: f64, y: f64) -> SceneEvent {
        SceneEvent::PointerDown {
            position: Point::new(x, y),
        }
    }

    fn moved(x: f64, y: f64) -> SceneEvent {
        SceneEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> SceneEvent {
        SceneEvent::PointerUp {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_transition_table() {
        let anchor = Point::new(1.0, 2.0);
        let id = uuid::Uuid::new_v4();
        let dragging = EditorState::Dragging {
            anchor,
            shape_id: id,
        };

        assert!(matches!(
            transition(EditorState::Idle, &down(1.0, 2.0)),
            Gesture::Begin { .. }
        ));
        assert!(matches!(
            transition(dragging, &moved(5.0, 5.0)),
            Gesture::Grow { .. }
        ));
        assert!(matches!(transition(dragging, &up(5.0, 5.0)), Gesture::Commit));
        assert!(matches!(
            transition(dragging, &SceneEvent::ObjectMoving { id }),
            Gesture::Cancel
        ));
        // Re-entry and disarmed cases
        assert!(matches!(transition(dragging, &down(0.0, 0.0)), Gesture::Ignore));
        assert!(matches!(
            transition(EditorState::Disarmed, &down(0.0, 0.0)),
            Gesture::Ignore
        ));
        assert!(matches!(
            transition(EditorState::Idle, &moved(0.0, 0.0)),
            Gesture::Ignore
        ));
    }

    #[test]
    fn test_drag_creates_ellipse() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();
        let done = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&done);
        editor.arm(move || counter.set(counter.get() + 1));

        editor.handle_event(&mut scene, &mut session, &down(100.0, 100.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &moved(60.0, 40.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &up(60.0, 40.0)).unwrap();

        assert_eq!(scene.shapes.len(), 1);
        let Shape::Ellipse(ellipse) = &scene.shapes[0] else {
            panic!("expected ellipse");
        };
        assert!((ellipse.left - 60.0).abs() < f64::EPSILON);
        assert!((ellipse.top - 40.0).abs() < f64::EPSILON);
        assert!((ellipse.rx - 20.0).abs() < f64::EPSILON);
        assert!((ellipse.ry - 30.0).abs() < f64::EPSILON);

        let page = session.active_page().unwrap();
        assert_eq!(session.history().undo_depth(page), 1);
        assert_eq!(session.pages().object_count(page), 1);
        assert!(!editor.is_armed());
        assert_eq!(done.get(), 1);
    }

    #[test]
    fn test_drag_grows_star_by_reference_extent() {
        let mut editor = ShapeEditor::new(StarPolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();
        editor.arm(|| {});

        editor.handle_event(&mut scene, &mut session, &down(0.0, 0.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &moved(44.0, 22.0)).unwrap();

        let Shape::Template(star) = &scene.shapes[0] else {
            panic!("expected template shape");
        };
        assert!((star.scale_x - 2.0).abs() < f64::EPSILON);
        assert!((star.scale_y - 1.0).abs() < f64::EPSILON);
        assert!((star.width - 44.0).abs() < f64::EPSILON);
        assert!((star.height - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_drag_commits_zero_size_shape() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();
        editor.arm(|| {});

        editor.handle_event(&mut scene, &mut session, &down(50.0, 50.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &up(50.0, 50.0)).unwrap();

        assert_eq!(scene.shapes.len(), 1);
        assert!(scene.shapes[0].bounds().area().abs() < f64::EPSILON);
        let page = session.active_page().unwrap();
        assert_eq!(session.history().undo_depth(page), 1);
    }

    #[test]
    fn test_object_moving_cancels_without_snapshot() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();
        editor.arm(|| {});

        editor.handle_event(&mut scene, &mut session, &down(10.0, 10.0)).unwrap();
        let id = scene.shapes[0].id();
        editor
            .handle_event(&mut scene, &mut session, &SceneEvent::ObjectMoving { id })
            .unwrap();
        assert_eq!(editor.state(), EditorState::Idle);

        // The release after a cancelled gesture disarms without recording.
        editor.handle_event(&mut scene, &mut session, &up(10.0, 10.0)).unwrap();
        let page = session.active_page().unwrap();
        assert_eq!(session.history().undo_depth(page), 0);
        assert!(!editor.is_armed());
    }

    #[test]
    fn test_no_active_page_ignores_gesture() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let mut session = Session::new();
        editor.arm(|| {});

        editor.handle_event(&mut scene, &mut session, &down(10.0, 10.0)).unwrap();
        assert!(scene.shapes.is_empty());
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_double_arm_rejected() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let fired = Rc::new(Cell::new(0u32));

        let first = Rc::clone(&fired);
        assert!(editor.arm(move || first.set(first.get() + 1)));
        let second = Rc::clone(&fired);
        assert!(!editor.arm(move || second.set(second.get() + 10)));

        editor.disarm(&mut scene);
        // Only the first callback ever fires, exactly once.
        assert_eq!(fired.get(), 1);
        editor.disarm(&mut scene);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_star_gesture_suspends_selection() {
        let mut editor = ShapeEditor::new(StarPolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();
        editor.arm(|| {});

        assert!(scene.selection_enabled());
        editor.handle_event(&mut scene, &mut session, &down(0.0, 0.0)).unwrap();
        assert!(!scene.selection_enabled());
        editor.handle_event(&mut scene, &mut session, &up(44.0, 22.0)).unwrap();
        assert!(scene.selection_enabled());
    }

    #[test]
    fn test_events_ignored_when_disarmed() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();

        editor.handle_event(&mut scene, &mut session, &down(10.0, 10.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &moved(20.0, 20.0)).unwrap();
        assert!(scene.shapes.is_empty());
        assert!(!editor.is_armed());
    }

    #[test]
    fn test_grow_requests_render_and_coords() {
        let mut editor = ShapeEditor::new(EllipsePolicy);
        let mut scene = TestScene::new();
        let mut session = armed_session();
        editor.arm(|| {});

        editor.handle_event(&mut scene, &mut session, &down(0.0, 0.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &moved(10.0, 10.0)).unwrap();
        editor.handle_event(&mut scene, &mut session, &moved(20.0, 20.0)).unwrap();

        assert_eq!(scene.render_requests, 2);
        assert_eq!(scene.coord_updates.len(), 2);
        let id = scene.shapes[0].id();
        assert!(scene.coord_updates.iter().all(|&c| c == id));
    }
}
