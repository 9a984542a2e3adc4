//! The scene collaborator contract.
//!
//! The drawing surface itself (object storage, rendering, hit-testing,
//! selection UI) is an external collaborator behind the [`Scene`] trait. The
//! core only asks it to insert objects, mutate their attributes, serialize
//! to and restore from opaque snapshots, and schedule renders. Input arrives
//! as [`SceneEvent`] values fed in by the embedder's event loop.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a scene collaborator.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A snapshot could not be encoded or decoded.
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Completion callback for an asynchronous scene restore.
pub type RestoreDone = Box<dyn FnOnce()>;

/// An opaque serialized copy of the full scene state at one point in time.
///
/// The payload is a JSON document enumerating every object with its
/// persisted attributes, including the object identifier. Transient view
/// state (selection mode, cached coordinates, pending renders) is never
/// part of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(payload: String) -> Self {
        Self(payload)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Events emitted by the scene collaborator, in viewport coordinates where
/// a position is carried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// An existing object is being dragged around the scene.
    ObjectMoving { id: ShapeId },
    /// An object was modified directly in the scene (rotate, move, ...).
    ObjectModified { id: ShapeId },
    SelectionCreated { id: ShapeId },
    SelectionUpdated { id: ShapeId },
    SelectionCleared,
}

/// The mutable drawing surface, as seen by the core.
pub trait Scene {
    /// Insert an object into the scene.
    fn insert(&mut self, shape: Shape);

    /// Remove every object from the scene.
    fn remove_all(&mut self);

    /// Mutable access to an object's attributes.
    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// Translate a viewport position into scene coordinates.
    fn to_scene(&self, viewport: Point) -> Point;

    /// Serialize the full scene state to an opaque snapshot.
    fn serialize(&self) -> SceneResult<Snapshot>;

    /// Restore the scene from a snapshot. The contract is asynchronous:
    /// `on_complete` fires once the scene is fully rebuilt, which an
    /// implementation may defer across frames. Snapshots are not validated
    /// up front; a malformed one surfaces as the implementation's own error.
    fn restore(&mut self, snapshot: &Snapshot, on_complete: RestoreDone) -> SceneResult<()>;

    /// Recompute an object's cached bounding geometry after a mutation.
    fn recompute_coords(&mut self, id: ShapeId);

    /// Enable or disable scene-level multi-select.
    fn set_selection_enabled(&mut self, enabled: bool);

    /// Whether scene-level multi-select is currently enabled.
    fn selection_enabled(&self) -> bool;

    /// Ask the scene to re-render. Advisory; implementations may batch.
    fn request_render(&mut self);
}
