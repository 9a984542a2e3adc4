//! Vellum Core Library
//!
//! Platform-agnostic model and logic for the Vellum drawing surface: shapes,
//! drag-to-create shape editors, per-page snapshot history, and the scene
//! collaborator contract. Rendering, hit-testing, and UI wiring live behind
//! the [`scene::Scene`] trait and are supplied by the embedder.

pub mod editor;
pub mod frame;
pub mod history;
pub mod pages;
pub mod palette;
pub mod scene;
pub mod session;
pub mod shapes;

#[cfg(test)]
mod testutil;

pub use editor::{EditorState, EllipsePolicy, GeometryPolicy, ShapeEditor, StarPolicy};
pub use frame::FrameGate;
pub use history::{HistoryStore, MAX_HISTORY};
pub use pages::{PageId, PageRegistry};
pub use scene::{RestoreDone, Scene, SceneError, SceneEvent, SceneResult, Snapshot};
pub use session::Session;
pub use shapes::{Ellipse, Freehand, SerializableColor, Shape, ShapeId, ShapeStyle, TemplatePath, Text};
