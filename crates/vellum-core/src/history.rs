//! Per-page snapshot history with bounded undo and redo stacks.
//!
//! History is snapshot-based, not diff-based: every entry is a full
//! serialized copy of the scene, and every undo/redo step restores the
//! whole scene from one entry. With the stack bounded at [`MAX_HISTORY`]
//! entries this trades space for simplicity.

use crate::pages::PageId;
use crate::scene::{Scene, SceneResult, Snapshot};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Maximum number of snapshots kept per page. The oldest entry is evicted
/// from the head on overflow (FIFO).
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Default)]
struct PageHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
}

/// Undo/redo stacks for every page, plus the single-slot gate that keeps
/// overlapping scene restores from being issued.
#[derive(Debug)]
pub struct HistoryStore {
    stacks: HashMap<PageId, PageHistory>,
    restore_in_flight: Arc<AtomicBool>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            stacks: HashMap::new(),
            restore_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ensure a page has (empty) stacks.
    pub fn init_page(&mut self, page: PageId) {
        self.stacks.entry(page).or_default();
    }

    /// Serialize the scene and append the snapshot to the page's undo
    /// stack, evicting the oldest entry past [`MAX_HISTORY`]. The page's
    /// redo stack is cleared: after a fresh edit there is nothing to redo.
    pub fn record(&mut self, page: PageId, scene: &dyn Scene) -> SceneResult<()> {
        let snapshot = scene.serialize()?;
        let history = self.stacks.entry(page).or_default();
        if history.undo.len() >= MAX_HISTORY {
            history.undo.pop_front();
        }
        history.undo.push_back(snapshot);
        history.redo.clear();
        Ok(())
    }

    /// Move the most recent snapshot onto the redo stack, then restore the
    /// scene from the one below it. When the stack drains the scene is
    /// cleared entirely (empty-history terminal state). Silent no-op when
    /// the page has no history or a restore is already in flight.
    pub fn undo(&mut self, page: PageId, scene: &mut dyn Scene) -> SceneResult<bool> {
        if self.restore_in_flight() {
            log::debug!("undo ignored: scene restore in flight");
            return Ok(false);
        }
        let Some(history) = self.stacks.get_mut(&page) else {
            return Ok(false);
        };
        let Some(recent) = history.undo.pop_back() else {
            log::debug!("undo ignored: history empty");
            return Ok(false);
        };
        history.redo.push(recent);
        let top = history.undo.back().cloned();
        match top {
            Some(snapshot) => self.restore_gated(scene, &snapshot)?,
            None => {
                scene.remove_all();
                scene.request_render();
            }
        }
        Ok(true)
    }

    /// Move the most recent redo entry back onto the undo stack and restore
    /// the scene from it. Silent no-op when there is nothing to redo or a
    /// restore is already in flight.
    pub fn redo(&mut self, page: PageId, scene: &mut dyn Scene) -> SceneResult<bool> {
        if self.restore_in_flight() {
            log::debug!("redo ignored: scene restore in flight");
            return Ok(false);
        }
        let Some(history) = self.stacks.get_mut(&page) else {
            return Ok(false);
        };
        let Some(snapshot) = history.redo.pop() else {
            log::debug!("redo ignored: redo stack empty");
            return Ok(false);
        };
        history.undo.push_back(snapshot.clone());
        self.restore_gated(scene, &snapshot)?;
        Ok(true)
    }

    /// Restore the scene from the page's most recent snapshot, if any.
    pub fn restore_latest(&mut self, page: PageId, scene: &mut dyn Scene) -> SceneResult<bool> {
        if self.restore_in_flight() {
            log::debug!("restore ignored: scene restore in flight");
            return Ok(false);
        }
        let Some(snapshot) = self.stacks.get(&page).and_then(|h| h.undo.back()).cloned() else {
            return Ok(false);
        };
        self.restore_gated(scene, &snapshot)?;
        Ok(true)
    }

    /// Pop and return the page's most recent snapshot without touching the
    /// scene.
    pub fn pop_latest(&mut self, page: PageId) -> Option<Snapshot> {
        self.stacks.get_mut(&page).and_then(|h| h.undo.pop_back())
    }

    /// Replace the page's history with either nothing or a single restore
    /// point. The redo stack is left alone.
    pub fn clear_page(&mut self, page: PageId, last: Option<Snapshot>) {
        let history = self.stacks.entry(page).or_default();
        history.undo.clear();
        if let Some(snapshot) = last {
            history.undo.push_back(snapshot);
        }
    }

    /// Number of undo entries for a page.
    pub fn undo_depth(&self, page: PageId) -> usize {
        self.stacks.get(&page).map_or(0, |h| h.undo.len())
    }

    /// Number of redo entries for a page.
    pub fn redo_depth(&self, page: PageId) -> usize {
        self.stacks.get(&page).map_or(0, |h| h.redo.len())
    }

    /// Whether a scene restore issued by this store has not yet completed.
    pub fn restore_in_flight(&self) -> bool {
        self.restore_in_flight.load(Ordering::Relaxed)
    }

    /// Issue a restore with the in-flight gate held until the scene's
    /// completion callback fires.
    fn restore_gated(&self, scene: &mut dyn Scene, snapshot: &Snapshot) -> SceneResult<()> {
        self.restore_in_flight.store(true, Ordering::Relaxed);
        let gate = Arc::clone(&self.restore_in_flight);
        let result = scene.restore(snapshot, Box::new(move || gate.store(false, Ordering::Relaxed)));
        if result.is_err() {
            self.restore_in_flight.store(false, Ordering::Relaxed);
        }
        result
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
