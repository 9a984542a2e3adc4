//! Page bookkeeping: which shapes were placed on which page.

use crate::shapes::ShapeId;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// Tracks the set of shape identifiers placed on each page.
#[derive(Debug, Default)]
pub struct PageRegistry {
    objects: HashMap<PageId, HashSet<ShapeId>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new page and return its identifier.
    pub fn create_page(&mut self) -> PageId {
        let id = Uuid::new_v4();
        self.objects.insert(id, HashSet::new());
        id
    }

    /// Whether the page exists.
    pub fn contains_page(&self, page: PageId) -> bool {
        self.objects.contains_key(&page)
    }

    /// Register a shape under a page.
    pub fn register(&mut self, page: PageId, shape: ShapeId) {
        self.objects.entry(page).or_default().insert(shape);
    }

    /// Drop every shape registered under a page.
    pub fn clear_page(&mut self, page: PageId) {
        if let Some(shapes) = self.objects.get_mut(&page) {
            shapes.clear();
        }
    }

    /// Shapes registered under a page.
    pub fn objects(&self, page: PageId) -> impl Iterator<Item = ShapeId> + '_ {
        self.objects.get(&page).into_iter().flatten().copied()
    }

    /// Number of shapes registered under a page.
    pub fn object_count(&self, page: PageId) -> usize {
        self.objects.get(&page).map_or(0, HashSet::len)
    }
}
