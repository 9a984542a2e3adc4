//! Reference scene collaborator for Vellum.
//!
//! [`MemoryScene`] implements the [`vellum_core::Scene`] contract with plain
//! in-memory storage: a typed object table with z-order, JSON snapshots, a
//! cached-bounds table refreshed on demand, and a batched render flag. It
//! stands in for a real canvas in tests and headless embedders.

mod memory;

pub use memory::MemoryScene;
