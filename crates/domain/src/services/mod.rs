//! Domain services.

pub mod editor;
pub mod memory_store;

pub use editor::{EditorMode, Notice, ResourceEditor};
pub use memory_store::MemoryStore;
