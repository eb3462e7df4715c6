pub mod autosave;
pub mod commands;
pub mod gesture;
pub mod input;
pub mod persist;
pub mod session;
pub mod tools;

pub use gesture::{CanvasAction, GestureRouter};
pub use input::{TouchEvent, TouchPhase};
pub use persist::{MemoryStore, NotePersistence, PersistError};
pub use session::CanvasSession;
pub use tools::{ToolKind, ToolState};
