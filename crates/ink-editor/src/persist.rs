//! Persistence seam.
//!
//! The engine never touches storage itself: it hands the complete note
//! to whatever adapter the host injected. Adapters own the medium and
//! the format; [`ink_core::codec`] is there for the common case.

use ink_core::codec::{CodecError, encode_note};
use ink_core::model::Note;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not serialize note: {0}")]
    Codec(#[from] CodecError),
    #[error("storage rejected note: {0}")]
    Storage(String),
}

/// Where finished notes go. Implementations must treat each call as a
/// full replacement of the previous payload (last write wins).
pub trait NotePersistence {
    fn save(&mut self, note: &Note) -> Result<(), PersistError>;
}

/// In-memory adapter for tests and examples: keeps the encoded payloads
/// in save order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: Vec<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saved.len()
    }
}

impl NotePersistence for MemoryStore {
    fn save(&mut self, note: &Note) -> Result<(), PersistError> {
        let bytes = encode_note(note)?;
        self.saved.push(bytes);
        Ok(())
    }
}
