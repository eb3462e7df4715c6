//! Binary note codec (MessagePack via `rmp-serde`).
//!
//! This is the payload format persistence adapters store; the adapters
//! own the storage medium. Both directions sanitize so a corrupt stroke
//! on disk never reaches the renderer, and a malformed in-memory record
//! never reaches disk.

use crate::model::Note;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("could not encode note: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("could not decode note: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

pub fn encode_note(note: &Note) -> Result<Vec<u8>, CodecError> {
    let mut clean = note.clone();
    let dropped = clean.sanitize();
    if dropped > 0 {
        log::warn!("encode: dropped {dropped} malformed strokes from {:?}", note.title);
    }
    Ok(rmp_serde::to_vec_named(&clean)?)
}

pub fn decode_note(bytes: &[u8]) -> Result<Note, CodecError> {
    let mut note: Note = rmp_serde::from_slice(bytes)?;
    let dropped = note.sanitize();
    if dropped > 0 {
        log::warn!("decode: dropped {dropped} malformed strokes from {:?}", note.title);
    }
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::StrokeId;
    use crate::model::{Color, StrokeRecord, Template};
    use pretty_assertions::assert_eq;

    fn stroke(data: &str) -> StrokeRecord {
        StrokeRecord {
            id: StrokeId::fresh(),
            data: data.into(),
            color: Color::BLACK,
            width: 2.0,
        }
    }

    #[test]
    fn roundtrip() {
        let mut note = Note::new("groceries", Template::Lined, 1234);
        note.strokes.push(stroke("M1.0,1.0 L2.0,2.0"));
        note.strokes.push(stroke("M5.0,5.0 C6.0,6.0 7.0,7.0 8.0,8.0"));

        let bytes = encode_note(&note).unwrap();
        let back = decode_note(&bytes).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn decode_drops_malformed_strokes() {
        let mut note = Note::new("scratch", Template::Blank, 0);
        note.strokes.push(stroke("M1.0,1.0 L2.0,2.0"));
        note.strokes.push(stroke("not a path"));

        // Bypass encode_note's sanitize to simulate a corrupt payload.
        let bytes = rmp_serde::to_vec_named(&note).unwrap();
        let back = decode_note(&bytes).unwrap();
        assert_eq!(back.strokes.len(), 1);
    }

    #[test]
    fn truncated_payload_is_an_error() {
        let note = Note::new("x", Template::Grid, 0);
        let mut bytes = encode_note(&note).unwrap();
        bytes.truncate(bytes.len() / 2);
        assert!(decode_note(&bytes).is_err());
    }
}
