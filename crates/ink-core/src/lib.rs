pub mod builder;
pub mod codec;
pub mod config;
pub mod emitter;
pub mod id;
pub mod model;
pub mod parser;
pub mod smooth;
pub mod transform;

pub use builder::PathBuilder;
pub use codec::{decode_note, encode_note};
pub use config::EngineConfig;
pub use id::StrokeId;
pub use model::*;
pub use parser::{PathError, parse_path};
pub use transform::{CanvasPoint, CanvasTransform, ScreenPoint};
