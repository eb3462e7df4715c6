//! Replay a scripted touch trace through a canvas session and print what
//! it produces. Handy for eyeballing smoothing/tuning changes:
//!
//! ```sh
//! RUST_LOG=debug cargo run -p ink-editor --example replay
//! ```

use ink_core::config::EngineConfig;
use ink_core::model::{Color, Note, Template};
use ink_editor::input::TouchEvent;
use ink_editor::persist::MemoryStore;
use ink_editor::session::CanvasSession;
use std::time::Instant;

fn main() {
    env_logger::init();

    let mut session = CanvasSession::new(
        Note::new("replay", Template::Grid, 0),
        EngineConfig::default(),
        Box::new(MemoryStore::new()),
        Box::new(|strokes| println!("note now holds {} strokes", strokes.len())),
    );
    session.set_color(Color::from_hex("#1A66FF").unwrap());

    // A wavy left-to-right flick.
    let t0 = Instant::now();
    session.handle_touch(&TouchEvent::start(40.0, 200.0), t0);
    for i in 1..=40 {
        let x = 40.0 + i as f32 * 8.0;
        let y = 200.0 + (i as f32 * 0.45).sin() * 60.0;
        session.handle_touch(&TouchEvent::moved(x, y), t0);
    }
    session.handle_touch(&TouchEvent::end(), t0);

    for stroke in session.strokes() {
        println!(
            "{} {} width={} {}",
            stroke.id,
            stroke.color.to_hex(),
            stroke.width,
            stroke.data
        );
    }

    let frame = session.frame((480.0, 400.0));
    println!("frame: {} ops", frame.ops.len());
}
