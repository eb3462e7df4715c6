//! Emitter: path commands → descriptor string.
//!
//! Coordinates are written in fixed one-decimal notation to bound the
//! descriptor size; this is a size/fidelity trade-off, and the parser
//! round-trips whatever the emitter produces.

use crate::model::PathCmd;
use std::fmt::Write;

/// Emit a command list as a descriptor string, e.g.
/// `"M10.0,10.0 L20.0,10.0 C1.0,2.0 3.0,4.0 5.0,6.0"`.
#[must_use]
pub fn emit_path(cmds: &[PathCmd]) -> String {
    let mut out = String::with_capacity(cmds.len() * 12);

    for cmd in cmds {
        if !out.is_empty() {
            out.push(' ');
        }
        match *cmd {
            PathCmd::MoveTo(x, y) => write!(out, "M{x:.1},{y:.1}").unwrap(),
            PathCmd::LineTo(x, y) => write!(out, "L{x:.1},{y:.1}").unwrap(),
            PathCmd::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                write!(out, "C{c1x:.1},{c1y:.1} {c2x:.1},{c2y:.1} {x:.1},{y:.1}").unwrap();
            }
        }
    }

    out
}
