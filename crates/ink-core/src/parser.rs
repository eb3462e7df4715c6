//! Parser for stroke path descriptors.
//!
//! Built on `winnow` 0.7. The grammar is deliberately tiny:
//!
//! ```text
//! path    := move (" " segment)*
//! move    := "M" pair
//! segment := "L" pair
//!          | "C" pair " " pair " " pair      # c1, c2, end
//! pair    := number "," number
//! number  := "-"? digits ("." digits)?
//! ```
//!
//! Parsing is the exact inverse of [`crate::emitter::emit_path`]: the
//! on-curve point sequence it reconstructs is what the eraser hit-tests
//! against, so the two must round-trip.

use crate::model::PathCmd;
use winnow::ascii::space1;
use winnow::combinator::{alt, preceded};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

/// Why a descriptor failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty path data")]
    Empty,
    #[error("path data must begin with a move-to")]
    MissingMoveTo,
    #[error("path syntax error at byte {at}")]
    Syntax { at: usize },
}

/// Parse a descriptor string into commands.
#[must_use = "parsing result should be used"]
pub fn parse_path(input: &str) -> Result<Vec<PathCmd>, PathError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if !trimmed.starts_with('M') {
        return Err(PathError::MissingMoveTo);
    }

    let mut rest = trimmed;
    let syntax_at = |rest: &str| PathError::Syntax {
        at: trimmed.len() - rest.len(),
    };

    let mut cmds = Vec::new();
    let (x, y) = preceded('M', parse_pair)
        .parse_next(&mut rest)
        .map_err(|_| syntax_at(rest))?;
    cmds.push(PathCmd::MoveTo(x, y));

    while !rest.is_empty() {
        let cmd = preceded(space1, parse_segment)
            .parse_next(&mut rest)
            .map_err(|_| syntax_at(rest))?;
        cmds.push(cmd);
    }

    Ok(cmds)
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn parse_segment(input: &mut &str) -> ModalResult<PathCmd> {
    alt((parse_line, parse_cubic)).parse_next(input)
}

fn parse_line(input: &mut &str) -> ModalResult<PathCmd> {
    preceded('L', parse_pair)
        .map(|(x, y)| PathCmd::LineTo(x, y))
        .parse_next(input)
}

fn parse_cubic(input: &mut &str) -> ModalResult<PathCmd> {
    let _ = 'C'.parse_next(input)?;
    let (c1x, c1y) = parse_pair.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let (c2x, c2y) = parse_pair.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let (x, y) = parse_pair.parse_next(input)?;
    Ok(PathCmd::CubicTo(c1x, c1y, c2x, c2y, x, y))
}

fn parse_pair(input: &mut &str) -> ModalResult<(f32, f32)> {
    let x = parse_number.parse_next(input)?;
    let _ = ','.parse_next(input)?;
    let y = parse_number.parse_next(input)?;
    Ok((x, y))
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_polyline() {
        let cmds = parse_path("M10.0,10.0 L20.0,10.0 L20.0,20.0").unwrap();
        assert_eq!(
            cmds,
            vec![
                PathCmd::MoveTo(10.0, 10.0),
                PathCmd::LineTo(20.0, 10.0),
                PathCmd::LineTo(20.0, 20.0),
            ]
        );
    }

    #[test]
    fn parse_cubic_segment() {
        let cmds = parse_path("M0.0,0.0 C1.0,2.0 3.0,4.0 5.0,6.0").unwrap();
        assert_eq!(
            cmds,
            vec![
                PathCmd::MoveTo(0.0, 0.0),
                PathCmd::CubicTo(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
            ]
        );
    }

    #[test]
    fn parse_negative_coordinates() {
        let cmds = parse_path("M-10.5,-0.5 L-20.0,3.0").unwrap();
        assert_eq!(
            cmds,
            vec![PathCmd::MoveTo(-10.5, -0.5), PathCmd::LineTo(-20.0, 3.0)]
        );
    }

    #[test]
    fn empty_input_is_its_own_error() {
        assert_eq!(parse_path(""), Err(PathError::Empty));
        assert_eq!(parse_path("   "), Err(PathError::Empty));
    }

    #[test]
    fn must_start_with_move() {
        assert_eq!(parse_path("L1.0,1.0"), Err(PathError::MissingMoveTo));
    }

    #[test]
    fn trailing_garbage_rejected() {
        assert!(matches!(
            parse_path("M1.0,1.0 nope"),
            Err(PathError::Syntax { .. })
        ));
    }

    #[test]
    fn truncated_cubic_rejected() {
        assert!(matches!(
            parse_path("M0.0,0.0 C1.0,2.0 3.0,4.0"),
            Err(PathError::Syntax { .. })
        ));
    }
}
