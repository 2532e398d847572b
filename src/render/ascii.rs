//! Text output for intensity fields
//!
//! Maps each cell's brightness onto a character ramp so a field can be
//! inspected in a terminal or a log.

use super::Surface;
use crate::world::Cell;

/// Darkest to brightest
const RAMP: &[u8] = b" .:-=+*#%@";

/// Character for a brightness value
pub fn shade(value: u8) -> char {
    let idx = value as usize * (RAMP.len() - 1) / 255;
    RAMP[idx] as char
}

/// Render a field, one line per row, with optional glyph overlays on top
pub fn render_ascii(field: &Surface, overlays: &[(Cell, char)]) -> String {
    let mut rows: Vec<Vec<char>> = (0..field.height())
        .map(|y| {
            (0..field.width())
                .map(|x| shade(field.get(x, y).unwrap_or(0)))
                .collect()
        })
        .collect();

    for &(cell, glyph) in overlays {
        if cell.x < 0 || cell.y < 0 {
            continue;
        }
        if let Some(slot) = rows
            .get_mut(cell.y as usize)
            .and_then(|row| row.get_mut(cell.x as usize))
        {
            *slot = glyph;
        }
    }

    let mut out = String::with_capacity(((field.width() + 1) * field.height()) as usize);
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_ends() {
        assert_eq!(shade(0), ' ');
        assert_eq!(shade(255), '@');
    }

    #[test]
    fn test_render_with_overlay() {
        let mut field = Surface::new(3, 2, 0);
        field.set(2, 1, 255);

        let text = render_ascii(&field, &[(Cell::new(0, 0), 'P'), (Cell::new(9, 9), 'x')]);
        assert_eq!(text, "P  \n  @\n");
    }
}
