//! Built-in 5x7 bitmap font.
//!
//! The engine never assumes a particular font; it only needs
//! [`FontMetrics`]. This module provides the fixed-width font the
//! bundled rasterizer uses: 5x7 glyphs on a 6x9 cell, column-major bit
//! patterns, with subscript digits drawn two rows lower.

use crate::render::FontMetrics;

/// Cell height in pixels.
pub const LINE_HEIGHT: i32 = 9;

/// Horizontal advance per glyph in pixels.
pub const ADVANCE: i32 = 6;

/// The fixed-width 5x7 font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    /// Pixel width of a rendered string. Unknown glyphs still advance.
    pub fn measure(text: &str) -> i32 {
        text.chars().count() as i32 * ADVANCE
    }

    /// Emit the pixels of a text run with its cell's top-left at
    /// `(x, y)`.
    pub fn draw_text(text: &str, x: i32, y: i32, argb: u32, put: &mut impl FnMut(i32, i32, u32)) {
        let mut cursor = x;
        for c in text.chars() {
            let (base, drop) = resolve(c);
            if let Some(columns) = glyph(base) {
                for (col, bits) in columns.iter().enumerate() {
                    for row in 0..7 {
                        if bits & (1 << row) != 0 {
                            put(cursor + col as i32, y + row + drop, argb);
                        }
                    }
                }
            }
            cursor += ADVANCE;
        }
    }
}

impl FontMetrics for BitmapFont {
    fn line_height(&self) -> i32 {
        LINE_HEIGHT
    }

    fn text_width(&self, text: &str) -> i32 {
        Self::measure(text)
    }
}

/// Map subscript digits onto the plain digit glyph, two rows down.
fn resolve(c: char) -> (char, i32) {
    match c {
        '₀'..='₉' => {
            let digit = char::from_u32('0' as u32 + (c as u32 - '₀' as u32)).unwrap_or(c);
            (digit, 2)
        }
        _ => (c, 0),
    }
}

/// Column-major glyph bitmap: five columns, bit 0 is the top row.
fn glyph(c: char) -> Option<&'static [u8; 5]> {
    GLYPHS
        .iter()
        .find(|(g, _)| *g == c)
        .map(|(_, columns)| columns)
}

const GLYPHS: &[(char, [u8; 5])] = &[
    ('!', [0x00, 0x00, 0x5f, 0x00, 0x00]),
    ('#', [0x14, 0x7f, 0x14, 0x7f, 0x14]),
    ('(', [0x00, 0x1c, 0x22, 0x41, 0x00]),
    (')', [0x00, 0x41, 0x22, 0x1c, 0x00]),
    ('+', [0x08, 0x08, 0x3e, 0x08, 0x08]),
    (',', [0x00, 0x50, 0x30, 0x00, 0x00]),
    ('-', [0x08, 0x08, 0x08, 0x08, 0x08]),
    ('.', [0x00, 0x60, 0x60, 0x00, 0x00]),
    ('/', [0x20, 0x10, 0x08, 0x04, 0x02]),
    ('0', [0x3e, 0x51, 0x49, 0x45, 0x3e]),
    ('1', [0x00, 0x42, 0x7f, 0x40, 0x00]),
    ('2', [0x42, 0x61, 0x51, 0x49, 0x46]),
    ('3', [0x21, 0x41, 0x45, 0x4b, 0x31]),
    ('4', [0x18, 0x14, 0x12, 0x7f, 0x10]),
    ('5', [0x27, 0x45, 0x45, 0x45, 0x39]),
    ('6', [0x3c, 0x4a, 0x49, 0x49, 0x30]),
    ('7', [0x01, 0x71, 0x09, 0x05, 0x03]),
    ('8', [0x36, 0x49, 0x49, 0x49, 0x36]),
    ('9', [0x06, 0x49, 0x49, 0x29, 0x1e]),
    ('=', [0x14, 0x14, 0x14, 0x14, 0x14]),
    ('A', [0x7e, 0x11, 0x11, 0x11, 0x7e]),
    ('B', [0x7f, 0x49, 0x49, 0x49, 0x36]),
    ('C', [0x3e, 0x41, 0x41, 0x41, 0x22]),
    ('D', [0x7f, 0x41, 0x41, 0x22, 0x1c]),
    ('E', [0x7f, 0x49, 0x49, 0x49, 0x41]),
    ('F', [0x7f, 0x09, 0x09, 0x09, 0x01]),
    ('G', [0x3e, 0x41, 0x49, 0x49, 0x3a]),
    ('H', [0x7f, 0x08, 0x08, 0x08, 0x7f]),
    ('I', [0x00, 0x41, 0x7f, 0x41, 0x00]),
    ('J', [0x20, 0x40, 0x41, 0x3f, 0x01]),
    ('K', [0x7f, 0x08, 0x14, 0x22, 0x41]),
    ('L', [0x7f, 0x40, 0x40, 0x40, 0x40]),
    ('M', [0x7f, 0x02, 0x0c, 0x02, 0x7f]),
    ('N', [0x7f, 0x04, 0x08, 0x10, 0x7f]),
    ('O', [0x3e, 0x41, 0x41, 0x41, 0x3e]),
    ('P', [0x7f, 0x09, 0x09, 0x09, 0x06]),
    ('Q', [0x3e, 0x41, 0x51, 0x21, 0x5e]),
    ('R', [0x7f, 0x09, 0x19, 0x29, 0x46]),
    ('S', [0x46, 0x49, 0x49, 0x49, 0x31]),
    ('T', [0x01, 0x01, 0x7f, 0x01, 0x01]),
    ('U', [0x3f, 0x40, 0x40, 0x40, 0x3f]),
    ('V', [0x1f, 0x20, 0x40, 0x20, 0x1f]),
    ('W', [0x3f, 0x40, 0x38, 0x40, 0x3f]),
    ('X', [0x63, 0x14, 0x08, 0x14, 0x63]),
    ('Y', [0x07, 0x08, 0x70, 0x08, 0x07]),
    ('Z', [0x61, 0x51, 0x49, 0x45, 0x43]),
    ('a', [0x20, 0x54, 0x54, 0x54, 0x78]),
    ('b', [0x7f, 0x48, 0x44, 0x44, 0x38]),
    ('c', [0x38, 0x44, 0x44, 0x44, 0x20]),
    ('d', [0x38, 0x44, 0x44, 0x48, 0x7f]),
    ('e', [0x38, 0x54, 0x54, 0x54, 0x18]),
    ('f', [0x08, 0x7e, 0x09, 0x01, 0x02]),
    ('g', [0x0c, 0x52, 0x52, 0x52, 0x3e]),
    ('h', [0x7f, 0x08, 0x04, 0x04, 0x78]),
    ('i', [0x00, 0x44, 0x7d, 0x40, 0x00]),
    ('j', [0x20, 0x40, 0x44, 0x3d, 0x00]),
    ('k', [0x7f, 0x10, 0x28, 0x44, 0x00]),
    ('l', [0x00, 0x41, 0x7f, 0x40, 0x00]),
    ('m', [0x7c, 0x04, 0x18, 0x04, 0x78]),
    ('n', [0x7c, 0x08, 0x04, 0x04, 0x78]),
    ('o', [0x38, 0x44, 0x44, 0x44, 0x38]),
    ('p', [0x7c, 0x14, 0x14, 0x14, 0x08]),
    ('q', [0x08, 0x14, 0x14, 0x18, 0x7c]),
    ('r', [0x7c, 0x08, 0x04, 0x04, 0x08]),
    ('s', [0x48, 0x54, 0x54, 0x54, 0x20]),
    ('t', [0x04, 0x3f, 0x44, 0x40, 0x20]),
    ('u', [0x3c, 0x40, 0x40, 0x20, 0x7c]),
    ('v', [0x1c, 0x20, 0x40, 0x20, 0x1c]),
    ('w', [0x3c, 0x40, 0x30, 0x40, 0x3c]),
    ('x', [0x44, 0x28, 0x10, 0x28, 0x44]),
    ('y', [0x0c, 0x50, 0x50, 0x50, 0x3c]),
    ('z', [0x44, 0x64, 0x54, 0x4c, 0x44]),
    ('•', [0x00, 0x1c, 0x1c, 0x1c, 0x00]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_cells() {
        assert_eq!(BitmapFont::measure("Cl"), 12);
        assert_eq!(BitmapFont::measure("H₂"), 12);
        assert_eq!(BitmapFont::measure(""), 0);
    }

    #[test]
    fn glyphs_emit_pixels_inside_their_cell() {
        let mut pixels = Vec::new();
        BitmapFont::draw_text("C", 10, 20, 0xffff_ffff, &mut |x, y, _| pixels.push((x, y)));
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, y)| (10..15).contains(&x) && (20..27).contains(&y)));
    }

    #[test]
    fn subscript_digits_drop_two_rows() {
        let max_y = |text: &str| {
            let mut max = i32::MIN;
            BitmapFont::draw_text(text, 0, 0, 0, &mut |_, y, _| max = max.max(y));
            max
        };
        assert_eq!(max_y("₃"), max_y("3") + 2);
    }

    #[test]
    fn unknown_glyphs_advance_without_pixels() {
        let mut count = 0;
        BitmapFont::draw_text("?", 0, 0, 0, &mut |_, _, _| count += 1);
        assert_eq!(count, 0);
        assert_eq!(BitmapFont::measure("?"), ADVANCE);
    }
}
