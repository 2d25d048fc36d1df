//! 8x8 bitmap font
//!
//! Covers upper-case letters, digits, space, `.`, `:` and `%`. Each glyph is
//! eight rows; in each row byte, bit `c` (`1 << c`) lights column `c`, with
//! column 0 drawn at the glyph origin.

/// One glyph: eight row bytes, top row first
pub type Glyph = [u8; 8];

/// Glyph width and height in font pixels
pub const GLYPH_SIZE: i32 = 8;

/// All-zero glyph used for unsupported characters
pub const BLANK: Glyph = [0x00; 8];

/// Look up a glyph, upper-casing the character first
///
/// Returns `None` for characters outside the table.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    let glyph = match ch.to_ascii_uppercase() {
        'A' => &[0x18, 0x24, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00],
        'B' => &[0x7C, 0x42, 0x42, 0x7C, 0x42, 0x42, 0x7C, 0x00],
        'C' => &[0x3C, 0x42, 0x40, 0x40, 0x40, 0x42, 0x3C, 0x00],
        'D' => &[0x78, 0x44, 0x42, 0x42, 0x42, 0x44, 0x78, 0x00],
        'E' => &[0x7E, 0x40, 0x40, 0x7C, 0x40, 0x40, 0x7E, 0x00],
        'F' => &[0x7E, 0x40, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x00],
        'G' => &[0x3C, 0x42, 0x40, 0x4E, 0x42, 0x42, 0x3C, 0x00],
        'H' => &[0x42, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00],
        'I' => &[0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        'J' => &[0x1E, 0x04, 0x04, 0x04, 0x44, 0x44, 0x38, 0x00],
        'K' => &[0x42, 0x44, 0x48, 0x70, 0x48, 0x44, 0x42, 0x00],
        'L' => &[0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7E, 0x00],
        'M' => &[0x42, 0x66, 0x5A, 0x5A, 0x42, 0x42, 0x42, 0x00],
        'N' => &[0x42, 0x62, 0x52, 0x4A, 0x46, 0x42, 0x42, 0x00],
        'O' => &[0x3C, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'P' => &[0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40, 0x40, 0x00],
        'Q' => &[0x3C, 0x42, 0x42, 0x42, 0x4A, 0x44, 0x3A, 0x00],
        'R' => &[0x7C, 0x42, 0x42, 0x7C, 0x48, 0x44, 0x42, 0x00],
        'S' => &[0x3C, 0x42, 0x40, 0x3C, 0x02, 0x42, 0x3C, 0x00],
        'T' => &[0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00],
        'U' => &[0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'V' => &[0x42, 0x42, 0x42, 0x42, 0x42, 0x24, 0x18, 0x00],
        'W' => &[0x42, 0x42, 0x42, 0x5A, 0x5A, 0x66, 0x42, 0x00],
        'X' => &[0x42, 0x42, 0x24, 0x18, 0x24, 0x42, 0x42, 0x00],
        'Y' => &[0x42, 0x42, 0x24, 0x18, 0x18, 0x18, 0x18, 0x00],
        'Z' => &[0x7E, 0x02, 0x04, 0x18, 0x20, 0x40, 0x7E, 0x00],
        ' ' => &BLANK,
        '.' => &[0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ':' => &[0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00],
        '0' => &[0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00],
        '1' => &[0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        '2' => &[0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E, 0x00],
        '3' => &[0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
        '4' => &[0x0C, 0x1C, 0x2C, 0x4C, 0x7E, 0x0C, 0x0C, 0x00],
        '5' => &[0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
        '6' => &[0x1C, 0x30, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00],
        '7' => &[0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00],
        '8' => &[0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
        '9' => &[0x3C, 0x66, 0x66, 0x3E, 0x06, 0x0C, 0x38, 0x00],
        '%' => &[0x62, 0x64, 0x08, 0x10, 0x26, 0x46, 0x00, 0x00],
        _ => return None,
    };
    Some(glyph)
}

/// Look up a glyph, falling back to [`BLANK`]
///
/// Unsupported characters draw nothing instead of failing.
pub fn glyph_or_blank(ch: char) -> &'static Glyph {
    glyph(ch).unwrap_or(&BLANK)
}

/// Iterate the lit `(row, col)` cells of a glyph, row-major
pub fn lit_cells(glyph: &Glyph) -> impl Iterator<Item = (i32, i32)> + '_ {
    glyph.iter().enumerate().flat_map(|(row, &line)| {
        (0..8)
            .filter(move |col| line & (1 << col) != 0)
            .map(move |col| (row as i32, col as i32))
    })
}
