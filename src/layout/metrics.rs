//! Character advance widths used for wrapping.
//!
//! Widths are expressed in 1/1000 em. Printable ASCII is drawn with the
//! standard Helvetica face, so its advances come straight from the Helvetica
//! AFM; everything else is drawn with the CJK fallback font whose advance is
//! one full em.

/// Advance of every character the ASCII face does not cover.
pub const FULL_EM: u32 = 1000;

/// Helvetica advance widths for U+0020..=U+007E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold advance widths for U+0020..=U+007E.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Whether `c` is drawn with the ASCII face.
#[inline]
pub fn is_ascii_glyph(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// Advance width of a single character in 1/1000 em.
///
/// Control characters have no width; callers strip them with
/// [`normalize`] before measuring.
#[inline]
pub fn char_width(c: char) -> u32 {
    if is_ascii_glyph(c) {
        u32::from(HELVETICA_ASCII[c as usize - 0x20])
    } else if c.is_control() {
        0
    } else {
        FULL_EM
    }
}

/// Advance width of a single character in the bold face.
///
/// Only ASCII differs; the CJK fallback is emboldened by stroking, which
/// keeps its advance.
#[inline]
pub fn bold_char_width(c: char) -> u32 {
    if is_ascii_glyph(c) {
        u32::from(HELVETICA_BOLD_ASCII[c as usize - 0x20])
    } else {
        char_width(c)
    }
}

/// Advance width of a string in 1/1000 em.
pub fn text_width(text: &str) -> u32 {
    text.chars().map(char_width).sum()
}

/// Advance width of a string in the regular or bold face.
pub fn text_width_for(text: &str, bold: bool) -> u32 {
    if bold {
        text.chars().map(bold_char_width).sum()
    } else {
        text_width(text)
    }
}

/// How many 1/1000 em units fit into `width_mm` at a font size of `font_size_mm`.
#[inline]
pub fn capacity(width_mm: f64, font_size_mm: f64) -> u32 {
    if font_size_mm <= 0.0 {
        return 0;
    }
    // The epsilon keeps exact fits (e.g. 170.0 / 4.2333...) from flooring one unit short.
    ((width_mm / font_size_mm) * f64::from(FULL_EM) + 1e-6).floor().max(0.0) as u32
}

/// Replace tabs with spaces and drop every other control character except newlines.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            '\n' => Some('\n'),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
