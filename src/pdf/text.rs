//! Text encoding for PDF strings and font run selection.
use crate::layout::metrics::is_ascii_glyph;
use std::fmt::Write;

/// Font resources every page references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Helvetica, WinAnsi encoded
    Regular,
    /// Helvetica-Bold, WinAnsi encoded
    Bold,
    /// STSong-Light through the UniGB-UCS2-H CMap; covers everything else
    Cjk,
}

impl FontFace {
    /// Resource name used in content streams.
    pub const fn resource(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Cjk => "F3",
        }
    }
}

/// A maximal slice of a line drawn with one font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// `true` when every character is printable ASCII
    pub ascii: bool,
}

impl TextRun<'_> {
    pub fn face(&self, bold: bool) -> FontFace {
        match (self.ascii, bold) {
            (false, _) => FontFace::Cjk,
            (true, true) => FontFace::Bold,
            (true, false) => FontFace::Regular,
        }
    }

    /// The run as a PDF string operand: a literal for ASCII, UCS-2 hex otherwise.
    pub fn operand(&self) -> String {
        if self.ascii {
            format!("({})", escape_literal(self.text))
        } else {
            format!("<{}>", utf16_hex(self.text))
        }
    }
}

/// Split `text` into runs that switch between the ASCII face and the CJK face.
pub fn split_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (idx, c) in text.char_indices() {
        let ascii = is_ascii_glyph(c);
        match current {
            Some(kind) if kind == ascii => {},
            Some(kind) => {
                runs.push(TextRun {
                    text: &text[start..idx],
                    ascii: kind,
                });
                start = idx;
                current = Some(ascii);
            },
            None => current = Some(ascii),
        }
    }
    if let Some(kind) = current {
        runs.push(TextRun {
            text: &text[start..],
            ascii: kind,
        });
    }
    runs
}

/// Escape a string for use inside a PDF literal `( ... )`.
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Uppercase hex of the UCS-2 code units of `s`.
///
/// Characters outside the Basic Multilingual Plane have no UCS-2 code and
/// are written as `?`.
pub fn utf16_hex(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 4);
    for c in s.chars() {
        let unit = u16::try_from(u32::from(c)).unwrap_or(u16::from(b'?'));
        // Writing into a String cannot fail.
        let _ = write!(out, "{:04X}", unit);
    }
    out
}

/// Encode a document information string (title, producer).
///
/// Printable ASCII stays a readable literal; anything else becomes a UTF-16BE
/// hex string with a byte order mark, which readers decode as Unicode.
pub fn info_string(s: &str) -> String {
    if s.chars().all(is_ascii_glyph) {
        return format!("({})", escape_literal(s));
    }
    let mut out = String::from("<FEFF");
    let mut units = [0u16; 2];
    for c in s.chars() {
        for unit in c.encode_utf16(&mut units).iter() {
            let _ = write!(out, "{:04X}", unit);
        }
    }
    out.push('>');
    out
}
