//! Greedy line wrapping against a width budget.
use super::metrics::{char_width, normalize, text_width};
use std::mem;

/// Characters at or above this code point may break anywhere (CJK, kana,
/// hangul, fullwidth forms); below it, breaks happen only at spaces.
const BREAK_ANYWHERE_FROM: u32 = 0x2E80;

#[inline]
fn breaks_anywhere(c: char) -> bool {
    u32::from(c) >= BREAK_ANYWHERE_FROM
}

/// Wrap `text` into lines no wider than `capacity` (1/1000 em units).
///
/// Hard newlines start a new line; blank lines between paragraphs of text are
/// kept as empty lines, blank lines at either end are dropped. Words are moved
/// whole to the next line when they do not fit; a word wider than a full line
/// is split between characters. Text that is empty or whitespace-only yields
/// no lines at all.
///
/// A single character wider than `capacity` is still placed on its own line,
/// so the function always makes progress.
pub fn wrap_text(text: &str, capacity: u32) -> Vec<String> {
    let normalized = normalize(text);
    let body = normalized.trim_matches('\n');
    if body.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for segment in body.split('\n') {
        let mut filler = LineFiller::new(&mut lines, capacity);
        let mut word = String::new();
        for c in segment.trim_end().chars() {
            if c == ' ' {
                filler.push_word(&mem::take(&mut word));
                filler.push_space();
            } else if breaks_anywhere(c) {
                filler.push_word(&mem::take(&mut word));
                let mut buf = [0u8; 4];
                filler.push_word(c.encode_utf8(&mut buf));
            } else {
                word.push(c);
            }
        }
        filler.push_word(&word);
        filler.finish();
    }
    lines
}

struct LineFiller<'a> {
    out: &'a mut Vec<String>,
    start: usize,
    current: String,
    width: u32,
    capacity: u32,
    continuation: bool,
}

impl<'a> LineFiller<'a> {
    fn new(out: &'a mut Vec<String>, capacity: u32) -> Self {
        let start = out.len();
        Self {
            out,
            start,
            current: String::new(),
            width: 0,
            capacity,
            continuation: false,
        }
    }

    #[inline]
    fn fits(&self, width: u32) -> bool {
        self.width + width <= self.capacity
    }

    fn break_line(&mut self) {
        let line = mem::take(&mut self.current);
        self.out.push(line.trim_end().to_string());
        self.width = 0;
        self.continuation = true;
    }

    fn push_space(&mut self) {
        if self.current.is_empty() && self.continuation {
            return;
        }
        let width = char_width(' ');
        if self.fits(width) {
            self.current.push(' ');
            self.width += width;
        } else {
            // The space itself is consumed by the break.
            self.break_line();
        }
    }

    fn push_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let width = text_width(word);
        if self.fits(width) {
            self.current.push_str(word);
            self.width += width;
            return;
        }
        if width <= self.capacity {
            if self.current.trim().is_empty() {
                self.current.clear();
                self.width = 0;
            } else {
                self.break_line();
            }
            self.current.push_str(word);
            self.width = width;
            return;
        }
        for c in word.chars() {
            let char_w = char_width(c);
            if !self.fits(char_w) {
                if self.current.trim().is_empty() {
                    self.current.clear();
                    self.width = 0;
                } else {
                    self.break_line();
                }
            }
            self.current.push(c);
            self.width += char_w;
        }
    }

    fn finish(mut self) {
        if !self.current.is_empty() || self.out.len() == self.start {
            let line = mem::take(&mut self.current);
            self.out.push(line.trim_end().to_string());
        }
    }
}
