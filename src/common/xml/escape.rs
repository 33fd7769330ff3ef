use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automata are built only once, thread-safe
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML attribute escaper")
});

/// Whether `c` may appear in an XML 1.0 document.
///
/// Word refuses to open a package whose parts contain C0 control characters
/// other than tab, newline and carriage return, or the non-characters
/// U+FFFE/U+FFFF.
#[inline]
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn strip_invalid(s: &str) -> std::borrow::Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        std::borrow::Cow::Borrowed(s)
    } else {
        std::borrow::Cow::Owned(s.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// Escape a string for use as XML character data (`<w:t>` content).
///
/// Characters that are not legal in XML 1.0 are dropped.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_xml_text;
/// assert_eq!(escape_xml_text("a & b"), "a &amp; b");
/// assert_eq!(escape_xml_text("say \"hi\""), "say \"hi\"");
/// assert_eq!(escape_xml_text("bell\u{7}"), "bell");
/// ```
#[inline]
pub fn escape_xml_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(&strip_invalid(s), &["&amp;", "&lt;", "&gt;"])
}

/// Escape a string for use inside a double- or single-quoted XML attribute.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_xml_attr;
/// assert_eq!(escape_xml_attr("<\"x\">"), "&lt;&quot;x&quot;&gt;");
/// ```
#[inline]
pub fn escape_xml_attr(s: &str) -> String {
    ATTR_ESCAPER.replace_all(
        &strip_invalid(s),
        &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keeps_quotes() {
        assert_eq!(escape_xml_text("it's <b>"), "it's &lt;b&gt;");
    }

    #[test]
    fn test_cjk_passes_through() {
        assert_eq!(escape_xml_text("培训手册"), "培训手册");
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(escape_xml_text("a\u{0}b\u{1B}c\td"), "abc\td");
        assert_eq!(escape_xml_attr("x\u{FFFF}"), "x");
    }
}
