//! Plain-text rendering of a fetched body.
//!
//! Markup is removed by a single forward scan: everything from a `<` up to the
//! next `>` is dropped. Tags don't nest and a `>` inside an attribute value ends
//! the tag early. A `>` outside of a tag is dropped as well.

use std::io::{self, Write};
use std::str::Chars;

/// Iterator over the characters of a text outside of any `<...>` span.
#[derive(Debug, Clone)]
pub struct StripMarkup<'a> {
    chars: Chars<'a>,
    in_tag: bool,
}

impl Iterator for StripMarkup<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        for ch in self.chars.by_ref() {
            match ch {
                '<' => self.in_tag = true,
                '>' => self.in_tag = false,
                ch if !self.in_tag => return Some(ch),
                _ => {}
            }
        }
        None
    }
}

pub fn strip_markup(text: &str) -> StripMarkup<'_> {
    StripMarkup { chars: text.chars(), in_tag: false }
}

/// Writes the body without markup, followed by a newline.
///
/// The body is read as UTF-8, invalid sequences are replaced.
///
/// # Errors
///
/// Fails if writing to `out` fails.
pub fn render<W: Write>(body: &[u8], mut out: W) -> io::Result<()> {
    let text = String::from_utf8_lossy(body);
    let mut line = String::with_capacity(text.len() + 1);
    line.extend(strip_markup(&text));
    line.push('\n');

    out.write_all(line.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripped(text: &str) -> String {
        strip_markup(text).collect()
    }

    #[test]
    fn strip_nested_tags() {
        assert_eq!(stripped("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn keep_text_and_whitespace() {
        assert_eq!(stripped("plain text\r\n  with lines"), "plain text\r\n  with lines");
        assert_eq!(stripped(""), "");
    }

    #[test]
    fn no_special_handling_inside_tags() {
        assert_eq!(stripped(r#"<a title="1 > 0">link</a>"#), r#" 0"link"#);
        assert_eq!(stripped("a > b"), "a  b");
        assert_eq!(stripped("unterminated <tag"), "unterminated ");
    }

    #[test]
    fn render_appends_newline() {
        let mut out = Vec::new();
        render(b"<html><body><h1>Title</h1>text</body></html>", &mut out).unwrap();
        assert_eq!(out, b"Titletext\n");
    }

    #[test]
    fn render_empty_body() {
        let mut out = Vec::new();
        render(b"", &mut out).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn render_replaces_invalid_utf8() {
        let mut out = Vec::new();
        render(b"<i>caf\xe9</i>", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "caf\u{fffd}\n");
    }
}
