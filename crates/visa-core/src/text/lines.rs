//! Line splitting on every Unicode line boundary.
//!
//! Text layers from PDFs end lines with `\n`, `\r\n`, a bare `\r`, form
//! feeds or `U+2028`, so `str::lines` is not enough.

/// Characters that end a line. `\r\n` counts as one break.
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}',
];

pub fn is_line_break(c: char) -> bool {
    LINE_BREAKS.contains(&c)
}

/// Lines paired with the break that ended them (empty for the last line).
///
/// A trailing break does not start an extra empty line.
pub fn lines_with_breaks(text: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(idx) = rest.find(is_line_break) else {
            let line = rest;
            rest = "";
            return Some((line, ""));
        };
        let (line, tail) = rest.split_at(idx);
        let break_len = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        let (brk, tail) = tail.split_at(break_len);
        rest = tail;
        Some((line, brk))
    })
}

/// Lines without their terminators.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    lines_with_breaks(text).map(|(line, _)| line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<&str> {
        split_lines(text).collect()
    }

    #[test]
    fn test_all_break_kinds() {
        assert_eq!(
            lines("a\nb\r\nc\rd\u{0C}e\u{2028}f\u{85}g"),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
    }

    #[test]
    fn test_empty_lines_kept_trailing_break_dropped() {
        assert_eq!(lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(lines("\r\r"), vec!["", ""]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_breaks_are_reported() {
        let pairs: Vec<_> = lines_with_breaks("x\r\ny\u{2029}z").collect();
        assert_eq!(pairs, vec![("x", "\r\n"), ("y", "\u{2029}"), ("z", "")]);
    }

    #[test]
    fn test_rejoining_restores_text() {
        let text = "one\r\ntwo\rthree\n";
        let joined: String = lines_with_breaks(text).flat_map(|(l, b)| [l, b]).collect();
        assert_eq!(joined, text);
    }
}
