//! String-aware brace-depth scanner.
//!
//! Finds every top-level `{ ... }` span in a text buffer without tokenizing
//! it. Braces inside `"..."` or `'...'` strings do not count, and a backslash
//! always consumes the character after it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InString(u8),
}

/// Slice out each balanced top-level object span, in order of appearance.
///
/// A `}` with no matching `{` is ignored, so one stray closer cannot hide the
/// objects that follow it. An object still open at the end of the buffer is
/// not returned.
pub fn object_spans(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut state = ScanState::Outside;
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;

    // All delimiters are ASCII, so every slice boundary is a char boundary.
    while i < bytes.len() {
        let b = bytes[i];

        if b == b'\\' {
            i += 2;
            continue;
        }

        match state {
            ScanState::InString(quote) => {
                if b == quote {
                    state = ScanState::Outside;
                }
            }
            ScanState::Outside => match b {
                b'"' | b'\'' => state = ScanState::InString(b),
                b'{' => {
                    if depth == 0 {
                        start = i;
                    }
                    depth += 1;
                }
                b'}' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        spans.push(&text[start..=i]);
                    }
                }
                _ => {}
            },
        }

        i += 1;
    }

    spans
}
