//! Nesting-aware scanning over raw source text: balanced delimiter spans,
//! statement boundaries, and keyword peeking. All indices are byte offsets;
//! the delimiters tracked are ASCII, so every returned offset lands on a
//! character boundary.

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Advance past ASCII whitespace starting at `i`.
pub fn skip_whitespace(src: &str, mut i: usize) -> usize {
    let bytes = src.as_bytes();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// True when `kw` occurs at `i` and is not a prefix of a longer identifier.
pub fn keyword_at(src: &str, i: usize, kw: &str) -> bool {
    let bytes = src.as_bytes();
    if i + kw.len() > bytes.len() || !src[i..].starts_with(kw) {
        return false;
    }
    match bytes.get(i + kw.len()) {
        Some(&b) => !is_ident_byte(b),
        None => true,
    }
}

/// Read the span enclosed by the delimiter at `src[start]` (`(` or `{`),
/// tracking nesting of that delimiter type only. Returns the enclosed
/// content and the index just past the matching closer. Unbalanced input
/// consumes to end-of-text; the partial content is returned as-is.
pub fn read_delimited(src: &str, start: usize) -> (&str, usize) {
    let bytes = src.as_bytes();
    debug_assert!(bytes.get(start) == Some(&b'(') || bytes.get(start) == Some(&b'{'));
    let open = bytes[start];
    let close = if open == b'(' { b')' } else { b'}' };

    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return (&src[start + 1..i], i + 1);
            }
        }
        i += 1;
    }
    (&src[start + 1..], i)
}

/// Read one statement starting at `start`: everything up to and including
/// the first `;` whose enclosing-parenthesis depth is zero. Unterminated
/// statements consume to end-of-text.
pub fn read_statement(src: &str, start: usize) -> (&str, usize) {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return (&src[start..=i], i + 1),
            _ => {}
        }
        i += 1;
    }
    (&src[start..], i)
}
