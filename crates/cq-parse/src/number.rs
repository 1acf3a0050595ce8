//! Numeric literal and signed term extraction.
//!
//! Statistic lines come in two shapes: absolute (`@might 12 1`) and
//! relative (`@might +2-1`). The extractors here pull both shapes out of
//! a whole line; the folding layer decides which one applies, with signed
//! terms taking precedence when any are present.

/// Every maximal run of decimal digits on the line, in order. Runs too
/// large for an `i64` are dropped.
pub fn unsigned_literals(line: &str) -> Vec<i64> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in line.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            if let Ok(value) = current.parse() {
                out.push(value);
            }
            current.clear();
        }
    }
    if let Ok(value) = current.parse() {
        out.push(value);
    }
    out
}

/// Every signed integer term on the line, in order: a `+` or `-` glued to
/// a digit run, wherever it appears. Terms too large for an `i64` are
/// dropped.
pub fn signed_terms(line: &str) -> Vec<i64> {
    let bytes = line.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let sign = match bytes[i] {
            b'+' => 1i64,
            b'-' => -1i64,
            _ => {
                i += 1;
                continue;
            }
        };
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == start {
            i = start;
            continue;
        }
        if let Ok(value) = line[start..end].parse::<i64>() {
            out.push(sign * value);
        }
        i = end;
    }
    out
}
