//! Restricted arithmetic over accumulated modifier expressions.
//!
//! A modifier expression is a concatenation of signed integer terms,
//! `"+2-1+3"`. Nothing else is legal: no bare numbers, no whitespace
//! between terms, no operators beyond the leading sign of each term.
//! The empty expression evaluates to zero.

use thiserror::Error;

/// Error from evaluating a modifier expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The expression contains something other than signed integer terms.
    #[error("invalid modifier expression: {0:?}")]
    InvalidExpression(String),
}

/// Evaluate a modifier expression to the sum of its terms.
pub fn eval_modifier(expr: &str) -> Result<i32, ExprError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let invalid = || ExprError::InvalidExpression(expr.to_string());

    let bytes = trimmed.as_bytes();
    let mut total: i32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let sign = match bytes[i] {
            b'+' => 1,
            b'-' => -1,
            _ => return Err(invalid()),
        };
        i += 1;
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return Err(invalid());
        }
        let value: i32 = trimmed[start..i].parse().map_err(|_| invalid())?;
        total = total.saturating_add(sign * value);
    }
    Ok(total)
}
