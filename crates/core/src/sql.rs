//! SQL literal rendering.
//!
//! Every user-supplied value that reaches a query string goes through one of
//! these helpers. Filter values are validated before they get here; quoting
//! is still applied so a bad value can never change the statement shape.

use crate::error::CoreError;

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_str(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render a finite float as a SQL numeric literal.
pub fn float_lit(value: f64) -> Result<String, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "Numeric parameter must be finite, got {value}"
        )));
    }
    // `{:?}` keeps a trailing `.0` so the literal stays a DOUBLE.
    Ok(format!("{value:?}"))
}

/// Render `('a', 'b', ...)` for an `IN` predicate. Empty input is rejected
/// because `IN ()` is not valid SQL.
pub fn in_list<S: AsRef<str>>(values: &[S]) -> Result<String, CoreError> {
    if values.is_empty() {
        return Err(CoreError::Validation(
            "IN list requires at least one value".to_string(),
        ));
    }
    let quoted: Vec<String> = values.iter().map(|v| quote_str(v.as_ref())).collect();
    Ok(format!("({})", quoted.join(", ")))
}

/// Check that single quotes and parentheses in a statement are balanced.
///
/// Used by tests and debug assertions on generated statements.
pub fn is_balanced(sql: &str) -> bool {
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_string) {
            ('\'', true) => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                } else {
                    in_string = false;
                }
            }
            ('\'', false) => in_string = true,
            ('(', false) => depth += 1,
            (')', false) => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0 && !in_string
}
