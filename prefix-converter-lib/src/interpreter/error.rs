/// A malformed-input error, positioned at a byte offset into the original expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct TokenizeError {
    pub message: String,
    pub offset: usize,
}

impl TokenizeError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// Formats the error as a caret pointing into the expression, followed by the message.
///
/// Leading whitespace is trimmed from the expression and the column is shifted to match.
///
/// # Examples
///
/// ```
/// use prefix_converter::interpreter::error::{format_error, TokenizeError};
///
/// let error = TokenizeError::new("illegal character 'x'", 4);
/// let formatted = format_error("  1+x", &error);
/// assert_eq!(formatted, "1+x\n  ^\nillegal character 'x'");
/// ```
pub fn format_error(expression: &str, error: &TokenizeError) -> String {
    let trimmed = expression.trim_start();
    let trimmed_length = expression.len() - trimmed.len();
    let column = error.offset.saturating_sub(trimmed_length);
    format!(
        "{}\n{}^\n{}",
        trimmed,
        " ".repeat(column),
        error.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_displays_message_and_offset() {
        let error = TokenizeError::new("unbalanced ')'", 3);
        assert_eq!(error.to_string(), "unbalanced ')' at offset 3");
    }

    #[test]
    fn caret_points_at_offset_without_leading_whitespace() {
        let error = TokenizeError::new("expected operator but '(' found", 1);
        assert_eq!(
            format_error("4(1+2)", &error),
            "4(1+2)\n ^\nexpected operator but '(' found"
        );
    }

    #[test]
    fn caret_column_is_shifted_by_trimmed_whitespace() {
        let error = TokenizeError::new("illegal character '$'", 5);
        assert_eq!(
            format_error(" \t 1+$", &error),
            "1+$\n  ^\nillegal character '$'"
        );
    }

    #[test]
    fn empty_expression_points_at_start() {
        let error = TokenizeError::new("empty expression", 0);
        assert_eq!(format_error("   ", &error), "\n^\nempty expression");
    }
}
