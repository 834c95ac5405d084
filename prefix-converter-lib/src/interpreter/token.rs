use crate::interpreter::operator::{BinaryOperator, INVALID_PRECEDENCE, PARENTHESIS_PRECEDENCE};
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression, together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Byte offset into the original expression where the token began.
    pub offset: usize,
    pub kind: TokenKind,
    /// The source text the token was created from.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(Number),
    OpenParenthesis,
    CloseParenthesis,
    Operator(BinaryOperator),
}

/// A numeric literal, accumulated one character at a time by the lexer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Number {
    /// Literal text including a folded-in leading `-`, if any.
    pub literal: String,
    pub has_decimal_point: bool,
    /// Set when whitespace followed the literal; no digit may extend it afterwards.
    pub trailing_whitespace: bool,
    /// Filled in by the converter once the literal has been validated.
    pub value: Option<f64>,
}

impl Number {
    pub fn new(literal: impl Into<String>) -> Number {
        let literal = literal.into();
        Number {
            has_decimal_point: literal.contains('.'),
            literal,
            ..Number::default()
        }
    }

    /// Whether the literal has no digits yet, i.e. it is empty or just a sign.
    pub fn is_bare(&self) -> bool {
        self.literal.is_empty() || self.literal == "-"
    }
}

impl Token {
    pub fn new(offset: usize, kind: TokenKind, text: impl Into<String>) -> Token {
        Token {
            offset,
            kind,
            text: text.into(),
        }
    }

    pub fn new_number(offset: usize, literal: &str, text: &str) -> Token {
        Token::new(offset, TokenKind::Number(Number::new(literal)), text)
    }

    pub fn new_operator(offset: usize, operator: BinaryOperator) -> Token {
        Token::new(
            offset,
            TokenKind::Operator(operator),
            operator.symbol().to_string(),
        )
    }

    pub fn new_open_parenthesis(offset: usize) -> Token {
        Token::new(offset, TokenKind::OpenParenthesis, "(")
    }

    pub fn new_close_parenthesis(offset: usize) -> Token {
        Token::new(offset, TokenKind::CloseParenthesis, ")")
    }

    /// A 'value' is a token that is or ends a complete operand, i.e. a number or `)`.
    pub fn is_value(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number(_) | TokenKind::CloseParenthesis
        )
    }

    pub fn is_caret(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Operator(BinaryOperator::Exponentiate)
        )
    }

    pub fn as_number(&self) -> Option<&Number> {
        match &self.kind {
            TokenKind::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn precedence(&self) -> i8 {
        match &self.kind {
            TokenKind::Operator(operator) => operator.precedence(),
            TokenKind::OpenParenthesis => PARENTHESIS_PRECEDENCE,
            TokenKind::Number(_) | TokenKind::CloseParenthesis => INVALID_PRECEDENCE,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Number(Number {
                value: Some(value), ..
            }) => write!(f, "[num:{}]", value),
            TokenKind::Number(number) => write!(f, "[num:{}]", number.literal),
            TokenKind::OpenParenthesis => write!(f, "[opb]"),
            TokenKind::CloseParenthesis => write!(f, "[clb]"),
            TokenKind::Operator(operator) => write!(f, "[{}]", operator.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unconverted_number_displays_its_literal() {
        let token = Token::new_number(0, "-8.60", "-8.60");
        assert_eq!(token.to_string(), "[num:-8.60]");
    }

    #[test]
    fn converted_number_displays_its_value() {
        let mut number = Number::new("-8.60");
        number.value = Some(-8.6);
        let token = Token::new(0, TokenKind::Number(number), "-8.60");
        assert_eq!(token.to_string(), "[num:-8.6]");
    }

    #[test]
    fn operators_and_parentheses_display_their_names() {
        let tokens = [
            Token::new_open_parenthesis(0),
            Token::new_operator(1, BinaryOperator::Modulo),
            Token::new_close_parenthesis(2),
        ];
        let displayed: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();
        assert_eq!(displayed, vec!["[opb]", "[mod]", "[clb]"]);
    }

    #[test]
    fn sign_only_literal_is_bare() {
        assert!(Number::new("").is_bare());
        assert!(Number::new("-").is_bare());
        assert!(!Number::new("-1").is_bare());
    }

    #[test]
    fn new_number_records_decimal_point() {
        assert!(Number::new("0.5").has_decimal_point);
        assert!(!Number::new("5").has_decimal_point);
    }

    #[test]
    fn precedence_follows_table() {
        assert_eq!(Token::new_operator(0, BinaryOperator::Exponentiate).precedence(), 3);
        assert_eq!(Token::new_operator(0, BinaryOperator::Modulo).precedence(), 2);
        assert_eq!(Token::new_operator(0, BinaryOperator::Subtract).precedence(), 1);
        assert_eq!(Token::new_open_parenthesis(0).precedence(), 0);
        assert_eq!(Token::new_close_parenthesis(0).precedence(), -1);
        assert_eq!(Token::new_number(0, "1", "1").precedence(), -1);
    }
}
