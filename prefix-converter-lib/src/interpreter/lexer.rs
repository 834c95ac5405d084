use crate::interpreter::error::{TokenizeError, TokenizeResult};
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::token::{Token, TokenKind};
use log::{debug, trace};

/// Splits the given infix expression into tokens.
///
/// A `+` or `-` that opens an operand (at the start, after `(` or after another operator)
/// is folded into the number that follows it: `-` is kept in the literal, `+` is dropped.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The tokens in the order they appear in the expression.
///
/// # Examples
///
/// ```
/// use prefix_converter::interpreter::lexer::tokenize;
/// use prefix_converter::interpreter::tokens_to_string;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = tokenize("4*(1+2)")?;
/// assert_eq!(
///     tokens_to_string(&tokens),
///     "[num:4][mul][opb][num:1][add][num:2][clb]"
/// );
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokenize(expression: &str) -> TokenizeResult<Vec<Token>> {
    let mut lexer = Lexer::default();
    for (offset, character) in expression.char_indices() {
        lexer.consume(offset, character)?;
    }
    let tokens = lexer.finish()?;
    debug!("tokenized {:?} into {} tokens", expression, tokens.len());
    Ok(tokens)
}

/// Lexer state. The last produced token is the only context needed to classify a character.
#[derive(Default)]
struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    fn consume(&mut self, offset: usize, character: char) -> TokenizeResult<()> {
        match character {
            ' ' | '\t' | '\r' | '\n' => {
                self.mark_trailing_whitespace();
                Ok(())
            }
            '(' => self.consume_open_parenthesis(offset),
            ')' => self.consume_close_parenthesis(offset),
            '0'..='9' | '.' => self.consume_digit(offset, character),
            _ => match BinaryOperator::from_symbol(character) {
                Some(sign @ (BinaryOperator::Add | BinaryOperator::Subtract)) => {
                    self.consume_sign(offset, sign)
                }
                Some(operator) => self.consume_operator(offset, operator),
                None => Err(TokenizeError::new(
                    format!("illegal character '{}'", character),
                    offset,
                )),
            },
        }
    }

    fn finish(self) -> TokenizeResult<Vec<Token>> {
        if self.tokens.is_empty() {
            return Err(TokenizeError::new("empty expression", 0));
        }
        Ok(self.tokens)
    }

    fn mark_trailing_whitespace(&mut self) {
        if let Some(Token {
            kind: TokenKind::Number(number),
            ..
        }) = self.tokens.last_mut()
        {
            number.trailing_whitespace = true;
        }
    }

    fn consume_sign(&mut self, offset: usize, operator: BinaryOperator) -> TokenizeResult<()> {
        match self.tokens.last().map(|token| &token.kind) {
            None | Some(TokenKind::OpenParenthesis) | Some(TokenKind::Operator(_)) => {
                self.start_signed_number(offset, operator);
                Ok(())
            }
            Some(TokenKind::Number(number)) if number.is_bare() => Err(TokenizeError::new(
                format!("'{}' unexpected as unary operator", operator),
                offset,
            )),
            Some(TokenKind::Number(_)) | Some(TokenKind::CloseParenthesis) => {
                self.push(Token::new_operator(offset, operator));
                Ok(())
            }
        }
    }

    fn start_signed_number(&mut self, offset: usize, sign: BinaryOperator) {
        let literal = match sign {
            BinaryOperator::Subtract => "-",
            _ => "",
        };
        self.push(Token::new_number(
            offset,
            literal,
            &sign.symbol().to_string(),
        ));
    }

    fn consume_operator(&mut self, offset: usize, operator: BinaryOperator) -> TokenizeResult<()> {
        match self.tokens.last().map(|token| &token.kind) {
            Some(TokenKind::Number(number)) if !number.is_bare() => {
                self.push(Token::new_operator(offset, operator));
                Ok(())
            }
            Some(TokenKind::CloseParenthesis) => {
                self.push(Token::new_operator(offset, operator));
                Ok(())
            }
            Some(TokenKind::Operator(_)) => Err(TokenizeError::new(
                format!("too many operators, '{}' found", operator),
                offset,
            )),
            None | Some(TokenKind::OpenParenthesis) | Some(TokenKind::Number(_)) => {
                Err(TokenizeError::new(
                    format!("missing operand before '{}'", operator),
                    offset,
                ))
            }
        }
    }

    fn consume_open_parenthesis(&mut self, offset: usize) -> TokenizeResult<()> {
        match self.tokens.last() {
            Some(token) if token.is_value() => Err(TokenizeError::new(
                "expected operator but '(' found",
                offset,
            )),
            _ => {
                self.push(Token::new_open_parenthesis(offset));
                Ok(())
            }
        }
    }

    fn consume_close_parenthesis(&mut self, offset: usize) -> TokenizeResult<()> {
        match self.tokens.last() {
            Some(token) if token.is_value() => {
                self.push(Token::new_close_parenthesis(offset));
                Ok(())
            }
            _ => Err(TokenizeError::new("missing operand before ')'", offset)),
        }
    }

    fn consume_digit(&mut self, offset: usize, character: char) -> TokenizeResult<()> {
        match self.tokens.last_mut() {
            Some(Token {
                kind: TokenKind::Number(number),
                text,
                ..
            }) => {
                if number.trailing_whitespace {
                    return Err(TokenizeError::new(
                        format!("expected operator but '{}' found", character),
                        offset,
                    ));
                }
                if character == '.' {
                    if number.has_decimal_point {
                        return Err(TokenizeError::new(
                            "number already has a decimal point",
                            offset,
                        ));
                    }
                    number.has_decimal_point = true;
                }
                number.literal.push(character);
                text.push(character);
                trace!("extended number to {:?}", number.literal);
                Ok(())
            }
            Some(Token {
                kind: TokenKind::CloseParenthesis,
                ..
            }) => Err(TokenizeError::new(
                format!("expected operator but '{}' found", character),
                offset,
            )),
            _ => {
                let literal = character.to_string();
                self.push(Token::new_number(offset, &literal, &literal));
                Ok(())
            }
        }
    }

    fn push(&mut self, token: Token) {
        trace!("lexed {} at offset {}", token, token.offset);
        self.tokens.push(token);
    }
}
