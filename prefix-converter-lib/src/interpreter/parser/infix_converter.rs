use crate::interpreter::error::{TokenizeError, TokenizeResult};
use crate::interpreter::token::{Number, Token, TokenKind};
use log::trace;
use std::collections::VecDeque;

/// Runs the shunting-yard algorithm over the given infix tokens.
///
/// The result is the output queue followed by whatever is left on the operator stack,
/// taken from the top down. Every number is validated and given its value on the way.
pub(crate) fn infix_to_postfix(original_tokens: Vec<Token>) -> TokenizeResult<Vec<Token>> {
    let mut tokens: VecDeque<Token> = VecDeque::from(original_tokens);
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = vec![];
    while let Some(mut token) = tokens.pop_front() {
        match token.kind {
            TokenKind::Number(ref mut number) => {
                number.value = Some(parse_number(number, token.offset)?);
                output.push(token);
            }
            TokenKind::OpenParenthesis => operators.push_front(token),
            TokenKind::CloseParenthesis => {
                parse_closing_parenthesis_token(&mut operators, &mut output, &token)?
            }
            TokenKind::Operator(_) => parse_operator_token(&mut operators, &mut output, token),
        };
    }

    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

/// Turns the shunting-yard output into the prefix order the renderer walks.
pub(crate) fn postfix_to_prefix(mut postfix_tokens: Vec<Token>) -> Vec<Token> {
    postfix_tokens.reverse();
    postfix_tokens
}

fn transfer_leftover_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> TokenizeResult<()> {
    while let Some(operator) = operators.pop_front() {
        match operator.kind {
            TokenKind::OpenParenthesis => {
                return Err(TokenizeError::new("unbalanced '('", operator.offset));
            }
            _ => output.push(operator),
        }
    }
    Ok(())
}

fn parse_closing_parenthesis_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    closing: &Token,
) -> TokenizeResult<()> {
    loop {
        match operators.pop_front() {
            None => {
                return Err(TokenizeError::new("unbalanced ')'", closing.offset));
            }
            Some(Token {
                kind: TokenKind::OpenParenthesis,
                ..
            }) => {
                // Discard the open parenthesis.
                trace!("matched ')' at offset {}", closing.offset);
                return Ok(());
            }
            Some(operator) => output.push(operator),
        }
    }
}

fn parse_operator_token(operators: &mut VecDeque<Token>, output: &mut Vec<Token>, token: Token) {
    while let Some(top_of_operator_stack) = operators.front() {
        let top_precedence = top_of_operator_stack.precedence();
        let precedence = token.precedence();
        // Equal precedence only gives way to a new `^`; `+` after `-` (and the like) stacks.
        let should_pop =
            top_precedence > precedence || (top_precedence == precedence && token.is_caret());
        if !should_pop {
            break;
        }

        if let Some(other_operator_token) = operators.pop_front() {
            trace!("popped {} ahead of {}", other_operator_token, token);
            output.push(other_operator_token);
        }
    }

    operators.push_front(token);
}

fn parse_number(number: &Number, offset: usize) -> TokenizeResult<f64> {
    if number.literal.is_empty() {
        return Err(TokenizeError::new("number is empty", offset));
    }
    let invalid = || {
        TokenizeError::new(
            format!("invalid number literal '{}'", number.literal),
            offset,
        )
    };
    let value: f64 = number.literal.parse().map_err(|_| invalid())?;
    // The value must print back as exactly the literal it was read from.
    if !value.is_finite() || value.to_string() != number.literal {
        return Err(invalid());
    }
    Ok(value)
}
