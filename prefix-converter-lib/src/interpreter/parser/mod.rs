mod infix_converter;

use crate::interpreter::error::TokenizeResult;
use crate::interpreter::parser::infix_converter::{infix_to_postfix, postfix_to_prefix};
use crate::interpreter::token::Token;
use log::debug;

/// Reorders the given infix tokens into prefix order, operators before their operands.
///
/// Operands of each operator come right operand first. Numbers are validated and
/// receive their parsed value.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to convert, as produced by the lexer.
///
/// returns: The same tokens in prefix order, with parentheses removed.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use prefix_converter::interpreter::lexer::tokenize;
/// use prefix_converter::interpreter::parser::to_prefix;
/// use prefix_converter::interpreter::tokens_to_string;
///
/// let infix_tokens = tokenize("4*(1+2)")?;
/// let prefix_tokens = to_prefix(infix_tokens)?;
/// assert_eq!(tokens_to_string(&prefix_tokens), "[mul][add][num:2][num:1][num:4]");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn to_prefix(infix_tokens: Vec<Token>) -> TokenizeResult<Vec<Token>> {
    let postfix_tokens = infix_to_postfix(infix_tokens)?;
    let prefix_tokens = postfix_to_prefix(postfix_tokens);
    debug!("converted into {} prefix tokens", prefix_tokens.len());
    Ok(prefix_tokens)
}
