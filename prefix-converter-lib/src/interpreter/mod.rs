pub mod error;
pub mod lexer;
mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

pub use crate::interpreter::operator::BinaryOperator;

use crate::interpreter::error::TokenizeResult;
use crate::interpreter::syntax::call_tree::render;
use crate::interpreter::token::Token;
use anyhow::Result;
use itertools::Itertools;

/// Converts the given infix expression into its prefix-ordered tokens.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The tokens of the expression in prefix order, or the first input error found.
///
/// # Examples
///
/// ```
/// use prefix_converter::interpreter::{convert, tokens_to_string};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let prefix_tokens = convert("1-2*3")?;
/// assert_eq!(tokens_to_string(&prefix_tokens), "[sub][mul][num:3][num:2][num:1]");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: &str) -> TokenizeResult<Vec<Token>> {
    let tokens = lexer::tokenize(expression)?;
    parser::to_prefix(tokens)
}

/// Converts the given infix expression all the way into its nested call representation.
///
/// # Examples
///
/// ```
/// use prefix_converter::interpreter::render_expression;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let call_tree = render_expression("6%4")?;
/// assert_eq!(call_tree, "MOD(\n  4,\n  6\n)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn render_expression(expression: &str) -> Result<String> {
    let prefix_tokens = convert(expression)?;
    render(&prefix_tokens)
}

/// Concatenates the compact trace form of each token, e.g. `[num:4][mul][opb]`.
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().join("")
}
