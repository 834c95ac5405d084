use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::syntax_visitor::{walk_call, SyntaxVisitor};
use crate::interpreter::token::{Number, Token, TokenKind};
use anyhow::{bail, Context, Result};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::mem;
use string_builder::Builder;

const INDENTATION: &str = "  ";

/// Deepest tree [`CallTree::to_tree_view`] will draw; `ptree` recurses once per level.
pub const MAX_TREE_VIEW_DEPTH: usize = 256;

/// A prefix sequence read back as a tree of binary operator calls.
#[derive(Clone, Debug, PartialEq)]
pub enum CallTree {
    Number(f64),
    Call {
        operator: BinaryOperator,
        left_operand: Box<CallTree>,
        right_operand: Box<CallTree>,
    },
}

impl CallTree {
    pub fn new_call(
        operator: BinaryOperator,
        left_operand: CallTree,
        right_operand: CallTree,
    ) -> CallTree {
        CallTree::Call {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    /// Reads a complete tree from a prefix sequence produced by the converter.
    ///
    /// The sequence is read from the end with an operand stack, so arbitrarily deep
    /// trees need no recursion. Fails if an operator runs out of operands, if more than
    /// one tree is left over, or if it holds tokens the converter never emits.
    pub fn from_prefix(prefix_tokens: &[Token]) -> Result<CallTree> {
        let mut operands: Vec<CallTree> = Vec::new();
        for token in prefix_tokens.iter().rev() {
            match &token.kind {
                TokenKind::Number(Number {
                    value: Some(value), ..
                }) => operands.push(CallTree::Number(*value)),
                TokenKind::Number(number) => {
                    bail!("Number '{}' has not been converted", number.literal)
                }
                TokenKind::Operator(operator) => {
                    let right_operand = operands
                        .pop()
                        .context("Prefix sequence ended before the call tree was complete")
                        .with_context(|| format!("Expected a second operand for {}", token))?;
                    let left_operand = operands
                        .pop()
                        .context("Prefix sequence ended before the call tree was complete")
                        .with_context(|| format!("Expected a first operand for {}", token))?;
                    operands.push(CallTree::new_call(*operator, left_operand, right_operand));
                }
                TokenKind::OpenParenthesis | TokenKind::CloseParenthesis => {
                    bail!("There should not be any parenthesis present in the input")
                }
            }
        }

        let root = operands.pop().context("No call tree root found")?;
        if !operands.is_empty() {
            bail!(
                "Found {} call trees where the prefix sequence should hold one",
                operands.len() + 1
            );
        }
        Ok(root)
    }

    /// Number of call levels from the root down to the deepest number.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let CallTree::Call {
                left_operand,
                right_operand,
                ..
            } = node
            {
                pending.push((&**left_operand, depth + 1));
                pending.push((&**right_operand, depth + 1));
            }
        }
        deepest
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            CallTree::Number(value) => visitor.visit_number(*value),
            CallTree::Call {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_call(operator, left_operand, right_operand),
        }
    }

    /// Writes the tree as nested calls, one operand per line.
    pub fn to_call_text(&self) -> Result<String> {
        let mut builder = Builder::new(0);
        let mut steps = vec![CallTextStep::Node(self, 0)];
        while let Some(step) = steps.pop() {
            match step {
                CallTextStep::Node(CallTree::Number(value), depth) => {
                    indent(&mut builder, depth);
                    builder.append(value.to_string());
                }
                CallTextStep::Node(
                    CallTree::Call {
                        operator,
                        left_operand,
                        right_operand,
                    },
                    depth,
                ) => {
                    indent(&mut builder, depth);
                    builder.append(operator.name().to_uppercase());
                    builder.append("(\n");
                    steps.push(CallTextStep::Close(depth));
                    steps.push(CallTextStep::Node(left_operand, depth + 1));
                    steps.push(CallTextStep::Separator);
                    steps.push(CallTextStep::Node(right_operand, depth + 1));
                }
                CallTextStep::Separator => builder.append(",\n"),
                CallTextStep::Close(depth) => {
                    builder.append("\n");
                    indent(&mut builder, depth);
                    builder.append(")");
                }
            }
        }
        builder.string().context("Failed to build call tree string")
    }

    /// Draws the tree with `ptree`, refusing trees too deep to draw without recursing
    /// past [`MAX_TREE_VIEW_DEPTH`] levels.
    pub fn to_tree_view(&self) -> Result<String> {
        let depth = self.depth();
        if depth > MAX_TREE_VIEW_DEPTH {
            bail!(
                "Call tree is {} levels deep, too deep to draw (at most {})",
                depth,
                MAX_TREE_VIEW_DEPTH
            );
        }
        Ok(self.to_string())
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        write_tree(&visitor.builder.build(), &mut buffer).map_err(|_| fmt::Error)?;
        let text = std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

// Dropping one level at a time would recurse as deep as the tree.
impl Drop for CallTree {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_operands(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_operands(&mut node, &mut pending);
        }
    }
}

fn detach_operands(node: &mut CallTree, pending: &mut Vec<CallTree>) {
    if let CallTree::Call {
        left_operand,
        right_operand,
        ..
    } = node
    {
        pending.push(mem::replace(&mut **left_operand, CallTree::Number(0.0)));
        pending.push(mem::replace(&mut **right_operand, CallTree::Number(0.0)));
    }
}

impl Display for CallTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

/// Renders a prefix sequence as nested calls, e.g. `MUL(\n  ADD(\n    2,\n    1\n  ),\n  4\n)`.
///
/// Each operator's operands are written in sequence order, right operand first.
///
/// # Arguments
///
/// * `prefix_tokens`: Tokens in prefix order, as produced by the converter.
///
/// returns: The call tree, in text.
///
/// # Examples
///
/// ```
/// use prefix_converter::interpreter::lexer::tokenize;
/// use prefix_converter::interpreter::parser::to_prefix;
/// use prefix_converter::interpreter::syntax::call_tree::render;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let prefix_tokens = to_prefix(tokenize("4*(1+2)")?)?;
/// let call_tree = render(&prefix_tokens)?;
/// assert_eq!(call_tree, "MUL(\n  ADD(\n    2,\n    1\n  ),\n  4\n)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn render(prefix_tokens: &[Token]) -> Result<String> {
    CallTree::from_prefix(prefix_tokens)?.to_call_text()
}

/// Pending work while writing call text; the stack replaces recursion over the tree.
enum CallTextStep<'a> {
    Node(&'a CallTree, usize),
    Separator,
    Close(usize),
}

fn indent(builder: &mut Builder, depth: usize) {
    for _ in 0..depth {
        builder.append(INDENTATION);
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_number(&mut self, value: f64) {
        self.builder.add_empty_child(value.to_string());
    }

    fn visit_call(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &CallTree,
        right_operand: &CallTree,
    ) {
        self.builder.begin_child(operator.name().to_uppercase());
        walk_call(self, left_operand, right_operand);
        self.builder.end_child();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;
    use crate::interpreter::parser::to_prefix;
    use pretty_assertions::assert_eq;

    fn prefix_of(expression: &str) -> Vec<Token> {
        to_prefix(tokenize(expression).unwrap()).unwrap()
    }

    #[test]
    fn single_number_renders_as_its_value() {
        assert_eq!(render(&prefix_of("+8.6")).unwrap(), "8.6");
    }

    #[test]
    fn prefix_sequence_is_read_right_operand_first() {
        let tree = CallTree::from_prefix(&prefix_of("7-2")).unwrap();

        assert_eq!(
            tree,
            CallTree::new_call(
                BinaryOperator::Subtract,
                CallTree::Number(7.0),
                CallTree::Number(2.0)
            )
        );
    }

    #[test]
    fn parenthesised_expression_renders_nested_calls() {
        assert_eq!(
            render(&prefix_of("4*(1+2)")).unwrap(),
            "MUL(\n  ADD(\n    2,\n    1\n  ),\n  4\n)"
        );
    }

    #[test]
    fn default_expression_renders_complete_tree() {
        let expected = [
            "ADD(",
            "  SUB(",
            "    3,",
            "    ADD(",
            "      MUL(",
            "        8.6,",
            "        -5",
            "      ),",
            "      -2",
            "    )",
            "  ),",
            "  -1",
            ")",
        ]
        .join("\n");

        assert_eq!(render(&prefix_of("-1+(-2 +-5*+8.6)-3")).unwrap(), expected);
    }

    #[test]
    fn powers_render_with_their_left_grouping() {
        assert_eq!(
            render(&prefix_of("2^3^2")).unwrap(),
            "POW(\n  2,\n  POW(\n    3,\n    2\n  )\n)"
        );
    }

    #[test]
    fn trailing_operator_exhausts_the_sequence() {
        let error = render(&prefix_of("1+")).unwrap_err();

        assert_eq!(
            error.root_cause().to_string(),
            "Prefix sequence ended before the call tree was complete"
        );
    }

    #[test]
    fn long_flat_chain_renders_without_recursing() {
        let terms = 2000;
        let expression = vec!["1"; terms].join("+");

        let call_tree = render(&prefix_of(&expression)).unwrap();

        assert!(call_tree.starts_with("ADD(\n  ADD(\n    ADD("));
        assert_eq!(call_tree.lines().count(), 3 * terms - 2);
    }

    #[test]
    fn long_flat_chain_has_one_level_per_operator() {
        let expression = vec!["2"; 5000].join("-");

        let tree = CallTree::from_prefix(&prefix_of(&expression)).unwrap();

        assert_eq!(tree.depth(), 4999);
        assert!(tree.to_tree_view().is_err());
    }

    #[test]
    fn shallow_tree_view_is_drawn() {
        let tree = CallTree::from_prefix(&prefix_of("4*(1+2)")).unwrap();

        assert_eq!(tree.depth(), 2);
        assert!(tree.to_tree_view().unwrap().contains("MUL"));
    }

    #[test]
    fn leftover_tokens_are_rejected() {
        let mut tokens = prefix_of("1");
        tokens.extend(prefix_of("2"));

        assert!(render(&tokens).is_err());
    }

    #[test]
    fn unconverted_numbers_are_rejected() {
        let tokens = tokenize("1").unwrap();

        assert!(render(&tokens).is_err());
    }

    #[test]
    fn parentheses_are_rejected() {
        let tokens = tokenize("(").unwrap();

        assert!(render(&tokens).is_err());
    }

    #[test]
    fn tree_display_puts_each_node_on_its_own_line() {
        let tree = CallTree::from_prefix(&prefix_of("7-2")).unwrap();
        let displayed = tree.to_string();
        let lines: Vec<&str> = displayed.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "expression");
        assert!(lines[1].contains("SUB"));
    }
}
