use std::fmt;
use std::fmt::Formatter;

/// Precedence of anything that is not an operator or an opening parenthesis.
/// Never compared against a real operator.
pub const INVALID_PRECEDENCE: i8 = -1;

/// Precedence of an opening parenthesis, the floor of the operator stack.
pub const PARENTHESIS_PRECEDENCE: i8 = 0;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponentiate,
}

impl BinaryOperator {
    /// Maps a source character to the operator it denotes, if any.
    pub fn from_symbol(symbol: char) -> Option<BinaryOperator> {
        match symbol {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' => Some(BinaryOperator::Multiply),
            '/' => Some(BinaryOperator::Divide),
            '%' => Some(BinaryOperator::Modulo),
            '^' => Some(BinaryOperator::Exponentiate),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Modulo => '%',
            BinaryOperator::Exponentiate => '^',
        }
    }

    /// The short kind name, used both in token traces and (uppercased) in call trees.
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "add",
            BinaryOperator::Subtract => "sub",
            BinaryOperator::Multiply => "mul",
            BinaryOperator::Divide => "div",
            BinaryOperator::Modulo => "mod",
            BinaryOperator::Exponentiate => "pow",
        }
    }

    pub const fn precedence(&self) -> i8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 2,
            BinaryOperator::Exponentiate => 3,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn multiplicative_operators_share_precedence() {
        let multiply = BinaryOperator::Multiply.precedence();
        assert_eq!(BinaryOperator::Divide.precedence(), multiply);
        assert_eq!(BinaryOperator::Modulo.precedence(), multiply);
    }

    #[test]
    fn caret_binds_tightest() {
        let caret = BinaryOperator::Exponentiate.precedence();
        assert!(caret > BinaryOperator::Multiply.precedence());
        assert!(BinaryOperator::Multiply.precedence() > BinaryOperator::Add.precedence());
    }

    #[test]
    fn operators_rank_above_parenthesis_floor() {
        let lowest = BinaryOperator::Add.precedence();
        assert!(lowest > PARENTHESIS_PRECEDENCE);
        assert!(PARENTHESIS_PRECEDENCE > INVALID_PRECEDENCE);
    }

    #[parameterized(
    symbol = { '+', '-', '*', '/', '%', '^' },
    expected_name = { "add", "sub", "mul", "div", "mod", "pow" }
    )]
    fn symbol_maps_to_named_operator(symbol: char, expected_name: &str) {
        let operator = BinaryOperator::from_symbol(symbol).unwrap();
        assert_eq!(operator.name(), expected_name);
        assert_eq!(operator.symbol(), symbol);
    }

    #[test]
    fn non_operator_symbol_maps_to_none() {
        assert_eq!(BinaryOperator::from_symbol('('), None);
        assert_eq!(BinaryOperator::from_symbol('x'), None);
    }
}
