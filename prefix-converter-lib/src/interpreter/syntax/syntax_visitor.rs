use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::call_tree::CallTree;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree, visiting operands in prefix-sequence order (right operand first).
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_number(&mut self, _value: f64) {}
    fn visit_call(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &CallTree,
        right_operand: &CallTree,
    ) {
        walk_call(self, left_operand, right_operand)
    }
}

pub(crate) fn walk_call(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &CallTree,
    right_operand: &CallTree,
) {
    right_operand.accept(visitor);
    left_operand.accept(visitor);
}
