pub mod call_tree;
pub(crate) mod syntax_visitor;
