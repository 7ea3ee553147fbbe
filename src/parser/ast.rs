//! Expression tree
//!
//! A parse produces a strict tree of [`Node`]s. Leaves are the symbols the
//! climber stopped on; inner nodes are applied operators. Malformed input
//! still yields a complete tree, with [`Node::Stop`] and [`Node::Control`]
//! leaves marking where reading broke off.

use super::ops::Operator;
use super::symbol::Symbol;
use std::fmt;

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal or identifier.
    Terminal(Symbol),
    /// Keyword found where an expression was expected; the caller decides
    /// whether that is acceptable.
    Control(Symbol),
    /// End of input or an illegal symbol: reading stopped here.
    Stop(Symbol),
    /// An applied operator.
    Rule(Rule),
}

/// An operator applied to exactly as many operands as its arity.
///
/// Fields are private so the arity invariant holds for every `Rule` in
/// existence; only the constructors below build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    operator: Operator,
    symbol: Symbol,
    children: Vec<Node>,
}

impl Rule {
    /// Prefix or postfix application.
    pub(crate) fn unary(operator: Operator, symbol: Symbol, operand: Node) -> Self {
        debug_assert_eq!(operator.arity(), 1, "{} is not unary", operator);
        Self {
            operator,
            symbol,
            children: vec![operand],
        }
    }

    /// Infix application.
    pub(crate) fn binary(operator: Operator, symbol: Symbol, lhs: Node, rhs: Node) -> Self {
        debug_assert_eq!(operator.arity(), 2, "{} is not binary", operator);
        Self {
            operator,
            symbol,
            children: vec![lhs, rhs],
        }
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// The operator symbol as it appeared in the input.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl Node {
    pub(crate) fn unary(operator: Operator, symbol: Symbol, operand: Node) -> Self {
        Node::Rule(Rule::unary(operator, symbol, operand))
    }

    pub(crate) fn binary(operator: Operator, symbol: Symbol, lhs: Node, rhs: Node) -> Self {
        Node::Rule(Rule::binary(operator, symbol, lhs, rhs))
    }

    /// The symbol this node was built from; for a rule, its operator.
    pub fn symbol(&self) -> &Symbol {
        match self {
            Node::Terminal(symbol) | Node::Control(symbol) | Node::Stop(symbol) => symbol,
            Node::Rule(rule) => &rule.symbol,
        }
    }

    pub fn offset(&self) -> usize {
        self.symbol().offset
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Rule(rule) => &rule.children,
            _ => &[],
        }
    }

    /// True if a `Stop` or `Control` marker appears anywhere in the tree.
    pub fn is_degraded(&self) -> bool {
        match self {
            Node::Terminal(_) => false,
            Node::Control(_) | Node::Stop(_) => true,
            Node::Rule(rule) => rule.children.iter().any(Node::is_degraded),
        }
    }

    /// Number of operator applications between the root and the deepest leaf.
    pub fn depth(&self) -> usize {
        self.children().iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// Visit every node in pre-order, operands left to right.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Canonical prefix form: leaves print their spelling, rules print as
    /// `(op child...)`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Terminal(symbol) | Node::Control(symbol) | Node::Stop(symbol) => {
                f.write_str(symbol.spelling())
            }
            Node::Rule(rule) => {
                write!(f, "({}", rule.symbol.spelling())?;
                for child in &rule.children {
                    write!(f, " {}", child)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ops::OperatorTable;
    use crate::parser::symbol::SymbolKind;

    fn ident(name: &str, offset: usize) -> Node {
        Node::Terminal(Symbol::new(SymbolKind::Ident, name, offset))
    }

    #[test]
    fn test_render_nested_rules() {
        let table = OperatorTable::seeded();
        let mul = table.infix(SymbolKind::Mul).unwrap();
        let add = table.infix(SymbolKind::Add).unwrap();

        let product = Node::binary(
            mul,
            Symbol::bare(SymbolKind::Mul, 6),
            ident("b", 4),
            ident("c", 8),
        );
        let sum = Node::binary(add, Symbol::bare(SymbolKind::Add, 2), ident("a", 0), product);

        assert_eq!(sum.render(), "(+ a (* b c))");
        assert_eq!(sum.depth(), 2);
        assert_eq!(sum.offset(), 2);
        assert!(!sum.is_degraded());
    }

    #[test]
    fn test_leaves_render_kind_name_without_lexeme() {
        assert_eq!(Node::Stop(Symbol::eof(3)).render(), "EOF");
        assert_eq!(Node::Control(Symbol::bare(SymbolKind::If, 0)).render(), "if");
        assert!(Node::Control(Symbol::bare(SymbolKind::If, 0)).is_degraded());
    }

    #[test]
    fn test_walk_is_preorder() {
        let table = OperatorTable::seeded();
        let neg = table.prefix(SymbolKind::Sub).unwrap();
        let tree = Node::unary(
            neg,
            Symbol::bare(SymbolKind::Sub, 0),
            Node::Stop(Symbol::eof(1)),
        );

        let mut seen = Vec::new();
        tree.walk(&mut |node| seen.push(node.render()));
        assert_eq!(seen, ["(- EOF)", "EOF"]);
        assert!(tree.is_degraded());
    }
}
