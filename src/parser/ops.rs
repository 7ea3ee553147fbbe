//! Operator table and binding levels
//!
//! Precedence and associativity are folded into a pair of comparable
//! [`BindingLevel`]s per operator, one for each side. An operator of
//! precedence `p` binds its operands at levels `2p` and `2p - 1`; which side
//! gets the odd level decides the winner when two operators of equal
//! precedence compete for the same operand. Every level of a higher-precedence
//! operator exceeds every level of a lower-precedence one, so the climber
//! needs no associativity logic of its own.

use super::symbol::SymbolKind;
use std::fmt;

/// Binding power on one side of an operator.
///
/// `Unbound` is strictly less than every bound level; the derived ordering
/// relies on variant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BindingLevel {
    #[default]
    Unbound,
    Bound(u32),
}

impl BindingLevel {
    pub fn is_bound(self) -> bool {
        matches!(self, BindingLevel::Bound(_))
    }
}

impl fmt::Display for BindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingLevel::Unbound => f.write_str("unbound"),
            BindingLevel::Bound(level) => write!(f, "{}", level),
        }
    }
}

/// Which side(s) of an operator take an operand, and which side wins a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    /// Postfix: the operand is on the left.
    LeftUnary,
    /// Prefix: the operand is on the right.
    RightUnary,
    LeftBinary,
    RightBinary,
}

impl Assoc {
    /// Left and right binding levels of an operator with this associativity
    /// and the given precedence. Precedence 0 binds nothing.
    pub fn levels(self, precedence: u32) -> (BindingLevel, BindingLevel) {
        use BindingLevel::{Bound, Unbound};

        if precedence == 0 {
            return (Unbound, Unbound);
        }
        let n = 2 * precedence;
        match self {
            Assoc::LeftUnary => (Bound(n - 1), Unbound),
            Assoc::RightUnary => (Unbound, Bound(n - 1)),
            Assoc::LeftBinary => (Bound(n - 1), Bound(n)),
            Assoc::RightBinary => (Bound(n), Bound(n - 1)),
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Assoc::LeftUnary | Assoc::RightUnary => 1,
            Assoc::LeftBinary | Assoc::RightBinary => 2,
        }
    }
}

/// Operator metadata for one symbol kind in one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub kind: SymbolKind,
    pub precedence: u32,
    pub assoc: Assoc,
    pub left: BindingLevel,
    pub right: BindingLevel,
}

impl Operator {
    pub fn new(kind: SymbolKind, precedence: u32, assoc: Assoc) -> Self {
        let (left, right) = assoc.levels(precedence);
        Self {
            kind,
            precedence,
            assoc,
            left,
            right,
        }
    }

    /// Placeholder entry for a kind with no operator in a role.
    const fn absent(kind: SymbolKind) -> Self {
        Self {
            kind,
            precedence: 0,
            assoc: Assoc::LeftBinary,
            left: BindingLevel::Unbound,
            right: BindingLevel::Unbound,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.left.is_bound() || self.right.is_bound()
    }

    pub fn arity(&self) -> usize {
        self.assoc.arity()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())
    }
}

/// The role a symbol plays relative to its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Prefix,
    Infix,
    Postfix,
}

/// One role's operators, indexed by symbol kind.
#[derive(Debug, Clone)]
struct Operators([Operator; SymbolKind::COUNT]);

impl Operators {
    fn empty() -> Self {
        Self(SymbolKind::ALL.map(Operator::absent))
    }

    fn get(&self, kind: SymbolKind) -> Option<Operator> {
        let op = self.0[kind.index()];
        op.is_bound().then_some(op)
    }

    fn add(&mut self, precedence: u32, assoc: Assoc, kinds: &[SymbolKind]) {
        for &kind in kinds {
            self.0[kind.index()] = Operator::new(kind, precedence, assoc);
        }
    }
}

/// Prefix, infix and postfix operator tables.
///
/// Built once and then only read; pass it by reference to every parse.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    prefix: Operators,
    infix: Operators,
    postfix: Operators,
}

impl OperatorTable {
    /// A table with no operators at all.
    pub fn empty() -> Self {
        Self {
            prefix: Operators::empty(),
            infix: Operators::empty(),
            postfix: Operators::empty(),
        }
    }

    /// The standard C-like table: grouping binds tightest, sequencing loosest.
    pub fn seeded() -> Self {
        use Assoc::*;
        use Role::*;
        use SymbolKind::*;

        let mut table = Self::empty();
        table.add(Prefix, 23, RightUnary, &[LParen]);
        table.add(Infix, 22, RightBinary, &[Period]);
        table.add(Postfix, 21, LeftUnary, &[Inc, Dec]);
        table.add(Prefix, 20, RightUnary, &[Inc, Dec]);
        table.add(Prefix, 19, RightUnary, &[Add, Sub]);
        table.add(Prefix, 18, RightUnary, &[Not, Tilde]);
        table.add(Infix, 17, LeftBinary, &[Mul, Quo, Rem]);
        table.add(Infix, 16, LeftBinary, &[Add, Sub]);
        table.add(Infix, 15, LeftBinary, &[Shl, Shr]);
        table.add(Infix, 14, LeftBinary, &[Lss, Gtr, Leq, Geq]);
        table.add(Infix, 13, LeftBinary, &[Eql, Neq]);
        table.add(Infix, 12, LeftBinary, &[And]);
        table.add(Infix, 11, LeftBinary, &[AndNot]);
        table.add(Infix, 10, LeftBinary, &[Xor]);
        table.add(Infix, 9, LeftBinary, &[Or]);
        table.add(Infix, 8, LeftBinary, &[LAnd]);
        table.add(Infix, 7, LeftBinary, &[LOr]);
        table.add(Infix, 6, RightBinary, &[Define, Assign]);
        table.add(Infix, 5, RightBinary, &[AddAssign, SubAssign]);
        table.add(Infix, 4, RightBinary, &[MulAssign, QuoAssign, RemAssign]);
        table.add(Infix, 3, RightBinary, &[ShlAssign, ShrAssign]);
        table.add(Infix, 2, RightBinary, &[AndAssign, AndNotAssign, XorAssign, OrAssign]);
        table.add(Infix, 1, LeftBinary, &[Comma, Semicolon]);
        table
    }

    /// Register `kinds` as operators in `role`.
    pub fn add(&mut self, role: Role, precedence: u32, assoc: Assoc, kinds: &[SymbolKind]) {
        self.operators_mut(role).add(precedence, assoc, kinds);
    }

    pub fn lookup(&self, kind: SymbolKind, role: Role) -> Option<Operator> {
        match role {
            Role::Prefix => self.prefix.get(kind),
            Role::Infix => self.infix.get(kind),
            Role::Postfix => self.postfix.get(kind),
        }
    }

    pub fn prefix(&self, kind: SymbolKind) -> Option<Operator> {
        self.prefix.get(kind)
    }

    pub fn infix(&self, kind: SymbolKind) -> Option<Operator> {
        self.infix.get(kind)
    }

    pub fn postfix(&self, kind: SymbolKind) -> Option<Operator> {
        self.postfix.get(kind)
    }

    /// Every registered operator in `role`, in symbol-kind order.
    pub fn operators(&self, role: Role) -> impl Iterator<Item = Operator> + '_ {
        SymbolKind::ALL
            .iter()
            .filter_map(move |&kind| self.lookup(kind, role))
    }

    fn operators_mut(&mut self, role: Role) -> &mut Operators {
        match role {
            Role::Prefix => &mut self.prefix,
            Role::Infix => &mut self.infix,
            Role::Postfix => &mut self.postfix,
        }
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BindingLevel::{Bound, Unbound};

    #[test]
    fn test_unbound_is_below_everything() {
        assert!(Unbound < Bound(0));
        assert!(Unbound < Bound(1));
        assert!(Bound(1) < Bound(2));
        assert_eq!(Unbound, BindingLevel::default());
    }

    #[test]
    fn test_level_encoding() {
        assert_eq!(Assoc::LeftUnary.levels(21), (Bound(41), Unbound));
        assert_eq!(Assoc::RightUnary.levels(23), (Unbound, Bound(45)));
        assert_eq!(Assoc::LeftBinary.levels(16), (Bound(31), Bound(32)));
        assert_eq!(Assoc::RightBinary.levels(6), (Bound(12), Bound(11)));
        assert_eq!(Assoc::RightBinary.levels(0), (Unbound, Unbound));
    }

    #[test]
    fn test_higher_precedence_dominates() {
        let assocs = [
            Assoc::LeftUnary,
            Assoc::RightUnary,
            Assoc::LeftBinary,
            Assoc::RightBinary,
        ];
        for p in 1..30 {
            for a in assocs {
                for b in assocs {
                    let (al, ar) = a.levels(p + 1);
                    let (bl, br) = b.levels(p);
                    let lowest = [al, ar].into_iter().filter(|l| l.is_bound()).min();
                    let highest = [bl, br].into_iter().filter(|l| l.is_bound()).max();
                    assert!(lowest > highest, "{:?}@{} vs {:?}@{}", a, p + 1, b, p);
                }
            }
        }
    }

    #[test]
    fn test_seeded_lookup() {
        let table = OperatorTable::seeded();

        let minus = table.prefix(SymbolKind::Sub).unwrap();
        assert_eq!(minus.precedence, 19);
        assert_eq!(minus.right, Bound(37));
        assert_eq!(table.infix(SymbolKind::Sub).unwrap().precedence, 16);

        assert!(table.prefix(SymbolKind::Mul).is_none());
        assert!(table.infix(SymbolKind::RParen).is_none());
        assert!(table.postfix(SymbolKind::Inc).is_some());
        assert!(table.lookup(SymbolKind::Ident, Role::Infix).is_none());

        let group = table.lookup(SymbolKind::LParen, Role::Prefix).unwrap();
        assert_eq!(group.precedence, 23);
    }

    #[test]
    fn test_seeded_counts() {
        let table = OperatorTable::seeded();
        assert_eq!(table.operators(Role::Prefix).count(), 7);
        assert_eq!(table.operators(Role::Postfix).count(), 2);
        assert_eq!(table.operators(Role::Infix).count(), 35);
    }

    #[test]
    fn test_add_overrides_entry() {
        let mut table = OperatorTable::empty();
        assert!(table.infix(SymbolKind::Xor).is_none());
        table.add(Role::Infix, 3, Assoc::RightBinary, &[SymbolKind::Xor]);
        let op = table.infix(SymbolKind::Xor).unwrap();
        assert_eq!((op.left, op.right), (Bound(6), Bound(5)));
        assert_eq!(op.arity(), 2);
    }
}
