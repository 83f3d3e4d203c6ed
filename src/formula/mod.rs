pub mod parser;

use crate::LogicError;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A propositional variable or one of the two boolean constants.
///
/// Atoms are exactly one upper-case ASCII letter; `T` and `F` are reserved for
/// the constants true and false.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Atom {
    pub(crate) symbol: char,
}

impl Atom {
    pub const TRUE: Atom = Atom { symbol: 'T' };
    pub const FALSE: Atom = Atom { symbol: 'F' };

    pub fn new(name: &str) -> Result<Self, LogicError> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok(Atom { symbol: c }),
            _ => Err(LogicError::InvalidAtom(name.to_string())),
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn is_constant(&self) -> bool {
        *self == Atom::TRUE || *self == Atom::FALSE
    }

    fn is_valid(&self) -> bool {
        self.symbol.is_ascii_uppercase()
    }
}

impl FromStr for Atom {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Atom::new(s)
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Proposition {
    Atom(Atom),
    Not(Box<Proposition>),
    And(Box<Proposition>, Box<Proposition>),
    Or(Box<Proposition>, Box<Proposition>),
    Imply(Box<Proposition>, Box<Proposition>),
    IfOnlyIf(Box<Proposition>, Box<Proposition>),
}

impl Proposition {
    pub fn atom(atom: Atom) -> Self {
        Proposition::Atom(atom)
    }

    pub fn not(p: Proposition) -> Self {
        Proposition::Not(Box::new(p))
    }

    pub fn and(l: Proposition, r: Proposition) -> Self {
        Proposition::And(Box::new(l), Box::new(r))
    }

    pub fn or(l: Proposition, r: Proposition) -> Self {
        Proposition::Or(Box::new(l), Box::new(r))
    }

    pub fn imply(l: Proposition, r: Proposition) -> Self {
        Proposition::Imply(Box::new(l), Box::new(r))
    }

    pub fn iff(l: Proposition, r: Proposition) -> Self {
        Proposition::IfOnlyIf(Box::new(l), Box::new(r))
    }

    /// Arity is fixed by the variant, so the only way a tree can be malformed is
    /// an atom whose symbol is not a single upper-case letter.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Proposition::Atom(a) => a.is_valid(),
            Proposition::Not(p) => p.is_well_formed(),
            Proposition::And(l, r)
            | Proposition::Or(l, r)
            | Proposition::Imply(l, r)
            | Proposition::IfOnlyIf(l, r) => l.is_well_formed() && r.is_well_formed(),
        }
    }

    pub fn is_literal(&self) -> bool {
        match self {
            Proposition::Atom(_) => true,
            Proposition::Not(p) => matches!(**p, Proposition::Atom(_)),
            _ => false,
        }
    }

    /// Negation normal form: no `->` or `<->`, and negation only directly above an atom.
    pub fn is_nnf(&self) -> bool {
        if !self.is_well_formed() {
            return false;
        }
        match self {
            Proposition::Atom(_) | Proposition::Not(_) => self.is_literal(),
            Proposition::And(l, r) | Proposition::Or(l, r) => l.is_nnf() && r.is_nnf(),
            Proposition::Imply(_, _) | Proposition::IfOnlyIf(_, _) => false,
        }
    }

    /// A disjunction of literals. A lone literal is a clause of one.
    pub fn is_clause(&self) -> bool {
        if !self.is_well_formed() {
            return false;
        }
        match self {
            Proposition::Atom(_) | Proposition::Not(_) => self.is_literal(),
            Proposition::Or(l, r) => l.is_clause() && r.is_clause(),
            Proposition::And(_, _) | Proposition::Imply(_, _) | Proposition::IfOnlyIf(_, _) => false,
        }
    }

    /// Conjunctive normal form: a conjunction of clauses.
    pub fn is_cnf(&self) -> bool {
        match self {
            Proposition::And(l, r) => l.is_cnf() && r.is_cnf(),
            _ => self.is_clause(),
        }
    }

    /// The free atoms of the formula, in order, with `T` and `F` left out.
    pub fn atoms(&self) -> BTreeSet<Atom> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut BTreeSet<Atom>) {
        match self {
            Proposition::Atom(a) => {
                if !a.is_constant() {
                    atoms.insert(*a);
                }
            }
            Proposition::Not(p) => p.collect_atoms(atoms),
            Proposition::And(l, r)
            | Proposition::Or(l, r)
            | Proposition::Imply(l, r)
            | Proposition::IfOnlyIf(l, r) => {
                l.collect_atoms(atoms);
                r.collect_atoms(atoms);
            }
        }
    }

    /// Atoms occurring un-negated, except `F`; every `~F` contributes `T`.
    pub fn positive_literals(&self) -> Result<BTreeSet<Atom>, LogicError> {
        if !self.is_nnf() {
            return Err(LogicError::NotInNNF);
        }
        let mut set = BTreeSet::new();
        self.collect_literals(true, &mut set);
        Ok(set)
    }

    /// Atoms occurring under a negation, except `F`; every bare `F` contributes `F`.
    pub fn negative_literals(&self) -> Result<BTreeSet<Atom>, LogicError> {
        if !self.is_nnf() {
            return Err(LogicError::NotInNNF);
        }
        let mut set = BTreeSet::new();
        self.collect_literals(false, &mut set);
        Ok(set)
    }

    // Assumes NNF.
    fn collect_literals(&self, positive: bool, set: &mut BTreeSet<Atom>) {
        match self {
            Proposition::Atom(a) => {
                if positive && *a != Atom::FALSE {
                    set.insert(*a);
                } else if !positive && *a == Atom::FALSE {
                    set.insert(Atom::FALSE);
                }
            }
            Proposition::Not(p) => {
                if let Proposition::Atom(a) = **p {
                    if positive && a == Atom::FALSE {
                        set.insert(Atom::TRUE);
                    } else if !positive && a != Atom::FALSE {
                        set.insert(a);
                    }
                }
            }
            Proposition::And(l, r) | Proposition::Or(l, r) => {
                l.collect_literals(positive, set);
                r.collect_literals(positive, set);
            }
            Proposition::Imply(_, _) | Proposition::IfOnlyIf(_, _) => {}
        }
    }

    /// A clause is valid iff it mentions `T` or some atom together with its negation.
    pub fn is_tautological_clause(&self) -> Result<bool, LogicError> {
        if !self.is_clause() {
            return Err(LogicError::NotAClause);
        }
        let positive = self.positive_literals()?;
        if positive.contains(&Atom::TRUE) {
            return Ok(true);
        }
        let negative = self.negative_literals()?;
        Ok(positive.intersection(&negative).next().is_some())
    }

    /// The top-level clauses of a CNF formula, left to right.
    pub fn clauses(&self) -> Result<Vec<&Proposition>, LogicError> {
        if !self.is_cnf() {
            return Err(LogicError::NotInCNF);
        }
        let mut clauses = vec![];
        let mut stack = vec![self];
        while let Some(p) = stack.pop() {
            match p {
                Proposition::And(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
                clause => clauses.push(clause),
            }
        }
        Ok(clauses)
    }
}

impl FromStr for Proposition {
    type Err = parser::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

impl Display for Proposition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Proposition::Atom(a) => write!(f, "{}", a),
            Proposition::Not(p) => write!(f, "~{}", p),
            Proposition::And(l, r) => write!(f, "({} & {})", l, r),
            Proposition::Or(l, r) => write!(f, "({} | {})", l, r),
            Proposition::Imply(l, r) => write!(f, "({} -> {})", l, r),
            Proposition::IfOnlyIf(l, r) => write!(f, "({} <-> {})", l, r),
        }
    }
}

#[cfg(test)]
pub(crate) fn a(c: char) -> Proposition {
    Proposition::Atom(Atom { symbol: c })
}

#[cfg(test)]
pub(crate) fn proposition_strategy() -> impl proptest::strategy::Strategy<Value = Proposition> {
    use proptest::prelude::*;

    let leaf = prop_oneof![
        4 => prop::sample::select(vec!['A', 'B', 'C', 'D']).prop_map(a),
        1 => prop::sample::select(vec!['T', 'F']).prop_map(a),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Proposition::not),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::or(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::imply(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Proposition::iff(l, r)),
        ]
    })
}
