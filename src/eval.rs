use crate::formula::{Atom, Proposition};
use crate::LogicError;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;

/// A truth value for each atom name.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Assignment {
    values: BTreeMap<Atom, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, atom: Atom) -> Option<bool> {
        self.values.get(&atom).copied()
    }

    /// Returns the previous value, if any.
    pub fn insert(&mut self, atom: Atom, value: bool) -> Option<bool> {
        self.values.insert(atom, value)
    }

    pub fn remove(&mut self, atom: Atom) -> Option<bool> {
        self.values.remove(&atom)
    }

    pub fn contains(&self, atom: Atom) -> bool {
        self.values.contains_key(&atom)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, bool)> + '_ {
        self.values.iter().map(|(a, v)| (*a, *v))
    }
}

impl FromIterator<(Atom, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Atom, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Assignment {
    type Item = (Atom, bool);
    type IntoIter = btree_map::IntoIter<Atom, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (atom, value) in self.iter() {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", atom, if value { 'T' } else { 'F' })?;
        }
        f.write_str("}")
    }
}

/// Compute the truth value of `formula` under `assignment`.
///
/// Every free atom of the formula needs an entry; extra entries are ignored.
pub fn evaluate(formula: &Proposition, assignment: &Assignment) -> Result<bool, LogicError> {
    if !formula.is_well_formed() {
        return Err(LogicError::InvalidFormula);
    }
    if let Some(missing) = formula.atoms().into_iter().find(|a| !assignment.contains(*a)) {
        return Err(LogicError::MissingAssignment(missing));
    }
    Ok(eval(formula, assignment))
}

// Callers have checked that every free atom is assigned. Both operands are
// always evaluated (`&`/`|` on bool, not `&&`/`||`).
pub(crate) fn eval(formula: &Proposition, assignment: &Assignment) -> bool {
    match formula {
        Proposition::Atom(a) if *a == Atom::TRUE => true,
        Proposition::Atom(a) if *a == Atom::FALSE => false,
        Proposition::Atom(a) => assignment.get(*a).unwrap_or(false),
        Proposition::Not(p) => !eval(p, assignment),
        Proposition::And(l, r) => eval(l, assignment) & eval(r, assignment),
        Proposition::Or(l, r) => eval(l, assignment) | eval(r, assignment),
        Proposition::Imply(l, r) => !eval(l, assignment) | eval(r, assignment),
        Proposition::IfOnlyIf(l, r) => !(eval(l, assignment) ^ eval(r, assignment)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::a;
    use crate::parse;
    use test_env_log::test;

    fn asg(values: &[(char, bool)]) -> Assignment {
        values.iter().map(|&(c, v)| (Atom { symbol: c }, v)).collect()
    }

    #[test]
    fn evaluate_connectives() {
        let cases = [
            ("A & B", true, false, false),
            ("A | B", true, false, true),
            ("A -> B", true, false, false),
            ("B -> A", true, false, true),
            ("A <-> B", true, false, false),
            ("A <-> ~B", true, false, true),
            ("~(A & B)", true, true, false),
        ];
        for &(text, va, vb, expected) in cases.iter() {
            let p = parse(text).unwrap();
            assert_eq!(evaluate(&p, &asg(&[('A', va), ('B', vb)])), Ok(expected), "{}", text);
        }
    }

    #[test]
    fn evaluate_constants() {
        let empty = Assignment::new();
        assert_eq!(evaluate(&a('T'), &empty), Ok(true));
        assert_eq!(evaluate(&a('F'), &empty), Ok(false));
        assert_eq!(evaluate(&parse("F -> F").unwrap(), &empty), Ok(true));
        // an entry for a constant does not override it
        assert_eq!(evaluate(&a('T'), &asg(&[('T', false)])), Ok(true));
    }

    #[test]
    fn evaluate_ignores_extra_entries() {
        let p = parse("A | B").unwrap();
        assert_eq!(evaluate(&p, &asg(&[('A', false), ('B', true), ('Z', false)])), Ok(true));
    }

    #[test]
    fn evaluate_missing_atom() {
        let p = parse("A & (B | C)").unwrap();
        assert_eq!(
            evaluate(&p, &asg(&[('A', true), ('C', true)])),
            Err(LogicError::MissingAssignment(Atom { symbol: 'B' }))
        );
    }

    #[test]
    fn evaluate_malformed() {
        let p = Proposition::or(a('A'), a('?'));
        assert_eq!(evaluate(&p, &asg(&[('A', true)])), Err(LogicError::InvalidFormula));
    }

    #[test]
    fn assignment_display() {
        assert_eq!(asg(&[('B', false), ('A', true)]).to_string(), "{A: T, B: F}");
        assert_eq!(Assignment::new().to_string(), "{}");
    }
}
