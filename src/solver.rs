use crate::brute_force::true_assignments;
use crate::formula::Proposition;
use crate::normal_form::{to_cnf, to_nnf};
use crate::LogicError;
use log::{debug, trace};

/// Decide whether `formula` holds under every assignment.
///
/// The formula is brought into CNF (through NNF unless it already is CNF);
/// it is then valid iff every clause contains `T` or a complementary pair.
pub fn is_tautology(formula: &Proposition) -> Result<bool, LogicError> {
    if !formula.is_well_formed() {
        return Err(LogicError::InvalidFormula);
    }

    let converted;
    let cnf = if formula.is_cnf() {
        formula
    } else {
        converted = to_cnf(&to_nnf(formula)?)?;
        &converted
    };

    for clause in cnf.clauses()? {
        if !clause.is_tautological_clause()? {
            trace!("clause {} can be falsified", clause);
            debug!("{} is not a tautology", formula);
            return Ok(false);
        }
    }
    debug!("{} is a tautology", formula);
    Ok(true)
}

/// Decide whether `formula` is false under every assignment, by enumerating
/// its models.
pub fn is_contradiction(formula: &Proposition) -> Result<bool, LogicError> {
    if !formula.is_well_formed() {
        return Err(LogicError::InvalidFormula);
    }
    Ok(true_assignments(formula)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{a, proposition_strategy};
    use crate::parse;
    use proptest::prelude::*;
    use test_env_log::test;

    fn n(c: char) -> Proposition {
        Proposition::not(a(c))
    }

    #[test]
    fn tautology_literals() {
        assert_eq!(is_tautology(&a('T')), Ok(true));
        assert_eq!(is_tautology(&a('F')), Ok(false));
        assert_eq!(is_tautology(&a('A')), Ok(false));
        assert_eq!(is_tautology(&n('F')), Ok(true));
        assert_eq!(is_tautology(&n('A')), Ok(false));
    }

    #[test]
    fn tautology_already_cnf() {
        let p = Proposition::and(Proposition::or(a('A'), n('A')), Proposition::or(n('B'), a('B')));
        assert!(p.is_cnf());
        assert_eq!(is_tautology(&p), Ok(true));

        let p = Proposition::and(Proposition::or(a('A'), n('A')), a('B'));
        assert_eq!(is_tautology(&p), Ok(false));
    }

    #[test]
    fn tautology_after_conversion() {
        assert_eq!(is_tautology(&parse("A -> A").unwrap()), Ok(true));
        assert_eq!(is_tautology(&parse("(A -> B) | (B -> A)").unwrap()), Ok(true));
        assert_eq!(is_tautology(&parse("(A & B) -> A").unwrap()), Ok(true));
        assert_eq!(is_tautology(&parse("A -> (A & B)").unwrap()), Ok(false));
        assert_eq!(is_tautology(&parse("A & T").unwrap()), Ok(false));
    }

    #[test]
    fn contradictions() {
        assert_eq!(is_contradiction(&parse("F").unwrap()), Ok(true));
        assert_eq!(is_contradiction(&parse("~T").unwrap()), Ok(true));
        assert_eq!(is_contradiction(&parse("(A <-> B) & (A <-> ~B)").unwrap()), Ok(true));
        assert_eq!(is_contradiction(&parse("A & B").unwrap()), Ok(false));
        assert_eq!(is_contradiction(&parse("T").unwrap()), Ok(false));
    }

    #[test]
    fn rejects_malformed() {
        let p = Proposition::or(a('A'), a('!'));
        assert_eq!(is_tautology(&p), Err(LogicError::InvalidFormula));
        assert_eq!(is_contradiction(&p), Err(LogicError::InvalidFormula));
    }

    proptest! {
        #[test]
        fn proptest_tautology_iff_negation_contradicts(p in proposition_strategy()) {
            let negated = Proposition::not(p.clone());
            prop_assert_eq!(is_tautology(&p).unwrap(), is_contradiction(&negated).unwrap());
        }
    }
}
