use crate::formula::{Atom, Proposition};
use crate::LogicError;
use log::trace;

/// Rewrite `formula` into negation normal form.
///
/// Implications and biconditionals are eliminated, negations are pushed down
/// with De Morgan's laws until they sit directly on an atom, double negations
/// cancel, and `~T` / `~F` fold to `F` / `T`. The result never contains a
/// negated constant, so converting it again returns the same tree.
pub fn to_nnf(formula: &Proposition) -> Result<Proposition, LogicError> {
    if !formula.is_well_formed() {
        return Err(LogicError::InvalidFormula);
    }
    let nnf = nnf(formula, true);
    trace!("nnf({}) = {}", formula, nnf);
    Ok(nnf)
}

// NNF of `p` when `positive`, otherwise NNF of `~p`.
fn nnf(p: &Proposition, positive: bool) -> Proposition {
    match p {
        Proposition::Atom(a) => {
            if positive {
                p.clone()
            } else if *a == Atom::TRUE {
                Proposition::Atom(Atom::FALSE)
            } else if *a == Atom::FALSE {
                Proposition::Atom(Atom::TRUE)
            } else {
                Proposition::not(p.clone())
            }
        }
        Proposition::Not(inner) => nnf(inner, !positive),
        // ~(P & Q) => ~P | ~Q
        Proposition::And(l, r) => {
            let (l, r) = (nnf(l, positive), nnf(r, positive));
            if positive {
                Proposition::and(l, r)
            } else {
                Proposition::or(l, r)
            }
        }
        // ~(P | Q) => ~P & ~Q
        Proposition::Or(l, r) => {
            let (l, r) = (nnf(l, positive), nnf(r, positive));
            if positive {
                Proposition::or(l, r)
            } else {
                Proposition::and(l, r)
            }
        }
        // P -> Q => ~P | Q, and ~(P -> Q) => P & ~Q
        Proposition::Imply(l, r) => {
            if positive {
                Proposition::or(nnf(l, false), nnf(r, true))
            } else {
                Proposition::and(nnf(l, true), nnf(r, false))
            }
        }
        // P <-> Q => (P -> Q) & (Q -> P)
        Proposition::IfOnlyIf(l, r) => {
            let forward = Proposition::Imply(l.clone(), r.clone());
            let backward = Proposition::Imply(r.clone(), l.clone());
            if positive {
                Proposition::and(nnf(&forward, true), nnf(&backward, true))
            } else {
                Proposition::or(nnf(&forward, false), nnf(&backward, false))
            }
        }
    }
}

/// Rewrite a formula that is already in NNF into conjunctive normal form by
/// distributing `|` over `&`.
///
/// The number of clauses can grow exponentially in the size of the input.
pub fn to_cnf(nnf_formula: &Proposition) -> Result<Proposition, LogicError> {
    if !nnf_formula.is_nnf() {
        return Err(LogicError::NotInNNF);
    }
    let cnf = cnf(nnf_formula.clone());
    trace!("cnf({}) = {}", nnf_formula, cnf);
    Ok(cnf)
}

fn cnf(p: Proposition) -> Proposition {
    match p {
        Proposition::And(l, r) => Proposition::and(cnf(*l), cnf(*r)),
        Proposition::Or(l, r) => {
            let (c1, c2) = (cnf(*l), cnf(*r));
            // (A & B) | C => (A | C) & (B | C)
            let (conj, other) = match (c1, c2) {
                (Proposition::And(a, b), other) | (other, Proposition::And(a, b)) => ((a, b), other),
                (c1, c2) => return Proposition::or(c1, c2),
            };
            let (a, b) = conj;
            Proposition::and(
                cnf(Proposition::Or(a, Box::new(other.clone()))),
                cnf(Proposition::Or(b, Box::new(other))),
            )
        }
        // Literals; NNF rules out everything else.
        literal => literal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::a;
    use crate::parse;
    use test_env_log::test;

    fn n(c: char) -> Proposition {
        Proposition::not(a(c))
    }

    #[test]
    fn nnf_eliminates_implication() {
        let p = parse("A -> B").unwrap();
        assert_eq!(to_nnf(&p), Ok(Proposition::or(n('A'), a('B'))));
    }

    #[test]
    fn nnf_eliminates_biconditional() {
        let p = parse("A <-> B").unwrap();
        assert_eq!(
            to_nnf(&p),
            Ok(Proposition::and(
                Proposition::or(n('A'), a('B')),
                Proposition::or(n('B'), a('A'))
            ))
        );
    }

    #[test]
    fn nnf_de_morgan() {
        assert_eq!(
            to_nnf(&parse("~(A & ~B)").unwrap()),
            Ok(Proposition::or(n('A'), a('B')))
        );
        assert_eq!(
            to_nnf(&parse("~(A | B)").unwrap()),
            Ok(Proposition::and(n('A'), n('B')))
        );
        assert_eq!(
            to_nnf(&parse("~(A -> B)").unwrap()),
            Ok(Proposition::and(a('A'), n('B')))
        );
        assert_eq!(
            to_nnf(&parse("~(A <-> B)").unwrap()),
            Ok(Proposition::or(
                Proposition::and(a('A'), n('B')),
                Proposition::and(a('B'), n('A'))
            ))
        );
    }

    #[test]
    fn nnf_double_negation_and_constants() {
        assert_eq!(to_nnf(&parse("~~~A").unwrap()), Ok(n('A')));
        assert_eq!(to_nnf(&parse("~T").unwrap()), Ok(a('F')));
        assert_eq!(to_nnf(&parse("~~F").unwrap()), Ok(a('F')));
        assert_eq!(to_nnf(&parse("~(T & A)").unwrap()), Ok(Proposition::or(a('F'), n('A'))));
    }

    #[test]
    fn nnf_keeps_nnf_shape() {
        let p = parse("(A | ~B) & C").unwrap();
        assert_eq!(to_nnf(&p), Ok(p));
    }

    #[test]
    fn nnf_rejects_malformed() {
        let p = Proposition::not(a('a'));
        assert_eq!(to_nnf(&p), Err(LogicError::InvalidFormula));
    }

    #[test]
    fn cnf_distributes() {
        let p = parse("(A & B) | C").unwrap();
        assert_eq!(
            to_cnf(&p),
            Ok(Proposition::and(
                Proposition::or(a('A'), a('C')),
                Proposition::or(a('B'), a('C'))
            ))
        );
        // the conjunction on the right is swapped to the left before distributing
        let p = parse("C | (A & B)").unwrap();
        assert_eq!(
            to_cnf(&p),
            Ok(Proposition::and(
                Proposition::or(a('A'), a('C')),
                Proposition::or(a('B'), a('C'))
            ))
        );
    }

    #[test]
    fn cnf_redistributes_nested() {
        // each branch of the first distribution is itself an Or over an And
        let p = parse("(A & B) | (C & D)").unwrap();
        let cnf = to_cnf(&p).unwrap();
        assert_eq!(
            cnf,
            Proposition::and(
                Proposition::and(
                    Proposition::or(a('C'), a('A')),
                    Proposition::or(a('D'), a('A'))
                ),
                Proposition::and(
                    Proposition::or(a('C'), a('B')),
                    Proposition::or(a('D'), a('B'))
                ),
            )
        );
        let p = parse("(A&B)|(C&D)|(E&G)").unwrap();
        assert_eq!(to_cnf(&p).unwrap().clauses().unwrap().len(), 8);
    }

    #[test]
    fn cnf_leaves_clauses_alone() {
        let p = parse("(A | ~B | C) & ~D").unwrap();
        assert_eq!(to_cnf(&p), Ok(p));
    }

    #[test]
    fn cnf_requires_nnf() {
        assert_eq!(to_cnf(&parse("A -> B").unwrap()), Err(LogicError::NotInNNF));
        assert_eq!(to_cnf(&parse("~~A").unwrap()), Err(LogicError::NotInNNF));
    }
}
