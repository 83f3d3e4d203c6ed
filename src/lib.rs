mod brute_force;
mod eval;
pub mod formula;
mod normal_form;
mod solver;

use std::fmt::{self, Display, Formatter};

pub use brute_force::true_assignments;
pub use eval::{evaluate, Assignment};
pub use formula::parser::{parse, Expected, ParseError};
pub use formula::{Atom, Proposition};
pub use normal_form::{to_cnf, to_nnf};
pub use solver::{is_contradiction, is_tautology};

/// Failures of the operations on an already-built [`Proposition`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LogicError {
    /// An atom name that is not a single upper-case letter.
    InvalidAtom(String),
    InvalidFormula,
    NotInNNF,
    NotInCNF,
    NotAClause,
    /// The assignment has no value for this atom.
    MissingAssignment(Atom),
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LogicError::InvalidAtom(name) => write!(f, "'{}' is not a valid atom name", name),
            LogicError::InvalidFormula => f.write_str("formula is not well-formed"),
            LogicError::NotInNNF => f.write_str("formula is not in negation normal form"),
            LogicError::NotInCNF => f.write_str("formula is not in conjunctive normal form"),
            LogicError::NotAClause => f.write_str("formula is not a clause"),
            LogicError::MissingAssignment(a) => write!(f, "no value assigned to atom {}", a),
        }
    }
}

impl std::error::Error for LogicError {}
