use crate::eval::{eval, Assignment};
use crate::formula::{Atom, Proposition};
use crate::LogicError;
use log::trace;
use std::collections::BTreeSet;

/// Every total assignment over the free atoms of `formula` that makes it true.
///
/// This tries all 2^n assignments for n distinct atoms, so it is only meant
/// for small formulas.
pub fn true_assignments(formula: &Proposition) -> Result<BTreeSet<Assignment>, LogicError> {
    if !formula.is_well_formed() {
        return Err(LogicError::InvalidFormula);
    }
    let atoms: Vec<Atom> = formula.atoms().into_iter().collect();
    let mut models = BTreeSet::new();
    enumerate(formula, &atoms, &mut Assignment::new(), &mut models);
    Ok(models)
}

// Bind the next unassigned atom to false, then to true; at a leaf every atom
// is bound and the formula can be evaluated.
fn enumerate(formula: &Proposition, atoms: &[Atom], assignment: &mut Assignment, models: &mut BTreeSet<Assignment>) {
    match atoms.split_first() {
        None => {
            let value = eval(formula, assignment);
            trace!("{} under {} = {}", formula, assignment, value);
            if value {
                models.insert(assignment.clone());
            }
        }
        Some((&atom, rest)) => {
            for &value in &[false, true] {
                assignment.insert(atom, value);
                enumerate(formula, rest, assignment, models);
            }
            assignment.remove(atom);
        }
    }
}
