// Licensed under MIT. See LICENSE for details.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::model::Model;
use crate::rewrite::post_order;
use crate::types::{Formula, Ident, Operator};

fn apply(op: Operator, operands: &[bool]) -> Result<bool> {
    Ok(match (op, operands) {
        (Operator::True, &[]) => true,
        (Operator::False, &[]) => false,
        (Operator::Not, &[a]) => !a,
        (Operator::And, &[a, b]) => a && b,
        (Operator::Or, &[a, b]) => a || b,
        (Operator::Implies, &[a, b]) => !a || b,
        (Operator::Xor, &[a, b]) => a != b,
        (Operator::Iff, &[a, b]) => a == b,
        (Operator::Nor, &[a, b]) => !(a || b),
        (Operator::Nand, &[a, b]) => !(a && b),
        _ => {
            return Err(Error::Arity {
                operator: op,
                expected: op.arity(),
                found: operands.len(),
            })
        }
    })
}

/// Truth value of `formula` in `model`, which must assign all its variables.
pub fn evaluate(formula: &Formula, model: &Model) -> Result<bool> {
    post_order(formula, |node, operands: Vec<bool>| match *node {
        Formula::Variable(ref id) => model.get(id).ok_or_else(|| Error::Unassigned(id.clone())),
        Formula::Constant(val) => Ok(val),
        Formula::Unary(op, _) | Formula::Binary(op, _, _) => apply(op, &operands),
    })
}

/// Every assignment to `variables`, counting upwards in binary from all
/// false, the first variable being the most significant bit.
pub fn all_models(variables: &BTreeSet<Ident>) -> Vec<Model> {
    if variables.is_empty() {
        return vec![Model::new()];
    }

    variables
        .iter()
        .map(|_| vec![false, true])
        .multi_cartesian_product()
        .map(|values| variables.iter().cloned().zip(values).collect())
        .collect()
}

pub fn truth_values(formula: &Formula, models: &[Model]) -> Result<Vec<bool>> {
    models.iter().map(|model| evaluate(formula, model)).collect()
}

/// Whether both formulas agree on every assignment to their variables.
pub fn is_equivalent(a: &Formula, b: &Formula) -> Result<bool> {
    let variables: BTreeSet<Ident> = a.variables().union(&b.variables()).cloned().collect();
    for model in all_models(&variables) {
        if evaluate(a, &model)? != evaluate(b, &model)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn is_tautology(formula: &Formula) -> Result<bool> {
    Ok(truth_values(formula, &all_models(&formula.variables()))?
        .into_iter()
        .all(|val| val))
}
