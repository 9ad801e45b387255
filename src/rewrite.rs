// Licensed under MIT. See LICENSE for details.

//! Tree walks over formulas.
//!
//! Walks use an explicit stack, so formula depth is only bounded by memory.
//! Nodes are identified by address: a subtree shared between several parents
//! is visited once and its result reused, which keeps rewritten formulas
//! shared as well.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::convert::Infallible;
use std::rc::Rc;

use crate::error::Result;
use crate::template::Template;
use crate::types::{Formula, Ident, Operator};

// Binds the placeholder of a nullary operator's template when the formula
// has no variable of its own.
const DEFAULT_WITNESS: &str = "p";

fn key(node: &Formula) -> *const Formula {
    node
}

enum Frame<'a> {
    Enter(&'a Formula),
    Exit(&'a Formula),
}

/// Calls `visit` once per distinct node, parents before children.
pub fn for_each_node<'a, F>(root: &'a Formula, mut visit: F)
where
    F: FnMut(&'a Formula),
{
    let mut seen = HashSet::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if !seen.insert(key(node)) {
            continue;
        }
        visit(node);
        pending.extend(node.operands().into_iter().rev());
    }
}

/// Folds a formula bottom-up: `visit` receives a node together with the
/// results already computed for its operands.
pub fn post_order<T, E, F>(root: &Formula, mut visit: F) -> std::result::Result<T, E>
where
    T: Clone,
    F: FnMut(&Formula, Vec<T>) -> std::result::Result<T, E>,
{
    let mut done: HashMap<*const Formula, T> = HashMap::new();
    let mut frames = vec![Frame::Enter(root)];

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(node) => {
                if done.contains_key(&key(node)) {
                    continue;
                }
                frames.push(Frame::Exit(node));
                for operand in node.operands().into_iter().rev() {
                    frames.push(Frame::Enter(operand));
                }
            }
            Frame::Exit(node) => {
                // A shared node may be entered twice before its first exit.
                if done.contains_key(&key(node)) {
                    continue;
                }
                let operands = node
                    .operands()
                    .into_iter()
                    .map(|operand| done[&key(operand)].clone())
                    .collect();
                let value = visit(node, operands)?;
                if key(node) == key(root) {
                    return Ok(value);
                }
                done.insert(key(node), value);
            }
        }
    }

    unreachable!("post-order walk always exits the root last")
}

impl Formula {
    /// Replaces every operator that is a key of `rules` by its template.
    ///
    /// Operands are rewritten before the node containing them, and the
    /// template's placeholders are bound to those rewritten operands.
    /// Variables, and operators missing from `rules`, are kept as they are.
    /// Templates of the constants `T` and `F` may mention the first
    /// placeholder, it is bound to the smallest variable of the formula
    /// (`x|~x` holds whichever `x` is picked).
    pub fn substitute_operators(&self, rules: &BTreeMap<Operator, Template>) -> Result<Formula> {
        let witness = Rc::new(Formula::Variable(
            self.variables()
                .into_iter()
                .next()
                .unwrap_or_else(|| DEFAULT_WITNESS.to_string()),
        ));

        let rewritten = post_order(self, |node, operands: Vec<Rc<Formula>>| {
            let template = match node.root().and_then(|op| rules.get(&op)) {
                Some(template) => template,
                None => return Ok(rebuild(node, operands)),
            };
            if operands.is_empty() {
                template.instantiate(&[witness.clone()])
            } else {
                template.instantiate(&operands)
            }
        })?;

        Ok(Rc::try_unwrap(rewritten).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Replaces variables by formulas, all at once.
    pub fn substitute_variables(&self, substitution: &BTreeMap<Ident, Formula>) -> Formula {
        let replacements: HashMap<&Ident, Rc<Formula>> = substitution
            .iter()
            .map(|(id, formula)| (id, Rc::new(formula.clone())))
            .collect();

        let rewritten: std::result::Result<Rc<Formula>, Infallible> =
            post_order(self, |node, operands| {
                Ok(match *node {
                    Formula::Variable(ref id) => match replacements.get(id) {
                        Some(formula) => formula.clone(),
                        None => rebuild(node, operands),
                    },
                    _ => rebuild(node, operands),
                })
            });

        match rewritten {
            Ok(formula) => Rc::try_unwrap(formula).unwrap_or_else(|shared| (*shared).clone()),
            Err(never) => match never {},
        }
    }
}

// Same node over new operands.
fn rebuild(node: &Formula, operands: Vec<Rc<Formula>>) -> Rc<Formula> {
    let mut operands = operands.into_iter();
    match (node, operands.next(), operands.next()) {
        (&Formula::Unary(op, _), Some(a), None) => Rc::new(Formula::Unary(op, a)),
        (&Formula::Binary(op, _, _), Some(a), Some(b)) => Rc::new(Formula::Binary(op, a, b)),
        _ => Rc::new(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn _parse(s: &str) -> Formula {
        s.parse().unwrap()
    }
    fn _rules(rules: &[(Operator, &str)]) -> BTreeMap<Operator, Template> {
        rules
            .iter()
            .map(|&(op, src)| (op, Template::parse(src).unwrap()))
            .collect()
    }

    #[test]
    fn test_post_order() {
        let f = _parse("(~p&(q|r))");
        let mut order = vec![];
        let size: Result<usize> = post_order(&f, |node, operands: Vec<usize>| {
            order.push(node.to_string());
            Ok(1 + operands.iter().sum::<usize>())
        });
        assert_eq!(size, Ok(6));
        assert_eq!(order, vec!["p", "~p", "q", "r", "(q|r)", "(~p&(q|r))"]);
    }

    #[test]
    fn test_post_order_visits_shared_nodes_once() {
        let p = Rc::new(_parse("(p+q)"));
        let f = Formula::Binary(Operator::And, p.clone(), p.clone());
        let mut visits = 0;
        let res: Result<()> = post_order(&f, |_, _: Vec<()>| {
            visits += 1;
            Ok(())
        });
        assert!(res.is_ok());
        // p, q, (p+q), root
        assert_eq!(visits, 4);
    }

    #[test]
    fn test_post_order_error() {
        let f = _parse("(p&q)");
        let res: Result<()> = post_order(&f, |node, _| match *node {
            Formula::Variable(ref id) if id == "q" => Err(Error::Unassigned(id.clone())),
            _ => Ok(()),
        });
        assert_eq!(res, Err(Error::Unassigned("q".to_string())));
    }

    #[test]
    fn test_for_each_node() {
        let f = _parse("((p|q)->~p)");
        let mut nodes = vec![];
        for_each_node(&f, |node| nodes.push(node.to_string()));
        assert_eq!(nodes, vec!["((p|q)->~p)", "(p|q)", "p", "q", "~p", "p"]);
    }

    #[test]
    fn test_substitute_operators() {
        let rules = _rules(&[(Operator::Implies, "(~p|q)")]);
        let f = _parse("((r->s)&(s->r))");
        assert_eq!(f.substitute_operators(&rules).unwrap().to_string(), "((~r|s)&(~s|r))");
    }

    #[test]
    fn test_substitute_operators_nested() {
        // Operands are converted before the template is applied.
        let rules = _rules(&[(Operator::Implies, "(~p|q)")]);
        let f = _parse("((p->q)->q)");
        assert_eq!(f.substitute_operators(&rules).unwrap().to_string(), "(~(~p|q)|q)");
    }

    #[test]
    fn test_substitute_operators_pass_through() {
        let rules = _rules(&[(Operator::Xor, "((p&~q)|(~p&q))")]);
        let f = _parse("~(p<->q)");
        assert_eq!(f.substitute_operators(&rules).unwrap(), f);
        assert_eq!(_parse("q").substitute_operators(&rules).unwrap(), _parse("q"));
    }

    #[test]
    fn test_substitute_operators_placeholder_names() {
        // Variables named like the placeholders are ordinary variables.
        let rules = _rules(&[(Operator::And, "~(~p|~q)")]);
        let f = _parse("(q&p)");
        assert_eq!(f.substitute_operators(&rules).unwrap().to_string(), "~(~q|~p)");
    }

    #[test]
    fn test_substitute_constants() {
        let rules = _rules(&[(Operator::True, "(p|~p)"), (Operator::False, "(p&~p)")]);

        let f = _parse("(s->T)");
        assert_eq!(f.substitute_operators(&rules).unwrap().to_string(), "(s->(s|~s))");

        let f = _parse("((r&s)|F)");
        assert_eq!(f.substitute_operators(&rules).unwrap().to_string(), "((r&s)|(r&~r))");

        let f = _parse("T");
        assert_eq!(f.substitute_operators(&rules).unwrap().to_string(), "(p|~p)");
    }

    #[test]
    fn test_substitute_operators_shares_operands() {
        let rules = _rules(&[(Operator::Not, "(p-&p)")]);
        let f = _parse("~(r|s)");
        match f.substitute_operators(&rules).unwrap() {
            Formula::Binary(Operator::Nand, ref a, ref b) => assert!(Rc::ptr_eq(a, b)),
            other => panic!("unexpected {}", other),
        }
    }

    #[test]
    fn test_substitute_operators_unbound() {
        let rules = _rules(&[(Operator::Not, "(p&q)")]);
        assert!(_parse("~r").substitute_operators(&rules).is_err());
    }

    #[test]
    fn test_substitute_variables() {
        let mut substitution = BTreeMap::new();
        substitution.insert("p".to_string(), _parse("(q&r)"));
        substitution.insert("q".to_string(), _parse("~p"));

        let f = _parse("((p->q)|T)");
        assert_eq!(f.substitute_variables(&substitution).to_string(), "(((q&r)->~p)|T)");
    }

    #[test]
    fn test_deep_formula() {
        let mut f = Formula::variable("p");
        for _ in 0..2000 {
            f = Formula::Binary(Operator::Implies, Rc::new(f), Rc::new(Formula::variable("q")));
        }
        let rules = _rules(&[(Operator::Implies, "(~p|q)")]);
        let res = f.substitute_operators(&rules).unwrap();
        assert_eq!(res.operators().into_iter().collect::<Vec<_>>(), vec![Operator::Not, Operator::Or]);
    }
}
