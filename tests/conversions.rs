// Licensed under MIT. See LICENSE for details.

//! Every conversion keeps the truth table and lands in its basis.

use std::rc::Rc;

use proptest::prelude::*;

use ropbasis::semantics::{all_models, evaluate, is_equivalent};
use ropbasis::{to_nand, to_not_and_or, Basis, Formula, Operator};

fn arb_formula(max_depth: u32) -> BoxedStrategy<Formula> {
    let leaf = prop_oneof![
        3 => prop::sample::select(vec!["p", "q", "r", "p1"]).prop_map(Formula::variable),
        1 => any::<bool>().prop_map(Formula::constant),
    ];
    if max_depth == 0 {
        return leaf.boxed();
    }

    let binary_ops: Vec<Operator> = Operator::ALL
        .iter()
        .cloned()
        .filter(|op| op.arity() == 2)
        .collect();
    prop_oneof![
        2 => leaf,
        1 => arb_formula(max_depth - 1).prop_map(Formula::not),
        3 => (
            prop::sample::select(binary_ops),
            arb_formula(max_depth - 1),
            arb_formula(max_depth - 1),
        )
            .prop_map(|(op, a, b)| Formula::Binary(op, Rc::new(a), Rc::new(b))),
    ]
    .boxed()
}

fn fixtures() -> Vec<Formula> {
    include_str!("../assets/formulas.txt")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.parse().unwrap())
        .collect()
}

#[test]
fn test_fixtures_in_every_basis() {
    for formula in fixtures() {
        for &basis in &Basis::ALL {
            let res = basis.convert(&formula).unwrap();
            assert_eq!(is_equivalent(&formula, &res), Ok(true), "{} in {}", formula, basis);
            for op in res.operators() {
                assert!(basis.contains(op), "{} in {}: {}", formula, basis, res);
            }
        }
    }
}

#[test]
fn test_implication_scenario() {
    let f: Formula = "(p->q)".parse().unwrap();
    let expected: Formula = "(~p|q)".parse().unwrap();
    assert_eq!(is_equivalent(&to_not_and_or(&f).unwrap(), &expected), Ok(true));
}

#[test]
fn test_true_scenario() {
    let res = to_not_and_or(&Formula::constant(true)).unwrap();
    for model in all_models(&res.variables()) {
        assert_eq!(evaluate(&res, &model), Ok(true));
    }
}

#[test]
fn test_nand_disjunction_scenario() {
    let f: Formula = "(p|q)".parse().unwrap();
    // (~p&~q) spelled with NAND; the result negates it once more.
    let conj: Formula = "(((p-&p)-&(q-&q))-&((p-&p)-&(q-&q)))".parse().unwrap();
    let res = to_nand(&f).unwrap();
    assert_eq!(is_equivalent(&res, &f), Ok(true));
    assert_eq!(res, Formula::Binary(Operator::Nand, Rc::new(conj.clone()), Rc::new(conj)));
}

proptest! {
    #[test]
    fn conversions_preserve_truth_table(f in arb_formula(4)) {
        for &basis in &Basis::ALL {
            let res = basis.convert(&f).unwrap();
            prop_assert_eq!(is_equivalent(&f, &res), Ok(true), "{} in {}: {}", f, basis, res);
        }
    }

    #[test]
    fn conversions_stay_in_basis(f in arb_formula(4)) {
        for &basis in &Basis::ALL {
            let res = basis.convert(&f).unwrap();
            for op in res.operators() {
                prop_assert!(basis.contains(op), "{} in {}: {}", f, basis, res);
            }
        }
    }

    #[test]
    fn canonical_form_is_idempotent(f in arb_formula(4)) {
        let once = to_not_and_or(&f).unwrap();
        let twice = to_not_and_or(&once).unwrap();
        prop_assert_eq!(is_equivalent(&once, &twice), Ok(true));
    }

    #[test]
    fn display_parses_back(f in arb_formula(4)) {
        let parsed: Formula = f.to_string().parse().unwrap();
        prop_assert_eq!(parsed, f);
    }
}
