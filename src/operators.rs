// Licensed under MIT. See LICENSE for details.

//! Conversion of formulas to a restricted set of connectives.
//!
//! Each target basis owns one rule table mapping the operators it eliminates
//! to templates written in that basis. Every template has the truth table of
//! the operator it replaces. Conversions first go through `{~,&,|}` and, if
//! needed, apply one more table on top of it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use itertools::Itertools;
use tracing::debug;

use crate::error::{Error, Result};
use crate::template::Template;
use crate::types::{Formula, Operator};

// No template expands to an operator that needs eliminating itself, so one
// pass suffices.
const NOT_AND_OR_RULES: &[(Operator, &str)] = &[
    (Operator::True, "(p|~p)"),
    (Operator::False, "(p&~p)"),
    (Operator::Implies, "(~p|q)"),
    (Operator::Xor, "((p&~q)|(~p&q))"),
    (Operator::Iff, "((p&q)|(~p&~q))"),
    (Operator::Nor, "~(p|q)"),
    (Operator::Nand, "~(p&q)"),
];

// De Morgan.
const NOT_AND_RULES: &[(Operator, &str)] = &[(Operator::Or, "~(~p&~q)")];

const NAND_RULES: &[(Operator, &str)] = &[
    (Operator::Not, "(p-&p)"),
    (Operator::And, "((p-&q)-&(p-&q))"),
];

const IMPLIES_NOT_RULES: &[(Operator, &str)] = &[
    (Operator::True, "(p->p)"),
    (Operator::False, "~(p->p)"),
    (Operator::Not, "~p"),
    (Operator::And, "~(p->~q)"),
    (Operator::Or, "(~p->q)"),
];

const IMPLIES_FALSE_RULES: &[(Operator, &str)] = &[
    (Operator::Not, "(p->F)"),
    (Operator::And, "((p->(q->F))->F)"),
    (Operator::Or, "((p->F)->q)"),
    (Operator::True, "(F->F)"),
    (Operator::False, "F"),
];

// Parsed and validated on first use, indexed by `Basis as usize`.
static RULE_TABLES: OnceLock<[Result<RuleTable>; 5]> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Basis {
    // {~,&,|}
    NotAndOr,
    // {~,&}
    NotAnd,
    // {-&}
    Nand,
    // {->,~}
    ImpliesNot,
    // {->,F}
    ImpliesFalse,
}

impl Basis {
    pub const ALL: [Basis; 5] = [
        Basis::NotAndOr,
        Basis::NotAnd,
        Basis::Nand,
        Basis::ImpliesNot,
        Basis::ImpliesFalse,
    ];

    /// The only operators a conversion to this basis leaves in its output.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            Basis::NotAndOr => &[Operator::Not, Operator::And, Operator::Or],
            Basis::NotAnd => &[Operator::Not, Operator::And],
            Basis::Nand => &[Operator::Nand],
            Basis::ImpliesNot => &[Operator::Implies, Operator::Not],
            Basis::ImpliesFalse => &[Operator::Implies, Operator::False],
        }
    }

    pub fn contains(self, op: Operator) -> bool {
        self.operators().contains(&op)
    }

    pub fn name(self) -> &'static str {
        match self {
            Basis::NotAndOr => "not-and-or",
            Basis::NotAnd => "not-and",
            Basis::Nand => "nand",
            Basis::ImpliesNot => "implies-not",
            Basis::ImpliesFalse => "implies-false",
        }
    }

    fn rules(self) -> &'static [(Operator, &'static str)] {
        match self {
            Basis::NotAndOr => NOT_AND_OR_RULES,
            Basis::NotAnd => NOT_AND_RULES,
            Basis::Nand => NAND_RULES,
            Basis::ImpliesNot => IMPLIES_NOT_RULES,
            Basis::ImpliesFalse => IMPLIES_FALSE_RULES,
        }
    }

    pub fn rule_table(self) -> Result<&'static RuleTable> {
        let tables = RULE_TABLES.get_or_init(|| Basis::ALL.map(|b| RuleTable::new(b, b.rules())));
        tables[self as usize].as_ref().map_err(Clone::clone)
    }

    pub fn convert(self, formula: &Formula) -> Result<Formula> {
        match self {
            Basis::NotAndOr => to_not_and_or(formula),
            Basis::NotAnd => to_not_and(formula),
            Basis::Nand => to_nand(formula),
            Basis::ImpliesNot => to_implies_not(formula),
            Basis::ImpliesFalse => to_implies_false(formula),
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.operators().iter().join(","))
    }
}

impl FromStr for Basis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Basis::ALL
            .iter()
            .cloned()
            .find(|basis| basis.name() == s)
            .ok_or_else(|| Error::UnknownBasis(s.to_string()))
    }
}

/// Templates for the operators a basis eliminates.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleTable {
    basis: Basis,
    rules: BTreeMap<Operator, Template>,
}

impl RuleTable {
    /// Parses the templates and checks that each one only uses placeholders
    /// its operator can bind and only operators of `basis`.
    pub fn new(basis: Basis, rules: &[(Operator, &str)]) -> Result<Self> {
        let mut table = BTreeMap::new();
        for &(operator, source) in rules {
            let template = Template::parse(source)?;
            // Nullary operators get a witness variable for the first slot.
            let bindable = operator.arity().max(1);
            if let Some(slot) = template.slots().into_iter().find(|s| s.index() >= bindable) {
                return Err(Error::TemplateArity { operator, slot });
            }
            if let Some(found) = template.operators().into_iter().find(|op| !basis.contains(*op)) {
                return Err(Error::TemplateOutsideBasis {
                    operator,
                    found,
                    basis,
                });
            }
            table.insert(operator, template);
        }
        Ok(Self {
            basis,
            rules: table,
        })
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn get(&self, op: Operator) -> Option<&Template> {
        self.rules.get(&op)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operator, &Template)> {
        self.rules.iter().map(|(op, template)| (*op, template))
    }

    /// Rewrites `formula` into the table's basis. Every operator of the
    /// formula must either have a rule or already belong to the basis.
    pub fn apply(&self, formula: &Formula) -> Result<Formula> {
        if let Some(operator) = formula
            .operators()
            .into_iter()
            .find(|op| !self.rules.contains_key(op) && !self.basis.contains(*op))
        {
            return Err(Error::UnsupportedOperator {
                operator,
                basis: self.basis,
            });
        }

        debug!(basis = %self.basis, rules = self.rules.len(), "applying rule table");
        formula.substitute_operators(&self.rules)
    }
}

/// Equivalent formula over `~`, `&` and `|` only.
pub fn to_not_and_or(formula: &Formula) -> Result<Formula> {
    Basis::NotAndOr.rule_table()?.apply(formula)
}

/// Equivalent formula over `~` and `&` only.
pub fn to_not_and(formula: &Formula) -> Result<Formula> {
    Basis::NotAnd.rule_table()?.apply(&to_not_and_or(formula)?)
}

/// Equivalent formula over `-&` only.
pub fn to_nand(formula: &Formula) -> Result<Formula> {
    Basis::Nand.rule_table()?.apply(&to_not_and(formula)?)
}

/// Equivalent formula over `->` and `~` only.
pub fn to_implies_not(formula: &Formula) -> Result<Formula> {
    Basis::ImpliesNot.rule_table()?.apply(&to_not_and_or(formula)?)
}

/// Equivalent formula over `->` and `F` only.
pub fn to_implies_false(formula: &Formula) -> Result<Formula> {
    Basis::ImpliesFalse.rule_table()?.apply(&to_not_and_or(formula)?)
}
