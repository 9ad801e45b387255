// Licensed under MIT. See LICENSE for details.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser;
use crate::types::{Formula, Operator};

// Placeholders live in their own namespace, a formula variable can never be
// mistaken for one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    // p
    First,
    // q
    Second,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }
}

/// A formula over placeholders, standing in for one operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Template {
    Slot(Slot),
    Constant(bool),
    Unary(Operator, Box<Template>),
    Binary(Operator, Box<Template>, Box<Template>),
}

impl Template {
    /// Reads a template in formula syntax, `p` and `q` being the placeholders.
    pub fn parse(source: &str) -> Result<Self> {
        Template::from_formula(&parser::parse(source)?)
    }

    pub fn from_formula(formula: &Formula) -> Result<Self> {
        Ok(match *formula {
            Formula::Variable(ref id) => match id.as_str() {
                "p" => Template::Slot(Slot::First),
                "q" => Template::Slot(Slot::Second),
                _ => return Err(Error::Placeholder { name: id.clone() }),
            },
            Formula::Constant(val) => Template::Constant(val),
            Formula::Unary(op, ref a) => Template::Unary(op, Box::new(Template::from_formula(a)?)),
            Formula::Binary(op, ref a, ref b) => Template::Binary(
                op,
                Box::new(Template::from_formula(a)?),
                Box::new(Template::from_formula(b)?),
            ),
        })
    }

    pub fn slots(&self) -> BTreeSet<Slot> {
        let mut slots = BTreeSet::new();
        self.collect(&mut slots, &mut BTreeSet::new());
        slots
    }

    pub fn operators(&self) -> BTreeSet<Operator> {
        let mut ops = BTreeSet::new();
        self.collect(&mut BTreeSet::new(), &mut ops);
        ops
    }

    fn collect(&self, slots: &mut BTreeSet<Slot>, ops: &mut BTreeSet<Operator>) {
        match *self {
            Template::Slot(slot) => {
                slots.insert(slot);
            }
            Template::Constant(val) => {
                ops.insert(if val { Operator::True } else { Operator::False });
            }
            Template::Unary(op, ref a) => {
                ops.insert(op);
                a.collect(slots, ops);
            }
            Template::Binary(op, ref a, ref b) => {
                ops.insert(op);
                a.collect(slots, ops);
                b.collect(slots, ops);
            }
        }
    }

    /// Builds the formula this template denotes with each slot bound to the
    /// operand at its index. Operands mentioned twice are shared, not copied.
    pub fn instantiate(&self, operands: &[Rc<Formula>]) -> Result<Rc<Formula>> {
        Ok(match *self {
            Template::Slot(slot) => match operands.get(slot.index()) {
                Some(operand) => operand.clone(),
                None => return Err(Error::UnboundSlot { slot }),
            },
            Template::Constant(val) => Rc::new(Formula::Constant(val)),
            Template::Unary(op, ref a) => Rc::new(Formula::Unary(op, a.instantiate(operands)?)),
            Template::Binary(op, ref a, ref b) => Rc::new(Formula::Binary(
                op,
                a.instantiate(operands)?,
                b.instantiate(operands)?,
            )),
        })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Template::Slot(Slot::First) => f.write_str("p"),
            Template::Slot(Slot::Second) => f.write_str("q"),
            Template::Constant(true) => f.write_str("T"),
            Template::Constant(false) => f.write_str("F"),
            Template::Unary(op, ref a) => write!(f, "{}{}", op, a),
            Template::Binary(op, ref a, ref b) => write!(f, "({}{}{})", a, op, b),
        }
    }
}
