// Licensed under MIT. See LICENSE for details.

use std::collections::BTreeSet;
use std::fmt;
use std::mem;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::parser;
use crate::rewrite;

pub type Ident = String;

// Connectives, constants included as nullary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    // T
    True,
    // F
    False,
    // ~a
    Not,
    // (a&b)
    And,
    // (a|b)
    Or,
    // (a->b)
    Implies,
    // (a+b)
    Xor,
    // (a<->b)
    Iff,
    // (a-|b)
    Nor,
    // (a-&b)
    Nand,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::True,
        Operator::False,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Implies,
        Operator::Xor,
        Operator::Iff,
        Operator::Nor,
        Operator::Nand,
    ];

    pub fn arity(self) -> usize {
        match self {
            Operator::True | Operator::False => 0,
            Operator::Not => 1,
            _ => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::True => "T",
            Operator::False => "F",
            Operator::Not => "~",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Implies => "->",
            Operator::Xor => "+",
            Operator::Iff => "<->",
            Operator::Nor => "-|",
            Operator::Nand => "-&",
        }
    }

    fn check_arity(self, found: usize) -> Result<()> {
        if self.arity() == found {
            Ok(())
        } else {
            Err(Error::Arity {
                operator: self,
                expected: self.arity(),
                found,
            })
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An immutable propositional formula.
///
/// Operands are reference counted: rewriting never mutates a node, it builds
/// new ones on top of the (possibly shared) operand subtrees.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    // p, q12
    Variable(Ident),
    // T, F
    Constant(bool),
    // ~a
    Unary(Operator, Rc<Formula>),
    // (a op b)
    Binary(Operator, Rc<Formula>, Rc<Formula>),
}

thread_local! {
    // Stands in for operands moved out of a formula being dropped.
    static HOLLOW: Rc<Formula> = Rc::new(Formula::Constant(false));
}

fn hollow() -> Rc<Formula> {
    HOLLOW
        .try_with(Rc::clone)
        .unwrap_or_else(|_| Rc::new(Formula::Constant(false)))
}

// Moves out the operands this node is the last owner of.
fn take_unique(operand: &mut Rc<Formula>, pending: &mut Vec<Rc<Formula>>) {
    if Rc::get_mut(operand).is_some() {
        pending.push(mem::replace(operand, hollow()));
    }
}

impl Formula {
    fn take_operands(&mut self, pending: &mut Vec<Rc<Formula>>) {
        match *self {
            Formula::Variable(_) | Formula::Constant(_) => {}
            Formula::Unary(_, ref mut a) => take_unique(a, pending),
            Formula::Binary(_, ref mut a, ref mut b) => {
                take_unique(a, pending);
                take_unique(b, pending);
            }
        }
    }
}

// Dropping a deep chain node by node would recurse once per level.
impl Drop for Formula {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_operands(&mut pending);
        while let Some(operand) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(operand) {
                node.take_operands(&mut pending);
            }
        }
    }
}

impl Formula {
    pub fn variable<S: Into<Ident>>(name: S) -> Self {
        Formula::Variable(name.into())
    }

    pub fn constant(value: bool) -> Self {
        Formula::Constant(value)
    }

    pub fn not<F: Into<Rc<Formula>>>(operand: F) -> Self {
        Formula::Unary(Operator::Not, operand.into())
    }

    pub fn unary<F: Into<Rc<Formula>>>(op: Operator, operand: F) -> Result<Self> {
        op.check_arity(1)?;
        Ok(Formula::Unary(op, operand.into()))
    }

    pub fn binary<L, R>(op: Operator, lhs: L, rhs: R) -> Result<Self>
    where
        L: Into<Rc<Formula>>,
        R: Into<Rc<Formula>>,
    {
        op.check_arity(2)?;
        Ok(Formula::Binary(op, lhs.into(), rhs.into()))
    }

    /// The operator at the root, constants reported as `T` and `F`.
    pub fn root(&self) -> Option<Operator> {
        match *self {
            Formula::Variable(_) => None,
            Formula::Constant(true) => Some(Operator::True),
            Formula::Constant(false) => Some(Operator::False),
            Formula::Unary(op, _) | Formula::Binary(op, _, _) => Some(op),
        }
    }

    pub fn operands(&self) -> Vec<&Formula> {
        match *self {
            Formula::Variable(_) | Formula::Constant(_) => vec![],
            Formula::Unary(_, ref a) => vec![&**a],
            Formula::Binary(_, ref a, ref b) => vec![&**a, &**b],
        }
    }

    pub fn operators(&self) -> BTreeSet<Operator> {
        let mut ops = BTreeSet::new();
        rewrite::for_each_node(self, |node| {
            if let Some(op) = node.root() {
                ops.insert(op);
            }
        });
        ops
    }

    pub fn variables(&self) -> BTreeSet<Ident> {
        let mut vars = BTreeSet::new();
        rewrite::for_each_node(self, |node| {
            if let Formula::Variable(ref id) = *node {
                vars.insert(id.clone());
            }
        });
        vars
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Formula::Variable(ref id) => f.write_str(id),
            Formula::Constant(true) => f.write_str("T"),
            Formula::Constant(false) => f.write_str("F"),
            Formula::Unary(op, ref a) => write!(f, "{}{}", op, a),
            Formula::Binary(op, ref a, ref b) => write!(f, "({}{}{})", a, op, b),
        }
    }
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}
