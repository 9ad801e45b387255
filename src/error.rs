// Licensed under MIT. See LICENSE for details.

use thiserror::Error;

use crate::operators::Basis;
use crate::template::Slot;
use crate::types::{Ident, Operator};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("syntax error at offset {offset} in `{input}`")]
    Syntax { input: String, offset: usize },

    #[error("operator `{operator}` takes {expected} operand(s), got {found}")]
    Arity {
        operator: Operator,
        expected: usize,
        found: usize,
    },

    // A template mentions a variable other than the two placeholders.
    #[error("`{name}` is not a placeholder, templates may only use `p` and `q`")]
    Placeholder { name: Ident },

    #[error("placeholder {slot:?} has no operand to bind to")]
    UnboundSlot { slot: Slot },

    #[error("template for `{operator}` uses placeholder {slot:?} it cannot bind")]
    TemplateArity { operator: Operator, slot: Slot },

    #[error("template for `{operator}` uses `{found}` outside of basis {basis}")]
    TemplateOutsideBasis {
        operator: Operator,
        found: Operator,
        basis: Basis,
    },

    #[error("operator `{operator}` is neither rewritten nor part of basis {basis}")]
    UnsupportedOperator { operator: Operator, basis: Basis },

    #[error("no truth value assigned to variable `{0}`")]
    Unassigned(Ident),

    #[error("unknown basis `{0}`")]
    UnknownBasis(String),
}
