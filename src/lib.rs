// Licensed under MIT. See LICENSE for details.

#[macro_use]
extern crate nom;

pub mod error;
pub mod model;
pub mod operators;
pub mod parser;
pub mod rewrite;
pub mod semantics;
pub mod template;
pub mod types;

pub use crate::error::{Error, Result};
pub use crate::operators::{
    to_implies_false, to_implies_not, to_nand, to_not_and, to_not_and_or, Basis, RuleTable,
};
pub use crate::types::{Formula, Operator};
