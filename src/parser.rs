// Licensed under MIT. See LICENSE for details.

use std::rc::Rc;

use nom::{digit, multispace, IResult};
use tracing::trace;

use crate::error::{Error, Result};
use crate::types::{Formula, Operator};

// Optional spaces and newlines.
named!(
    blanks<()>,
    map!(opt!(complete!(multispace)), |_| ())
);

// A letter from p to z, optionally followed by digits.
named!(
    variable<Formula>,
    complete!(map!(
        map_res!(
            recognize!(pair!(
                one_of!("pqrstuvwxyz"),
                opt!(complete!(digit))
            )),
            |id: &[u8]| String::from_utf8(id.to_vec())
        ),
        Formula::Variable
    ))
);

named!(
    constant<Formula>,
    complete!(map!(alt!(tag!("T") | tag!("F")), |c: &[u8]| {
        Formula::Constant(c == b"T")
    }))
);

named!(
    negation<Formula>,
    complete!(do_parse!(
        tag!("~") >> blanks >> operand: formula >>
            (Formula::Unary(Operator::Not, Rc::new(operand)))
    ))
);

// Longer symbols first, "<->" would otherwise never match.
named!(
    binary_operator<Operator>,
    alt!(
        complete!(value!(Operator::Iff, tag!("<->"))) |
        complete!(value!(Operator::Implies, tag!("->"))) |
        complete!(value!(Operator::Nand, tag!("-&"))) |
        complete!(value!(Operator::Nor, tag!("-|"))) |
        complete!(value!(Operator::And, tag!("&"))) |
        complete!(value!(Operator::Or, tag!("|"))) |
        complete!(value!(Operator::Xor, tag!("+")))
    )
);

named!(
    binary<Formula>,
    complete!(do_parse!(
    tag!("(") >>
    blanks >>
    lhs: formula >>
    blanks >>
    op: binary_operator >>
    blanks >>
    rhs: formula >>
    blanks >>
    tag!(")") >>
    (Formula::Binary(op, Rc::new(lhs), Rc::new(rhs)))
  ))
);

named!(
    formula<Formula>,
    alt!(variable | constant | negation | binary)
);

named!(
    document<Formula>,
    delimited!(blanks, formula, blanks)
);

pub fn parse(input: &str) -> Result<Formula> {
    trace!(input, "parsing formula");

    match document(input.as_bytes()) {
        IResult::Done(rest, node) => {
            if rest.is_empty() {
                Ok(node)
            } else {
                Err(Error::Syntax {
                    input: input.to_string(),
                    offset: input.len() - rest.len(),
                })
            }
        }
        _ => Err(Error::Syntax {
            input: input.to_string(),
            offset: 0,
        }),
    }
}
