// Licensed under MIT. See LICENSE for details.

use std::collections::BTreeMap;
use std::iter::FromIterator;

use crate::types::Ident;

// Truth values assigned to variables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Model {
    vars: BTreeMap<Ident, bool>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.vars.get(id).cloned()
    }

    pub fn extend(&self, id: Ident, val: bool) -> Self {
        let mut vars = self.vars.clone();
        vars.insert(id, val);
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident, bool)> {
        self.vars.iter().map(|(id, val)| (id, *val))
    }
}

impl FromIterator<(Ident, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (Ident, bool)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        iter.into_iter().map(|(id, val)| (id.to_string(), val)).collect()
    }
}
