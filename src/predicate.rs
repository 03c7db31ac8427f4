//! Predicate expression tree handed to store adapters.
//!
//! The engine never builds query text. It combines [`Predicate`] values and a
//! [`crate::store::Store`] adapter renders them into its native query form
//! (AQL, SQL, or direct evaluation for [`crate::memory::MemoryStore`]).

use crate::value::Value;

/// A reference to something a row can be compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The entity's tie-break key.
    Key,
    /// A named, comparable attribute of the entity.
    Attribute(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    /// Operator as it would appear in a query string.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Key(u64),
    /// Value of `attribute` on the row whose key is `key`, resolved by the
    /// store. Resolves to [`Value::Null`] when that row does not exist.
    AnchorAttribute {
        attribute: &'static str,
        key: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every row.
    True,
    Compare {
        field: Field,
        op: Comparator,
        operand: Operand,
    },
    /// Case-insensitive substring match on a text attribute.
    Contains {
        attribute: &'static str,
        needle: String,
    },
    KeyIn(Vec<u64>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn compare(field: Field, op: Comparator, operand: Operand) -> Self {
        Predicate::Compare { field, op, operand }
    }

    pub fn key(op: Comparator, key: u64) -> Self {
        Predicate::compare(Field::Key, op, Operand::Key(key))
    }

    pub fn attribute(attribute: &'static str, op: Comparator, value: impl Into<Value>) -> Self {
        Predicate::compare(
            Field::Attribute(attribute),
            op,
            Operand::Literal(value.into()),
        )
    }

    pub fn eq(attribute: &'static str, value: impl Into<Value>) -> Self {
        Predicate::attribute(attribute, Comparator::Eq, value)
    }

    /// Free-text search over `attributes`. Blank terms match everything.
    pub fn search(attributes: &[&'static str], term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() || attributes.is_empty() {
            return Predicate::True;
        }
        Predicate::Or(
            attributes
                .iter()
                .map(|&attribute| Predicate::Contains {
                    attribute,
                    needle: term.to_string(),
                })
                .collect(),
        )
    }

    /// Conjunction that drops `True` terms and flattens nested `And`s.
    pub fn and(self, other: Predicate) -> Self {
        let mut terms = Vec::new();
        for p in [self, other] {
            match p {
                Predicate::True => {}
                Predicate::And(inner) => terms.extend(inner),
                p => terms.push(p),
            }
        }
        match terms.len() {
            0 => Predicate::True,
            1 => terms.remove(0),
            _ => Predicate::And(terms),
        }
    }

    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }
}
