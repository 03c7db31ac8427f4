//! Keyset range predicates: "ordered strictly after/before this position".
//!
//! With a primary sort attribute the comparison is lexicographic over
//! `(primary, key)`:
//!
//! ```text
//! primary <op> A  OR  (primary == A AND key <op> K)
//! ```
//!
//! A single-column comparison on a non-unique attribute would drop or repeat
//! rows sharing the boundary value, so the key term is never omitted.

use crate::cursor::Anchor;
use crate::entity::Entity;
use crate::predicate::{Comparator, Field, Operand, Predicate};
use crate::sort::{OrderDirection, SortSpec};
use crate::value::Value;

/// Side of a boundary a range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDirection {
    After,
    Before,
}

/// Position a range is measured from.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Decoded cursor. Its primary value is looked up by the store.
    Cursor { key: u64 },
    /// A row already in hand. `primary` is `None` for key-only orderings.
    Row { key: u64, primary: Option<Value> },
}

impl Boundary {
    pub fn from_anchor(anchor: &Anchor) -> Self {
        Boundary::Cursor { key: anchor.key }
    }

    pub fn from_row<E: Entity>(row: &E, spec: &SortSpec) -> Self {
        Boundary::Row {
            key: row.key(),
            primary: spec.attribute.map(|attribute| row.attribute(attribute)),
        }
    }

    pub fn key(&self) -> u64 {
        match self {
            Boundary::Cursor { key } | Boundary::Row { key, .. } => *key,
        }
    }

    fn primary(&self, attribute: &'static str) -> Operand {
        match self {
            Boundary::Cursor { key } => Operand::AnchorAttribute {
                attribute,
                key: *key,
            },
            Boundary::Row { primary, .. } => {
                Operand::Literal(primary.clone().unwrap_or(Value::Null))
            }
        }
    }
}

/// Builds range predicates for a [`SortSpec`].
pub struct RangeFilter;

impl RangeFilter {
    pub fn after(boundary: &Boundary, spec: &SortSpec) -> Predicate {
        Self::build(boundary, spec, RangeDirection::After)
    }

    pub fn before(boundary: &Boundary, spec: &SortSpec) -> Predicate {
        Self::build(boundary, spec, RangeDirection::Before)
    }

    pub fn build(boundary: &Boundary, spec: &SortSpec, direction: RangeDirection) -> Predicate {
        let op = match (direction, spec.direction) {
            (RangeDirection::After, OrderDirection::Asc)
            | (RangeDirection::Before, OrderDirection::Desc) => Comparator::Gt,
            (RangeDirection::After, OrderDirection::Desc)
            | (RangeDirection::Before, OrderDirection::Asc) => Comparator::Lt,
        };
        let key_term = Predicate::key(op, boundary.key());

        let Some(attribute) = spec.attribute else {
            return key_term;
        };

        let anchor_value = boundary.primary(attribute);
        let field = Field::Attribute(attribute);
        Predicate::Or(vec![
            Predicate::compare(field, op, anchor_value.clone()),
            Predicate::And(vec![
                Predicate::compare(field, Comparator::Eq, anchor_value),
                key_term,
            ]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(attribute: Option<&'static str>, direction: OrderDirection) -> SortSpec {
        SortSpec {
            attribute,
            direction,
        }
    }

    #[test]
    fn test_key_only_after_ascending() {
        let p = RangeFilter::after(&Boundary::Cursor { key: 4 }, &SortSpec::key_only());
        assert_eq!(p, Predicate::key(Comparator::Gt, 4));
    }

    #[test]
    fn test_key_only_before_ascending() {
        let p = RangeFilter::before(&Boundary::Cursor { key: 4 }, &SortSpec::key_only());
        assert_eq!(p, Predicate::key(Comparator::Lt, 4));
    }

    #[test]
    fn test_key_only_descending_flips() {
        let desc = spec(None, OrderDirection::Desc);
        assert_eq!(
            RangeFilter::after(&Boundary::Cursor { key: 4 }, &desc),
            Predicate::key(Comparator::Lt, 4)
        );
        assert_eq!(
            RangeFilter::before(&Boundary::Cursor { key: 4 }, &desc),
            Predicate::key(Comparator::Gt, 4)
        );
    }

    #[test]
    fn test_two_term_comparison_from_cursor() {
        let p = RangeFilter::after(
            &Boundary::Cursor { key: 2 },
            &spec(Some("timestamp"), OrderDirection::Asc),
        );
        let anchor = Operand::AnchorAttribute {
            attribute: "timestamp",
            key: 2,
        };
        assert_eq!(
            p,
            Predicate::Or(vec![
                Predicate::compare(Field::Attribute("timestamp"), Comparator::Gt, anchor.clone()),
                Predicate::And(vec![
                    Predicate::compare(Field::Attribute("timestamp"), Comparator::Eq, anchor),
                    Predicate::key(Comparator::Gt, 2),
                ]),
            ])
        );
    }

    #[test]
    fn test_descending_before_uses_greater_than() {
        let p = RangeFilter::before(
            &Boundary::Row {
                key: 9,
                primary: Some(Value::Int(2048)),
            },
            &spec(Some("keyLength"), OrderDirection::Desc),
        );
        let Predicate::Or(terms) = p else {
            panic!("expected disjunction");
        };
        assert_eq!(
            terms[0],
            Predicate::attribute("keyLength", Comparator::Gt, 2048_i64)
        );
        assert_eq!(
            terms[1],
            Predicate::And(vec![
                Predicate::attribute("keyLength", Comparator::Eq, 2048_i64),
                Predicate::key(Comparator::Gt, 9),
            ])
        );
    }
}
