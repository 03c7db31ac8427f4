//! Ordering of paginated entities.
//!
//! Each entity kind exposes a public ordering enum implementing
//! [`OrderField`]. The enum's `attribute` match is the kind's sort table:
//! adding a sortable field means adding a variant and its attribute, nothing
//! else in the engine changes.

use std::fmt;

use serde::Deserialize;

use crate::predicate::Field;

/// Ordering direction.
#[derive(async_graphql::Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn reverse(self) -> Self {
        match self {
            OrderDirection::Asc => OrderDirection::Desc,
            OrderDirection::Desc => OrderDirection::Asc,
        }
    }
}

/// Public ordering field of one entity kind.
pub trait OrderField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Store attribute this field sorts on.
    fn attribute(self) -> &'static str;
}

/// Requested ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderBy<F> {
    pub field: F,
    #[serde(default)]
    pub direction: OrderDirection,
}

impl<F> OrderBy<F> {
    pub fn new(field: F, direction: OrderDirection) -> Self {
        Self { field, direction }
    }
}

/// One term of an ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortTerm {
    pub field: Field,
    pub direction: OrderDirection,
}

/// Active ordering of a request: an optional primary attribute followed by
/// the tie-break key, both in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub attribute: Option<&'static str>,
    pub direction: OrderDirection,
}

impl SortSpec {
    /// Ascending by tie-break key only.
    pub fn key_only() -> Self {
        Self {
            attribute: None,
            direction: OrderDirection::Asc,
        }
    }

    pub fn resolve<F: OrderField>(order_by: Option<OrderBy<F>>) -> Self {
        match order_by {
            Some(order_by) => Self {
                attribute: Some(order_by.field.attribute()),
                direction: order_by.direction,
            },
            None => Self::key_only(),
        }
    }

    /// Same terms, every direction flipped.
    pub fn reversed(self) -> Self {
        Self {
            direction: self.direction.reverse(),
            ..self
        }
    }

    pub fn terms(&self) -> Vec<SortTerm> {
        let mut terms = Vec::with_capacity(2);
        if let Some(attribute) = self.attribute {
            terms.push(SortTerm {
                field: Field::Attribute(attribute),
                direction: self.direction,
            });
        }
        terms.push(SortTerm {
            field: Field::Key,
            direction: self.direction,
        });
        terms
    }
}
