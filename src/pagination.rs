//! Relay-style connection types and pagination arguments

use std::borrow::Cow;

use async_graphql::{Object, OutputType, SimpleObject, TypeName};
use serde::Deserialize;
use serde_json::Number;

use crate::entity::Entity;
use crate::error::{BoundArgument, PaginationArgumentError};
use crate::sort::OrderBy;

/// Largest `first`/`last` accepted unless configured otherwise.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page information
///
/// Both cursors are empty strings when the page has no edges.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: String,
    pub end_cursor: String,
}

/// Edge in a connection
#[derive(Debug, Clone)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[Object(name_type)]
impl<T: OutputType> Edge<T> {
    async fn cursor(&self) -> &str {
        &self.cursor
    }

    async fn node(&self) -> &T {
        &self.node
    }
}

impl<T: OutputType> TypeName for Edge<T> {
    fn type_name() -> Cow<'static, str> {
        format!("{}Edge", <T as OutputType>::type_name()).into()
    }
}

/// Connection (paginated result)
#[derive(Debug, Clone)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    /// Size of the addressable set (base predicate), not of this page.
    pub total_count: u64,
    pub page_info: PageInfo,
}

#[Object(name_type)]
impl<T: OutputType> Connection<T> {
    async fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    async fn total_count(&self) -> u64 {
        self.total_count
    }

    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }
}

impl<T: OutputType> TypeName for Connection<T> {
    fn type_name() -> Cow<'static, str> {
        format!("{}Connection", <T as OutputType>::type_name()).into()
    }
}

impl<E: Entity> Connection<E> {
    /// Build a connection from rows already in canonical order
    pub fn from_rows(rows: Vec<E>, has_next: bool, has_previous: bool, total_count: u64) -> Self {
        if rows.is_empty() {
            return Self::empty(total_count);
        }

        let edges: Vec<Edge<E>> = rows
            .into_iter()
            .map(|node| Edge {
                cursor: node.cursor(),
                node,
            })
            .collect();

        let start_cursor = edges.first().map(|e| e.cursor.clone()).unwrap_or_default();
        let end_cursor = edges.last().map(|e| e.cursor.clone()).unwrap_or_default();

        Self {
            edges,
            total_count,
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_previous,
                start_cursor,
                end_cursor,
            },
        }
    }
}

impl<T> Connection<T> {
    /// Create empty connection
    pub fn empty(total_count: u64) -> Self {
        Self {
            edges: Vec::new(),
            total_count,
            page_info: PageInfo::default(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }
}

/// Which end of the ordering a page is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// `first` was supplied
    Forward,
    /// `last` was supplied
    Backward,
}

/// Validated page bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub direction: PageDirection,
    pub limit: u32,
}

/// Pagination arguments for one connection field
///
/// Follows the Relay Cursor Connections Specification:
/// https://relay.dev/graphql/connections.htm
///
/// `first`/`last` are kept as raw JSON numbers so that loosely typed callers
/// get a precise error for fractional values instead of a silent truncation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionArgs<F> {
    /// Cursor to start after
    pub after: Option<String>,

    /// Cursor to end before
    pub before: Option<String>,

    /// Number of items to return from the start of the range
    pub first: Option<Number>,

    /// Number of items to return from the end of the range
    pub last: Option<Number>,

    pub order_by: Option<OrderBy<F>>,
}

impl<F> Default for ConnectionArgs<F> {
    fn default() -> Self {
        Self {
            after: None,
            before: None,
            first: None,
            last: None,
            order_by: None,
        }
    }
}

impl<F> ConnectionArgs<F> {
    /// Arguments as received from a typed GraphQL field
    pub fn from_input(
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        order_by: Option<OrderBy<F>>,
    ) -> Self {
        Self {
            after,
            before,
            first: first.map(Number::from),
            last: last.map(Number::from),
            order_by,
        }
    }

    pub fn first(n: i64) -> Self {
        Self {
            first: Some(Number::from(n)),
            ..Self::default()
        }
    }

    pub fn last(n: i64) -> Self {
        Self {
            last: Some(Number::from(n)),
            ..Self::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    pub fn order_by(mut self, order_by: OrderBy<F>) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Validate `first`/`last` against `max`
    pub fn validate(&self, max: u32) -> Result<PageRequest, PaginationArgumentError> {
        match (&self.first, &self.last) {
            (None, None) => Err(PaginationArgumentError::MissingBound),
            (Some(_), Some(_)) => Err(PaginationArgumentError::BothBoundsSet),
            (Some(first), None) => Ok(PageRequest {
                direction: PageDirection::Forward,
                limit: parse_bound(BoundArgument::First, first, max)?,
            }),
            (None, Some(last)) => Ok(PageRequest {
                direction: PageDirection::Backward,
                limit: parse_bound(BoundArgument::Last, last, max)?,
            }),
        }
    }
}

fn parse_bound(
    argument: BoundArgument,
    value: &Number,
    max: u32,
) -> Result<u32, PaginationArgumentError> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n)
            .ok()
            .filter(|n| *n <= max)
            .ok_or(PaginationArgumentError::BoundExceedsMax {
                argument,
                value: n,
                max,
            });
    }
    if let Some(n) = value.as_i64() {
        return Err(PaginationArgumentError::NegativeBound { argument, value: n });
    }
    Err(PaginationArgumentError::NonIntegerBound {
        argument,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{User, UserOrderField};
    use crate::sort::OrderDirection;
    use proptest::prelude::*;

    type Args = ConnectionArgs<UserOrderField>;

    fn user(key: u64) -> User {
        User::new(key, &format!("user{key}@canada.ca"), &format!("User {key}"), true, 1)
    }

    #[test]
    fn test_connection_creation() {
        let conn = Connection::from_rows(vec![user(1), user(2)], true, false, 10);
        assert_eq!(conn.edges.len(), 2);
        assert_eq!(conn.total_count, 10);
        assert!(conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.start_cursor, user(1).cursor());
        assert_eq!(conn.page_info.end_cursor, user(2).cursor());
    }

    #[test]
    fn test_empty_connection_shape() {
        let conn = Connection::<User>::from_rows(Vec::new(), true, true, 4);
        assert!(conn.edges.is_empty());
        assert_eq!(conn.total_count, 4);
        assert_eq!(conn.page_info, PageInfo::default());
        assert_eq!(conn.page_info.start_cursor, "");
    }

    #[test]
    fn test_missing_bound() {
        assert_eq!(
            Args::default().validate(MAX_PAGE_SIZE),
            Err(PaginationArgumentError::MissingBound)
        );
    }

    #[test]
    fn test_both_bounds_set() {
        let args = Args {
            last: Some(Number::from(2)),
            ..Args::first(2)
        };
        assert_eq!(
            args.validate(MAX_PAGE_SIZE),
            Err(PaginationArgumentError::BothBoundsSet)
        );
    }

    #[test]
    fn test_negative_bound() {
        assert_eq!(
            Args::first(-1).validate(MAX_PAGE_SIZE),
            Err(PaginationArgumentError::NegativeBound {
                argument: BoundArgument::First,
                value: -1,
            })
        );
    }

    #[test]
    fn test_bound_exceeds_max() {
        assert_eq!(
            Args::first(101).validate(MAX_PAGE_SIZE),
            Err(PaginationArgumentError::BoundExceedsMax {
                argument: BoundArgument::First,
                value: 101,
                max: 100,
            })
        );
        assert!(Args::last(100).validate(MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn test_non_integer_bound() {
        let args: Args = serde_json::from_str(r#"{"last": 2.5}"#).unwrap();
        assert_eq!(
            args.validate(MAX_PAGE_SIZE),
            Err(PaginationArgumentError::NonIntegerBound {
                argument: BoundArgument::Last,
                value: "2.5".to_string(),
            })
        );
    }

    #[test]
    fn test_direction_follows_bound() {
        assert_eq!(
            Args::first(5).validate(MAX_PAGE_SIZE),
            Ok(PageRequest {
                direction: PageDirection::Forward,
                limit: 5
            })
        );
        assert_eq!(
            Args::last(0).validate(MAX_PAGE_SIZE),
            Ok(PageRequest {
                direction: PageDirection::Backward,
                limit: 0
            })
        );
    }

    #[test]
    fn test_args_deserialize_from_variables() {
        let args: Args = serde_json::from_str(
            r#"{"first": 10, "after": "abc", "orderBy": {"field": "userName", "direction": "DESC"}}"#,
        )
        .unwrap();
        assert_eq!(args.after.as_deref(), Some("abc"));
        assert_eq!(
            args.order_by,
            Some(OrderBy::new(UserOrderField::UserName, OrderDirection::Desc))
        );
        assert_eq!(args.validate(MAX_PAGE_SIZE).unwrap().limit, 10);
    }

    proptest! {
        #[test]
        fn in_range_bounds_are_accepted(n in 0i64..=100) {
            prop_assert_eq!(Args::first(n).validate(MAX_PAGE_SIZE).unwrap().limit as i64, n);
            prop_assert_eq!(Args::last(n).validate(MAX_PAGE_SIZE).unwrap().limit as i64, n);
        }

        #[test]
        fn out_of_range_bounds_are_rejected(n in 101i64..10_000) {
            let rejected = matches!(
                Args::first(n).validate(MAX_PAGE_SIZE),
                Err(PaginationArgumentError::BoundExceedsMax { .. })
            );
            prop_assert!(rejected);
        }
    }
}
