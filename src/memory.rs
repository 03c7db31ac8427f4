//! In-memory store adapter.
//!
//! Evaluates predicates and sort terms directly against the rows it holds.
//! Used by the test suites and by embedders that page over data already in
//! memory.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::RwLock;

use crate::entity::Entity;
use crate::error::StoreResult;
use crate::predicate::{Comparator, Field, Operand, Predicate};
use crate::sort::{OrderDirection, SortTerm};
use crate::store::{RowStream, Store, WindowQuery};
use crate::value::Value;

/// Rows of one entity kind, keyed by tie-break key.
pub struct MemoryStore<E: Entity> {
    rows: RwLock<BTreeMap<u64, E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_rows(rows: impl IntoIterator<Item = E>) -> Self {
        Self {
            rows: RwLock::new(rows.into_iter().map(|row| (row.key(), row)).collect()),
        }
    }

    /// Insert or replace a row
    pub async fn insert(&self, row: E) {
        self.rows.write().await.insert(row.key(), row);
    }

    pub async fn remove(&self, key: u64) -> Option<E> {
        self.rows.write().await.remove(&key)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Store<E> for MemoryStore<E> {
    async fn fetch(&self, query: &WindowQuery) -> StoreResult<RowStream<E>> {
        let rows = self.rows.read().await;
        let mut matched: Vec<&E> = rows
            .values()
            .filter(|row| matches(&query.predicate, *row, &rows))
            .collect();
        matched.sort_by(|a, b| compare_rows(*a, *b, &query.sort));

        let window: Vec<StoreResult<E>> = matched
            .into_iter()
            .take(query.limit as usize)
            .cloned()
            .map(Ok)
            .collect();
        Ok(Box::pin(stream::iter(window)))
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| matches(predicate, *row, &rows))
            .count() as u64)
    }

    async fn exists(&self, predicate: &Predicate) -> StoreResult<bool> {
        let rows = self.rows.read().await;
        Ok(rows.values().any(|row| matches(predicate, row, &rows)))
    }
}

fn field_value<E: Entity>(row: &E, field: Field) -> Value {
    match field {
        Field::Key => key_value(row.key()),
        Field::Attribute(name) => row.attribute(name),
    }
}

fn key_value(key: u64) -> Value {
    Value::from(key)
}

fn operand_value<E: Entity>(operand: &Operand, rows: &BTreeMap<u64, E>) -> Value {
    match operand {
        Operand::Literal(value) => value.clone(),
        Operand::Key(key) => key_value(*key),
        Operand::AnchorAttribute { attribute, key } => rows
            .get(key)
            .map_or(Value::Null, |anchor| anchor.attribute(attribute)),
    }
}

fn matches<E: Entity>(predicate: &Predicate, row: &E, rows: &BTreeMap<u64, E>) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::Compare { field, op, operand } => {
            let ordering = match (field, operand) {
                (Field::Key, Operand::Key(key)) => row.key().cmp(key),
                _ => field_value(row, *field).total_cmp(&operand_value(operand, rows)),
            };
            match op {
                Comparator::Eq => ordering == Ordering::Equal,
                Comparator::Ne => ordering != Ordering::Equal,
                Comparator::Lt => ordering == Ordering::Less,
                Comparator::Le => ordering != Ordering::Greater,
                Comparator::Gt => ordering == Ordering::Greater,
                Comparator::Ge => ordering != Ordering::Less,
            }
        }
        Predicate::Contains { attribute, needle } => row
            .attribute(attribute)
            .as_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
        Predicate::KeyIn(keys) => keys.contains(&row.key()),
        Predicate::And(terms) => terms.iter().all(|p| matches(p, row, rows)),
        Predicate::Or(terms) => terms.iter().any(|p| matches(p, row, rows)),
        Predicate::Not(inner) => !matches(inner, row, rows),
    }
}

fn compare_rows<E: Entity>(a: &E, b: &E, terms: &[SortTerm]) -> Ordering {
    for term in terms {
        let ordering = match term.field {
            Field::Key => a.key().cmp(&b.key()),
            field => field_value(a, field).total_cmp(&field_value(b, field)),
        };
        let ordering = match term.direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{DkimScan, Organization};
    use crate::sort::SortSpec;
    use chrono::{TimeZone, Utc};
    use futures::TryStreamExt;

    fn org(key: u64, name: &str, domain_count: u32) -> Organization {
        Organization::new(key, name, &name[..2], domain_count)
    }

    fn store() -> MemoryStore<Organization> {
        MemoryStore::with_rows(vec![
            org(1, "Treasury Board", 12),
            org(2, "Health Canada", 40),
            org(3, "Transport Canada", 12),
        ])
    }

    async fn keys(store: &MemoryStore<Organization>, query: WindowQuery) -> Vec<u64> {
        let rows: Vec<Organization> = store.fetch(&query).await.unwrap().try_collect().await.unwrap();
        rows.iter().map(|o| o.key()).collect()
    }

    #[tokio::test]
    async fn test_fetch_sorts_and_limits() {
        let store = store();
        let query = WindowQuery {
            predicate: Predicate::True,
            sort: vec![
                SortTerm {
                    field: Field::Attribute("domainCount"),
                    direction: OrderDirection::Desc,
                },
                SortTerm {
                    field: Field::Key,
                    direction: OrderDirection::Desc,
                },
            ],
            limit: 2,
        };
        assert_eq!(keys(&store, query).await, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_anchor_attribute_resolves_against_stored_row() {
        let store = store();
        let predicate = Predicate::compare(
            Field::Attribute("domainCount"),
            Comparator::Eq,
            Operand::AnchorAttribute {
                attribute: "domainCount",
                key: 1,
            },
        );
        assert_eq!(store.count(&predicate).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_anchor_compares_as_null() {
        let store = store();
        let predicate = Predicate::compare(
            Field::Attribute("domainCount"),
            Comparator::Gt,
            Operand::AnchorAttribute {
                attribute: "domainCount",
                key: 99,
            },
        );
        assert_eq!(store.count(&predicate).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let store = store();
        let predicate = Predicate::search(&["name"], "CANADA");
        assert_eq!(store.count(&predicate).await.unwrap(), 2);
        assert!(!store
            .exists(&Predicate::search(&["name"], "parliament"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_negation() {
        let store = store();
        let predicate = Predicate::eq("domainCount", 12_u32).negate();
        let query = WindowQuery {
            predicate,
            sort: SortSpec::key_only().terms(),
            limit: 10,
        };
        assert_eq!(keys(&store, query).await, vec![2]);
        assert_eq!(
            store
                .count(&Predicate::search(&["name"], "canada").negate())
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_inclusive_time_range() {
        let day = |d: u32| Utc.with_ymd_and_hms(2024, 2, d, 0, 0, 0).unwrap();
        let store = MemoryStore::with_rows(
            (1..=5).map(|k| DkimScan::new(k, 1, day(k as u32), "selector1", "v=DKIM1", 2048)),
        );

        let predicate = DkimScan::between(day(2), day(4));
        assert_eq!(store.count(&predicate).await.unwrap(), 3);
        assert!(store.exists(&DkimScan::between(day(5), day(9))).await.unwrap());
        assert!(!store
            .exists(&DkimScan::between(day(6), day(9)))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_insert_and_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        store.insert(org(5, "Elections Canada", 3)).await;
        assert_eq!(store.len().await, 1);
        assert!(store.remove(5).await.is_some());
        assert!(store.is_empty().await);
    }
}
