//! Port trait for the backing store.
//!
//! The engine only reads. Adapters render [`Predicate`] and [`SortTerm`]
//! into their native query language; [`crate::memory::MemoryStore`] evaluates
//! them directly.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use crate::entity::Entity;
use crate::error::StoreResult;
use crate::predicate::Predicate;
use crate::sort::SortTerm;

/// Rows of a fetch, in query order. Items fail with [`crate::StoreError::Read`]
/// when the result stream breaks after the query itself succeeded.
pub type RowStream<E> = Pin<Box<dyn Stream<Item = StoreResult<E>> + Send>>;

/// A bounded, ordered read.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowQuery {
    pub predicate: Predicate,
    pub sort: Vec<SortTerm>,
    pub limit: u32,
}

/// Queryable collection of entities of kind `E`.
#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    /// Rows matching `query.predicate`, ordered by `query.sort`, at most
    /// `query.limit` of them.
    async fn fetch(&self, query: &WindowQuery) -> StoreResult<RowStream<E>>;

    /// Number of rows matching `predicate`.
    async fn count(&self, predicate: &Predicate) -> StoreResult<u64>;

    /// Whether any row matches `predicate`.
    ///
    /// Defaults to a `LIMIT 1` fetch; adapters with a native existence check
    /// should override it.
    async fn exists(&self, predicate: &Predicate) -> StoreResult<bool> {
        let query = WindowQuery {
            predicate: predicate.clone(),
            sort: Vec::new(),
            limit: 1,
        };
        let mut rows = self.fetch(&query).await?;
        match rows.next().await {
            Some(row) => row.map(|_| true),
            None => Ok(false),
        }
    }
}
