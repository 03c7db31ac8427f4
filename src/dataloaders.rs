//! DataLoader utilities for batch loading entities by key
//!
//! Node fields that point at another entity (a scan's domain, a domain's
//! organization) resolve through an [`EntityLoader`] so that one GraphQL
//! request issues a single key-set query per kind instead of one per row.
//! See: https://github.com/graphql/dataloader

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use futures::TryStreamExt;
use thiserror::Error;
use tracing::debug;

use crate::cursor::CursorCodec;
use crate::entity::Entity;
use crate::error::{CursorDecodeError, StoreError};
use crate::predicate::Predicate;
use crate::sort::SortSpec;
use crate::store::{Store, WindowQuery};

/// Batch loader for entities of kind `E` held in `S`
pub struct EntityLoader<S: ?Sized, E> {
    store: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<S: ?Sized, E> EntityLoader<S, E> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }
}

impl<S, E> Loader<u64> for EntityLoader<S, E>
where
    S: Store<E> + ?Sized + 'static,
    E: Entity,
{
    type Value = E;
    type Error = StoreError;

    async fn load(&self, keys: &[u64]) -> Result<HashMap<u64, E>, StoreError> {
        debug!(kind = E::KIND, keys = keys.len(), "batch loading entities");

        let query = WindowQuery {
            predicate: Predicate::KeyIn(keys.to_vec()),
            sort: SortSpec::key_only().terms(),
            limit: u32::try_from(keys.len()).unwrap_or(u32::MAX),
        };

        self.store
            .fetch(&query)
            .await?
            .map_ok(|row| (row.key(), row))
            .try_collect()
            .await
    }
}

/// Failure to resolve a node from its global ID
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("invalid global id: {0}")]
    InvalidId(#[from] CursorDecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Load one node by Relay global ID
///
/// IDs of another kind fail with [`CursorDecodeError::KindMismatch`]; a
/// well-formed ID whose row is gone yields `None`.
pub async fn load_by_global_id<S, E>(
    loader: &DataLoader<EntityLoader<S, E>>,
    id: &str,
) -> Result<Option<E>, LookupError>
where
    S: Store<E> + ?Sized + 'static,
    E: Entity,
{
    let anchor = CursorCodec::decode_for(id, E::KIND)?;
    Ok(loader.load_one(anchor.key).await?)
}
