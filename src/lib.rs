//! # compliance-connections
//!
//! Relay cursor pagination for the domain compliance GraphQL API.
//!
//! ## Features
//!
//! - **Connections** - `Connection`/`Edge`/`PageInfo` generic over any node kind
//! - **Keyset Windows** - opaque cursors, stable ordering with a tie-break key
//! - **Boundary Probes** - `hasNextPage`/`hasPreviousPage` from `LIMIT 1` reads
//! - **Store Port** - async trait over the backing store, plus an in-memory adapter
//! - **Localized Errors** - English and French messages with stable codes
//! - **DataLoader** - batched point lookup by key or global ID
//!
//! ## Usage
//!
//! ```rust,no_run
//! use compliance_connections::{ConnectionArgs, MemoryStore, Paginator, Predicate, Requester};
//! use compliance_connections::kinds::Domain;
//!
//! # async fn run() -> Result<(), compliance_connections::PaginationError> {
//! let store = MemoryStore::<Domain>::new();
//! let page = Paginator::new(&store)
//!     .paginate::<Domain>(&Requester::Anonymous, Domain::owned_by(7), ConnectionArgs::first(20))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod cursor;
pub mod dataloaders;
pub mod engine;
pub mod entity;
pub mod error;
pub mod i18n;
pub mod kinds;
pub mod memory;
pub mod pagination;
pub mod predicate;
pub mod range;
pub mod resolver;
pub mod sort;
pub mod store;
pub mod types;
pub mod value;

pub use auth::{extract_locale, extract_requester, graphql_handler, Requester};
pub use config::PaginationConfig;
pub use cursor::{from_global_id, to_global_id, Anchor, CursorCodec};
pub use dataloaders::{load_by_global_id, EntityLoader, LookupError};
pub use engine::Paginator;
pub use entity::Entity;
pub use error::{
    CursorDecodeError, ErrorKind, PaginationArgumentError, PaginationError, PaginationResult,
    QueryStage, StoreError, StoreResult,
};
pub use i18n::{Locale, Localizer};
pub use memory::MemoryStore;
pub use pagination::{Connection, ConnectionArgs, Edge, PageInfo, MAX_PAGE_SIZE};
pub use predicate::Predicate;
pub use resolver::resolve_connection;
pub use sort::{OrderBy, OrderDirection, OrderField};
pub use store::{RowStream, Store, WindowQuery};
pub use types::DateTime;
pub use value::Value;
