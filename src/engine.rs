//! The pagination pipeline.
//!
//! `validate → resolve sort → decode anchors → build range filters →
//! fetch window → probe boundaries → assemble`
//!
//! The window fetch and the total count are independent reads and run
//! concurrently, as do the two boundary probes once the window is known.
//! Page existence is always answered by a `LIMIT 1` probe, never by fetching
//! an extra row.

use futures::{StreamExt, TryStreamExt};
use tracing::{debug, error, warn};

use crate::auth::Requester;
use crate::config::PaginationConfig;
use crate::cursor::{Anchor, CursorCodec};
use crate::entity::Entity;
use crate::error::{CursorArgument, PaginationError, PaginationResult, QueryStage};
use crate::pagination::{Connection, ConnectionArgs, PageDirection};
use crate::predicate::Predicate;
use crate::range::{Boundary, RangeDirection, RangeFilter};
use crate::sort::SortSpec;
use crate::store::{Store, WindowQuery};

/// Runs connection queries against one store.
///
/// Holds no state besides its configuration; one instance may serve any
/// number of concurrent calls.
pub struct Paginator<'a, S: ?Sized> {
    store: &'a S,
    config: PaginationConfig,
}

impl<'a, S: ?Sized> Paginator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, PaginationConfig::default())
    }

    pub fn with_config(store: &'a S, config: PaginationConfig) -> Self {
        Self { store, config }
    }

    /// Resolve one page of `E` rows matching `base`.
    ///
    /// `base` carries ownership scoping, visibility and search; it is ANDed
    /// into every query, including the boundary probes and the total count.
    pub async fn paginate<E>(
        &self,
        requester: &Requester,
        base: Predicate,
        args: ConnectionArgs<E::Order>,
    ) -> PaginationResult<Connection<E>>
    where
        E: Entity,
        S: Store<E>,
    {
        let page = match args.validate(self.config.max_page_size) {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    requester = %requester,
                    connection = E::NAME,
                    first = ?args.first,
                    last = ?args.last,
                    error = %err,
                    "invalid pagination arguments"
                );
                return Err(err.into());
            }
        };

        let spec = SortSpec::resolve(args.order_by);
        let after = decode_cursor::<E>(requester, CursorArgument::After, args.after.as_deref())?;
        let before =
            decode_cursor::<E>(requester, CursorArgument::Before, args.before.as_deref())?;

        let mut predicate = base.clone();
        if let Some(anchor) = &after {
            predicate = predicate.and(RangeFilter::after(&Boundary::from_anchor(anchor), &spec));
        }
        if let Some(anchor) = &before {
            predicate = predicate.and(RangeFilter::before(&Boundary::from_anchor(anchor), &spec));
        }

        let window_order = match page.direction {
            PageDirection::Forward => spec,
            PageDirection::Backward => spec.reversed(),
        };
        let query = WindowQuery {
            predicate,
            sort: window_order.terms(),
            limit: page.limit,
        };

        debug!(
            requester = %requester,
            connection = E::NAME,
            direction = ?page.direction,
            limit = page.limit,
            "fetching connection window"
        );

        let (mut rows, total_count) =
            tokio::try_join!(self.fetch_window::<E>(&query), self.count::<E>(&base))
                .map_err(|err| report(requester, E::NAME, err))?;

        if page.direction == PageDirection::Backward {
            rows.reverse();
        }

        let (has_next, has_previous) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => tokio::try_join!(
                self.probe::<E>(&base, &spec, Boundary::from_row(last, &spec), RangeDirection::After),
                self.probe::<E>(&base, &spec, Boundary::from_row(first, &spec), RangeDirection::Before),
            )
            .map_err(|err| report(requester, E::NAME, err))?,
            _ => (false, false),
        };

        Ok(Connection::from_rows(rows, has_next, has_previous, total_count))
    }

    async fn fetch_window<E>(&self, query: &WindowQuery) -> PaginationResult<Vec<E>>
    where
        E: Entity,
        S: Store<E>,
    {
        let rows = self
            .store
            .fetch(query)
            .await
            .map_err(|source| PaginationError::store(QueryStage::Window, source))?;

        rows.take(query.limit as usize)
            .try_collect()
            .await
            .map_err(|source| PaginationError::StoreCursorRead {
                stage: QueryStage::Window,
                source,
            })
    }

    async fn count<E>(&self, base: &Predicate) -> PaginationResult<u64>
    where
        E: Entity,
        S: Store<E>,
    {
        self.store
            .count(base)
            .await
            .map_err(|source| PaginationError::store(QueryStage::TotalCount, source))
    }

    async fn probe<E>(
        &self,
        base: &Predicate,
        spec: &SortSpec,
        boundary: Boundary,
        direction: RangeDirection,
    ) -> PaginationResult<bool>
    where
        E: Entity,
        S: Store<E>,
    {
        let stage = match direction {
            RangeDirection::After => QueryStage::NextPageProbe,
            RangeDirection::Before => QueryStage::PreviousPageProbe,
        };
        let predicate = base
            .clone()
            .and(RangeFilter::build(&boundary, spec, direction));

        self.store
            .exists(&predicate)
            .await
            .map_err(|source| PaginationError::store(stage, source))
    }
}

/// Decode an optional cursor argument. An empty token counts as absent, so
/// the `endCursor` of an empty page can be passed back unchanged.
fn decode_cursor<E: Entity>(
    requester: &Requester,
    argument: CursorArgument,
    token: Option<&str>,
) -> PaginationResult<Option<Anchor>> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    CursorCodec::decode_for(token, E::KIND)
        .map(Some)
        .map_err(|source| {
            warn!(
                requester = %requester,
                connection = E::NAME,
                argument = %argument,
                token,
                error = %source,
                "malformed pagination cursor"
            );
            PaginationError::CursorDecode { argument, source }
        })
}

fn report(requester: &Requester, connection: &'static str, err: PaginationError) -> PaginationError {
    match &err {
        PaginationError::StoreQuery { stage, source } => error!(
            requester = %requester,
            connection,
            stage = %stage,
            error = %source,
            "store query failed"
        ),
        PaginationError::StoreCursorRead { stage, source } => error!(
            requester = %requester,
            connection,
            stage = %stage,
            error = %source,
            "reading store results failed"
        ),
        PaginationError::Argument(_) | PaginationError::CursorDecode { .. } => {}
    }
    err
}
