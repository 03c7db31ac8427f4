//! Glue between GraphQL connection fields and the [`Paginator`].

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions};

use crate::auth::{get_locale, get_requester};
use crate::config::PaginationConfig;
use crate::engine::Paginator;
use crate::entity::Entity;
use crate::error::ErrorKind;
use crate::i18n::Localizer;
use crate::pagination::{Connection, ConnectionArgs};
use crate::predicate::Predicate;
use crate::store::Store;

/// Resolve a connection field.
///
/// `base` scopes the rows (ownership, visibility); a `search` term is matched
/// against the entity's searchable attributes and ANDed in. Failures come back
/// as a localized message with a `code` extension. Internal detail stays in
/// the logs.
pub async fn resolve_connection<E, S>(
    ctx: &Context<'_>,
    store: &S,
    base: Predicate,
    search: Option<&str>,
    args: ConnectionArgs<E::Order>,
) -> async_graphql::Result<Connection<E>>
where
    E: Entity,
    S: Store<E> + ?Sized,
{
    let requester = get_requester(ctx);
    let config = ctx
        .data_opt::<PaginationConfig>()
        .copied()
        .unwrap_or_default();

    let predicate = match search {
        Some(term) => base.and(Predicate::search(E::SEARCH_ATTRIBUTES, term)),
        None => base,
    };

    Paginator::with_config(store, config)
        .paginate(&requester, predicate, args)
        .await
        .map_err(|err| to_graphql_error(ctx, &config, &err.kind(E::NAME)))
}

fn to_graphql_error(
    ctx: &Context<'_>,
    config: &PaginationConfig,
    kind: &ErrorKind,
) -> async_graphql::Error {
    let message = match ctx.data_opt::<Arc<dyn Localizer>>() {
        Some(localizer) => localizer.localize(kind),
        None => get_locale(ctx)
            .unwrap_or(config.default_locale)
            .localize(kind),
    };
    let code = kind.code();
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{EmptyMutation, EmptySubscription, Object, Request, Schema, Value};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::i18n::Locale;
    use crate::kinds::{DkimScan, DkimScanOrder};
    use crate::memory::MemoryStore;

    struct Query;

    #[Object]
    impl Query {
        #[allow(clippy::too_many_arguments)]
        async fn dkim_scans(
            &self,
            ctx: &Context<'_>,
            domain: Option<u64>,
            after: Option<String>,
            before: Option<String>,
            first: Option<i32>,
            last: Option<i32>,
            order_by: Option<DkimScanOrder>,
            search: Option<String>,
        ) -> async_graphql::Result<Connection<DkimScan>> {
            let store = ctx.data::<Arc<MemoryStore<DkimScan>>>()?;
            let base = domain.map_or(Predicate::True, DkimScan::of_domain);
            let args =
                ConnectionArgs::from_input(after, before, first, last, order_by.map(Into::into));
            resolve_connection(ctx, store.as_ref(), base, search.as_deref(), args).await
        }
    }

    type TestSchema = Schema<Query, EmptyMutation, EmptySubscription>;

    fn schema() -> TestSchema {
        let store = Arc::new(MemoryStore::with_rows((1..=4).map(|k| {
            DkimScan::new(
                k,
                if k == 4 { 2 } else { 1 },
                Utc.with_ymd_and_hms(2024, 5, k as u32, 9, 0, 0).unwrap(),
                &format!("selector{k}"),
                "v=DKIM1; k=rsa; p=MIIB",
                1024 * k as u32,
            )
        })));
        Schema::build(Query, EmptyMutation, EmptySubscription)
            .data(store)
            .finish()
    }

    const PAGE: &str = r#"
        totalCount
        edges { cursor node { id selector keyLength } }
        pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    "#;

    fn error_code(res: &async_graphql::Response) -> Option<Value> {
        res.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code").cloned())
    }

    #[tokio::test]
    async fn test_connection_shape() {
        let query = format!(
            "{{ dkimScans(first: 2, orderBy: {{ field: KEY_LENGTH, direction: DESC }}) {{ {PAGE} }} }}"
        );
        let res = schema().execute(query).await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);

        let data = res.data.into_json().unwrap();
        let conn = &data["dkimScans"];
        assert_eq!(conn["totalCount"], json!(4));
        assert_eq!(conn["edges"][0]["node"]["selector"], json!("selector4"));
        assert_eq!(conn["edges"][1]["node"]["keyLength"], json!(3072));
        assert_eq!(conn["edges"][0]["cursor"], conn["edges"][0]["node"]["id"]);
        assert_eq!(conn["pageInfo"]["hasNextPage"], json!(true));
        assert_eq!(conn["pageInfo"]["hasPreviousPage"], json!(false));
        assert_eq!(conn["pageInfo"]["endCursor"], conn["edges"][1]["cursor"]);
    }

    #[tokio::test]
    async fn test_base_predicate_and_search() {
        let res = schema()
            .execute(format!("{{ dkimScans(domain: 1, last: 10) {{ {PAGE} }} }}"))
            .await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["dkimScans"]["totalCount"], json!(3));

        let res = schema()
            .execute(format!(
                r#"{{ dkimScans(first: 10, search: "SELECTOR2") {{ {PAGE} }} }}"#
            ))
            .await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["dkimScans"]["totalCount"], json!(1));
        assert_eq!(
            data["dkimScans"]["edges"][0]["node"]["selector"],
            json!("selector2")
        );
    }

    #[tokio::test]
    async fn test_argument_error_is_localized() {
        let res = schema()
            .execute("{ dkimScans(first: 500) { totalCount } }")
            .await;
        assert_eq!(
            res.errors[0].message,
            "Requesting `500` records on the `DkimScan` connection exceeds the `first` limit of 100 records."
        );
        assert_eq!(error_code(&res), Some(Value::from("BOUND_EXCEEDS_MAX")));

        let res = schema()
            .execute(Request::new("{ dkimScans { totalCount } }").data(Locale::Fr))
            .await;
        assert_eq!(
            res.errors[0].message,
            "Vous devez fournir une valeur `first` ou `last` pour paginer correctement la connexion `DkimScan`."
        );
        assert_eq!(error_code(&res), Some(Value::from("MISSING_BOUND")));
    }

    #[tokio::test]
    async fn test_bad_cursor_hides_detail() {
        let res = schema()
            .execute(r#"{ dkimScans(first: 2, after: "not a cursor") { totalCount } }"#)
            .await;
        assert_eq!(
            res.errors[0].message,
            "Unable to paginate the `DkimScan` connection. Please check your cursor."
        );
        assert_eq!(error_code(&res), Some(Value::from("UNABLE_TO_PAGINATE")));
    }

    #[tokio::test]
    async fn test_configured_defaults() {
        let store = Arc::new(MemoryStore::<DkimScan>::new());
        let schema = Schema::build(Query, EmptyMutation, EmptySubscription)
            .data(store)
            .data(PaginationConfig {
                max_page_size: 10,
                default_locale: Locale::Fr,
            })
            .finish();

        let res = schema.execute("{ dkimScans(last: -3) { totalCount } }").await;
        assert_eq!(
            res.errors[0].message,
            "`last` sur la connexion `DkimScan` ne peut être inférieur à zéro."
        );

        let res = schema.execute("{ dkimScans(first: 11) { totalCount } }").await;
        assert_eq!(error_code(&res), Some(Value::from("BOUND_EXCEEDS_MAX")));
    }

    struct Terse;

    impl Localizer for Terse {
        fn localize(&self, kind: &ErrorKind) -> String {
            kind.code().to_lowercase()
        }
    }

    #[tokio::test]
    async fn test_custom_localizer() {
        let localizer: Arc<dyn Localizer> = Arc::new(Terse);
        let res = schema()
            .execute(Request::new("{ dkimScans(first: 1, last: 1) { totalCount } }").data(localizer))
            .await;
        assert_eq!(res.errors[0].message, "both_bounds_set");
    }
}
