//! Requester identity and locale for GraphQL requests
//!
//! Authentication happens upstream. This module only picks up what the
//! gateway forwarded:
//! - `x-user-id` becomes the [`Requester`] named in diagnostics
//! - `Accept-Language` selects the [`Locale`] of error messages

use std::fmt;

use async_graphql::{Context, Request, Response, Schema};
use axum::{extract::Extension, http::HeaderMap, Json};
use uuid::Uuid;

use crate::i18n::Locale;

/// Who issued a request. Only used for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Requester {
    #[default]
    Anonymous,
    User(Uuid),
}

impl fmt::Display for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requester::Anonymous => f.write_str("anonymous"),
            Requester::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// Extract the requester from the x-user-id header
pub fn extract_requester(headers: &HeaderMap) -> Requester {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map_or(Requester::Anonymous, Requester::User)
}

/// Extract the message locale from the Accept-Language header
pub fn extract_locale(headers: &HeaderMap) -> Option<Locale> {
    headers
        .get("accept-language")
        .and_then(|v| v.to_str().ok())
        .and_then(Locale::from_accept_language)
}

/// Standard GraphQL handler with requester and locale injection
///
/// # Example
///
/// ```rust,no_run
/// use axum::{Router, routing::post};
/// use compliance_connections::auth::graphql_handler;
///
/// let app: Router = Router::new()
///     .route("/graphql", post(graphql_handler::<
///         async_graphql::EmptyMutation,
///         async_graphql::EmptyMutation,
///         async_graphql::EmptySubscription,
///     >));
/// ```
pub async fn graphql_handler<Query, Mutation, Subscription>(
    Extension(schema): Extension<Schema<Query, Mutation, Subscription>>,
    headers: HeaderMap,
    req: Json<Request>,
) -> Json<Response>
where
    Query: async_graphql::ObjectType + 'static,
    Mutation: async_graphql::ObjectType + 'static,
    Subscription: async_graphql::SubscriptionType + 'static,
{
    let mut request = req.0.data(extract_requester(&headers));

    if let Some(locale) = extract_locale(&headers) {
        request = request.data(locale);
    }

    Json(schema.execute(request).await)
}

/// Get the requester from GraphQL context
pub fn get_requester(ctx: &Context<'_>) -> Requester {
    ctx.data_opt::<Requester>().copied().unwrap_or_default()
}

/// Get the locale the request asked for, if any
pub fn get_locale(ctx: &Context<'_>) -> Option<Locale> {
    ctx.data_opt::<Locale>().copied()
}
