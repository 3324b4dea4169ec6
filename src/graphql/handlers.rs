use actix_web::{HttpRequest, HttpResponse, Responder, web};
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::auth::optional_user;
use crate::graphql::schema::AppSchema;
use crate::state::AppState;

/// Handles incoming GraphQL requests.
///
/// An `Authorization: Bearer` header, when present and accepted by the `jwt`
/// strategy, attaches an [`AuthenticatedUser`] to the request data. A missing
/// or rejected header does not fail the request; only fields behind
/// [`JwtGuard`] will error.
///
/// [`AuthenticatedUser`]: crate::auth::AuthenticatedUser
/// [`JwtGuard`]: crate::graphql::guard::JwtGuard
pub async fn graphql_handler(
    schema: web::Data<AppSchema>,
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(user) = optional_user(&http_req, state.jwt.as_ref()) {
        request = request.data(user);
    }
    schema.execute(request).await.into()
}

/// Serves the GraphQL Playground pointed at `/api/v1/graphql`.
///
/// Only mounted when `ENABLE_PLAYGROUND` is on.
pub async fn graphql_playground() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(GraphQLPlaygroundConfig::new(
            "/api/v1/graphql",
        )))
}
