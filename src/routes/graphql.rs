use crate::graphql::handlers;
use actix_web::web;

/// GraphQL endpoint, plus the playground when `enable_playground` is set.
pub fn configure_routes(cfg: &mut web::ServiceConfig, enable_playground: bool) {
    cfg.service(web::resource("/graphql").route(web::post().to(handlers::graphql_handler)));
    if enable_playground {
        cfg.service(web::resource("/playground").route(web::get().to(handlers::graphql_playground)));
    }
}
