use actix_web::web;

use crate::error::ApiError;
use crate::state::AppState;

/// # Health Check Endpoint
///
/// `GET /api/v1/health` returns `status`, `version` and an RFC 3339
/// `timestamp`. Never guarded.
pub mod health;

/// # GraphQL Endpoint
///
/// `POST /api/v1/graphql` and, when enabled, `GET /api/v1/playground`.
/// Invitation acceptance lives here as the `acceptInvitation` mutation.
pub mod graphql;

/// # Upload Endpoints
///
/// `POST` and `GET /api/v1/uploads`, both behind the `jwt` guard.
pub mod uploads;


/// # API Route Configuration
///
/// Mounts every endpoint under `/api/v1`.
///
/// ```text
/// GET  /api/v1/health
/// POST /api/v1/graphql
/// GET  /api/v1/playground   (ENABLE_PLAYGROUND)
/// POST /api/v1/uploads      (Bearer)
/// GET  /api/v1/uploads      (Bearer)
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .configure(health::configure_routes)
            .configure(|cfg| graphql::configure_routes(cfg, state.enable_playground))
            .configure(|cfg| uploads::configure_routes(cfg, state)),
    );
}

/// JSON extractor settings: body errors become `BAD_REQUEST` JSON responses
/// instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "rejected request body");
        ApiError::bad_request(err.to_string()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::schema::create_schema;
    use crate::state::testing::{bearer_for, test_state};
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_full_api_surface() {
        let state = test_state();
        let auth = bearer_for(&state, "alice");

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_schema(&state)))
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| configure(cfg, &state)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v1/uploads").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/uploads")
            .insert_header(("Authorization", auth))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_accepted_invitation_token_passes_upload_guard() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_schema(&state)))
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| configure(cfg, &state)),
        )
        .await;

        let owner = crate::auth::AuthenticatedUser {
            id: "owner".to_string(),
            email: "owner@example.com".to_string(),
        };
        let created = state
            .invitations
            .create(&owner, "guest@example.com")
            .await
            .unwrap();
        let accepted = state.invitations.accept(&created.token).await.unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/uploads")
            .insert_header(("Authorization", format!("Bearer {}", accepted.access_token)))
            .set_json(serde_json::json!({ "title": "first upload" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["owner_id"], created.id.to_string());
    }

    #[actix_web::test]
    async fn test_scope_reports_body_errors_as_json() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_schema(&state)))
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| configure(cfg, &state)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/uploads")
            .insert_header(("Authorization", bearer_for(&state, "alice")))
            .set_json(serde_json::json!({ "title": 42 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "BAD_REQUEST");
    }
}
