use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document for the REST surface.
///
/// GraphQL operations (including `acceptInvitation`) are described by the
/// GraphQL schema itself and are not repeated here.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::uploads::create_upload,
        crate::routes::uploads::list_uploads,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::uploads::UploadDto,
            crate::uploads::Upload
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Uploads", description = "Upload registration, guarded by the jwt strategy"),
        (name = "GraphQL", description = "Invitations and account queries")
    ),
    info(
        description = "REST and GraphQL API for invitations and uploads",
        title = "Collab API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
