use actix_web::{HttpResponse, web};
use validator::Validate;

use crate::auth::{AuthenticatedUser, JwtAuthGuard};
use crate::error::ApiError;
use crate::state::AppState;
use crate::uploads::{Upload, UploadDto};

/// # Register Upload
///
/// Records an upload owned by the caller. `title` and `description` are both
/// optional and validated before anything is stored.
///
/// ## Responses
/// - **201 Created**: the stored [`Upload`]
/// - **400 Bad Request**: `BAD_REQUEST` for a body that is not an upload
///   object (malformed JSON, wrong field types), `VALIDATION_ERROR` for a
///   field over its length limit (`fields` lists the offending fields)
/// - **401 Unauthorized**: missing or invalid bearer token
///
/// ## Example Request
/// ```json
/// { "title": "Quarterly report", "description": "Numbers for Q3" }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    request_body = UploadDto,
    responses(
        (status = 201, description = "Upload registered", body = Upload),
        (status = 400, description = "Malformed body or validation failed"),
        (status = 401, description = "Missing or invalid credentials")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn create_upload(
    user: AuthenticatedUser,
    body: web::Json<UploadDto>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let dto = body.into_inner();
    dto.validate()?;

    let upload = Upload::from_dto(&user.id, dto);
    state.uploads.insert(upload.clone()).await;

    tracing::info!(upload_id = %upload.id, owner = %user.id, "upload registered");

    Ok(HttpResponse::Created().json(upload))
}

/// # List Uploads
///
/// Returns the caller's uploads, newest first. Other users' uploads are never
/// included.
///
/// ## Responses
/// - **200 OK**: array of [`Upload`], possibly empty
/// - **401 Unauthorized**: missing or invalid bearer token
#[utoipa::path(
    get,
    path = "/api/v1/uploads",
    responses(
        (status = 200, description = "Uploads owned by the caller, newest first", body = [Upload]),
        (status = 401, description = "Missing or invalid credentials")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn list_uploads(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let uploads = state.uploads.list_by_owner(&user.id).await;
    Ok(HttpResponse::Ok().json(uploads))
}

/// Mounts `/uploads` behind the `jwt` guard.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/uploads")
            .wrap(JwtAuthGuard::new(state.auth_strategy()))
            .route("", web::post().to(create_upload))
            .route("", web::get().to(list_uploads)),
    );
}
