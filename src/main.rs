use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web::Data};
use collab_api::config::Config;
use collab_api::graphql::schema::create_schema;
use collab_api::openapi::ApiDoc;
use collab_api::state::AppState;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Collab API entry point
///
/// Loads configuration (`.env` honoured), installs the tracing subscriber and
/// serves:
/// - REST and GraphQL routes under `/api/v1` (see `routes::configure`)
/// - Swagger UI at `/swagger-ui/`, OpenAPI document at `/api-docs/openapi.json`
///
/// Log verbosity follows `RUST_LOG` and defaults to `info`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "refusing to start");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "refusing to start");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };
    let schema = create_schema(&state);

    tracing::info!(host = %config.host, port = config.port, "starting server");

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();
        let state = state.clone();

        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(schema.clone()))
            .app_data(Data::new(state.clone()))
            .configure(|cfg| collab_api::routes::configure(cfg, &state))
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
