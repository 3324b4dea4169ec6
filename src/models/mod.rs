/// # Health Status Response
///
/// Liveness payload shared by `GET /api/v1/health` and the GraphQL `health`
/// query.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "version": "0.1.0",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

pub use health::HealthResponse;
