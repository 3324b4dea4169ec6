use crate::models::HealthResponse;
use async_graphql::{Object, SimpleObject};

/// Service health as seen through GraphQL.
#[derive(Debug, SimpleObject)]
pub struct Health {
    /// "UP" while the service answers
    pub status: String,
    pub version: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

impl From<HealthResponse> for Health {
    fn from(response: HealthResponse) -> Self {
        Self {
            status: response.status,
            version: response.version,
            timestamp: response.timestamp,
        }
    }
}

#[derive(Default)]
pub struct HealthQuery;

#[Object]
impl HealthQuery {
    async fn health(&self) -> Health {
        Health::from(HealthResponse::up())
    }
}
