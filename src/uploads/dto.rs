use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const TITLE_MAX_CHARS: u64 = 100;
pub const DESCRIPTION_MAX_CHARS: u64 = 250;

/// Metadata accompanying an upload. Both fields are optional; lengths are
/// counted in characters, not bytes.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UploadDto {
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    #[schema(max_length = 100)]
    pub title: Option<String>,

    #[validate(length(max = 250, message = "description must be at most 250 characters"))]
    #[schema(max_length = 250)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Upload {
    pub id: Uuid,
    pub owner_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Upload {
    pub fn from_dto(owner_id: &str, dto: UploadDto) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            title: dto.title,
            description: dto.description,
            created_at: Utc::now(),
        }
    }
}
