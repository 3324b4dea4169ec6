/// # Uploads
///
/// Upload records described by an [`UploadDto`]. Only metadata is kept;
/// the payload bytes are not stored by this service.
pub mod dto;
pub mod store;

pub use dto::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, Upload, UploadDto};
pub use store::{InMemoryUploadStore, UploadStore};
