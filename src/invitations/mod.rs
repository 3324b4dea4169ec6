/// # Invitations
///
/// An authenticated user invites someone by email and receives a single-use
/// token to pass along. Accepting the token returns an
/// [`AcceptInvitationResponse`] with an access token for the invitee.
pub mod model;
pub mod service;
pub mod store;

pub use model::{AcceptInvitationResponse, CreatedInvitation, Invitation, InvitationObject, InvitationStatus};
pub use service::InvitationService;
pub use store::{InMemoryInvitationStore, InvitationStore};
