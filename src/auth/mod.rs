/// # Authentication
///
/// Credentials are checked by a named [`AuthStrategy`]. The only strategy the
/// service ships is [`JwtStrategy`] (`"jwt"`), which signs and verifies HS256
/// access tokens.
///
/// Routes are protected by wrapping them in [`JwtAuthGuard`]; handlers then
/// take an [`AuthenticatedUser`] argument to learn who is calling.
pub mod guard;
pub mod strategy;


pub use guard::{JwtAuthGuard, optional_user};
pub use strategy::{AuthError, AuthStrategy, AuthenticatedUser, Claims, JwtStrategy, bearer_token};
