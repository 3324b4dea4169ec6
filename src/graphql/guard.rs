use async_graphql::{Context, ErrorExtensions, Guard, Result};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;

/// Field guard passing only when the request carries an identity the `jwt`
/// strategy accepted (attached by [`graphql_handler`]).
///
/// [`graphql_handler`]: crate::graphql::handlers::graphql_handler
#[derive(Debug, Default, Clone, Copy)]
pub struct JwtGuard;

impl Guard for JwtGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match ctx.data_opt::<AuthenticatedUser>() {
            Some(_) => Ok(()),
            None => Err(ApiError::Unauthorized("Not authenticated".to_string()).extend()),
        }
    }
}

/// The caller's identity inside a guarded resolver.
pub fn current_user<'a>(ctx: &Context<'a>) -> Result<&'a AuthenticatedUser> {
    ctx.data_opt::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()).extend())
}
