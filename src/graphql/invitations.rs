use async_graphql::{Context, ErrorExtensions, ID, Object, Result, SimpleObject};
use std::sync::Arc;
use uuid::Uuid;

use super::guard::{JwtGuard, current_user};
use crate::error::ApiError;
use crate::invitations::{
    AcceptInvitationResponse, CreatedInvitation, InvitationObject, InvitationService,
};

#[derive(Debug, SimpleObject)]
pub struct Viewer {
    pub id: ID,
    pub email: String,
}

fn service<'a>(ctx: &Context<'a>) -> Result<&'a Arc<InvitationService>> {
    ctx.data::<Arc<InvitationService>>()
}

#[derive(Default)]
pub struct InvitationQuery;

#[Object]
impl InvitationQuery {
    /// The authenticated caller.
    #[graphql(guard = "JwtGuard")]
    async fn me(&self, ctx: &Context<'_>) -> Result<Viewer> {
        let user = current_user(ctx)?;
        Ok(Viewer {
            id: ID::from(user.id.as_str()),
            email: user.email.clone(),
        })
    }

    /// Invitations sent by the caller, newest first.
    #[graphql(guard = "JwtGuard")]
    async fn invitations(&self, ctx: &Context<'_>) -> Result<Vec<InvitationObject>> {
        let user = current_user(ctx)?;
        let sent = service(ctx)?.list_sent(user).await;
        Ok(sent.into_iter().map(InvitationObject::from).collect())
    }
}

#[derive(Default)]
pub struct InvitationMutation;

#[Object]
impl InvitationMutation {
    /// Invites `email`. The returned token is shown only once.
    #[graphql(guard = "JwtGuard")]
    async fn create_invitation(&self, ctx: &Context<'_>, email: String) -> Result<CreatedInvitation> {
        let user = current_user(ctx)?;
        service(ctx)?
            .create(user, &email)
            .await
            .map_err(|e| e.extend())
    }

    /// Exchanges an invitation token for an access token.
    async fn accept_invitation(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<AcceptInvitationResponse> {
        service(ctx)?.accept(&token).await.map_err(|e| e.extend())
    }

    #[graphql(guard = "JwtGuard")]
    async fn revoke_invitation(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let user = current_user(ctx)?;
        let id = Uuid::parse_str(id.as_str())
            .map_err(|_| ApiError::NotFound("invitation").extend())?;

        service(ctx)?
            .revoke(user, id)
            .await
            .map(|_| true)
            .map_err(|e| e.extend())
    }
}
