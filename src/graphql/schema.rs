use super::health::HealthQuery;
use super::invitations::{InvitationMutation, InvitationQuery};
use crate::state::AppState;
use async_graphql::{EmptySubscription, MergedObject, Schema};

#[derive(MergedObject, Default)]
pub struct QueryRoot(HealthQuery, InvitationQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(InvitationMutation);

/// Main GraphQL Schema Definition
///
/// Health and invitation queries, invitation mutations, no subscriptions.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the invitation service available to resolvers.
///
/// # Example
///
/// ```rust,no_run
/// use collab_api::config::Config;
/// use collab_api::graphql::schema::create_schema;
/// use collab_api::state::AppState;
///
/// let state = AppState::from_config(&Config::from_env().unwrap()).unwrap();
/// let schema = create_schema(&state);
/// ```
pub fn create_schema(state: &AppState) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(state.invitations.clone())
    .finish()
}
