pub mod guard;
pub mod handlers;
pub mod health;
pub mod invitations;
pub mod schema;
