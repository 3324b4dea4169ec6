pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod invitations;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod uploads;
