pub mod auth;
pub mod queries;
pub mod query;
