pub mod auth;
pub mod memo;
