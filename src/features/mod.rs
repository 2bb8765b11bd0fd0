pub mod admin;
pub mod auth;
pub mod reviews;
pub mod users;
pub mod villages;
