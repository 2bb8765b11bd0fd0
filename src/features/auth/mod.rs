//! Registration, login, token handling and role capabilities.

mod jwt;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod password;
pub mod routes;
pub mod services;

pub use jwt::JwtService;
pub use services::AuthService;
