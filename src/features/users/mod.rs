//! User accounts and self-service profiles.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/auth/current` | Current account (identity check) |
//! | PUT | `/api/auth/profile` | Update whitelisted profile fields |
//! | GET | `/api/auth/users` | List all accounts (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserProfileService;
