//! Village records and search.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET | `/api/villages` | public |
//! | GET | `/api/villages/{id}` | public |
//! | GET | `/api/search/name?name=` | public |
//! | GET | `/api/search/district?district=` | public |
//! | POST | `/api/villages` | admin |
//! | PUT | `/api/villages/{id}` | admin |
//! | DELETE | `/api/villages/{id}` | admin |
//!
//! Deleting a village does not delete its reviews.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::VillageService;
