//! Reviews users leave on villages.
//!
//! Reviews reference their village by id only. They are removed together with
//! their author's account but survive deletion of the village.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReviewService;
