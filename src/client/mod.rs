//! Typed client for the VillageHub API.
//!
//! [`api::ApiClient`] speaks HTTP. The [`editor`] and [`session`] modules hold
//! client-side state and only depend on the [`api::VillageApi`] and
//! [`api::IdentityApi`] traits.

pub mod api;
pub mod editor;
pub mod error;
pub mod session;

pub use api::{ApiClient, ClientConfig, IdentityApi, VillageApi};
pub use error::ClientError;
