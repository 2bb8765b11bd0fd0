//! VillageHub: a village catalogue with reviews and user/admin accounts.
//!
//! The HTTP service lives in [`core`], [`shared`] and [`features`]; the
//! binary in `main.rs` wires them together. [`client`] is the typed client
//! side: the nested village editor and the session/role store.

pub mod client;
pub mod core;
pub mod features;
pub mod shared;
