//! Session/role store: who is signed in and what they may do.
//!
//! [`SessionStore`] is constructed explicitly with its collaborators and has
//! an `init`/`dispose` lifecycle. Views observe it through
//! [`SessionStore::subscribe`] and gate themselves with
//! [`SessionStore::guard`], which never grants access before bootstrap has
//! resolved.

mod navigator;
mod store;
mod token_store;

pub use navigator::{Navigation, Navigator, RecordingNavigator, View};
pub use store::{SessionScope, SessionState, SessionStore, ViewAccess};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
