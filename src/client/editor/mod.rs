//! Village record editor.
//!
//! [`VillageDraft`] is a persistent, structure-sharing copy of a village
//! addressed by typed [`FieldPath`]s. [`VillageEditor`] owns one draft and
//! submits it through a [`VillageApi`](crate::client::api::VillageApi).

mod draft;
mod form;
mod path;

pub use draft::{DraftError, SectionsDraft, VillageDraft, REQUIRED_FIELDS_MESSAGE};
pub use form::{EditorPhase, VillageEditor};
pub use path::{
    EconomyField, FactField, FeatureField, FieldPath, ItemField, NameOriginField, PartField,
    PartSlot, ProfileField, RepeatableItem, RepeatableSection, TimelineField,
};
