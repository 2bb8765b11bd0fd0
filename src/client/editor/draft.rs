use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::path::{name_part, name_part_mut, FieldPath, Fields, RepeatableItem, RepeatableSection};
use crate::features::villages::dtos::{VillagePayloadDto, VillageResponseDto};
use crate::features::villages::models::{
    Economy, Fact, GeoPoint, Geography, GeographyFeature, History, NameOrigin, NamedItem, Profile,
    Sections, TimelineEntry,
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{section} has no row {index} (it has {len})")]
    IndexOutOfRange {
        section: RepeatableSection,
        index: usize,
        len: usize,
    },

    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

type Rows<T> = Arc<Vec<Arc<T>>>;

/// Editable copy of a village's sections.
///
/// Every sub-object and row sits behind an `Arc`, so an edit clones only the
/// nodes on its own path and every other node stays pointer-equal to the
/// previous draft.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionsDraft {
    pub name_origin: Arc<NameOrigin>,
    pub timeline: Rows<TimelineEntry>,
    pub geography_features: Rows<GeographyFeature>,
    pub temples: Rows<NamedItem>,
    pub festivals: Rows<NamedItem>,
    pub economy: Arc<Economy>,
    pub profile: Arc<Profile>,
    pub facts: Rows<Fact>,
}

impl SectionsDraft {
    fn from_sections(sections: &Sections) -> Self {
        Self {
            name_origin: Arc::new(sections.name_origin.clone()),
            timeline: rows_or_blank(&sections.history.timeline),
            geography_features: rows_or_blank(&sections.geography.features),
            temples: rows_or_blank(&sections.temples),
            festivals: rows_or_blank(&sections.festivals),
            economy: Arc::new(sections.economy.clone()),
            profile: Arc::new(sections.profile.clone()),
            facts: rows_or_blank(&sections.facts),
        }
    }

    fn to_sections(&self) -> Sections {
        Sections {
            name_origin: (*self.name_origin).clone(),
            history: History {
                timeline: unwrap_rows(&self.timeline),
            },
            geography: Geography {
                features: unwrap_rows(&self.geography_features),
            },
            temples: unwrap_rows(&self.temples),
            festivals: unwrap_rows(&self.festivals),
            economy: (*self.economy).clone(),
            profile: (*self.profile).clone(),
            facts: unwrap_rows(&self.facts),
        }
    }
}

/// In-memory, not yet submitted copy of a village.
///
/// Edits never mutate in place: [`set_field`](Self::set_field) and the row
/// operations return a new draft that shares every untouched subtree with
/// `self`. Coordinates are kept as typed text and only parsed by
/// [`to_submission_payload`](Self::to_submission_payload).
#[derive(Debug, Clone, PartialEq)]
pub struct VillageDraft {
    /// Set when editing an existing village
    pub id: Option<Uuid>,
    pub name: String,
    pub district: String,
    pub description: String,
    pub image: String,
    pub longitude: String,
    pub latitude: String,
    pub sections: Arc<SectionsDraft>,
}

impl Default for VillageDraft {
    fn default() -> Self {
        Self::initialize(None)
    }
}

impl VillageDraft {
    /// Build a complete draft, backfilling every absent section and giving
    /// each repeatable section at least one blank row.
    pub fn initialize(existing: Option<&VillageResponseDto>) -> Self {
        match existing {
            Some(village) => Self {
                id: Some(village.id),
                name: village.name.clone(),
                district: village.district.clone(),
                description: village.description.clone(),
                image: village.image.clone(),
                longitude: village.location.longitude().to_string(),
                latitude: village.location.latitude().to_string(),
                sections: Arc::new(SectionsDraft::from_sections(&village.sections)),
            },
            None => Self {
                id: None,
                name: String::new(),
                district: String::new(),
                description: String::new(),
                image: String::new(),
                longitude: "0".to_string(),
                latitude: "0".to_string(),
                sections: Arc::new(SectionsDraft::from_sections(&Sections::default())),
            },
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Read the text at `path`; `None` when the row does not exist
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        let s = &self.sections;
        let value = match *path {
            FieldPath::Name => &self.name,
            FieldPath::District => &self.district,
            FieldPath::Description => &self.description,
            FieldPath::Image => &self.image,
            FieldPath::Longitude => &self.longitude,
            FieldPath::Latitude => &self.latitude,
            FieldPath::NameOrigin(f) => s.name_origin.field(f),
            FieldPath::NameOriginPart(slot, f) => name_part(&s.name_origin, slot).field(f),
            FieldPath::Timeline(i, f) => s.timeline.get(i)?.field(f),
            FieldPath::GeographyFeature(i, f) => s.geography_features.get(i)?.field(f),
            FieldPath::Temple(i, f) => s.temples.get(i)?.field(f),
            FieldPath::Festival(i, f) => s.festivals.get(i)?.field(f),
            FieldPath::Economy(f) => s.economy.field(f),
            FieldPath::Profile(f) => s.profile.field(f),
            FieldPath::Fact(i, f) => s.facts.get(i)?.field(f),
        };
        Some(value.as_str())
    }

    /// Replace the text at `path`, cloning only the nodes along it.
    ///
    /// An out-of-range row index is an error and `self` is left as it was.
    pub fn set_field(&self, path: &FieldPath, value: impl Into<String>) -> Result<Self, DraftError> {
        if let Some((section, index)) = path.row() {
            let len = self.item_count(section);
            if index >= len {
                return Err(DraftError::IndexOutOfRange {
                    section,
                    index,
                    len,
                });
            }
        }

        let mut next = self.clone();
        *next.slot_mut(path) = value.into();
        Ok(next)
    }

    pub fn item_count(&self, section: RepeatableSection) -> usize {
        let s = &self.sections;
        match section {
            RepeatableSection::Timeline => s.timeline.len(),
            RepeatableSection::GeographyFeatures => s.geography_features.len(),
            RepeatableSection::Temples => s.temples.len(),
            RepeatableSection::Festivals => s.festivals.len(),
            RepeatableSection::Facts => s.facts.len(),
        }
    }

    /// Append `item` to `section`. An item of the wrong kind leaves the draft
    /// unchanged.
    pub fn add_repeatable_item(&self, section: RepeatableSection, item: RepeatableItem) -> Self {
        let mut next = self.clone();
        let sections = Arc::make_mut(&mut next.sections);
        match (section, item) {
            (RepeatableSection::Timeline, RepeatableItem::TimelineEntry(row)) => {
                push_row(&mut sections.timeline, row)
            }
            (RepeatableSection::GeographyFeatures, RepeatableItem::GeographyFeature(row)) => {
                push_row(&mut sections.geography_features, row)
            }
            (RepeatableSection::Temples, RepeatableItem::NamedItem(row)) => {
                push_row(&mut sections.temples, row)
            }
            (RepeatableSection::Festivals, RepeatableItem::NamedItem(row)) => {
                push_row(&mut sections.festivals, row)
            }
            (RepeatableSection::Facts, RepeatableItem::Fact(row)) => push_row(&mut sections.facts, row),
            (section, item) => {
                tracing::debug!("Ignoring {:?} appended to {}", item, section);
                return self.clone();
            }
        }
        next
    }

    /// Append an empty row to `section`
    pub fn add_blank_item(&self, section: RepeatableSection) -> Self {
        self.add_repeatable_item(section, RepeatableItem::blank(section))
    }

    /// Remove row `index` from `section`; out of range is a no-op
    pub fn remove_repeatable_item(&self, section: RepeatableSection, index: usize) -> Self {
        if index >= self.item_count(section) {
            return self.clone();
        }

        let mut next = self.clone();
        let sections = Arc::make_mut(&mut next.sections);
        match section {
            RepeatableSection::Timeline => remove_row(&mut sections.timeline, index),
            RepeatableSection::GeographyFeatures => {
                remove_row(&mut sections.geography_features, index)
            }
            RepeatableSection::Temples => remove_row(&mut sections.temples, index),
            RepeatableSection::Festivals => remove_row(&mut sections.festivals, index),
            RepeatableSection::Facts => remove_row(&mut sections.facts, index),
        }
        next
    }

    /// Only the four top-level fields are required; sections are free-form
    pub fn validate(&self) -> Result<(), DraftError> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("district", &self.district),
            ("description", &self.description),
            ("image", &self.image),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::MissingFields(missing))
        }
    }

    /// Body for the village write endpoint. Coordinates that do not parse
    /// become `0`; sections pass through as edited.
    pub fn to_submission_payload(&self) -> VillagePayloadDto {
        VillagePayloadDto {
            name: self.name.clone(),
            district: self.district.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            sections: self.sections.to_sections(),
            location: GeoPoint::new(
                parse_coordinate(&self.longitude),
                parse_coordinate(&self.latitude),
            ),
        }
    }

    // Caller has already checked the row index
    fn slot_mut(&mut self, path: &FieldPath) -> &mut String {
        match *path {
            FieldPath::Name => &mut self.name,
            FieldPath::District => &mut self.district,
            FieldPath::Description => &mut self.description,
            FieldPath::Image => &mut self.image,
            FieldPath::Longitude => &mut self.longitude,
            FieldPath::Latitude => &mut self.latitude,
            FieldPath::NameOrigin(f) => self.sections_mut().name_origin_mut().field_mut(f),
            FieldPath::NameOriginPart(slot, f) => {
                name_part_mut(self.sections_mut().name_origin_mut(), slot).field_mut(f)
            }
            FieldPath::Timeline(i, f) => row_mut(&mut self.sections_mut().timeline, i).field_mut(f),
            FieldPath::GeographyFeature(i, f) => {
                row_mut(&mut self.sections_mut().geography_features, i).field_mut(f)
            }
            FieldPath::Temple(i, f) => row_mut(&mut self.sections_mut().temples, i).field_mut(f),
            FieldPath::Festival(i, f) => row_mut(&mut self.sections_mut().festivals, i).field_mut(f),
            FieldPath::Economy(f) => Arc::make_mut(&mut self.sections_mut().economy).field_mut(f),
            FieldPath::Profile(f) => Arc::make_mut(&mut self.sections_mut().profile).field_mut(f),
            FieldPath::Fact(i, f) => row_mut(&mut self.sections_mut().facts, i).field_mut(f),
        }
    }

    fn sections_mut(&mut self) -> &mut SectionsDraft {
        Arc::make_mut(&mut self.sections)
    }
}

impl SectionsDraft {
    fn name_origin_mut(&mut self) -> &mut NameOrigin {
        Arc::make_mut(&mut self.name_origin)
    }
}

fn rows_or_blank<T: Clone + Default>(rows: &[T]) -> Rows<T> {
    if rows.is_empty() {
        Arc::new(vec![Arc::new(T::default())])
    } else {
        Arc::new(rows.iter().cloned().map(Arc::new).collect())
    }
}

fn unwrap_rows<T: Clone>(rows: &Rows<T>) -> Vec<T> {
    rows.iter().map(|row| (**row).clone()).collect()
}

fn row_mut<T: Clone>(rows: &mut Rows<T>, index: usize) -> &mut T {
    Arc::make_mut(&mut Arc::make_mut(rows)[index])
}

fn push_row<T: Clone>(rows: &mut Rows<T>, row: T) {
    Arc::make_mut(rows).push(Arc::new(row));
}

fn remove_row<T: Clone>(rows: &mut Rows<T>, index: usize) {
    Arc::make_mut(rows).remove(index);
}

fn parse_coordinate(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::editor::path::{
        EconomyField, FactField, FeatureField, ItemField, NameOriginField, PartField, PartSlot,
        ProfileField, TimelineField,
    };
    use chrono::Utc;
    use serde_json::json;

    fn all_paths() -> Vec<FieldPath> {
        vec![
            FieldPath::Name,
            FieldPath::District,
            FieldPath::Description,
            FieldPath::Image,
            FieldPath::Longitude,
            FieldPath::Latitude,
            FieldPath::NameOrigin(NameOriginField::Title),
            FieldPath::NameOrigin(NameOriginField::Content),
            FieldPath::NameOriginPart(PartSlot::Part2, PartField::Description),
            FieldPath::Timeline(0, TimelineField::Era),
            FieldPath::GeographyFeature(0, FeatureField::Image),
            FieldPath::Temple(0, ItemField::Name),
            FieldPath::Festival(0, ItemField::Description),
            FieldPath::Economy(EconomyField::Livelihoods),
            FieldPath::Profile(ProfileField::PinCode),
            FieldPath::Fact(0, FactField::Title),
        ]
    }

    fn two_entry_village() -> VillageResponseDto {
        let sections: Sections = serde_json::from_value(json!({
            "history": { "timeline": [
                { "era": "Vijayanagara", "description": "Capital of the empire" },
                { "era": "Colonial", "description": "Bellary district" }
            ]},
            "temples": [{ "name": "Virupaksha", "description": "", "image": "v.jpg" }]
        }))
        .unwrap();

        VillageResponseDto {
            id: Uuid::new_v4(),
            name: "Hampi".to_string(),
            district: "Vijayanagara".to_string(),
            description: "Ruins on the Tungabhadra".to_string(),
            image: "hampi.jpg".to_string(),
            sections,
            location: GeoPoint::new(76.46, 15.335),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_blank_draft_shape() {
        let draft = VillageDraft::initialize(None);

        for section in [
            RepeatableSection::Timeline,
            RepeatableSection::GeographyFeatures,
            RepeatableSection::Temples,
            RepeatableSection::Festivals,
            RepeatableSection::Facts,
        ] {
            assert_eq!(draft.item_count(section), 1, "{section}");
        }
        for path in all_paths()
            .into_iter()
            .filter(|p| !matches!(p, FieldPath::Longitude | FieldPath::Latitude))
        {
            assert_eq!(draft.get(&path), Some(""), "{path:?}");
        }

        let payload = draft.to_submission_payload();
        assert_eq!(payload.location.coordinates, [0.0, 0.0]);
    }

    #[test]
    fn test_set_then_get_returns_value_and_shares_siblings() {
        let draft = VillageDraft::initialize(Some(&two_entry_village()));

        for path in all_paths() {
            let next = draft.set_field(&path, "edited").unwrap();
            assert_eq!(next.get(&path), Some("edited"), "{path:?}");

            let (before, after) = (&draft.sections, &next.sections);
            if !matches!(path, FieldPath::NameOrigin(_) | FieldPath::NameOriginPart(..)) {
                assert!(Arc::ptr_eq(&before.name_origin, &after.name_origin), "{path:?}");
            }
            if !matches!(path, FieldPath::Temple(..)) {
                assert!(Arc::ptr_eq(&before.temples, &after.temples), "{path:?}");
            }
            if !matches!(path, FieldPath::Economy(_)) {
                assert!(Arc::ptr_eq(&before.economy, &after.economy), "{path:?}");
            }
            if !matches!(path, FieldPath::Fact(..)) {
                assert!(Arc::ptr_eq(&before.facts, &after.facts), "{path:?}");
            }
        }
    }

    #[test]
    fn test_top_level_edit_shares_all_sections() {
        let draft = VillageDraft::initialize(None);
        let next = draft.set_field(&FieldPath::Name, "Hampi").unwrap();

        assert!(Arc::ptr_eq(&draft.sections, &next.sections));
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_edit_second_timeline_entry() {
        let draft = VillageDraft::initialize(Some(&two_entry_village()));
        let path = FieldPath::Timeline(1, TimelineField::Era);

        let next = draft.set_field(&path, "British Raj").unwrap();

        assert_eq!(next.sections.timeline[0], draft.sections.timeline[0]);
        assert!(Arc::ptr_eq(&draft.sections.timeline[0], &next.sections.timeline[0]));
        assert_eq!(next.sections.timeline[1].era, "British Raj");
        assert_eq!(next.sections.timeline[1].description, "Bellary district");
        assert_eq!(draft.sections.timeline[1].era, "Colonial");
    }

    #[test]
    fn test_out_of_range_edit_is_rejected() {
        let draft = VillageDraft::initialize(None);

        let err = draft
            .set_field(&FieldPath::Fact(3, FactField::Title), "x")
            .unwrap_err();

        assert_eq!(
            err,
            DraftError::IndexOutOfRange {
                section: RepeatableSection::Facts,
                index: 3,
                len: 1
            }
        );
        assert_eq!(draft.get(&FieldPath::Fact(3, FactField::Title)), None);
    }

    #[test]
    fn test_add_then_remove_round_trips_and_keeps_other_edits() {
        let draft = VillageDraft::initialize(Some(&two_entry_village()));

        let added = draft.add_blank_item(RepeatableSection::Timeline);
        assert_eq!(added.item_count(RepeatableSection::Timeline), 3);

        let edited = added
            .set_field(&FieldPath::Timeline(0, TimelineField::Description), "Hampi bazaar")
            .unwrap();
        let removed = edited.remove_repeatable_item(RepeatableSection::Timeline, 2);

        assert_eq!(removed.item_count(RepeatableSection::Timeline), 2);
        assert_eq!(removed.sections.timeline[0].description, "Hampi bazaar");
        assert_eq!(removed.sections.timeline[1], draft.sections.timeline[1]);

        let untouched = draft
            .add_blank_item(RepeatableSection::Facts)
            .remove_repeatable_item(RepeatableSection::Facts, 1);
        assert_eq!(untouched, draft);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let draft = VillageDraft::initialize(None);
        let next = draft.remove_repeatable_item(RepeatableSection::Temples, 5);
        assert_eq!(next, draft);
    }

    #[test]
    fn test_mismatched_item_is_ignored() {
        let draft = VillageDraft::initialize(None);

        let next = draft.add_repeatable_item(
            RepeatableSection::Timeline,
            RepeatableItem::Fact(Fact::default()),
        );
        assert_eq!(next.item_count(RepeatableSection::Timeline), 1);

        let festival = NamedItem {
            name: "Hampi Utsav".to_string(),
            ..Default::default()
        };
        let next = draft
            .add_repeatable_item(RepeatableSection::Festivals, RepeatableItem::NamedItem(festival));
        assert_eq!(next.item_count(RepeatableSection::Festivals), 2);
        assert_eq!(
            next.get(&FieldPath::Festival(1, ItemField::Name)),
            Some("Hampi Utsav")
        );
        assert!(Arc::ptr_eq(&draft.sections.temples, &next.sections.temples));
    }

    #[test]
    fn test_missing_economy_is_backfilled() {
        let mut village = two_entry_village();
        village.sections = serde_json::from_value(json!({
            "facts": [{ "title": "Stone chariot", "description": "" }]
        }))
        .unwrap();

        let draft = VillageDraft::initialize(Some(&village));

        assert_eq!(*draft.sections.economy, Economy::default());
        assert_eq!(draft.sections.facts[0].title, "Stone chariot");
        assert_eq!(draft.id, Some(village.id));
    }

    #[test]
    fn test_validate_reports_missing_required_fields() {
        let draft = VillageDraft::initialize(None)
            .set_field(&FieldPath::Name, "Test")
            .unwrap()
            .set_field(&FieldPath::District, "   ")
            .unwrap();

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err,
            DraftError::MissingFields(vec!["district", "description", "image"])
        );
        assert!(err.to_string().starts_with(REQUIRED_FIELDS_MESSAGE));
    }

    #[test]
    fn test_partially_typed_coordinates() {
        let draft = VillageDraft::initialize(None)
            .set_field(&FieldPath::Longitude, " 76.46 ")
            .unwrap()
            .set_field(&FieldPath::Latitude, "15.3a")
            .unwrap();

        assert_eq!(
            draft.to_submission_payload().location,
            GeoPoint::new(76.46, 0.0)
        );
    }

    #[test]
    fn test_existing_coordinates_round_trip() {
        let village = two_entry_village();
        let payload = VillageDraft::initialize(Some(&village)).to_submission_payload();
        assert_eq!(payload.location, village.location);
        assert_eq!(payload.sections.history.timeline.len(), 2);
    }
}
