use crate::features::villages::models::{
    Economy, Fact, GeographyFeature, NameOrigin, NamePart, NamedItem, Profile, TimelineEntry,
};

/// Location of one editable text field inside a [`VillageDraft`](super::VillageDraft).
///
/// Row indices are the only part checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Name,
    District,
    Description,
    Image,
    Longitude,
    Latitude,
    NameOrigin(NameOriginField),
    NameOriginPart(PartSlot, PartField),
    Timeline(usize, TimelineField),
    GeographyFeature(usize, FeatureField),
    Temple(usize, ItemField),
    Festival(usize, ItemField),
    Economy(EconomyField),
    Profile(ProfileField),
    Fact(usize, FactField),
}

impl FieldPath {
    /// The repeatable section and row this path points into, if any
    pub fn row(&self) -> Option<(RepeatableSection, usize)> {
        match *self {
            FieldPath::Timeline(i, _) => Some((RepeatableSection::Timeline, i)),
            FieldPath::GeographyFeature(i, _) => Some((RepeatableSection::GeographyFeatures, i)),
            FieldPath::Temple(i, _) => Some((RepeatableSection::Temples, i)),
            FieldPath::Festival(i, _) => Some((RepeatableSection::Festivals, i)),
            FieldPath::Fact(i, _) => Some((RepeatableSection::Facts, i)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameOriginField {
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartSlot {
    Part1,
    Part2,
    Part3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartField {
    Title,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineField {
    Era,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureField {
    Title,
    Description,
    Image,
}

/// Field of a temple or festival row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Name,
    Description,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EconomyField {
    Agriculture,
    Livelihoods,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Population,
    Languages,
    Literacy,
    Occupation,
    NearestTown,
    Transport,
    PinCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactField {
    Title,
    Description,
}

/// Sections holding an ordered list of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatableSection {
    Timeline,
    GeographyFeatures,
    Temples,
    Festivals,
    Facts,
}

impl std::fmt::Display for RepeatableSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RepeatableSection::Timeline => "history.timeline",
            RepeatableSection::GeographyFeatures => "geography.features",
            RepeatableSection::Temples => "temples",
            RepeatableSection::Festivals => "festivals",
            RepeatableSection::Facts => "facts",
        };
        f.write_str(name)
    }
}

/// A row to append to a repeatable section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatableItem {
    TimelineEntry(TimelineEntry),
    GeographyFeature(GeographyFeature),
    /// Temple or festival
    NamedItem(NamedItem),
    Fact(Fact),
}

impl RepeatableItem {
    /// Empty row of the kind `section` holds
    pub fn blank(section: RepeatableSection) -> Self {
        match section {
            RepeatableSection::Timeline => RepeatableItem::TimelineEntry(TimelineEntry::default()),
            RepeatableSection::GeographyFeatures => {
                RepeatableItem::GeographyFeature(GeographyFeature::default())
            }
            RepeatableSection::Temples | RepeatableSection::Festivals => {
                RepeatableItem::NamedItem(NamedItem::default())
            }
            RepeatableSection::Facts => RepeatableItem::Fact(Fact::default()),
        }
    }
}

/// Text accessors keyed by a field enum
pub(super) trait Fields<F> {
    fn field(&self, field: F) -> &String;

    fn field_mut(&mut self, field: F) -> &mut String;
}

macro_rules! impl_fields {
    ($row:ty, $field:ident, { $($variant:ident => $member:ident),+ $(,)? }) => {
        impl Fields<$field> for $row {
            fn field(&self, field: $field) -> &String {
                match field {
                    $($field::$variant => &self.$member,)+
                }
            }

            fn field_mut(&mut self, field: $field) -> &mut String {
                match field {
                    $($field::$variant => &mut self.$member,)+
                }
            }
        }
    };
}

impl_fields!(NameOrigin, NameOriginField, { Title => title, Content => content });
impl_fields!(NamePart, PartField, { Title => title, Description => description });
impl_fields!(TimelineEntry, TimelineField, { Era => era, Description => description });
impl_fields!(GeographyFeature, FeatureField, {
    Title => title,
    Description => description,
    Image => image,
});
impl_fields!(NamedItem, ItemField, {
    Name => name,
    Description => description,
    Image => image,
});
impl_fields!(Economy, EconomyField, {
    Agriculture => agriculture,
    Livelihoods => livelihoods,
    Image => image,
});
impl_fields!(Profile, ProfileField, {
    Population => population,
    Languages => languages,
    Literacy => literacy,
    Occupation => occupation,
    NearestTown => nearest_town,
    Transport => transport,
    PinCode => pin_code,
});
impl_fields!(Fact, FactField, { Title => title, Description => description });

pub(super) fn name_part(origin: &NameOrigin, slot: PartSlot) -> &NamePart {
    match slot {
        PartSlot::Part1 => &origin.part1,
        PartSlot::Part2 => &origin.part2,
        PartSlot::Part3 => &origin.part3,
    }
}

pub(super) fn name_part_mut(origin: &mut NameOrigin, slot: PartSlot) -> &mut NamePart {
    match slot {
        PartSlot::Part1 => &mut origin.part1,
        PartSlot::Part2 => &mut origin.part2,
        PartSlot::Part3 => &mut origin.part3,
    }
}
