use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Structured descriptive content of a village, stored as one JSONB document.
///
/// Every field falls back to its empty value when absent, so partially
/// filled documents written by older clients still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Sections {
    pub name_origin: NameOrigin,
    pub history: History,
    pub geography: Geography,
    pub temples: Vec<NamedItem>,
    pub festivals: Vec<NamedItem>,
    pub economy: Economy,
    pub profile: Profile,
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NameOrigin {
    pub title: String,
    pub content: String,
    pub part1: NamePart,
    pub part2: NamePart,
    pub part3: NamePart,
}

/// One titled part of the name-origin story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NamePart {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct History {
    /// Narrative order, not validated
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TimelineEntry {
    pub era: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Geography {
    pub features: Vec<GeographyFeature>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GeographyFeature {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Row shape shared by temples and festivals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NamedItem {
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Economy {
    pub agriculture: String,
    pub livelihoods: String,
    pub image: String,
}

/// Demographic fields, all free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub population: String,
    pub languages: String,
    pub literacy: String,
    pub occupation: String,
    pub nearest_town: String,
    pub transport: String,
    pub pin_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Fact {
    pub title: String,
    pub description: String,
}

/// Marker for the only supported GeoJSON geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PointKind {
    #[default]
    Point,
}

/// GeoJSON-style point; `coordinates` is `[longitude, latitude]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[serde(rename = "type", default)]
    pub kind: PointKind,
    #[serde(default)]
    #[schema(value_type = Vec<f64>, example = json!([0.0, 0.0]))]
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}
