use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::Sections;

/// Database model for villages
#[derive(Debug, Clone, FromRow)]
pub struct Village {
    pub id: Uuid,
    pub name: String,
    pub district: String,
    pub description: String,
    pub image: String,
    pub sections: Json<Sections>,
    pub longitude: f64,
    pub latitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const VILLAGE_COLUMNS: &str =
    "id, name, district, description, image, sections, longitude, latitude, created_at, updated_at";
