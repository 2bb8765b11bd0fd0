use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Review row joined with its author's name
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub village_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
