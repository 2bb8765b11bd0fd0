use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// ANALYTICS DTOs
// =============================================================================

/// Counters shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub total_villages: i64,
    pub total_users: i64,
    pub total_reviews: i64,
    /// Visitors are not tracked; always null
    pub monthly_visitors: Option<i64>,
}
