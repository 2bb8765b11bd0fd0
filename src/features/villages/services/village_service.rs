use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::villages::dtos::{VillagePayloadDto, VillageResponseDto};
use crate::features::villages::models::{village::VILLAGE_COLUMNS, Village};
use crate::shared::validation::contains_pattern;

/// Column a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    District,
}

impl SearchField {
    fn column(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::District => "district",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            SearchField::Name => "Name parameter is required",
            SearchField::District => "District parameter is required",
        }
    }
}

/// Service for village records
pub struct VillageService {
    pool: PgPool,
}

impl VillageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every village sorted by name
    pub async fn list(&self) -> Result<Vec<VillageResponseDto>> {
        let villages = sqlx::query_as::<_, Village>(&format!(
            "SELECT {} FROM villages ORDER BY name",
            VILLAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list villages: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(villages.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<VillageResponseDto> {
        let village = sqlx::query_as::<_, Village>(&format!(
            "SELECT {} FROM villages WHERE id = $1",
            VILLAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get village {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        village
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Village not found".to_string()))
    }

    pub async fn create(&self, dto: VillagePayloadDto) -> Result<VillageResponseDto> {
        let village = sqlx::query_as::<_, Village>(&format!(
            r#"
            INSERT INTO villages (name, district, description, image, sections, longitude, latitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            VILLAGE_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(&dto.district)
        .bind(&dto.description)
        .bind(&dto.image)
        .bind(Json(&dto.sections))
        .bind(dto.location.longitude())
        .bind(dto.location.latitude())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create village: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Village created: id={}, name={}", village.id, village.name);
        Ok(village.into())
    }

    /// Replace every mutable field of a village. `created_at` is never touched.
    pub async fn update(&self, id: Uuid, dto: VillagePayloadDto) -> Result<VillageResponseDto> {
        let village = sqlx::query_as::<_, Village>(&format!(
            r#"
            UPDATE villages SET
                name = $2,
                district = $3,
                description = $4,
                image = $5,
                sections = $6,
                longitude = $7,
                latitude = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VILLAGE_COLUMNS
        ))
        .bind(id)
        .bind(dto.name.trim())
        .bind(&dto.district)
        .bind(&dto.description)
        .bind(&dto.image)
        .bind(Json(&dto.sections))
        .bind(dto.location.longitude())
        .bind(dto.location.latitude())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update village {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let village = village.ok_or_else(|| AppError::NotFound("Village not found".to_string()))?;
        tracing::info!("Village updated: id={}", village.id);

        Ok(village.into())
    }

    /// Delete a village. Its reviews are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query_scalar::<_, Uuid>("DELETE FROM villages WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete village {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if deleted.is_none() {
            return Err(AppError::NotFound("Village not found".to_string()));
        }

        let orphaned = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reviews WHERE village_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reviews of village {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        if orphaned > 0 {
            tracing::warn!(
                "Village {} deleted with {} review(s) still referencing it",
                id,
                orphaned
            );
        }
        tracing::info!("Village deleted: id={}", id);

        Ok(())
    }

    pub async fn search_by_name(&self, name: Option<&str>) -> Result<Vec<VillageResponseDto>> {
        self.search(SearchField::Name, name).await
    }

    pub async fn search_by_district(
        &self,
        district: Option<&str>,
    ) -> Result<Vec<VillageResponseDto>> {
        self.search(SearchField::District, district).await
    }

    /// Case-insensitive substring search, sorted by name
    async fn search(
        &self,
        field: SearchField,
        term: Option<&str>,
    ) -> Result<Vec<VillageResponseDto>> {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::BadRequest(field.required_message().to_string()))?;

        let villages = sqlx::query_as::<_, Village>(&format!(
            "SELECT {} FROM villages WHERE {} ILIKE $1 ORDER BY name",
            VILLAGE_COLUMNS,
            field.column()
        ))
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search villages by {}: {:?}", field.column(), e);
            AppError::Database(e)
        })?;

        tracing::debug!(
            "Search by {} for '{}' matched {} village(s)",
            field.column(),
            term,
            villages.len()
        );
        Ok(villages.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::villages::models::GeoPoint;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;

    fn service() -> VillageService {
        VillageService::new(lazy_pool())
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let svc = service();

        let err = svc.search_by_name(None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request: Name parameter is required");

        let err = svc.search_by_district(Some("   ")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request: District parameter is required");
    }

    fn payload(name: &str, district: &str) -> VillagePayloadDto {
        VillagePayloadDto {
            name: name.to_string(),
            district: district.to_string(),
            description: format!("{} village", name),
            image: format!("{}.jpg", name.to_lowercase()),
            ..Default::default()
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_replaces_fields_but_keeps_created_at(pool: PgPool) {
        let svc = VillageService::new(pool);
        let created = svc.create(payload("Hampi", "Vijayanagara")).await.unwrap();

        let replacement = VillagePayloadDto {
            location: GeoPoint::new(76.46, 15.33),
            ..payload("  Hampi Bazaar ", "Ballari")
        };
        let updated = svc.update(created.id, replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Hampi Bazaar");
        assert_eq!(updated.district, "Ballari");
        assert_eq!(updated.location.coordinates, [76.46, 15.33]);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_and_delete_unknown_village(pool: PgPool) {
        let svc = VillageService::new(pool);

        let err = svc
            .update(Uuid::new_v4(), payload("Hampi", "Vijayanagara"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found: Village not found");

        let err = svc.delete(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_leaves_reviews_in_place(pool: PgPool) {
        let svc = VillageService::new(pool.clone());
        let village = svc.create(payload("Hampi", "Vijayanagara")).await.unwrap();

        let user_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password_hash) VALUES ('Asha', 'asha@example.com', 'x') RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO reviews (user_id, village_id, rating, comment) VALUES ($1, $2, 5, 'Lovely')")
            .bind(user_id)
            .bind(village.id)
            .execute(&pool)
            .await
            .unwrap();

        svc.delete(village.id).await.unwrap();

        let err = svc.get(village.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE village_id = $1")
            .bind(village.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_search_is_case_insensitive_substring_sorted_by_name(pool: PgPool) {
        let svc = VillageService::new(pool);
        for (name, district) in [
            ("Pochampally", "Yadadri"),
            ("Chandrampalle", "Nalgonda"),
            ("Hampi", "Vijayanagara"),
        ] {
            svc.create(payload(name, district)).await.unwrap();
        }

        let found = svc.search_by_name(Some(" PALL ")).await.unwrap();
        let names: Vec<&str> = found.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Chandrampalle", "Pochampally"]);

        let found = svc.search_by_district(Some("nagar")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Hampi");

        assert!(svc.search_by_name(Some("zzz")).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_search_returns_every_match(pool: PgPool) {
        let svc = VillageService::new(pool);
        for i in 0..120 {
            svc.create(payload(&format!("Kota {:03}", i), "Kota"))
                .await
                .unwrap();
        }

        let found = svc.search_by_district(Some("kota")).await.unwrap();

        assert_eq!(found.len(), 120);
        assert_eq!(found[0].name, "Kota 000");
        assert_eq!(found[119].name, "Kota 119");
    }
}
