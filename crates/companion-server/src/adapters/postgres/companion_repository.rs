//! PostgreSQL implementation of CompanionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use companion::{Companion, CompanionFilter, CompanionRepository, DomainError};

use super::repository_error;

/// PostgreSQL implementation of CompanionRepository
pub struct PgCompanionRepository {
    pool: PgPool,
}

impl PgCompanionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CompanionRow {
    id: Uuid,
    user_id: String,
    user_name: String,
    category_id: Uuid,
    name: String,
    description: String,
    instructions: String,
    seed: String,
    src: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CompanionRow> for Companion {
    fn from(row: CompanionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            instructions: row.instructions,
            seed: row.seed,
            src: row.src,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CompanionRepository for PgCompanionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Companion>, DomainError> {
        let row = sqlx::query_as::<_, CompanionRow>("SELECT * FROM companions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<Companion>, DomainError> {
        let row = sqlx::query_as::<_, CompanionRow>(
            "SELECT * FROM companions WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Into::into))
    }

    async fn search(&self, filter: &CompanionFilter) -> Result<Vec<Companion>, DomainError> {
        let rows = sqlx::query_as::<_, CompanionRow>(
            r#"
            SELECT * FROM companions
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.name_pattern())
        .bind(filter.category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, companion: &Companion) -> Result<Companion, DomainError> {
        let row = sqlx::query_as::<_, CompanionRow>(
            r#"
            INSERT INTO companions
                (id, user_id, user_name, category_id, name, description, instructions, seed, src)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(companion.id)
        .bind(&companion.user_id)
        .bind(&companion.user_name)
        .bind(companion.category_id)
        .bind(&companion.name)
        .bind(&companion.description)
        .bind(&companion.instructions)
        .bind(&companion.seed)
        .bind(&companion.src)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.into())
    }

    async fn update(&self, companion: &Companion) -> Result<Companion, DomainError> {
        let row = sqlx::query_as::<_, CompanionRow>(
            r#"
            UPDATE companions
            SET user_name = $3, category_id = $4, name = $5, description = $6,
                instructions = $7, seed = $8, src = $9, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(companion.id)
        .bind(&companion.user_id)
        .bind(&companion.user_name)
        .bind(companion.category_id)
        .bind(&companion.name)
        .bind(&companion.description)
        .bind(&companion.instructions)
        .bind(&companion.seed)
        .bind(&companion.src)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("Companion", companion.id))
    }

    async fn delete_for_user(&self, id: Uuid, user_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM companions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(result.rows_affected() > 0)
    }
}
