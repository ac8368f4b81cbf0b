//! PostgreSQL implementation of EngagementRepository
//!
//! Every mutation is a single statement, so two writers hitting the same
//! poem serialize on the row lock and both land. The JSONB edits rebuild the
//! comment array in place; insertion order is preserved via WITH ORDINALITY.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;

use verse_core::entities::{Comment, EngagementRecord, Reply};
use verse_core::traits::{EngagementRepository, RepoResult};
use verse_core::value_objects::{EngagementId, PoemId};

use crate::mappers::into_entry;
use crate::models::EngagementModel;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of EngagementRepository
#[derive(Clone)]
pub struct PgEngagementRepository {
    pool: PgPool,
}

impl PgEngagementRepository {
    /// Create a new PgEngagementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PgEngagementRepository {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> RepoResult<HashMap<PoemId, EngagementRecord>> {
        let results = sqlx::query_as::<_, EngagementModel>(
            r#"
            SELECT poem_id, likes, comments
            FROM engagements
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(into_entry).collect())
    }

    #[instrument(skip(self))]
    async fn increment_likes(&self, poem_id: &PoemId) -> RepoResult<EngagementRecord> {
        let model = sqlx::query_as::<_, EngagementModel>(
            r#"
            INSERT INTO engagements (poem_id, likes)
            VALUES ($1, 1)
            ON CONFLICT (poem_id)
            DO UPDATE SET likes = engagements.likes + 1, updated_at = now()
            RETURNING poem_id, likes, comments
            "#,
        )
        .bind(poem_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EngagementRecord::from(model))
    }

    #[instrument(skip(self, comment))]
    async fn append_comment(
        &self,
        poem_id: &PoemId,
        comment: &Comment,
    ) -> RepoResult<EngagementRecord> {
        let model = sqlx::query_as::<_, EngagementModel>(
            r#"
            INSERT INTO engagements (poem_id, comments)
            VALUES ($1, jsonb_build_array($2::jsonb))
            ON CONFLICT (poem_id)
            DO UPDATE SET comments = engagements.comments || $2::jsonb, updated_at = now()
            RETURNING poem_id, likes, comments
            "#,
        )
        .bind(poem_id.as_str())
        .bind(Json(comment))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EngagementRecord::from(model))
    }

    #[instrument(skip(self, reply))]
    async fn append_reply(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        reply: &Reply,
    ) -> RepoResult<EngagementRecord> {
        let model = sqlx::query_as::<_, EngagementModel>(
            r#"
            UPDATE engagements
            SET comments = (
                    SELECT jsonb_agg(
                               CASE
                                   WHEN c.value ->> 'id' = $2
                                   THEN jsonb_set(
                                            c.value,
                                            '{replies}',
                                            COALESCE(c.value -> 'replies', '[]'::jsonb) || $3::jsonb
                                        )
                                   ELSE c.value
                               END
                               ORDER BY c.idx
                           )
                    FROM jsonb_array_elements(engagements.comments) WITH ORDINALITY AS c(value, idx)
                ),
                updated_at = now()
            WHERE poem_id = $1
              AND engagements.comments @> jsonb_build_array(jsonb_build_object('id', $2::text))
            RETURNING poem_id, likes, comments
            "#,
        )
        .bind(poem_id.as_str())
        .bind(comment_id.to_string())
        .bind(Json(reply))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model
            .map(EngagementRecord::from)
            .ok_or_else(|| comment_not_found(poem_id, comment_id))
    }

    #[instrument(skip(self))]
    async fn bump_reaction(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        emoji: &str,
    ) -> RepoResult<EngagementRecord> {
        let model = sqlx::query_as::<_, EngagementModel>(
            r#"
            UPDATE engagements
            SET comments = (
                    SELECT jsonb_agg(
                               CASE
                                   WHEN c.value ->> 'id' = $2
                                   THEN jsonb_set(
                                            c.value,
                                            ARRAY['reactions', $3],
                                            to_jsonb(COALESCE((c.value -> 'reactions' ->> $3)::bigint, 0) + 1)
                                        )
                                   ELSE c.value
                               END
                               ORDER BY c.idx
                           )
                    FROM jsonb_array_elements(engagements.comments) WITH ORDINALITY AS c(value, idx)
                ),
                updated_at = now()
            WHERE poem_id = $1
              AND engagements.comments @> jsonb_build_array(jsonb_build_object('id', $2::text))
            RETURNING poem_id, likes, comments
            "#,
        )
        .bind(poem_id.as_str())
        .bind(comment_id.to_string())
        .bind(emoji)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model
            .map(EngagementRecord::from)
            .ok_or_else(|| comment_not_found(poem_id, comment_id))
    }
}
