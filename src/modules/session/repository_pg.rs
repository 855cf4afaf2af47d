use uuid::Uuid;

use crate::{
    api::error,
    modules::session::{repository::SessionRepository, schema::SessionEntity},
};

#[derive(Clone)]
pub struct SessionRepositoryPg {
    pool: sqlx::PgPool,
}

impl SessionRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SessionRepository for SessionRepositoryPg {
    async fn create(&self, user_id: &Uuid) -> Result<Uuid, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        sqlx::query("INSERT INTO sessions (id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_open(&self, user_id: &Uuid) -> Result<Option<SessionEntity>, error::SystemError> {
        let session = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT *
            FROM sessions
            WHERE user_id = $1
            AND expires_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn close_latest(&self, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE sessions
            SET expires_at = NOW()
            WHERE id IN (
                SELECT id
                FROM sessions
                WHERE user_id = $1
                AND expires_at IS NULL
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            AND user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}
