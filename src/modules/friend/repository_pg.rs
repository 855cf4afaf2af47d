use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse},
            repository::FriendRequestRepository,
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::model::UserResponse,
    },
    utils::Pagination,
};

#[derive(Clone)]
pub struct FriendRequestRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRequestRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendRequestRepositoryPg {
    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            INSERT INTO friend_request (id, request_from, request_to)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_active_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_request
            WHERE (
                (request_from = $1 AND request_to = $2)
                OR (request_from = $2 AND request_to = $1)
            )
            AND status <> $3
            AND archived_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .bind(FriendRequestStatus::Rejected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_incoming(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestResponse>(
            r#"
            SELECT
                fr.id,
                u.id AS user_id,
                u.name
            FROM friend_request fr
            JOIN users u ON u.id = fr.request_from
            WHERE fr.request_to = $1
            AND fr.status = $2
            AND fr.archived_at IS NULL
            AND u.archived_at IS NULL
            ORDER BY fr.created_at DESC, fr.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(FriendRequestStatus::Pending)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn update_status(
        &self,
        receiver_id: &Uuid,
        sender_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE friend_request
            SET status = $1, updated_at = NOW()
            WHERE request_to = $2
            AND request_from = $3
            AND status = $4
            AND archived_at IS NULL
            "#,
        )
        .bind(status)
        .bind(receiver_id)
        .bind(sender_id)
        .bind(FriendRequestStatus::Pending)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn find_friends(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
            SELECT
                u.id AS user_id,
                u.name
            FROM friend_request fr
            JOIN users u ON u.id = fr.request_from
            WHERE fr.request_to = $1
            AND fr.status = $2
            AND fr.archived_at IS NULL
            AND u.archived_at IS NULL
            ORDER BY fr.updated_at DESC, fr.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(FriendRequestStatus::Accepted)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn find_candidates(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = sqlx::query_as::<_, UserResponse>(
            r#"
            SELECT
                u.id,
                u.name,
                u.email,
                u.phone_no AS phone,
                u.age,
                u.gender
            FROM users u
            JOIN friend_request fr ON fr.request_from = u.id
            WHERE fr.request_to = $1
            AND fr.status = $2
            AND u.id <> $1
            AND fr.archived_at IS NULL
            AND u.archived_at IS NULL
            ORDER BY fr.created_at DESC, fr.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(FriendRequestStatus::Pending)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
