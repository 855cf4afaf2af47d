use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse},
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::model::UserResponse,
    },
    utils::Pagination,
};

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    /// Latest live request between the two users, in either direction, that
    /// was not rejected.
    async fn find_active_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn find_incoming(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    /// Moves a pending request from `sender_id` to `receiver_id` into `status`.
    /// Returns `false` when no pending request matched.
    async fn update_status(
        &self,
        receiver_id: &Uuid,
        sender_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<bool, error::SystemError>;

    async fn find_friends(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<FriendResponse>, error::SystemError>;

    async fn find_candidates(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<UserResponse>, error::SystemError>;
}
