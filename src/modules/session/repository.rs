use uuid::Uuid;

use crate::{api::error, modules::session::schema::SessionEntity};

/// Sessions are never deleted: a session is open while `expires_at` is NULL.
#[async_trait::async_trait]
pub trait SessionRepository {
    async fn create(&self, user_id: &Uuid) -> Result<Uuid, error::SystemError>;

    /// Most recent open session of the user, if any.
    async fn find_open(&self, user_id: &Uuid) -> Result<Option<SessionEntity>, error::SystemError>;

    /// Closes the most recent open session; `false` when there was none.
    async fn close_latest(&self, user_id: &Uuid) -> Result<bool, error::SystemError>;
}
