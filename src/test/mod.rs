//! In-memory stand-ins for the Postgres repositories and the identity provider.

use std::{collections::HashMap, sync::Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::error::SystemError,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse},
            repository::FriendRequestRepository,
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        identity::{
            error::IdentityError,
            model::{CustomClaims, IdentityUpdate, IdentityUser, NewIdentity, VerifiedToken},
            provider::IdentityProvider,
        },
        session::{repository::SessionRepository, schema::SessionEntity},
        user::{
            model::{InsertUser, UpdateUser, UserResponse},
            repository::UserRepository,
            schema::{UserCredentials, UserEntity},
        },
    },
    utils::Pagination,
};


/// Inserts a live user straight through the Postgres repository.
pub async fn insert_pg_user(pool: &sqlx::PgPool, email: &str) -> Uuid {
    use crate::modules::user::repository_pg::UserRepositoryPg;

    let name = email.split('@').next().unwrap_or(email).to_string();
    UserRepositoryPg::new(pool.clone())
        .create(&InsertUser {
            name,
            email: email.to_lowercase(),
            hash_password: "not-a-hash".to_string(),
            phone: "+15550000".to_string(),
            age: 30,
            gender: "other".to_string(),
            user_uid: format!("uid-{email}"),
        })
        .await
        .unwrap()
}

pub fn user_entity(email: &str, uid: &str) -> UserEntity {
    UserEntity {
        id: Uuid::now_v7(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_lowercase(),
        password: "not-a-hash".to_string(),
        phone_no: "+15550000".to_string(),
        age: 30,
        gender: "other".to_string(),
        user_uid: uid.to_string(),
        created_at: Utc::now(),
        archived_at: None,
    }
}

#[derive(Default)]
pub struct MockUserRepository {
    pub users: Mutex<Vec<UserEntity>>,
    /// Archives the row instead of applying an update, as a concurrent
    /// deletion would.
    pub archive_on_update: bool,
}

impl MockUserRepository {
    pub fn insert(&self, user: UserEntity) -> Uuid {
        let id = user.id;
        self.users.lock().unwrap().push(user);
        id
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id && u.archived_at.is_none()).cloned())
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email && u.archived_at.is_none()).map(|u| {
            UserCredentials { id: u.id, password: u.password.clone(), user_uid: u.user_uid.clone() }
        }))
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, SystemError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email && u.archived_at.is_none()) {
            return Err(SystemError::conflict("Email already exists"));
        }
        let id = Uuid::now_v7();
        users.push(UserEntity {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.hash_password.clone(),
            phone_no: user.phone.clone(),
            age: user.age,
            gender: user.gender.clone(),
            user_uid: user.user_uid.clone(),
            created_at: Utc::now(),
            archived_at: None,
        });
        Ok(id)
    }

    async fn update(&self, id: &Uuid, user: &UpdateUser) -> Result<bool, SystemError> {
        let mut users = self.users.lock().unwrap();
        let Some(row) = users.iter_mut().find(|u| u.id == *id && u.archived_at.is_none()) else {
            return Ok(false);
        };
        if self.archive_on_update {
            row.archived_at = Some(Utc::now());
            return Ok(false);
        }
        if let Some(name) = &user.name {
            row.name = name.clone();
        }
        if let Some(email) = &user.email {
            row.email = email.clone();
        }
        if let Some(hash) = &user.hash_password {
            row.password = hash.clone();
        }
        if let Some(phone) = &user.phone {
            row.phone_no = phone.clone();
        }
        if let Some(age) = user.age {
            row.age = age;
        }
        if let Some(gender) = &user.gender {
            row.gender = gender.clone();
        }
        Ok(true)
    }
}

#[derive(Default)]
pub struct MockSessionRepository {
    pub sessions: Mutex<Vec<SessionEntity>>,
}

impl MockSessionRepository {
    pub fn open_count(&self, user_id: &Uuid) -> usize {
        let sessions = self.sessions.lock().unwrap();
        sessions.iter().filter(|s| s.user_id == *user_id && s.expires_at.is_none()).count()
    }
}

#[async_trait::async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, user_id: &Uuid) -> Result<Uuid, SystemError> {
        let id = Uuid::now_v7();
        self.sessions.lock().unwrap().push(SessionEntity {
            id,
            user_id: *user_id,
            created_at: Utc::now(),
            expires_at: None,
        });
        Ok(id)
    }

    async fn find_open(&self, user_id: &Uuid) -> Result<Option<SessionEntity>, SystemError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .filter(|s| s.user_id == *user_id && s.expires_at.is_none())
            .max_by_key(|s| (s.created_at, s.id))
            .cloned())
    }

    async fn close_latest(&self, user_id: &Uuid) -> Result<bool, SystemError> {
        let mut sessions = self.sessions.lock().unwrap();
        let latest = sessions
            .iter_mut()
            .filter(|s| s.user_id == *user_id && s.expires_at.is_none())
            .max_by_key(|s| (s.created_at, s.id));
        match latest {
            Some(session) => {
                session.expires_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MockIdentityProvider {
    pub accounts: Mutex<Vec<IdentityUser>>,
    pub tokens: Mutex<HashMap<String, VerifiedToken>>,
    /// UIDs passed to `update_user`, in call order.
    pub updated: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_delete: bool,
}

impl MockIdentityProvider {
    /// Makes `token` verify as `verified`.
    pub fn issue_token(&self, token: &str, verified: VerifiedToken) {
        self.tokens.lock().unwrap().insert(token.to_string(), verified);
    }
}

fn api_error(status: u16, code: &str) -> IdentityError {
    IdentityError::Api { status, code: code.to_string(), message: code.to_string() }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_user(&self, user: &NewIdentity) -> Result<IdentityUser, IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email.as_deref() == Some(user.email.as_str())) {
            return Err(api_error(400, "EMAIL_EXISTS"));
        }
        let account = IdentityUser {
            uid: format!("uid-{}", Uuid::now_v7().simple()),
            email: Some(user.email.clone()),
            disabled: false,
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn update_user(&self, uid: &str, changes: &IdentityUpdate) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.uid == uid) {
            if let Some(email) = &changes.email {
                account.email = Some(email.clone());
            }
        }
        self.updated.lock().unwrap().push(uid.to_string());
        Ok(())
    }

    async fn delete_user(&self, uid: &str) -> Result<(), IdentityError> {
        if self.fail_delete {
            return Err(api_error(503, "UNAVAILABLE"));
        }
        self.accounts.lock().unwrap().retain(|a| a.uid != uid);
        self.deleted.lock().unwrap().push(uid.to_string());
        Ok(())
    }

    async fn get_user(&self, uid: &str) -> Result<IdentityUser, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        accounts
            .iter()
            .find(|a| a.uid == uid)
            .cloned()
            .ok_or_else(|| IdentityError::UserNotFound(uid.to_string()))
    }

    async fn verify_id_token(&self, token: &str) -> Result<VerifiedToken, IdentityError> {
        let tokens = self.tokens.lock().unwrap();
        tokens.get(token).cloned().ok_or_else(|| IdentityError::InvalidToken("unknown token".into()))
    }

    fn custom_token(&self, uid: &str, claims: &CustomClaims) -> Result<String, IdentityError> {
        Ok(format!("custom:{}:{}", uid, claims.id))
    }
}

#[derive(Default)]
pub struct MockFriendRequestRepository {
    pub requests: Mutex<Vec<FriendRequestEntity>>,
    /// `(limit, offset)` of every paginated read.
    pub windows: Mutex<Vec<(i64, i64)>>,
}

impl MockFriendRequestRepository {
    fn page<T>(&self, rows: Vec<T>, page: &Pagination) -> Vec<T> {
        self.windows.lock().unwrap().push((page.limit, page.offset()));
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(0);
        rows.into_iter().skip(offset).take(limit).collect()
    }

    fn incoming(&self, user_id: &Uuid, status: FriendRequestStatus) -> Vec<FriendRequestEntity> {
        let requests = self.requests.lock().unwrap();
        requests
            .iter()
            .rev()
            .filter(|r| r.request_to == *user_id && r.status == status && r.archived_at.is_none())
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for MockFriendRequestRepository {
    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, SystemError> {
        let now = Utc::now();
        let request = FriendRequestEntity {
            id: Uuid::now_v7(),
            request_from: *sender_id,
            request_to: *receiver_id,
            status: FriendRequestStatus::Pending,
            created_at: now,
            updated_at: now,
            archived_at: None,
        };
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn find_active_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, SystemError> {
        let requests = self.requests.lock().unwrap();
        Ok(requests
            .iter()
            .rev()
            .find(|r| {
                let pair = (r.request_from == *user_id_a && r.request_to == *user_id_b)
                    || (r.request_from == *user_id_b && r.request_to == *user_id_a);
                pair && r.status != FriendRequestStatus::Rejected && r.archived_at.is_none()
            })
            .cloned())
    }

    async fn find_incoming(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<FriendRequestResponse>, SystemError> {
        let rows = self
            .incoming(user_id, FriendRequestStatus::Pending)
            .into_iter()
            .map(|r| FriendRequestResponse {
                id: r.id,
                user_id: r.request_from,
                name: r.request_from.to_string(),
            })
            .collect();
        Ok(self.page(rows, page))
    }

    async fn update_status(
        &self,
        receiver_id: &Uuid,
        sender_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<bool, SystemError> {
        let mut requests = self.requests.lock().unwrap();
        let pending = requests.iter_mut().find(|r| {
            r.request_to == *receiver_id
                && r.request_from == *sender_id
                && r.status == FriendRequestStatus::Pending
                && r.archived_at.is_none()
        });
        match pending {
            Some(request) => {
                request.status = status;
                request.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_friends(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<FriendResponse>, SystemError> {
        let rows = self
            .incoming(user_id, FriendRequestStatus::Accepted)
            .into_iter()
            .map(|r| FriendResponse { user_id: r.request_from, name: r.request_from.to_string() })
            .collect();
        Ok(self.page(rows, page))
    }

    async fn find_candidates(
        &self,
        user_id: &Uuid,
        page: &Pagination,
    ) -> Result<Vec<UserResponse>, SystemError> {
        let rows = self
            .incoming(user_id, FriendRequestStatus::Pending)
            .into_iter()
            .map(|r| UserResponse {
                id: r.request_from,
                name: r.request_from.to_string(),
                email: format!("{}@example.com", r.request_from.simple()),
                phone: "+15550000".to_string(),
                age: 30,
                gender: "other".to_string(),
            })
            .collect();
        Ok(self.page(rows, page))
    }
}
