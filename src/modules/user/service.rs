use log::{debug, error, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::constants::SESSION_EXPIRED;
use crate::modules::identity::{
    model::{CustomClaims, IdentityUpdate},
    provider::IdentityProvider,
};
use crate::modules::session::repository::SessionRepository;
use crate::modules::user::model::{LoginModel, RegisterModel, UpdateUser, UpdateUserModel};
use crate::modules::user::{repository::UserRepository, saga::RegistrationSaga};
use crate::utils::{hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    sessions: Arc<dyn SessionRepository + Send + Sync>,
    identity: Arc<dyn IdentityProvider + Send + Sync>,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        sessions: Arc<dyn SessionRepository + Send + Sync>,
        identity: Arc<dyn IdentityProvider + Send + Sync>,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, sessions, identity }
    }

    pub async fn register(&self, user: RegisterModel) -> Result<Uuid, error::SystemError> {
        RegistrationSaga::new(self.repo.as_ref(), self.identity.as_ref()).run(user).await
    }

    pub async fn login(&self, user: LoginModel) -> Result<String, error::SystemError> {
        let email = user.email.to_lowercase();

        let credentials = self
            .repo
            .find_credentials_by_email(&email)
            .await?
            .ok_or_else(|| error::SystemError::bad_request("Wrong details"))?;

        if !verify_password(&credentials.password, &user.password)? {
            return Err(error::SystemError::unauthorized("Wrong password"));
        }

        let token = self
            .identity
            .custom_token(&credentials.user_uid, &CustomClaims { id: credentials.id, email })?;

        self.sessions.create(&credentials.id).await?;
        info!("User {} logged in", credentials.id);
        Ok(token)
    }

    /// Resolves a client ID token to the local user id. The user must still
    /// hold an open session.
    pub async fn authenticate(&self, token: &str) -> Result<Uuid, error::SystemError> {
        let verified = self.identity.verify_id_token(token).await?;

        let email = match verified.email {
            Some(email) => email,
            None => {
                let account = self.identity.get_user(&verified.uid).await?;
                if account.disabled {
                    return Err(error::SystemError::unauthorized("Account disabled"));
                }
                account.email.ok_or_else(|| error::SystemError::unauthorized("Invalid token"))?
            }
        };

        let credentials = self
            .repo
            .find_credentials_by_email(&email.to_lowercase())
            .await?
            .filter(|credentials| credentials.user_uid == verified.uid)
            .ok_or_else(|| error::SystemError::unauthorized("Invalid token"))?;

        self.sessions
            .find_open(&credentials.id)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized(SESSION_EXPIRED))?;

        Ok(credentials.id)
    }

    pub async fn logout(&self, user_id: Uuid) -> Result<(), error::SystemError> {
        if !self.sessions.close_latest(&user_id).await? {
            debug!("No open session to close for user {}", user_id);
        }
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: UpdateUserModel,
    ) -> Result<(), error::SystemError> {
        if changes.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let email = changes.email.map(|email| email.to_lowercase());
        if let Some(email) = &email {
            let taken = self.repo.find_credentials_by_email(email).await?;
            if taken.is_some_and(|other| other.id != user_id) {
                return Err(error::SystemError::conflict("Email already exists"));
            }
        }
        let hash_password = changes.password.as_deref().map(hash_password).transpose()?;

        let identity_update = IdentityUpdate {
            email: email.clone(),
            password: changes.password,
            display_name: changes.name.clone(),
            phone_number: changes.phone.clone(),
        };
        if !identity_update.is_empty() {
            self.identity.update_user(&user.user_uid, &identity_update).await?;
        }

        let update_user = UpdateUser {
            name: changes.name,
            email,
            hash_password,
            phone: changes.phone,
            age: changes.age,
            gender: changes.gender,
        };

        let err = match self.repo.update(&user_id, &update_user).await {
            Ok(true) => return Ok(()),
            Ok(false) => error::SystemError::not_found("User not found"),
            Err(e) => e,
        };
        if !identity_update.is_empty() {
            error!(
                target: "reconciliation",
                "Identity {} updated but user {} was not: {}", user.user_uid, user_id, err
            );
        }
        Err(err)
    }
}
