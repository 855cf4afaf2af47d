use log::{error, info, warn};
use uuid::Uuid;

use crate::{
    api::error::SystemError,
    modules::{
        identity::{model::NewIdentity, provider::IdentityProvider},
        user::{
            model::{InsertUser, RegisterModel},
            repository::UserRepository,
        },
    },
    utils::hash_password,
};

/// Registration spans the identity provider and the local store with no shared
/// transaction. The provider account is created first and deleted again if the
/// local row cannot be written.
pub struct RegistrationSaga<'a> {
    users: &'a (dyn UserRepository + Send + Sync),
    identity: &'a (dyn IdentityProvider + Send + Sync),
}

impl<'a> RegistrationSaga<'a> {
    pub fn new(
        users: &'a (dyn UserRepository + Send + Sync),
        identity: &'a (dyn IdentityProvider + Send + Sync),
    ) -> Self {
        RegistrationSaga { users, identity }
    }

    pub async fn run(&self, user: RegisterModel) -> Result<Uuid, SystemError> {
        let email = user.email.to_lowercase();

        let account = self
            .identity
            .create_user(&NewIdentity {
                email: email.clone(),
                password: user.password.clone(),
                display_name: user.name.clone(),
                phone_number: user.phone.clone(),
            })
            .await?;

        match self.create_local(user, email, &account.uid).await {
            Ok(id) => {
                info!("Registered user {} with identity {}", id, account.uid);
                Ok(id)
            }
            Err(e) => {
                self.compensate(&account.uid).await;
                Err(e)
            }
        }
    }

    async fn create_local(
        &self,
        user: RegisterModel,
        email: String,
        uid: &str,
    ) -> Result<Uuid, SystemError> {
        let hash_password = hash_password(&user.password)?;

        self.users
            .create(&InsertUser {
                name: user.name,
                email,
                hash_password,
                phone: user.phone,
                age: user.age,
                gender: user.gender,
                user_uid: uid.to_string(),
            })
            .await
    }

    async fn compensate(&self, uid: &str) {
        match self.identity.delete_user(uid).await {
            Ok(()) => warn!("Registration rolled back, deleted identity {}", uid),
            Err(e) => error!(
                target: "reconciliation",
                "Orphaned identity account {} left after failed registration: {}", uid, e
            ),
        }
    }
}
