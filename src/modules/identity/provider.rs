use crate::modules::identity::{
    error::IdentityError,
    model::{CustomClaims, IdentityUpdate, IdentityUser, NewIdentity, VerifiedToken},
};

/// Hosted identity service that owns credentials and issues tokens.
///
/// One instance is built at startup and shared by every request.
#[async_trait::async_trait]
pub trait IdentityProvider {
    async fn create_user(&self, user: &NewIdentity) -> Result<IdentityUser, IdentityError>;

    async fn update_user(&self, uid: &str, changes: &IdentityUpdate)
    -> Result<(), IdentityError>;

    async fn delete_user(&self, uid: &str) -> Result<(), IdentityError>;

    async fn get_user(&self, uid: &str) -> Result<IdentityUser, IdentityError>;

    /// Checks signature, audience, issuer and expiry of a client ID token.
    async fn verify_id_token(&self, token: &str) -> Result<VerifiedToken, IdentityError>;

    /// Mints a token the client exchanges with the provider for an ID token.
    fn custom_token(&self, uid: &str, claims: &CustomClaims) -> Result<String, IdentityError>;
}
