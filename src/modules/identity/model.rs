use serde::{Deserialize, Serialize};
use uuid::Uuid;

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// The subset of a Google service-account key file the provider needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

pub struct NewIdentity {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone_number: String,
}

#[derive(Default)]
pub struct IdentityUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
}

impl IdentityUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.display_name.is_none()
            && self.phone_number.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub uid: String,
    pub email: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub uid: String,
    pub email: Option<String>,
}

/// Developer claims embedded in the custom token handed out at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomClaims {
    pub id: Uuid,
    pub email: String,
}
