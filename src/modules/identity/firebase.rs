use jsonwebtoken::{
    decode, decode_header, encode, jwk::JwkSet, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::modules::identity::{
    error::IdentityError,
    model::{
        CustomClaims, IdentityUpdate, IdentityUser, NewIdentity, ServiceAccountKey, VerifiedToken,
    },
    provider::IdentityProvider,
};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const SECURE_TOKEN_ISSUER: &str = "https://securetoken.google.com";
const CUSTOM_TOKEN_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";
const ADMIN_SCOPE: &str =
    "https://www.googleapis.com/auth/cloud-platform https://www.googleapis.com/auth/identitytoolkit";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
// Google caps both assertions and custom tokens at one hour.
const TOKEN_LIFETIME_SECS: u64 = 3600;

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Serialize)]
struct CustomTokenClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
    uid: &'a str,
    claims: &'a CustomClaims,
}

#[derive(Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
    phone_number: &'a str,
    email_verified: bool,
    disabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAccountRequest<'a> {
    local_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAccountRequest<'a> {
    local_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupAccountRequest<'a> {
    local_id: [&'a str; 1],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
}

#[derive(Deserialize)]
struct LookupAccountResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Deserialize)]
struct Ignored {}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Detailed { message: String },
    Plain(String),
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorField,
}

impl From<AccountInfo> for IdentityUser {
    fn from(account: AccountInfo) -> Self {
        IdentityUser { uid: account.local_id, email: account.email, disabled: account.disabled }
    }
}

/// Firebase Authentication over the Identity Toolkit REST API.
pub struct FirebaseProvider {
    http: reqwest::Client,
    account: ServiceAccountKey,
    signing_key: EncodingKey,
}

impl FirebaseProvider {
    pub fn from_credentials_json(json: &str) -> Result<Self, IdentityError> {
        let account: ServiceAccountKey =
            serde_json::from_str(json).map_err(|e| IdentityError::Credentials(e.to_string()))?;
        Self::new(account)
    }

    pub fn new(account: ServiceAccountKey) -> Result<Self, IdentityError> {
        let signing_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| IdentityError::Credentials(e.to_string()))?;
        log::info!("Firebase identity provider ready for project {}", account.project_id);
        Ok(Self { http: reqwest::Client::new(), account, signing_key })
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, IdentityError> {
        Ok(encode(&Header::new(Algorithm::RS256), claims, &self.signing_key)?)
    }

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    async fn access_token(&self) -> Result<String, IdentityError> {
        let iat = Self::now();
        let assertion = self.sign(&AssertionClaims {
            iss: &self.account.client_email,
            scope: ADMIN_SCOPE,
            aud: &self.account.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        })?;

        let response = self
            .http
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let grant: AccessTokenResponse = read_response(response).await?;
        Ok(grant.access_token)
    }

    async fn admin_call<B, R>(&self, action: &str, body: &B) -> Result<R, IdentityError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let access_token = self.access_token().await?;
        let url =
            format!("{IDENTITY_TOOLKIT_URL}/projects/{}/{action}", self.account.project_id);
        let response = self.http.post(url).bearer_auth(access_token).json(body).send().await?;
        read_response(response).await
    }

    fn id_token_validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.account.project_id]);
        validation.set_issuer(&[format!("{SECURE_TOKEN_ISSUER}/{}", self.account.project_id)]);
        validation
    }
}

async fn read_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<R>().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

/// Google APIs answer `{"error": {"message": "EMAIL_EXISTS"}}`, the token
/// endpoint answers `{"error": "invalid_grant"}`; messages may carry a
/// `CODE : detail` suffix.
fn api_error(status: u16, body: &str) -> IdentityError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error: ErrorField::Detailed { message } }) => message,
        Ok(ErrorResponse { error: ErrorField::Plain(message) }) => message,
        Err(_) => body.to_string(),
    };
    let code = message.split([' ', ':']).next().unwrap_or_default().to_string();
    IdentityError::Api { status, code, message }
}

#[async_trait::async_trait]
impl IdentityProvider for FirebaseProvider {
    async fn create_user(&self, user: &NewIdentity) -> Result<IdentityUser, IdentityError> {
        let request = CreateAccountRequest {
            email: &user.email,
            password: &user.password,
            display_name: &user.display_name,
            phone_number: &user.phone_number,
            email_verified: true,
            disabled: false,
        };
        let account: AccountInfo = self.admin_call("accounts", &request).await?;
        let mut created = IdentityUser::from(account);
        if created.email.is_none() {
            created.email = Some(user.email.clone());
        }
        Ok(created)
    }

    async fn update_user(
        &self,
        uid: &str,
        changes: &IdentityUpdate,
    ) -> Result<(), IdentityError> {
        if changes.is_empty() {
            return Ok(());
        }
        let request = UpdateAccountRequest {
            local_id: uid,
            email: changes.email.as_deref(),
            password: changes.password.as_deref(),
            display_name: changes.display_name.as_deref(),
            phone_number: changes.phone_number.as_deref(),
        };
        let _: Ignored = self.admin_call("accounts:update", &request).await?;
        Ok(())
    }

    async fn delete_user(&self, uid: &str) -> Result<(), IdentityError> {
        let _: Ignored =
            self.admin_call("accounts:delete", &DeleteAccountRequest { local_id: uid }).await?;
        Ok(())
    }

    async fn get_user(&self, uid: &str) -> Result<IdentityUser, IdentityError> {
        let response: LookupAccountResponse =
            self.admin_call("accounts:lookup", &LookupAccountRequest { local_id: [uid] }).await?;
        response
            .users
            .into_iter()
            .next()
            .map(IdentityUser::from)
            .ok_or_else(|| IdentityError::UserNotFound(uid.to_string()))
    }

    async fn verify_id_token(&self, token: &str) -> Result<VerifiedToken, IdentityError> {
        let header = decode_header(token).map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(IdentityError::InvalidToken(format!("unexpected algorithm {:?}", header.alg)));
        }
        let kid = header.kid.ok_or_else(|| IdentityError::InvalidToken("missing kid".into()))?;

        // Fetched per call; keys are not cached in-process.
        let keys: JwkSet =
            self.http.get(SECURE_TOKEN_JWKS_URL).send().await?.error_for_status()?.json().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| IdentityError::InvalidToken(format!("unknown key id {kid}")))?;
        let key = DecodingKey::from_jwk(jwk)?;

        let data = decode::<IdTokenClaims>(token, &key, &self.id_token_validation())
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
        if data.claims.sub.is_empty() {
            return Err(IdentityError::InvalidToken("empty subject".into()));
        }

        Ok(VerifiedToken { uid: data.claims.sub, email: data.claims.email })
    }

    fn custom_token(&self, uid: &str, claims: &CustomClaims) -> Result<String, IdentityError> {
        let iat = Self::now();
        self.sign(&CustomTokenClaims {
            iss: &self.account.client_email,
            sub: &self.account.client_email,
            aud: CUSTOM_TOKEN_AUDIENCE,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
            uid,
            claims,
        })
    }
}
