#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),
    #[error("Identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Identity provider answered {status}: {message}")]
    Api { status: u16, code: String, message: String },
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid identity token: {0}")]
    InvalidToken(String),
    #[error("Identity account {0} not found")]
    UserNotFound(String),
}
