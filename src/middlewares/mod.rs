use actix_web::{
    body::MessageBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::{self, HeaderMap},
    middleware::Next,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{api::error, modules::user::service::UserService};

/// The authenticated caller, attached by [`authentication`].
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: Uuid,
}

impl FromRequest for Principal {
    type Error = error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .copied()
                .ok_or_else(|| error::Error::unauthorized("Unauthorized")),
        )
    }
}

/// Clients send the provider ID token in the `token` header; a bearer
/// `Authorization` header is accepted as well.
fn request_token(headers: &HeaderMap) -> Option<&str> {
    let token = match headers.get("token") {
        Some(value) => value.to_str().ok(),
        None => headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ")),
    };
    token.map(str::trim).filter(|t| !t.is_empty())
}

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let token = match request_token(req.headers()) {
        Some(t) => t.to_string(),
        None => {
            return Err(error::Error::unauthorized("Missing token").into());
        }
    };

    let user_service = req.app_data::<web::Data<UserService>>().cloned().ok_or_else(|| {
        log::error!("UserService is not registered as app data");
        error::Error::internal_server_error()
    })?;

    let user_id = user_service.authenticate(&token).await.map_err(error::Error::from)?;

    req.extensions_mut().insert(Principal { user_id });

    next.call(req).await
}
