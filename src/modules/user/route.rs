use crate::modules::user::handle::*;
use actix_web::web::ServiceConfig;

pub fn public_configure(cfg: &mut ServiceConfig) {
    cfg.service(register).service(login);
}

/// Mounted under the authenticated `/user` scope.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(update_user).service(logout);
}
