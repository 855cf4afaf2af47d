use crate::modules::friend::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friend-request")
            .service(send_friend_request)
            .service(list_friend_requests)
            .service(update_friend_request),
    )
    .service(list_friends)
    .service(list_candidates);
}
