use actix_web::{get, post, put, web};

use crate::{
    api::{error, success},
    middlewares::Principal,
    modules::{
        friend::{
            model::{
                FriendRequestResponse, FriendResponse, SendFriendRequestModel,
                UpdateFriendRequestModel,
            },
            schema::FriendRequestEntity,
            service::FriendService,
        },
        user::model::{UpdatedResponse, UserResponse},
    },
    utils::{Pagination, ValidatedJson, ValidatedQuery},
};

#[post("/")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendService>,
    principal: Principal,
    body: ValidatedJson<SendFriendRequestModel>,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let request = friend_service.send_friend_request(principal.user_id, body.0.request_to).await?;
    Ok(success::Success::ok(request))
}

#[get("/")]
pub async fn list_friend_requests(
    friend_service: web::Data<FriendService>,
    principal: Principal,
    query: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let requests = friend_service.get_friend_requests(principal.user_id, query.0).await?;
    Ok(success::Success::ok(requests))
}

#[put("/")]
pub async fn update_friend_request(
    friend_service: web::Data<FriendService>,
    principal: Principal,
    body: ValidatedJson<UpdateFriendRequestModel>,
) -> Result<success::Success<UpdatedResponse>, error::Error> {
    let updated = friend_service.update_friend_request(principal.user_id, body.0).await?;
    Ok(success::Success::ok(UpdatedResponse { updated }))
}

#[get("/friends")]
pub async fn list_friends(
    friend_service: web::Data<FriendService>,
    principal: Principal,
    query: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let friends = friend_service.get_friends(principal.user_id, query.0).await?;
    Ok(success::Success::ok(friends))
}

/// Users with a pending request to the caller.
#[get("/")]
pub async fn list_candidates(
    friend_service: web::Data<FriendService>,
    principal: Principal,
    query: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let users = friend_service.get_candidates(principal.user_id, query.0).await?;
    Ok(success::Success::ok(users))
}
