use actix_web::{post, put, web};

use crate::{
    api::{error, success},
    middlewares::Principal,
    modules::user::{
        model::{
            LoginModel, LoginResponse, RegisterModel, RegisterResponse, UpdateUserModel,
            UpdatedResponse,
        },
        service::UserService,
    },
    utils::ValidatedJson,
};

#[post("/register")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<RegisterModel>,
) -> Result<success::Success<RegisterResponse>, error::Error> {
    let id = user_service.register(user_data.0).await?;
    Ok(success::Success::ok(RegisterResponse { id }))
}

#[post("/login")]
pub async fn login(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<LoginModel>,
) -> Result<success::Success<LoginResponse>, error::Error> {
    let token = user_service.login(user_data.0).await?;
    Ok(success::Success::ok(LoginResponse { token }))
}

#[put("/")]
pub async fn update_user(
    user_service: web::Data<UserService>,
    principal: Principal,
    user_data: ValidatedJson<UpdateUserModel>,
) -> Result<success::Success<UpdatedResponse>, error::Error> {
    user_service.update_profile(principal.user_id, user_data.0).await?;
    Ok(success::Success::ok(UpdatedResponse { updated: true }))
}

#[put("/logout")]
pub async fn logout(
    user_service: web::Data<UserService>,
    principal: Principal,
) -> Result<success::Success<()>, error::Error> {
    user_service.logout(principal.user_id).await?;
    Ok(success::Success::no_content())
}
