use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct RegisterModel {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: String,
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i32,
    #[validate(length(min = 1, message = "Gender cannot be empty"))]
    pub gender: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginModel {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Default, Deserialize, Validate)]
pub struct UpdateUserModel {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,
    #[validate(length(min = 1, message = "Gender cannot be empty"))]
    pub gender: Option<String>,
}

impl UpdateUserModel {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.phone.is_none()
            && self.age.is_none()
            && self.gender.is_none()
    }
}

pub struct InsertUser {
    pub name: String,
    pub email: String,
    pub hash_password: String,
    pub phone: String,
    pub age: i32,
    pub gender: String,
    pub user_uid: String,
}

#[derive(Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub hash_password: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: uuid::Uuid,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct UpdatedResponse {
    pub updated: bool,
}

/// Public profile; never carries the password hash.
#[derive(Debug, Clone, Deserialize, Serialize, FromRow)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub gender: String,
}
