use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, run_migrations},
    middlewares::authentication,
    modules::{
        friend::{repository_pg::FriendRequestRepositoryPg, service::FriendService},
        identity::firebase::FirebaseProvider,
        session::repository_pg::SessionRepositoryPg,
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    run_migrations(&db_pool).await.map_err(|e| std::io::Error::other(e.to_string()))?;

    let identity = Arc::new(
        FirebaseProvider::from_credentials_json(&ENV.firebase_key)
            .map_err(|e| std::io::Error::other(format!("Invalid FIREBASE_KEY: {e}")))?,
    );

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRequestRepositoryPg::new(db_pool.clone()));

    let user_service =
        UserService::with_dependencies(user_repo.clone(), session_repo, identity);
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo);

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .service(health_check)
            .configure(modules::user::route::public_configure)
            .service(
                web::scope("/user")
                    .wrap(from_fn(authentication))
                    .configure(modules::user::route::configure)
                    .configure(modules::friend::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
