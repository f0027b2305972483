use actix_web::{
    self, App, HttpServer,
    middleware::{from_fn, Logger},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::DocStore,
    middlewares::caller_identity,
    modules::{
        friend::{repository_mem::FriendRepositoryMem, service::FriendService},
        profile::{repository_mem::ProfileRepositoryMem, service::ProfileService},
        user::{repository_mem::UserRepositoryMem, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
mod store;
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
    let store = DocStore::new();

    let user_repo = UserRepositoryMem::new(store.clone());
    let profile_repo = ProfileRepositoryMem::new(store.clone());
    let friend_repo = FriendRepositoryMem::new(store.clone());

    let user_service = UserService::with_dependencies(
        Arc::new(user_repo.clone()),
        Arc::new(profile_repo.clone()),
    );
    let friend_service =
        FriendService::with_dependencies(Arc::new(friend_repo), Arc::new(user_repo));
    let profile_service = ProfileService::with_dependencies(Arc::new(profile_repo));

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .service(health_check)
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(caller_identity))
                        .configure(modules::friend::route::configure)
                        .configure(modules::profile::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
