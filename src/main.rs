//! Crowdfunding backend entry point.
//!
//! Boots the actix-web HTTP server, connects MongoDB and wires the
//! service graph the handlers consume.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use crowdfund_backend::auth::{IdentityProvider, StaticIdentityProvider};
use crowdfund_backend::config::{
    IdentityConfig, PasswordConfig, RateLimitConfig, ServerConfig, UploadConfig,
};
use crowdfund_backend::db::Database;
use crowdfund_backend::repositories::users::{MongoUserRepository, UserRepository};
use crowdfund_backend::routes::configure_all_routes;
use crowdfund_backend::services::users::{UserManager, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("starting crowdfund backend...");

    let database = Arc::new(
        Database::new()
            .await
            .expect("failed to connect to MongoDB"),
    );

    let repo: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(database));
    let service: Arc<dyn UserService> =
        Arc::new(UserManager::new(repo, PasswordConfig::bcrypt_cost()));
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(StaticIdentityProvider::new(IdentityConfig::static_user_id()));
    let uploads = UploadConfig::load();

    start_http_server(service, identity, uploads).await
}

/// Configures and runs the HTTP server.
///
/// Applies rate limiting, CORS, request logging and path normalization
/// before the routes; the collaborators are shared as app data.
async fn start_http_server(
    service: Arc<dyn UserService>,
    identity: Arc<dyn IdentityProvider>,
    uploads: UploadConfig,
) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("server listening on http://{}", bind_address);
    info!("health check: http://{}/health", bind_address);

    let rate_limit = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(web::Data::from(service.clone()))
            .app_data(web::Data::from(identity.clone()))
            .app_data(web::Data::new(uploads.clone()))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// Loads the env file matching the `PROFILE` variable.
///
/// `PROFILE=prod` loads `.env.prod`, `PROFILE=dev` loads `.env.dev`,
/// anything else falls back to the plain `.env` file.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod loaded"),
            Err(e) => error!("failed to load .env.prod: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev loaded"),
            Err(e) => error!("failed to load .env.dev: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("default .env loaded");
        }
    }
}

/// Initializes env_logger from `RUST_LOG` with an info default.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS settings for local frontend development.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
