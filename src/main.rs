mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod mail;
mod middleware;
mod models;
mod routes;
mod seed;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::filter::LevelFilter;

use crate::{
    config::Config, db::db::DBClient, mail::sendmail::Mailer, routes::create_router,
    service::appointment_service::AppointmentService,
};

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub appointment_service: AppointmentService,
    pub mailer: Mailer,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("connected to the database");
            pool
        }
        Err(err) => {
            tracing::error!("failed to connect to the database: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!("failed to run migrations: {}", err);
        std::process::exit(1);
    }

    let db_client = Arc::new(DBClient::new(pool));

    let mailer = match Mailer::new(&config) {
        Ok(mailer) => mailer,
        Err(err) => {
            tracing::error!("failed to build the mail transport: {}", err);
            std::process::exit(1);
        }
    };

    if config.seed_on_startup {
        if let Err(err) = seed::run(&db_client).await {
            tracing::error!("database seed failed: {}", err);
        }
    }

    let app_state = Arc::new(AppState {
        env: config.clone(),
        db_client: db_client.clone(),
        appointment_service: AppointmentService::new(db_client.clone()),
        mailer,
    });

    tokio::spawn(service::background_jobs::start_completion_job(
        app_state.clone(),
    ));

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .app_url
                .parse::<HeaderValue>()
                .expect("APP_URL must be a valid origin"),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    let app = create_router(app_state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind the server address");

    axum::serve(listener, app)
        .await
        .expect("server terminated unexpectedly");
}
