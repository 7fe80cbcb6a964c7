use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod error;
mod models;
mod repository;
mod service;

use config::Config;
use db::Database;
use service::NoteService;

pub struct AppState {
    pub db: Arc<Database>,
    pub notes: NoteService,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("Notekeep v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Initializing database at {}", config.database_url);
    let db = Arc::new(Database::new(&config.database_url).expect("Failed to initialize database"));

    // Development convenience: issue a session so the API is reachable
    // without an external identity provider.
    if let Some(user_id) = &config.bootstrap_user {
        match db.create_session(user_id) {
            Ok(session) => log::info!("Bootstrap session for {}: {}", user_id, session.token),
            Err(e) => log::warn!("Failed to create bootstrap session: {}", e),
        }
    }

    let server_db = Arc::clone(&db);
    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&server_db),
                notes: NoteService::new(Arc::clone(&server_db) as Arc<dyn repository::NoteRepository>),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::notes::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    log::info!("Server listening on port {}", port);

    let server_handle = server.handle();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        log::info!("Received Ctrl+C, shutting down...");
        server_handle.stop(true).await;
    });

    server.await
}
