use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod service;
mod store;
mod utils;

#[cfg(test)]
mod tests;

use config::Config;
use db::{init_db, run_migrations};
use service::{AttendanceService, EmployeeService};
use store::{Store, mysql::MySqlStore};

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "HR records service"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!(addr = %config.server_addr, prefix = %config.api_prefix, "Server starting...");

    let pool = init_db(&config).await?;
    run_migrations(&pool).await?;

    let store: Arc<dyn Store> = Arc::new(MySqlStore::new(pool));
    let employees = Data::new(EmployeeService::new(store.clone()));
    let attendance = Data::new(AttendanceService::new(store));
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(employees.clone())
            .app_data(attendance.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(config.server_addr.as_str())?
    .run()
    .await?;

    Ok(())
}
