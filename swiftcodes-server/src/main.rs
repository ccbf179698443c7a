#![warn(clippy::dbg_macro)]

use std::time::Duration;

use actix_web::{App, HttpServer, middleware};
use swiftcodes_server::error::{IoErrorContext, Result};
use swiftcodes_server::metrics::MetricsMiddleware;
use swiftcodes_server::{app_data, config, configure};

async fn inner_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load()?;

    // Open (and create) the database up front so a bad path fails at startup.
    config.store.get_db().await?;

    let bind = config.bind.clone();
    let workers = config.workers;
    let max_connection_rate = config.max_connection_rate;
    let (config_data, metrics_data) = app_data(config)?;
    let metrics = metrics_data.get_ref().clone();

    log::info!(
        "serving {} on {bind}",
        config_data.store.database_path().display()
    );
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Condition::new(
                config_data.enable_compression,
                middleware::Compress::default(),
            ))
            .wrap(MetricsMiddleware::new(metrics.clone()))
            .wrap(middleware::Logger::default())
            .app_data(config_data.clone())
            .app_data(metrics_data.clone())
            .configure(configure)
    })
    // default is 5 seconds, which is too small when doing mass requests on slow machines
    .client_request_timeout(Duration::from_secs(30))
    .workers(workers)
    .max_connection_rate(max_connection_rate)
    .bind(bind)
    .io_context("Failed to bind server")?
    .run()
    .await
    .io_context("Failed to start server")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    inner_main().await.map_err(std::io::Error::other)
}
