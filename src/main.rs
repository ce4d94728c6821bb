use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use pow_ledger::api::{self, AppState};
use pow_ledger::blockchain::canonical::CANONICAL_ENCODING_VERSION;
use pow_ledger::config::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    println!(
        "⛓️ Starting ledger node at http://{}:{}",
        settings.host, settings.port
    );
    info!(
        "node id {} (difficulty={}, mine timeout={:?}, block encoding v{})",
        settings.node_id,
        settings.pow.difficulty(),
        settings.mine_timeout,
        CANONICAL_ENCODING_VERSION
    );

    let state = web::Data::new(AppState::from_settings(&settings));

    // Stop any in-flight proof search once shutdown is requested; the
    // blocking pool would otherwise keep the process alive until it finishes.
    let shutdown = state.shutdown.clone();
    actix_web::rt::spawn(async move {
        if actix_web::rt::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, cancelling mining");
            shutdown.cancel();
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
