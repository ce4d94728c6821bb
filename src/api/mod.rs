mod chain;
mod health;
pub mod models;
mod tx;

use actix_web::web::{self, ServiceConfig};
use log::warn;

use crate::error::ApiError;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        warn!("rejected JSON payload: {err}");
        ApiError::InvalidPayload(err.to_string()).into()
    });

    cfg.app_data(json_config)
        .service(health::health_check)
        .service(tx::post_transaction)
        .service(tx::get_pending)
        .service(chain::mine_block)
        .service(chain::get_chain);
}
