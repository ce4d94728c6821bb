use actix_web::{HttpResponse, Responder, get, web};
use log::warn;

use super::models::{AppState, MineResponse};
use crate::error::ApiError;

/// Get the full chain and its length.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let snapshot = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.snapshot()
    };
    HttpResponse::Ok().json(snapshot)
}

/// Mine a new block from the current pool.
///
/// The proof search is CPU-bound, so it runs on the blocking thread pool
/// instead of an async worker. It polls a child of the shutdown token, which
/// a timer task also cancels once the configured timeout elapses.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let cancel = state.shutdown.child_token();
    let deadline = state.mine_timeout.map(|timeout| {
        let expire = cancel.clone();
        actix_web::rt::spawn(async move {
            actix_web::rt::time::sleep(timeout).await;
            expire.cancel();
        })
    });

    let worker = state.clone();
    let mined = web::block(move || worker.mine_next_block(&cancel)).await;
    if let Some(timer) = deadline {
        timer.abort();
    }

    let block = mined.map_err(|e| {
        warn!("MINER - blocking task failed: {e}");
        ApiError::MiningFailed
    })??;

    Ok(HttpResponse::Ok().json(MineResponse::from(block)))
}
