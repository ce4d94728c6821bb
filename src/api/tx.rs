use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};
use crate::error::ApiError;

/// Queue a transfer for the next mined block.
///
/// Field contents are not validated; only presence is checked.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, ApiError> {
    let NewTxRequest {
        sender: Some(sender),
        recipient: Some(recipient),
        amount: Some(amount),
    } = body.into_inner()
    else {
        warn!("POST /transactions/new - rejected: missing sender, recipient or amount");
        return Err(ApiError::MissingValues);
    };

    debug!(
        "POST /transactions/new - {} -> {} ({})",
        sender, recipient, amount
    );

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(sender, recipient, amount)
    };

    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

/// List transfers waiting for the next block.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let pool = ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pool.len(),
        transactions: pool.iter().collect(),
    })
}
