//! Append-only proof-of-work ledger with a small HTTP front end.
//!
//! The engine lives in [`blockchain`] and [`transaction`]; [`api`] exposes
//! it over actix-web as submit-transaction, mine and read-chain routes.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod node;
pub mod transaction;
