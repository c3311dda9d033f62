//! Transactions and their conversion into other currencies.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the rules for creating one
//! - The `TransactionService` that ties the ledger and exchange rates together
//! - Route handlers for creating and retrieving transactions

mod core;
mod create_endpoint;
mod id;
mod retrieve_endpoint;
mod service;

pub use self::core::{
    AMOUNT_SCALE, ConversionResult, CreateTransactionRequest, CreateTransactionResponse,
    MAX_DESCRIPTION_LENGTH, NewTransaction, RetrieveTransactionQuery, Transaction, validate_id,
};
pub use create_endpoint::create_transaction_endpoint;
pub use id::{IdGenerator, new_uuid, uuid_generator};
pub use retrieve_endpoint::retrieve_transaction_endpoint;
pub use service::TransactionService;
