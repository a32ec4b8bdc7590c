//! Transactions module - buy and sell records against assets.

mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_model::{
    normalize_notes, validate_amounts, NewTransaction, Transaction, TransactionType,
    TransactionUpdate, ValidatedAmounts,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
