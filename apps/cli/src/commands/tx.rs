use std::collections::HashMap;

use anyhow::{bail, Result};
use folio_core::transactions::{NewTransaction, Transaction, TransactionType, TransactionUpdate};
use folio_core::users::User;

use crate::context::Context;
use crate::output::{self, Output};

pub struct TradeInput {
    pub asset_id: String,
    pub kind: TransactionType,
    pub quantity: String,
    pub price: String,
    pub fees: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Fields to change on an existing trade; `None` keeps the stored value.
pub struct TradeChanges {
    pub asset_id: Option<String>,
    pub kind: Option<TransactionType>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub fees: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl From<TradeChanges> for TransactionUpdate {
    fn from(changes: TradeChanges) -> Self {
        TransactionUpdate {
            asset_id: changes.asset_id,
            transaction_type: changes.kind.map(|k| k.to_string()),
            quantity: changes.quantity.map(Into::into),
            price_per_unit: changes.price.map(Into::into),
            fees: changes.fees.map(Into::into),
            transaction_date: changes.date,
            notes: changes.notes,
        }
    }
}

pub async fn add(ctx: &Context, out: &Output, user: &User, input: TradeInput) -> Result<()> {
    let transaction = ctx
        .transactions
        .create_transaction(
            &user.id,
            NewTransaction {
                asset_id: input.asset_id,
                transaction_type: input.kind,
                quantity: input.quantity.into(),
                price_per_unit: input.price.into(),
                fees: input.fees.map(Into::into),
                transaction_date: input.date,
                notes: input.notes,
            },
        )
        .await?;

    out.emit(&transaction, |tx| {
        format!(
            "Recorded {} of {} @ {} (fees {}) with id {}",
            tx.transaction_type,
            output::quantity(tx.quantity),
            output::money(tx.price_per_unit),
            output::money(tx.fees),
            tx.id
        )
    })
}

pub fn list(
    ctx: &Context,
    out: &Output,
    user: &User,
    symbol: Option<&str>,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<()> {
    let transactions = match symbol {
        Some(symbol) => {
            let asset_id = ctx.resolve_asset_id(user, Some(symbol), None)?;
            ctx.transactions
                .list_transactions_for_asset(&asset_id, &user.id)?
        }
        None => ctx.transactions.list_transactions(&user.id, skip, limit)?,
    };

    let symbols: HashMap<String, String> = ctx
        .assets
        .list_all_assets(&user.id)?
        .into_iter()
        .map(|a| (a.id, a.symbol))
        .collect();

    out.emit(&transactions, |transactions| render(transactions, &symbols))
}

pub async fn edit(
    ctx: &Context,
    out: &Output,
    user: &User,
    id: &str,
    changes: TradeChanges,
) -> Result<()> {
    let Some(updated) = ctx
        .transactions
        .update_transaction(id, &user.id, changes.into())
        .await?
    else {
        bail!("Transaction {id} not found");
    };

    out.emit(&updated, |tx| format!("Updated transaction {}", tx.id))
}

pub async fn delete(ctx: &Context, out: &Output, user: &User, id: &str) -> Result<()> {
    if !ctx.transactions.delete_transaction(id, &user.id).await? {
        bail!("Transaction {id} not found");
    }
    out.emit(&serde_json::json!({ "deleted": id }), |_| {
        format!("Deleted transaction {id}")
    })
}

fn render(transactions: &[Transaction], symbols: &HashMap<String, String>) -> String {
    if transactions.is_empty() {
        return "No transactions.".to_string();
    }
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|tx| {
            vec![
                tx.transaction_date.format("%Y-%m-%d %H:%M").to_string(),
                symbols.get(&tx.asset_id).cloned().unwrap_or_default(),
                tx.transaction_type.to_string(),
                output::quantity(tx.quantity),
                output::money(tx.price_per_unit),
                output::money(tx.fees),
                tx.id.clone(),
                tx.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output::table(
        &["DATE", "SYMBOL", "TYPE", "QTY", "PRICE", "FEES", "ID", "NOTES"],
        &rows,
    )
}
