use anyhow::{bail, Result};
use folio_core::assets::{Asset, AssetType, NewAsset};
use folio_core::users::User;

use crate::context::Context;
use crate::output::{self, Output};

pub async fn add(
    ctx: &Context,
    out: &Output,
    user: &User,
    symbol: String,
    name: Option<String>,
    asset_type: AssetType,
) -> Result<()> {
    let asset = ctx
        .assets
        .create_asset(
            &user.id,
            NewAsset {
                symbol,
                name,
                asset_type,
            },
        )
        .await?;

    out.emit(&asset, |asset| {
        format!(
            "Tracking {} ({}) with id {}",
            asset.symbol, asset.asset_type, asset.id
        )
    })
}

pub fn list(
    ctx: &Context,
    out: &Output,
    user: &User,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<()> {
    let assets = ctx.assets.list_assets(&user.id, skip, limit)?;
    out.emit(&assets, |assets| render(assets))
}

pub async fn delete(ctx: &Context, out: &Output, user: &User, symbol: &str) -> Result<()> {
    let Some(asset) = ctx.assets.get_asset_by_symbol(symbol, &user.id)? else {
        bail!("No asset with symbol '{}'", symbol.trim().to_uppercase());
    };
    if !ctx.assets.delete_asset(&asset.id, &user.id).await? {
        bail!("Asset {} not found", asset.id);
    }

    out.emit(&asset, |asset| {
        format!("Deleted {} and its transactions", asset.symbol)
    })
}

fn render(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return "No assets tracked.".to_string();
    }
    let rows: Vec<Vec<String>> = assets
        .iter()
        .map(|a| {
            vec![
                a.symbol.clone(),
                a.asset_type.to_string(),
                a.name.clone().unwrap_or_default(),
                a.id.clone(),
            ]
        })
        .collect();
    output::table(&["SYMBOL", "TYPE", "NAME", "ID"], &rows)
}
