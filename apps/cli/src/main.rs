use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use folio_core::assets::AssetType;
use folio_core::transactions::TransactionType;

mod commands;
mod context;
mod output;
mod prompt;

use context::{Credentials, QuoteArgs};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio portfolio tracker", long_about = None, version)]
struct Cli {
    /// SQLite database file (`sqlite://` URLs are accepted)
    #[arg(long, global = true, env = "DATABASE_URL")]
    database: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Log output format on stderr (text | json)
    #[arg(long, global = true, env = "FOLIO_LOG_FORMAT", default_value = "text")]
    log_format: String,

    #[command(flatten)]
    credentials: Credentials,

    #[command(flatten)]
    quotes: QuoteArgs,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account. Prompts for the password when it is not given.
    Register {
        #[arg(long)]
        email: String,

        /// Password confirmation
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Tracked assets
    Asset {
        #[command(subcommand)]
        cmd: AssetCmd,
    },

    /// Buy and sell transactions
    Tx {
        #[command(subcommand)]
        cmd: TxCmd,
    },

    /// Open positions valued at current prices
    Portfolio,

    /// Realized gains from sells
    Realized {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
}

#[derive(Subcommand)]
enum AssetCmd {
    /// Start tracking a symbol
    Add {
        #[arg(long)]
        symbol: String,

        #[arg(long)]
        name: Option<String>,

        /// STOCK | CRYPTO | ETF | MUTUAL_FUND | OTHER
        #[arg(long = "type", default_value = "stock")]
        asset_type: AssetType,
    },

    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Stop tracking a symbol and drop its transactions
    Delete { symbol: String },
}

#[derive(Subcommand)]
enum TxCmd {
    /// Record a trade
    Add {
        #[command(flatten)]
        target: AssetTarget,

        /// BUY | SELL
        #[arg(long = "type")]
        kind: TransactionType,

        #[arg(long)]
        quantity: String,

        /// Price per unit
        #[arg(long)]
        price: String,

        #[arg(long)]
        fees: Option<String>,

        /// Trade date or date-time; defaults to now
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List trades, newest first; oldest first when filtered by symbol
    List {
        #[arg(long)]
        symbol: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Change fields of a recorded trade
    Edit {
        id: String,

        /// Move the trade to another tracked symbol
        #[arg(long)]
        symbol: Option<String>,

        #[arg(long = "type")]
        kind: Option<TransactionType>,

        #[arg(long)]
        quantity: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        fees: Option<String>,

        #[arg(long)]
        date: Option<String>,

        /// Empty string clears the notes
        #[arg(long)]
        notes: Option<String>,
    },

    Delete { id: String },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct AssetTarget {
    #[arg(long)]
    symbol: Option<String>,

    #[arg(long)]
    asset_id: Option<String>,
}

#[derive(Args)]
struct PageArgs {
    #[arg(long)]
    skip: Option<i64>,

    #[arg(long)]
    limit: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    context::init_tracing(&cli.log_format);

    let db_path = context::resolve_db_path(cli.database.as_deref());
    let ctx = context::Context::open(&db_path, &cli.quotes).await?;
    let out = output::Output::new(cli.json);

    match cli.cmd {
        Commands::Register { email, confirm } => {
            commands::user::register(&ctx, &out, &cli.credentials, email, confirm).await?;
        }
        Commands::Asset { cmd } => {
            let user = ctx.authenticate(&cli.credentials)?;
            match cmd {
                AssetCmd::Add {
                    symbol,
                    name,
                    asset_type,
                } => commands::asset::add(&ctx, &out, &user, symbol, name, asset_type).await?,
                AssetCmd::List { page } => {
                    commands::asset::list(&ctx, &out, &user, page.skip, page.limit)?
                }
                AssetCmd::Delete { symbol } => {
                    commands::asset::delete(&ctx, &out, &user, &symbol).await?
                }
            }
        }
        Commands::Tx { cmd } => {
            let user = ctx.authenticate(&cli.credentials)?;
            match cmd {
                TxCmd::Add {
                    target,
                    kind,
                    quantity,
                    price,
                    fees,
                    date,
                    notes,
                } => {
                    let asset_id = ctx.resolve_asset_id(
                        &user,
                        target.symbol.as_deref(),
                        target.asset_id.as_deref(),
                    )?;
                    let input = commands::tx::TradeInput {
                        asset_id,
                        kind,
                        quantity,
                        price,
                        fees,
                        date,
                        notes,
                    };
                    commands::tx::add(&ctx, &out, &user, input).await?
                }
                TxCmd::List { symbol, page } => {
                    commands::tx::list(&ctx, &out, &user, symbol.as_deref(), page.skip, page.limit)?
                }
                TxCmd::Edit {
                    id,
                    symbol,
                    kind,
                    quantity,
                    price,
                    fees,
                    date,
                    notes,
                } => {
                    let asset_id = match symbol.as_deref() {
                        Some(symbol) => Some(ctx.resolve_asset_id(&user, Some(symbol), None)?),
                        None => None,
                    };
                    let changes = commands::tx::TradeChanges {
                        asset_id,
                        kind,
                        quantity,
                        price,
                        fees,
                        date,
                        notes,
                    };
                    commands::tx::edit(&ctx, &out, &user, &id, changes).await?
                }
                TxCmd::Delete { id } => commands::tx::delete(&ctx, &out, &user, &id).await?,
            }
        }
        Commands::Portfolio => {
            let user = ctx.authenticate(&cli.credentials)?;
            commands::portfolio::performance(&ctx, &out, &user).await?;
        }
        Commands::Realized { start, end } => {
            let user = ctx.authenticate(&cli.credentials)?;
            commands::portfolio::realized(&ctx, &out, &user, start.as_deref(), end.as_deref())?;
        }
    }

    Ok(())
}
