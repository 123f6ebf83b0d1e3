//! `shop` command line

mod render;
mod run;

pub use run::{config_from, run};

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use shared::models::{CategoryKind, RequestStatus, StatsRange};
use std::path::PathBuf;

use crate::board::BoardTab;

#[derive(Debug, Parser)]
#[command(name = "shop")]
#[command(about = "Storefront and admin console for the repair shop")]
#[command(
    after_help = "Environment:\n  NEXT_PUBLIC_API_URL  Backend base URL\n  SHOP_DATA_DIR        Local store directory\n  SHOP_LOG_DIR         Rolling log directory\n  RUST_LOG             Log filter"
)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "NEXT_PUBLIC_API_URL")]
    pub api_url: Option<String>,
    /// Directory holding the local store
    #[arg(long, global = true, env = "SHOP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
    Services {
        #[command(subcommand)]
        command: ServiceCommand,
    },
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    Discounts {
        #[command(subcommand)]
        command: DiscountCommand,
    },
    /// Request status board
    Board {
        #[command(subcommand)]
        command: BoardCommand,
    },
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Place an order from the cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Submit a repair request
    Repair {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        service: Option<i64>,
        #[arg(long)]
        description: String,
        /// Photo to attach, repeatable
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    Reviews {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    /// Dashboard overview
    Stats {
        #[arg(long, default_value = "month")]
        range: StatsRange,
    },
    /// Store information
    Info,
    /// Active home page banners
    Banners,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 12)]
        limit: u32,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        /// Local image to upload as the cover
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    List {
        #[arg(long)]
        category: Option<i64>,
    },
    Show {
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Product,
    Service,
}

impl From<KindArg> for CategoryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Product => CategoryKind::Product,
            KindArg::Service => CategoryKind::Service,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = KindArg::Product)]
        kind: KindArg,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum DiscountCommand {
    List {
        #[arg(long)]
        product: Option<i64>,
        #[arg(long)]
        service: Option<i64>,
        #[arg(long)]
        category: Option<i64>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sale_off: u8,
        /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, conflicts_with_all = ["service", "category"])]
        product: Option<i64>,
        #[arg(long, conflicts_with = "category")]
        service: Option<i64>,
        #[arg(long)]
        category: Option<i64>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    Show {
        #[arg(long, value_enum, default_value_t = BoardTab::Repairs)]
        tab: BoardTab,
    },
    /// Drag a card to another column
    Move {
        id: i64,
        to: RequestStatus,
        #[arg(long, value_enum, default_value_t = BoardTab::Repairs)]
        tab: BoardTab,
    },
    /// Edit contact details or status
    Edit {
        id: i64,
        #[arg(long, value_enum, default_value_t = BoardTab::Repairs)]
        tab: BoardTab,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<RequestStatus>,
    },
    Archive {
        id: i64,
        #[arg(long, value_enum, default_value_t = BoardTab::Repairs)]
        tab: BoardTab,
    },
    Restore {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show,
    Add {
        product_id: i64,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    Remove {
        product_id: i64,
    },
    Set {
        product_id: i64,
        qty: u32,
    },
    Clear,
    /// Upload the local cart to the account
    Push,
    /// Replace the local cart with the account's copy
    Pull,
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    Product {
        id: i64,
    },
    Service {
        id: i64,
    },
    Submit {
        #[arg(long, conflicts_with = "service")]
        product: Option<i64>,
        #[arg(long)]
        service: Option<i64>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },
}
