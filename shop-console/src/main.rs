use clap::Parser;
use shop_console::App;
use shop_console::cli::{self, Cli};
use shop_console::core::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = cli::config_from(&cli);
    let _guard = init_logger(config.log_dir.as_deref())?;
    tracing::debug!(api = %config.client.base_url, "shop console starting");

    let app = App::new(config)?;
    let cart_sync = app.cart.clone().spawn_sync();

    let result = cli::run(cli, &app).await;
    cart_sync.abort();

    if let Err(e) = &result {
        tracing::error!(error = %e, "command failed");
    }
    result
}
