use anyhow::Result;
use recipe_scaler::app::App;
use recipe_scaler::cli::parse_args;
use recipe_scaler::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env for data dir and nutrition table overrides

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli_args = parse_args();
    let config = AppConfig::from_env(cli_args.data_dir);
    tracing::debug!("Using configuration {:?}", config);

    let app = App::new(config);
    let output = app.execute(cli_args.command).await?;
    println!("{}", output);

    Ok(())
}
