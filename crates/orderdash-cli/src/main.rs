mod report;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "orderdash")]
#[command(about = "Order metrics from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every metric as one JSON document.
    Report,
    /// Print a single metric.
    Metric {
        #[arg(value_enum)]
        name: MetricName,
    },
    /// Print one page of the orders table.
    Table {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
    /// Summarize the structure of the source document.
    Inspect {
        /// Inspect this URL instead of `ORDERDASH_SOURCE_URL`.
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MetricName {
    Overview,
    TotalOrders,
    TotalRevenue,
    UniqueCustomers,
    FinancialSummary,
    RefundRate,
    Delivery,
    BestSellingProduct,
    #[value(name = "top-5-products")]
    Top5Products,
    #[value(name = "top-10-cities")]
    Top10Cities,
    UpsellAnalysis,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("orderdash: use `report`, `metric <name>`, `table` or `inspect`");
        return Ok(());
    };

    let config = orderdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Report => report::run_report(&config).await,
        Commands::Metric { name } => report::run_metric(&config, name).await,
        Commands::Table { page, per_page } => report::run_table(&config, page, per_page).await,
        Commands::Inspect { url } => report::run_inspect(&config, url.as_deref()).await,
    }
}

#[cfg(test)]
mod tests;
