use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pos_register::application::session::RegisterSession;
use pos_register::domain::ports::{CatalogLookupBox, TransactionSinkBox};
use pos_register::infrastructure::http::{
    ApiConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT, HttpCatalog, HttpTransactionSink,
};
use pos_register::infrastructure::in_memory::{InMemoryCatalog, InMemoryTransactionSink};
use pos_register::interfaces::csv::catalog_reader::CatalogReader;
use pos_register::interfaces::csv::receipt_writer::ReceiptWriter;
use pos_register::interfaces::csv::scan_reader::ScanReader;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scanned product codes: a CSV file with a `product_code` column
    scans: PathBuf,

    /// Offline catalog CSV (product_code,product_name,product_price).
    /// When given, transactions are kept in memory instead of posted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Base URL of the storefront backend
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Seconds to wait for one backend request before giving up
    #[arg(long, env = "POS_HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "POS_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

async fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let catalog = InMemoryCatalog::new();
    let file = File::open(path).into_diagnostic()?;
    for product in CatalogReader::new(file).products() {
        match product {
            Ok(product) => catalog.insert(product).await,
            Err(e) => warn!(error = %e, "skipping catalog row"),
        }
    }
    info!(products = catalog.len().await, "offline catalog loaded");
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let (catalog, sink): (CatalogLookupBox, TransactionSinkBox) = if let Some(path) = cli.catalog
    {
        let catalog = load_catalog(&path).await?;
        (Box::new(catalog), Box::new(InMemoryTransactionSink::new()))
    } else {
        let config = ApiConfig::new(&cli.api_url)
            .into_diagnostic()?
            .with_timeout(Duration::from_secs(cli.timeout_secs));
        info!(base_url = %config.base_url, timeout = ?config.timeout, "using backend");
        (
            Box::new(HttpCatalog::new(config.clone()).into_diagnostic()?),
            Box::new(HttpTransactionSink::new(config).into_diagnostic()?),
        )
    };

    let mut session = RegisterSession::new();
    let file = File::open(&cli.scans).into_diagnostic()?;
    for scan in ScanReader::new(file).codes() {
        match scan {
            Ok(code) => {
                let found = session.search(catalog.as_ref(), &code).await.map(|_| ());
                match found {
                    Ok(()) => {
                        session.add_pending().into_diagnostic()?;
                    }
                    Err(e) => eprintln!("Skipping scan {code:?}: {e}"),
                }
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable scan");
                eprintln!("Error reading scan: {e}");
            }
        }
    }

    let items = session.engine().items().to_vec();
    let totals = session.purchase(sink.as_ref()).await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ReceiptWriter::new(stdout.lock());
    writer.write_receipt(&items, &totals).into_diagnostic()?;

    Ok(())
}
