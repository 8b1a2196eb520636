//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the configuration, the injected stores, the payment client and the
//! invoice writer. Everything is constructed once at startup.

use crate::invoice::InvoiceWriter;
use shop_core::{
    BoxedPaymentStrategy, Currency, MemoryStore, SharedCatalogStore, SharedOrderStore,
    SharedUserStore, StoreSeed, DEFAULT_PAGE_SIZE,
};
use shop_stripe::StripeCheckoutStrategy;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for payment callbacks when a request carries no Host header
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Products per catalog page
    pub items_per_page: u64,
    /// Directory invoices are cached in
    pub invoice_dir: PathBuf,
    /// Currency sent to the payment provider
    pub currency: Currency,
    /// TOML seed file for the in-memory store
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let currency_code = env_or("CHECKOUT_CURRENCY", "usd".to_string())?;
        let currency = Currency::parse(&currency_code)
            .ok_or_else(|| anyhow::anyhow!("Unsupported CHECKOUT_CURRENCY: {}", currency_code))?;

        let items_per_page: u64 = env_or("ITEMS_PER_PAGE", DEFAULT_PAGE_SIZE)?;
        if items_per_page == 0 {
            anyhow::bail!("ITEMS_PER_PAGE must be at least 1");
        }

        Ok(Self {
            host: env_or("HOST", "127.0.0.1".to_string())?,
            port: env_or("PORT", 8080)?,
            base_url: env_or("BASE_URL", "http://localhost:8080".to_string())?,
            environment: env_or("ENVIRONMENT", "development".to_string())?,
            items_per_page,
            invoice_dir: env_or("INVOICE_DIR", PathBuf::from("data/invoices"))?,
            currency,
            seed_path: std::env::var("STORE_SEED_PATH").ok().map(PathBuf::from),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}={}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: Arc<AppConfig>,
    /// Product catalog
    pub catalog: SharedCatalogStore,
    /// Users and their carts
    pub users: SharedUserStore,
    /// Placed orders
    pub orders: SharedOrderStore,
    /// Payment session provider
    pub payments: BoxedPaymentStrategy,
    /// Invoice PDF writer
    pub invoices: InvoiceWriter,
}

impl AppState {
    /// Create a new AppState from the environment, with the Stripe strategy
    /// and an in-memory store seeded from TOML
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let seed = load_store_seed(config.seed_path.as_deref())?;
        let store = Arc::new(MemoryStore::from_seed(seed));

        let stripe_strategy = StripeCheckoutStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        std::fs::create_dir_all(&config.invoice_dir).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create invoice directory {}: {}",
                config.invoice_dir.display(),
                e
            )
        })?;

        Ok(Self::with_memory_store(config, store, Arc::new(stripe_strategy)))
    }

    /// Assemble state from explicit parts
    pub fn from_parts(
        config: AppConfig,
        catalog: SharedCatalogStore,
        users: SharedUserStore,
        orders: SharedOrderStore,
        payments: BoxedPaymentStrategy,
    ) -> Self {
        let invoices = InvoiceWriter::new(config.invoice_dir.clone());
        Self {
            config: Arc::new(config),
            catalog,
            users,
            orders,
            payments,
            invoices,
        }
    }

    /// Use one `MemoryStore` for catalog, users and orders
    pub fn with_memory_store(
        config: AppConfig,
        store: Arc<MemoryStore>,
        payments: BoxedPaymentStrategy,
    ) -> Self {
        Self::from_parts(config, store.clone(), store.clone(), store, payments)
    }

    pub fn page_size(&self) -> u64 {
        self.config.items_per_page
    }
}

/// Load store seed data from config file
fn load_store_seed(explicit: Option<&std::path::Path>) -> anyhow::Result<StoreSeed> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        return parse_seed(&content, &path.display().to_string());
    }

    let config_paths = [
        "config/store.toml",
        "../config/store.toml",
        "../../config/store.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            return parse_seed(&content, path);
        }
    }

    tracing::warn!("No store seed found, starting with an empty store");
    Ok(StoreSeed::default())
}

fn parse_seed(content: &str, origin: &str) -> anyhow::Result<StoreSeed> {
    let seed = StoreSeed::from_toml(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", origin, e))?;
    tracing::info!(
        "Loaded {} products and {} users from {}",
        seed.products.len(),
        seed.users.len(),
        origin
    );
    Ok(seed)
}
