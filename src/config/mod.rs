pub mod toml_config;

use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::core::persistence::PRODUCTS_STORAGE_KEY;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_LOOKUP_ENDPOINT: &str = "http://localhost:5173/sat-proxy";
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "compra-facil")]
#[command(about = "Monte sua lista de compras a partir das notas fiscais de suas compras anteriores")]
pub struct CliConfig {
    /// Relay endpoint that forwards lookups to SEFAZ
    #[arg(long, default_value = DEFAULT_LOOKUP_ENDPOINT)]
    pub endpoint: String,

    /// Directory holding the session file; omit to keep the session in memory
    #[arg(long)]
    pub session_dir: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Query the homologation environment (HML=true)
    #[arg(long)]
    pub homologation: bool,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn lookup_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn homologation(&self) -> bool {
        self.homologation
    }

    fn session_dir(&self) -> Option<&str> {
        self.session_dir.as_deref()
    }

    fn storage_key(&self) -> &str {
        PRODUCTS_STORAGE_KEY
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("endpoint", config.lookup_endpoint())?;
    validation::validate_range(
        "timeout_seconds",
        config.timeout_seconds(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    if let Some(dir) = config.session_dir() {
        validation::validate_path("session_dir", dir)?;
    }
    validation::validate_non_empty_string("storage_key", config.storage_key())?;
    Ok(())
}
