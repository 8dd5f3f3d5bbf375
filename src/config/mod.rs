//! Configuration management
//!
//! TOML-based configuration with `${VAR}` substitution and `CARELINE_*`
//! environment overrides. Load a `.env` file first with [`dotenvy`] if the
//! deployment uses one.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_with_dotenv};
pub use schema::{ApiConfig, ApplicationConfig, CarelineConfig, LoggingConfig, SyncConfig};
pub use secret::{SecretString, SecretValue};
