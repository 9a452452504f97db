//! Store connection configuration.
//!
//! The recognized keys are `host`, `user`, `password`, and `database`, the
//! set a networked store deployment supplies. The SQLite backend only
//! consults `database` (the file path); the remaining keys are still read
//! and retained so existing deployment configuration keeps working
//! unchanged.

use std::env;

/// The database file used when no configuration is supplied.
pub const DEFAULT_DATABASE: &str = "billing.db";

/// The store connection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// The store host. Unused by the SQLite backend.
    pub host: String,
    /// The store user. Unused by the SQLite backend.
    pub user: String,
    /// The store password. Unused by the SQLite backend.
    pub password: String,
    /// The database to open. For the SQLite backend this is the file path,
    /// created on first use.
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            user: String::new(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_owned(),
        }
    }
}

impl StoreConfig {
    /// Read the store configuration from the environment.
    ///
    /// Recognized variables are `TILLBOOK_HOST`, `TILLBOOK_USER`,
    /// `TILLBOOK_PASSWORD`, and `TILLBOOK_DATABASE`. Missing variables fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("TILLBOOK_HOST").unwrap_or(defaults.host),
            user: lookup("TILLBOOK_USER").unwrap_or(defaults.user),
            password: lookup("TILLBOOK_PASSWORD").unwrap_or(defaults.password),
            database: lookup("TILLBOOK_DATABASE").unwrap_or(defaults.database),
        }
    }
}
