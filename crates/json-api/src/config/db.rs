//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `SQLite` connection string (`sqlite::memory:` for a throwaway database)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://catalog.db")]
    pub database_url: String,
}
