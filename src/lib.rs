// Receipt Points - Core Library
// Exposes the scoring engine and receipt store for the CLI, API server, and tests

pub mod money;
pub mod receipt;
pub mod scoring;
pub mod store;
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use money::{Cents, MoneyParseError};
pub use receipt::{Item, Receipt, ValidationError, ValidationResult};
pub use scoring::{breakdown, score, PointsBreakdown, ScoringError};
pub use store::{ReceiptStore, StoredReceipt};
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
