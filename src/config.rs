// ⚙️ Server configuration from the environment

use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const ADDR_ENV: &str = "RECEIPT_POINTS_ADDR";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read `RECEIPT_POINTS_ADDR`, falling back to `0.0.0.0:8080`.
    pub fn from_env() -> Result<Self> {
        Self::from_addr_var(std::env::var(ADDR_ENV).ok().as_deref())
    }

    fn from_addr_var(value: Option<&str>) -> Result<Self> {
        let raw = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_ADDR,
        };

        let addr = raw
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid {} value: {:?}", ADDR_ENV, raw))?;

        Ok(ServerConfig { addr })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}
