// src/config.rs
use std::net::IpAddr;

use crate::error::AppError;

/// Names of the four source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub products: String,
    pub sales: String,
    pub channels: String,
    pub campaigns: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            products: "dim_products".to_string(),
            sales: "fact_sales".to_string(),
            channels: "dim_channels".to_string(),
            campaigns: "dim_campaigns".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub tables: TableNames,
    pub top_n: usize,
    /// Present only when SERVE_REPORTS is enabled.
    pub server: Option<ServerConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::config("DATABASE_URL must be set"))?;

        let defaults = TableNames::default();
        let table = |key: &str, fallback: String| -> Result<String, AppError> {
            let name = lookup(key).unwrap_or(fallback);
            validate_identifier(&name)
                .map_err(|msg| AppError::config(format!("{key}: {msg}")))?;
            Ok(name)
        };
        let tables = TableNames {
            products: table("PRODUCTS_TABLE", defaults.products)?,
            sales: table("SALES_TABLE", defaults.sales)?,
            channels: table("CHANNELS_TABLE", defaults.channels)?,
            campaigns: table("CAMPAIGNS_TABLE", defaults.campaigns)?,
        };

        let top_n = match lookup("TOP_N") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(AppError::config(format!("TOP_N must be a positive integer, got '{raw}'"))),
            },
            None => 10,
        };

        let serve = match lookup("SERVE_REPORTS").map(|v| v.trim().to_ascii_lowercase()) {
            None => false,
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "" | "0" | "false" | "no" | "off") => false,
            Some(v) => return Err(AppError::config(format!("SERVE_REPORTS: unrecognised value '{v}'"))),
        };

        let server = if serve {
            let host_str = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
            let host = host_str
                .parse::<IpAddr>()
                .map_err(|_| AppError::config(format!("HOST is not an IP address: '{host_str}'")))?;
            let port = match lookup("PORT") {
                Some(p) => p
                    .parse::<u16>()
                    .map_err(|_| AppError::config(format!("PORT is not a port number: '{p}'")))?,
                None => 3000,
            };
            Some(ServerConfig { host, port })
        } else {
            None
        };

        Ok(Self { database_url, tables, top_n, server })
    }
}

/// Table names end up inside SQL text, so only plain (optionally
/// schema-qualified) identifiers are accepted.
pub fn validate_identifier(name: &str) -> Result<(), String> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(format!("'{name}' has too many qualifiers"));
    }
    for part in parts {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return Err(format!("'{name}' is not a valid table name")),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("'{name}' is not a valid table name"));
        }
    }
    Ok(())
}
