//! Server configuration loaded from environment variables.

use anyhow::{Context, Result};
use data_loader::{DataSource, DataSources};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Where to listen and where to read the dataset from
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub sources: DataSources,
}

impl ServerConfig {
    /// Load configuration from the environment (and `.env`, if present)
    ///
    /// | Env Var       | Default                       |
    /// |---------------|-------------------------------|
    /// | `HOST`        | `0.0.0.0`                     |
    /// | `PORT`        | `8050`                        |
    /// | `DATA_DIR`    | unset: fetch from GroupLens   |
    /// | `RATINGS_URL` | GroupLens `u.data`            |
    /// | `MOVIES_URL`  | GroupLens `u.item`            |
    ///
    /// `DATA_DIR` takes precedence over the URL overrides.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests don't have to touch the process env
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST")
            .unwrap_or_else(|| "0.0.0.0".into())
            .parse()
            .context("HOST must be an IP address")?;

        let port = lookup("PORT")
            .unwrap_or_else(|| "8050".into())
            .parse()
            .context("PORT must be a valid u16")?;

        let sources = match lookup("DATA_DIR") {
            Some(dir) => DataSources::from_dir(&PathBuf::from(dir)),
            None => {
                let mut sources = DataSources::ml_100k();
                if let Some(url) = lookup("RATINGS_URL") {
                    sources.ratings = DataSource::Url(url);
                }
                if let Some(url) = lookup("MOVIES_URL") {
                    sources.movies = DataSource::Url(url);
                }
                sources
            }
        };

        Ok(Self { host, port, sources })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
