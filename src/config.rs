use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub media_root: PathBuf,
    pub list_per_page: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let media_root =
            std::env::var("MEDIA_ROOT").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("media"));

        let list_per_page: u64 = std::env::var("LIST_PER_PAGE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(100);

        let max_upload_mb: usize =
            std::env::var("MAX_UPLOAD_MB").ok().and_then(|s| s.parse().ok()).unwrap_or(100);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            media_root,
            list_per_page,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}
