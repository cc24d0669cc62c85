use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_EXCLUDED: &str = "Resumes";

/// Where collections are read from. MongoDB wins when it is configured.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Files { dir: PathBuf },
    Mongo { uri: String, database: String },
}

// The connection string may carry a password.
impl fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Files { dir } => f.debug_struct("Files").field("dir", dir).finish(),
            Self::Mongo { database, .. } => f
                .debug_struct("Mongo")
                .field("uri", &"<redacted>")
                .field("database", database)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub bind_addr: String,
    /// Collections left out of the cross-collection summary.
    pub excluded_collections: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = store_backend(&lookup)?;

        let bind_addr = match lookup("DASHBOARD_BIND_ADDR") {
            Some(addr) => addr,
            None => {
                let port = match lookup("PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let excluded_collections = split_list(
            &lookup("EXCLUDED_COLLECTIONS").unwrap_or_else(|| DEFAULT_EXCLUDED.to_string()),
        );

        Ok(Self {
            store,
            bind_addr,
            excluded_collections,
        })
    }
}

/// `MONGO_FULL_URI` is used as is. Otherwise `MONGO_URI` is the cluster host
/// and the SRV connection string is assembled from `MONGO_USERNAME` and
/// `MONGO_PASSWORD`. Without either, `STORE_DIR` is required.
fn store_backend<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<StoreBackend> {
    let full_uri = lookup("MONGO_FULL_URI").filter(|v| !v.trim().is_empty());
    let host = lookup("MONGO_URI").filter(|v| !v.trim().is_empty());

    if full_uri.is_none() && host.is_none() {
        let dir = lookup("STORE_DIR")
            .context("Missing required env var: STORE_DIR (or MONGO_FULL_URI / MONGO_URI)")?;
        if dir.trim().is_empty() {
            bail!("STORE_DIR must not be empty");
        }
        return Ok(StoreBackend::Files { dir: PathBuf::from(dir) });
    }

    let database = get(lookup, "MONGO_DB_NAME")?;
    if database.trim().is_empty() {
        bail!("MONGO_DB_NAME must not be empty");
    }

    let uri = match (full_uri, host) {
        (Some(uri), _) => uri,
        (None, host) => {
            let host = host.unwrap_or_default();
            let user = get(lookup, "MONGO_USERNAME")?;
            let password = get(lookup, "MONGO_PASSWORD")?;
            format!(
                "mongodb+srv://{}:{}@{}/{}?retryWrites=true&w=majority",
                urlencoding::encode(&user),
                urlencoding::encode(&password),
                host.trim().trim_end_matches('/'),
                database,
            )
        }
    };
    if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
        bail!("MONGO_FULL_URI must start with mongodb:// or mongodb+srv://");
    }

    Ok(StoreBackend::Mongo { uri, database })
}

fn get<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("Missing required env var: {key}"))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
