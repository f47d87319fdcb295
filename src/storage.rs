use crate::errors::StoreError;
use crate::models::{CycleState, Ledger};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;

pub const CYCLE_FILE: &str = "login_bonus.json";
pub const DATES_FILE: &str = "login_dates.json";

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("APP_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from("data")
}

#[async_trait]
pub trait CycleStore: Send + Sync {
    async fn load(&self) -> Result<Option<CycleState>, StoreError>;
    async fn save(&self, state: &CycleState) -> Result<(), StoreError>;
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn load_dates(&self) -> Result<Ledger, StoreError>;
    async fn save_dates(&self, ledger: &Ledger) -> Result<(), StoreError>;
}

pub struct JsonCycleStore {
    path: PathBuf,
}

impl JsonCycleStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CYCLE_FILE),
        }
    }
}

#[async_trait]
impl CycleStore for JsonCycleStore {
    async fn load(&self) -> Result<Option<CycleState>, StoreError> {
        read_json(&self.path).await
    }

    async fn save(&self, state: &CycleState) -> Result<(), StoreError> {
        write_json(&self.path, state).await
    }
}

pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DATES_FILE),
        }
    }
}

#[async_trait]
impl LedgerStore for JsonLedgerStore {
    async fn load_dates(&self) -> Result<Ledger, StoreError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn save_dates(&self, ledger: &Ledger) -> Result<(), StoreError> {
        write_json(&self.path, ledger).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(value)?;
    fs::write(path, payload).await?;
    Ok(())
}
