use crate::errors::StoreError;
use crate::models::{DatesResponse, Ledger, RecordResponse};
use crate::storage::{JsonLedgerStore, LedgerStore};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

pub struct RemoteLedger {
    client: Client,
    url: String,
}

impl RemoteLedger {
    pub fn new(url: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LedgerStore for RemoteLedger {
    async fn load_dates(&self) -> Result<Ledger, StoreError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }
        let body: DatesResponse = response.json().await?;
        Ok(Ledger::from_dates(body.dates))
    }

    async fn save_dates(&self, _ledger: &Ledger) -> Result<(), StoreError> {
        // The remote records its own server-side today, so repeating the post is harmless.
        let response = self.client.post(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }
        let body: RecordResponse = response.json().await?;
        if !body.success {
            return Err(StoreError::NotAcknowledged);
        }
        Ok(())
    }
}

pub struct FallbackLedger {
    remote: RemoteLedger,
    local: JsonLedgerStore,
    use_remote: AtomicBool,
}

impl FallbackLedger {
    pub fn new(remote: RemoteLedger, local: JsonLedgerStore) -> Self {
        Self {
            remote,
            local,
            use_remote: AtomicBool::new(true),
        }
    }

    fn disable_remote(&self, err: &StoreError) {
        warn!("remote ledger unavailable, staying on local file: {err}");
        self.use_remote.store(false, Ordering::SeqCst);
    }

    async fn mirror(&self, ledger: &Ledger) {
        if let Err(err) = self.local.save_dates(ledger).await {
            debug!("failed to mirror remote dates locally: {err}");
        }
    }
}

#[async_trait]
impl LedgerStore for FallbackLedger {
    async fn load_dates(&self) -> Result<Ledger, StoreError> {
        if self.use_remote.load(Ordering::SeqCst) {
            match self.remote.load_dates().await {
                Ok(ledger) => {
                    self.mirror(&ledger).await;
                    return Ok(ledger);
                }
                Err(err) => self.disable_remote(&err),
            }
        }
        self.local.load_dates().await
    }

    async fn save_dates(&self, ledger: &Ledger) -> Result<(), StoreError> {
        if self.use_remote.load(Ordering::SeqCst) {
            match self.remote.save_dates(ledger).await {
                Ok(()) => {
                    self.mirror(ledger).await;
                    return Ok(());
                }
                Err(err) => self.disable_remote(&err),
            }
        }
        self.local.save_dates(ledger).await
    }
}
