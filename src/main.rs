use chrono::Local;
use login_streak::app::router;
use login_streak::remote::{FallbackLedger, RemoteLedger};
use login_streak::state::AppState;
use login_streak::storage::{self, JsonCycleStore, JsonLedgerStore, LedgerStore};
use std::{env, net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = storage::resolve_data_dir();
    fs::create_dir_all(&data_dir).await?;

    let cycle_store = Arc::new(JsonCycleStore::new(&data_dir));
    let ledger_store: Arc<dyn LedgerStore> = match env::var("LOGIN_API_URL") {
        Ok(url) => {
            info!("recording login dates through {url}");
            Arc::new(FallbackLedger::new(
                RemoteLedger::new(url)?,
                JsonLedgerStore::new(&data_dir),
            ))
        }
        Err(_) => Arc::new(JsonLedgerStore::new(&data_dir)),
    };

    let state = AppState::open(cycle_store, ledger_store, Local::now().date_naive()).await;
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
