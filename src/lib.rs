pub mod app;
pub mod cycle;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod remote;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::resolve_data_dir;
