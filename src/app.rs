use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/login", post(handlers::login))
        .route("/api/calendar/advance", post(handlers::advance))
        .route("/api/calendar/reset", post(handlers::reset))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/dates", get(handlers::get_dates).post(handlers::record_date))
        .with_state(state)
}
