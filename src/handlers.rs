use crate::cycle::{self, AdvanceOutcome, LoginOutcome};
use crate::errors::AppError;
use crate::ledger;
use crate::models::{
    AdvanceResponse, AdvanceStatus, CalendarSnapshot, CycleState, DatesResponse, LoginResponse,
    LoginStatus, RecordResponse, ResetResponse, StreakResponse, API_DATES_CAP,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::{Local, NaiveDate};
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today_date();
    let session = state.session_for(today).await;
    let streak = ledger::current_streak(&session.ledger, today);
    Html(render_index(&snapshot(&session.cycle, today), streak))
}

pub async fn get_calendar(
    State(state): State<AppState>,
) -> Result<Json<CalendarSnapshot>, AppError> {
    let today = today_date();
    let session = state.session_for(today).await;
    Ok(Json(snapshot(&session.cycle, today)))
}

pub async fn login(State(state): State<AppState>) -> Result<Json<LoginResponse>, AppError> {
    let today = today_date();
    let mut session = state.session_for(today).await;
    let outcome = cycle::login(&mut session.cycle, today);

    let saved = match outcome {
        LoginOutcome::AlreadyLoggedToday => true,
        _ => save_cycle(&state, &session.cycle).await,
    };

    let (status, day_number, days_missed) = match outcome {
        LoginOutcome::Logged {
            day_number,
            days_missed,
        } => (LoginStatus::Logged, Some(day_number), Some(days_missed)),
        LoginOutcome::Completed {
            day_number,
            days_missed,
        } => (LoginStatus::Completed, Some(day_number), Some(days_missed)),
        LoginOutcome::Restarted => (LoginStatus::Restarted, None, None),
        LoginOutcome::AlreadyLoggedToday => (LoginStatus::AlreadyLoggedToday, None, None),
    };

    Ok(Json(LoginResponse {
        status,
        day_number,
        days_missed,
        saved,
        calendar: snapshot(&session.cycle, today),
    }))
}

pub async fn advance(State(state): State<AppState>) -> Result<Json<AdvanceResponse>, AppError> {
    let today = today_date();
    let mut session = state.session_for(today).await;
    let outcome = cycle::advance_day(&mut session.cycle);

    let (status, saved) = match outcome {
        AdvanceOutcome::Advanced { .. } => (
            AdvanceStatus::Advanced,
            save_cycle(&state, &session.cycle).await,
        ),
        AdvanceOutcome::AtCycleEnd => (AdvanceStatus::AtCycleEnd, true),
    };

    Ok(Json(AdvanceResponse {
        status,
        saved,
        calendar: snapshot(&session.cycle, today),
    }))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, AppError> {
    let today = today_date();
    let mut session = state.session_for(today).await;
    cycle::reset(&mut session.cycle);
    let saved = save_cycle(&state, &session.cycle).await;

    Ok(Json(ResetResponse {
        saved,
        calendar: snapshot(&session.cycle, today),
    }))
}

pub async fn get_streak(State(state): State<AppState>) -> Result<Json<StreakResponse>, AppError> {
    let today = today_date();
    let session = state.session_for(today).await;

    Ok(Json(StreakResponse {
        date: today,
        streak: ledger::current_streak(&session.ledger, today),
        logged_today: session.ledger.contains(today),
    }))
}

pub async fn get_dates(State(state): State<AppState>) -> Result<Json<DatesResponse>, AppError> {
    let today = today_date();
    let session = state.session_for(today).await;

    Ok(Json(DatesResponse {
        logged_in_today: session.ledger.contains(today),
        dates: session.ledger.recent(API_DATES_CAP),
    }))
}

pub async fn record_date(State(state): State<AppState>) -> Result<Json<RecordResponse>, AppError> {
    let today = today_date();
    let mut session = state.session_for(today).await;
    if ledger::record(&mut session.ledger, today) {
        state.ledger_store.save_dates(&session.ledger).await?;
    }

    Ok(Json(RecordResponse {
        success: true,
        dates: session.ledger.recent(API_DATES_CAP),
    }))
}

// Calendar writes keep serving from memory even when the disk write fails;
// the response carries `saved: false` so the client can tell.
async fn save_cycle(state: &AppState, cycle: &CycleState) -> bool {
    match state.cycle_store.save(cycle).await {
        Ok(()) => true,
        Err(err) => {
            error!("failed to save calendar state: {err}");
            false
        }
    }
}

fn snapshot(cycle: &CycleState, today: NaiveDate) -> CalendarSnapshot {
    CalendarSnapshot {
        date: today,
        cells: cycle.cells.clone(),
        current_day: cycle.current_day,
        day_number: cycle.current_day + 1,
        missed_days: cycle.missed_days,
        finished: cycle.finished,
        logged_today: cycle.logged_today(today),
    }
}

fn today_date() -> NaiveDate {
    Local::now().date_naive()
}
