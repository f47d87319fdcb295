use crate::cycle;
use crate::models::{CycleState, Ledger};
use crate::storage::{CycleStore, LedgerStore};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error};

pub struct Session {
    pub today: NaiveDate,
    pub cycle: CycleState,
    pub ledger: Ledger,
}

#[derive(Clone)]
pub struct AppState {
    pub cycle_store: Arc<dyn CycleStore>,
    pub ledger_store: Arc<dyn LedgerStore>,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub async fn open(
        cycle_store: Arc<dyn CycleStore>,
        ledger_store: Arc<dyn LedgerStore>,
        today: NaiveDate,
    ) -> Self {
        let session = restore_session(cycle_store.as_ref(), ledger_store.as_ref(), today).await;
        Self {
            cycle_store,
            ledger_store,
            session: Arc::new(Mutex::new(session)),
        }
    }

    // The stored calendar is only re-read when the server crosses into a new
    // calendar day; within a day the in-memory session stays authoritative.
    pub async fn session_for(&self, today: NaiveDate) -> MutexGuard<'_, Session> {
        let mut session = self.session.lock().await;
        if session.today != today {
            *session =
                restore_session(self.cycle_store.as_ref(), self.ledger_store.as_ref(), today)
                    .await;
        }
        session
    }
}

async fn restore_session(
    cycle_store: &dyn CycleStore,
    ledger_store: &dyn LedgerStore,
    today: NaiveDate,
) -> Session {
    let mut cycle = match cycle_store.load().await {
        Ok(Some(state)) => state,
        Ok(None) => CycleState::default(),
        Err(err) => {
            error!("failed to load calendar state: {err}");
            CycleState::default()
        }
    };

    let advanced = cycle::resolve_on_load(&mut cycle, today);
    if advanced > 0 {
        debug!("calendar advanced {advanced} slot(s) while away");
    }

    let ledger = match ledger_store.load_dates().await {
        Ok(ledger) => ledger,
        Err(err) => {
            error!("failed to load login dates: {err}");
            Ledger::default()
        }
    };

    Session {
        today,
        cycle,
        ledger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct FixtureStore {
        cycle: StdMutex<Option<CycleState>>,
        ledger: StdMutex<Ledger>,
        fail: bool,
    }

    #[async_trait]
    impl CycleStore for FixtureStore {
        async fn load(&self) -> Result<Option<CycleState>, StoreError> {
            if self.fail {
                return Err(StoreError::NotAcknowledged);
            }
            Ok(self.cycle.lock().unwrap().clone())
        }

        async fn save(&self, state: &CycleState) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::NotAcknowledged);
            }
            *self.cycle.lock().unwrap() = Some(state.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl LedgerStore for FixtureStore {
        async fn load_dates(&self) -> Result<Ledger, StoreError> {
            if self.fail {
                return Err(StoreError::NotAcknowledged);
            }
            Ok(self.ledger.lock().unwrap().clone())
        }

        async fn save_dates(&self, ledger: &Ledger) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::NotAcknowledged);
            }
            *self.ledger.lock().unwrap() = ledger.clone();
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn new_day_reload_resolves_days_away() {
        let store = Arc::new(FixtureStore::default());
        let mut state = CycleState::default();
        cycle::login(&mut state, date(2026, 1, 3));
        state.current_day = 2;
        state.last_login_day = Some(2);
        *store.cycle.lock().unwrap() = Some(state);

        let app = AppState::open(store.clone(), store.clone(), date(2026, 1, 3)).await;

        {
            let session = app.session_for(date(2026, 1, 3)).await;
            assert_eq!(session.cycle.current_day, 2);
        }

        let session = app.session_for(date(2026, 1, 7)).await;
        assert_eq!(session.today, date(2026, 1, 7));
        assert_eq!(session.cycle.current_day, 6);
    }

    #[tokio::test]
    async fn same_day_keeps_in_memory_changes() {
        let store = Arc::new(FixtureStore::default());
        let app = AppState::open(store.clone(), store.clone(), date(2026, 1, 3)).await;

        {
            let mut session = app.session_for(date(2026, 1, 3)).await;
            cycle::login(&mut session.cycle, date(2026, 1, 3));
        }

        let session = app.session_for(date(2026, 1, 3)).await;
        assert_eq!(session.cycle.last_login_date, Some(date(2026, 1, 3)));
    }

    #[tokio::test]
    async fn failing_store_starts_from_defaults() {
        let store = Arc::new(FixtureStore {
            fail: true,
            ..Default::default()
        });
        let app = AppState::open(store.clone(), store, date(2026, 1, 3)).await;

        let session = app.session_for(date(2026, 1, 3)).await;
        assert_eq!(session.cycle, CycleState::default());
        assert_eq!(session.ledger, Ledger::default());
    }
}
