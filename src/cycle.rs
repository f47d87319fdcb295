use crate::models::{Cell, CycleState};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Logged { day_number: usize, days_missed: u32 },
    Completed { day_number: usize, days_missed: u32 },
    Restarted,
    AlreadyLoggedToday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced { day_number: usize },
    AtCycleEnd,
}

pub fn login(state: &mut CycleState, today: NaiveDate) -> LoginOutcome {
    if state.finished {
        let days = state.days();
        *state = CycleState::new(days);
        if let Some(cell) = state.cells.get_mut(0) {
            *cell = Cell::Checked;
        }
        state.last_login_day = Some(0);
        state.last_login_date = Some(today);
        return LoginOutcome::Restarted;
    }

    if state.logged_today(today) {
        return LoginOutcome::AlreadyLoggedToday;
    }

    // Slots between the previous claim and the live slot count as missed.
    let first_unvisited = state.last_login_day.map_or(0, |day| day + 1);
    let gap = state.current_day.saturating_sub(first_unvisited) as u32;
    for slot in first_unvisited..state.current_day {
        if let Some(cell) = state.cells.get_mut(slot) {
            *cell = Cell::Missed;
        }
    }
    if let Some(cell) = state.cells.get_mut(state.current_day) {
        *cell = Cell::Checked;
    }

    state.missed_days += gap;
    state.last_login_day = Some(state.current_day);
    state.last_login_date = Some(today);

    let day_number = state.current_day + 1;
    if day_number == state.days() {
        state.finished = true;
        return LoginOutcome::Completed {
            day_number,
            days_missed: gap,
        };
    }

    LoginOutcome::Logged {
        day_number,
        days_missed: gap,
    }
}

pub fn advance_day(state: &mut CycleState) -> AdvanceOutcome {
    let last_slot = state.days().saturating_sub(1);
    if state.current_day >= last_slot {
        state.current_day = last_slot;
        return AdvanceOutcome::AtCycleEnd;
    }
    state.current_day += 1;
    AdvanceOutcome::Advanced {
        day_number: state.current_day + 1,
    }
}

pub fn reset(state: &mut CycleState) {
    *state = CycleState::new(state.days());
}

pub fn resolve_on_load(state: &mut CycleState, today: NaiveDate) -> usize {
    let Some(last_login) = state.last_login_date else {
        return 0;
    };
    if state.finished {
        return 0;
    }
    let elapsed = (today - last_login).num_days();
    if elapsed <= 0 {
        return 0;
    }

    let before = state.current_day;
    let last_slot = state.days().saturating_sub(1);
    state.current_day = (state.current_day + elapsed as usize).min(last_slot);
    state.current_day - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CYCLE_DAYS;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn login_first_day_checks_first_cell() {
        let mut state = CycleState::default();
        let outcome = login(&mut state, date(2026, 1, 1));

        assert_eq!(
            outcome,
            LoginOutcome::Logged {
                day_number: 1,
                days_missed: 0,
            }
        );
        assert_eq!(state.cells[0], Cell::Checked);
        assert_eq!(state.current_day, 0);
        assert_eq!(state.last_login_day, Some(0));
        assert_eq!(state.last_login_date, Some(date(2026, 1, 1)));
        assert_eq!(state.missed_days, 0);
        assert!(!state.finished);
    }

    #[test]
    fn login_twice_same_date_changes_nothing() {
        let mut state = CycleState::default();
        let today = date(2026, 1, 1);
        login(&mut state, today);
        let snapshot = state.clone();

        let outcome = login(&mut state, today);

        assert_eq!(outcome, LoginOutcome::AlreadyLoggedToday);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn login_marks_skipped_slots_missed() {
        for current in 0..CYCLE_DAYS {
            let mut state = CycleState::default();
            login(&mut state, date(2026, 1, 1));
            state.current_day = current;

            let outcome = login(&mut state, date(2026, 1, 2));

            let gap = current.saturating_sub(1) as u32;
            for slot in 1..current {
                assert_eq!(state.cells[slot], Cell::Missed, "slot {slot} of {current}");
            }
            assert_eq!(state.cells[current], Cell::Checked);
            assert_eq!(state.missed_days, gap);
            if current + 1 == CYCLE_DAYS {
                assert_eq!(
                    outcome,
                    LoginOutcome::Completed {
                        day_number: CYCLE_DAYS,
                        days_missed: gap,
                    }
                );
            } else {
                assert_eq!(
                    outcome,
                    LoginOutcome::Logged {
                        day_number: current + 1,
                        days_missed: gap,
                    }
                );
            }
        }
    }

    #[test]
    fn login_on_last_slot_finishes_cycle() {
        let mut state = CycleState::default();
        state.current_day = CYCLE_DAYS - 1;

        let outcome = login(&mut state, date(2026, 1, 14));

        assert_eq!(
            outcome,
            LoginOutcome::Completed {
                day_number: CYCLE_DAYS,
                days_missed: CYCLE_DAYS as u32 - 1,
            }
        );
        assert!(state.finished);
        assert_eq!(state.cells[CYCLE_DAYS - 1], Cell::Checked);
    }

    #[test]
    fn login_after_finish_restarts_cycle() {
        let mut state = CycleState::default();
        state.current_day = CYCLE_DAYS - 1;
        login(&mut state, date(2026, 1, 14));
        assert!(state.finished);

        let outcome = login(&mut state, date(2026, 1, 15));

        assert_eq!(outcome, LoginOutcome::Restarted);
        assert!(!state.finished);
        assert_eq!(state.current_day, 0);
        assert_eq!(state.last_login_day, Some(0));
        assert_eq!(state.last_login_date, Some(date(2026, 1, 15)));
        assert_eq!(state.missed_days, 0);
        assert_eq!(state.cells[0], Cell::Checked);
        assert!(state.cells[1..].iter().all(|cell| *cell == Cell::Empty));
    }

    #[test]
    fn login_later_date_without_advance_stays_on_slot() {
        let mut state = CycleState::default();
        login(&mut state, date(2026, 1, 1));

        let outcome = login(&mut state, date(2026, 1, 5));

        assert_eq!(
            outcome,
            LoginOutcome::Logged {
                day_number: 1,
                days_missed: 0,
            }
        );
        assert_eq!(state.current_day, 0);
        assert_eq!(state.last_login_date, Some(date(2026, 1, 5)));
    }

    #[test]
    fn advance_stops_at_last_slot() {
        let mut state = CycleState::default();
        for expected in 2..=CYCLE_DAYS {
            assert_eq!(
                advance_day(&mut state),
                AdvanceOutcome::Advanced {
                    day_number: expected,
                }
            );
        }
        assert_eq!(state.current_day, CYCLE_DAYS - 1);

        assert_eq!(advance_day(&mut state), AdvanceOutcome::AtCycleEnd);
        assert_eq!(state.current_day, CYCLE_DAYS - 1);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut state = CycleState::default();
        login(&mut state, date(2026, 1, 1));
        advance_day(&mut state);
        login(&mut state, date(2026, 1, 2));

        reset(&mut state);

        assert_eq!(state, CycleState::default());
    }

    #[test]
    fn resolve_same_day_is_noop() {
        let mut state = CycleState::default();
        login(&mut state, date(2026, 1, 3));
        let snapshot = state.clone();

        assert_eq!(resolve_on_load(&mut state, date(2026, 1, 3)), 0);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn resolve_advances_one_slot_per_elapsed_day() {
        let mut state = CycleState::default();
        login(&mut state, date(2026, 1, 3));
        state.current_day = 2;
        state.last_login_day = Some(2);

        assert_eq!(resolve_on_load(&mut state, date(2026, 1, 7)), 4);
        assert_eq!(state.current_day, 6);

        let outcome = login(&mut state, date(2026, 1, 7));
        assert_eq!(
            outcome,
            LoginOutcome::Logged {
                day_number: 7,
                days_missed: 3,
            }
        );
        assert_eq!(state.cells[3], Cell::Missed);
        assert_eq!(state.cells[4], Cell::Missed);
        assert_eq!(state.cells[5], Cell::Missed);
        assert_eq!(state.cells[6], Cell::Checked);
    }

    #[test]
    fn resolve_saturates_at_last_slot() {
        let mut state = CycleState::default();
        login(&mut state, date(2026, 1, 1));

        let advanced = resolve_on_load(&mut state, date(2026, 1, 21));

        assert_eq!(advanced, CYCLE_DAYS - 1);
        assert_eq!(state.current_day, CYCLE_DAYS - 1);
    }

    #[test]
    fn resolve_skips_fresh_state() {
        let mut state = CycleState::default();
        assert_eq!(resolve_on_load(&mut state, date(2026, 1, 9)), 0);
        assert_eq!(state, CycleState::default());
    }

    #[test]
    fn resolve_skips_finished_cycle() {
        let mut state = CycleState::default();
        state.current_day = CYCLE_DAYS - 1;
        login(&mut state, date(2026, 1, 14));
        let snapshot = state.clone();

        assert_eq!(resolve_on_load(&mut state, date(2026, 2, 1)), 0);
        assert_eq!(state, snapshot);
    }
}
