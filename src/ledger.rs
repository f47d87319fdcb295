use crate::models::{Ledger, LEDGER_CAP};
use chrono::NaiveDate;

pub fn record(ledger: &mut Ledger, today: NaiveDate) -> bool {
    if !ledger.dates.insert(today) {
        return false;
    }
    while ledger.dates.len() > LEDGER_CAP {
        ledger.dates.pop_first();
    }
    true
}

pub fn current_streak(ledger: &Ledger, today: NaiveDate) -> u32 {
    let mut cursor = today;
    if !ledger.contains(cursor) {
        // A streak kept alive through yesterday still counts before today's login.
        let Some(yesterday) = cursor.pred_opt() else {
            return 0;
        };
        if !ledger.contains(yesterday) {
            return 0;
        }
        cursor = yesterday;
    }

    let mut streak = 0;
    loop {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) if ledger.contains(previous) => cursor = previous,
            _ => break,
        }
    }
    streak
}
