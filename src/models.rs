use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const CYCLE_DAYS: usize = 14;
pub const LEDGER_CAP: usize = 365;
pub const API_DATES_CAP: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Checked,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    pub current_day: usize,
    pub last_login_day: Option<usize>,
    pub missed_days: u32,
    pub finished: bool,
    pub last_login_date: Option<NaiveDate>,
    pub cells: Vec<Cell>,
}

impl CycleState {
    pub fn new(days: usize) -> Self {
        Self {
            current_day: 0,
            last_login_day: None,
            missed_days: 0,
            finished: false,
            last_login_date: None,
            cells: vec![Cell::Empty; days],
        }
    }

    pub fn days(&self) -> usize {
        self.cells.len()
    }

    pub fn logged_today(&self, today: NaiveDate) -> bool {
        self.last_login_date == Some(today)
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::new(CYCLE_DAYS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ledger {
    pub dates: BTreeSet<NaiveDate>,
}

impl Ledger {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn recent(&self, cap: usize) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.dates.iter().rev().take(cap).copied().collect();
        dates.reverse();
        dates
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    pub date: NaiveDate,
    pub cells: Vec<Cell>,
    pub current_day: usize,
    pub day_number: usize,
    pub missed_days: u32,
    pub finished: bool,
    pub logged_today: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginStatus {
    Logged,
    Completed,
    Restarted,
    AlreadyLoggedToday,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: LoginStatus,
    pub day_number: Option<usize>,
    pub days_missed: Option<u32>,
    pub saved: bool,
    pub calendar: CalendarSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStatus {
    Advanced,
    AtCycleEnd,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdvanceResponse {
    pub status: AdvanceStatus,
    pub saved: bool,
    pub calendar: CalendarSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub saved: bool,
    pub calendar: CalendarSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub date: NaiveDate,
    pub streak: u32,
    pub logged_today: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatesResponse {
    pub logged_in_today: bool,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    pub dates: Vec<NaiveDate>,
}
