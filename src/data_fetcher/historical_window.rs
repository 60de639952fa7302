//! "This week, N years ago" date windows.
//!
//! A window takes today's month/day, moves it onto a fixed historical year and
//! spans a number of days backwards from there. Calendar overflow is left to
//! date arithmetic: Feb 29 on a non-leap target year becomes Mar 1, and a window
//! that starts before Jan 1 reaches into the previous year.

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::debug;

use crate::data_fetcher::models::Game;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl HistoricalWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Places `month`/`day` on `year`, rolling invalid days forward into the next month.
fn anchor_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first| first.checked_add_signed(Duration::days(i64::from(day) - 1)))
    })
}

/// Computes the window for `today` mapped onto `target_year`.
///
/// Returns `None` only when the target year is outside chrono's supported range.
pub fn compute_historical_window(
    today: NaiveDate,
    target_year: i32,
    days_back: i64,
) -> Option<HistoricalWindow> {
    let to = anchor_date(target_year, today.month(), today.day())?;
    let from = to.checked_sub_signed(Duration::days(days_back))?;
    Some(HistoricalWindow { from, to })
}

/// Window for the current local date.
pub fn current_historical_window(target_year: i32, days_back: i64) -> Option<HistoricalWindow> {
    compute_historical_window(Local::now().date_naive(), target_year, days_back)
}

/// Keeps games whose calendar date lies inside the window, both ends included.
pub fn filter_to_window(games: &[Game], window: &HistoricalWindow) -> Vec<Game> {
    let kept: Vec<Game> = games
        .iter()
        .filter(|game| window.contains(game.date))
        .cloned()
        .collect();
    debug!(
        "Window {}..={} kept {} of {} games",
        window.from,
        window.to,
        kept.len(),
        games.len()
    );
    kept
}
