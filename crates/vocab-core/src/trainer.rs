use chrono::{Days, NaiveDate};

pub use vocab_types::model::MAX_ITERATION;

/// Days to wait before reviewing a unit at the given iteration
pub fn interval_days(iteration: u32) -> u32 {
    match iteration {
        0 | 1 => 1,
        2 => 2,
        3 => 3,
        4 => 5,
        5 => 8,
        6 => 13,
        _ => 21,
    }
}

/// Review date for an item seen on `today` at the given iteration
pub fn next_review_date(today: NaiveDate, iteration: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(interval_days(iteration).into()))
        .unwrap_or(NaiveDate::MAX)
}
