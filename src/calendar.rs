//! Date Helpers
//!
//! Weekday names, greetings and display formatting.

use chrono::{Datelike, Local, NaiveDate, Timelike, Weekday};

/// Days shown on the weekly schedule
pub const SCHOOL_DAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn current_weekday_name() -> &'static str {
    weekday_name(Local::now().weekday())
}

/// Today as `YYYY-MM-DD`
pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Today as e.g. `Monday, March 4, 2024`
pub fn today_long() -> String {
    Local::now().format("%A, %B %-d, %Y").to_string()
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Morning"
    } else if hour < 17 {
        "Afternoon"
    } else {
        "Evening"
    }
}

pub fn current_greeting() -> &'static str {
    greeting(Local::now().hour())
}

/// Render an ISO date as `Mar 5, 2024`; anything unparsable is shown as-is.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
