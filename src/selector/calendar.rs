use chrono::{Datelike, Local, Month};

/// Month names and the current year, as supplied by the host calendar.
pub trait CalendarSource {
    fn full_month_names(&self) -> Vec<String>;
    fn short_month_names(&self) -> Vec<String>;
    fn current_year(&self) -> i32;
}

/// Reads the year from the local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl CalendarSource for SystemCalendar {
    fn full_month_names(&self) -> Vec<String> {
        english_month_names()
    }

    fn short_month_names(&self) -> Vec<String> {
        english_month_names()
            .into_iter()
            .map(|name| name.chars().take(3).collect())
            .collect()
    }

    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// A calendar pinned to one year. Useful for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCalendar {
    year: i32,
}

impl FixedCalendar {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl CalendarSource for FixedCalendar {
    fn full_month_names(&self) -> Vec<String> {
        SystemCalendar.full_month_names()
    }

    fn short_month_names(&self) -> Vec<String> {
        SystemCalendar.short_month_names()
    }

    fn current_year(&self) -> i32 {
        self.year
    }
}

fn english_month_names() -> Vec<String> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .collect()
}
