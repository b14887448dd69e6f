//! Synchronized month/day/year selection group.
//!
//! A [`DateSelectorGroup`] drives three [`SelectableField`]s. Whenever the
//! month or year selection changes, the day list is regenerated so that it
//! holds exactly the days of that month, and the previous day selection is
//! restored, clamped to the new range. Rebuilds triggered by the group are
//! silent: no field listener fires while the group rewrites its own lists.

mod calendar;
mod field;

pub use calendar::{CalendarSource, FixedCalendar, SystemCalendar};
pub use field::{ListField, ListenerId, SelectableField, SelectionListener};

use crate::validate::parse_int;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Upper bound on generated year labels, whatever the configured range.
pub const MAX_YEAR_LABELS: usize = 10_000;

/// Days shown while no month is selected.
pub const DEFAULT_DAY_COUNT: u32 = 31;

/// Number of days for a 1-based month index (0 = no month) in `year`.
///
/// February is a leap month whenever `year` is divisible by 4. Century years
/// are not excluded.
pub fn days_in_month(month_index: usize, year: i32) -> u32 {
    if month_index == 0 {
        DEFAULT_DAY_COUNT
    } else if month_index <= 7 {
        if month_index == 2 {
            if year % 4 == 0 { 29 } else { 28 }
        } else if month_index % 2 == 0 {
            30
        } else {
            31
        }
    } else if month_index % 2 == 0 {
        31
    } else {
        30
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthLabelMode {
    #[default]
    Numeric,
    WordedFull,
    WordedShort,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum YearOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Placeholders {
    pub month: String,
    pub day: String,
    pub year: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Placeholders {
            month: "Month".to_string(),
            day: "Day".to_string(),
            year: "Year".to_string(),
        }
    }
}

/// Offsets from the current year. Every `i` in `before..=after` yields one
/// year label; `before > after` yields none.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct YearRange {
    pub before: i32,
    pub after: i32,
}

impl YearRange {
    pub fn new(before: i32, after: i32) -> Self {
        YearRange { before, after }
    }
}

/// Settings of a [`DateSelectorGroup`]. Every field is optional when
/// deserialized; missing ones take their default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DateSelectorConfig {
    pub month_labels: MonthLabelMode,
    pub placeholders: Placeholders,
    pub year_range: YearRange,
    pub year_order: YearOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Month,
    Day,
    Year,
}

impl DateField {
    pub const ALL: [DateField; 3] = [DateField::Month, DateField::Day, DateField::Year];

    pub fn next(self) -> DateField {
        match self {
            DateField::Month => DateField::Day,
            DateField::Day => DateField::Year,
            DateField::Year => DateField::Month,
        }
    }

    pub fn previous(self) -> DateField {
        match self {
            DateField::Month => DateField::Year,
            DateField::Day => DateField::Month,
            DateField::Year => DateField::Day,
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Month => write!(f, "Month"),
            DateField::Day => write!(f, "Day"),
            DateField::Year => write!(f, "Year"),
        }
    }
}

/// The current (month, day, year) triple. `None` means the placeholder is
/// selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectedDate {
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub year: Option<i32>,
}

impl SelectedDate {
    pub fn is_complete(&self) -> bool {
        self.month.is_some() && self.day.is_some() && self.year.is_some()
    }

    /// Converts to a calendar date. Returns `None` if a part is missing or
    /// the triple is not a real date (e.g. February 29, 1900).
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

impl fmt::Display for SelectedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "?".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "{}/{}/{}",
            part(self.month),
            part(self.day),
            part(self.year)
        )
    }
}

pub struct DateSelectorGroup<F = ListField, C = SystemCalendar> {
    month: F,
    day: F,
    year: F,
    config: DateSelectorConfig,
    calendar: C,
    rebuilding: bool,
}

impl<F: SelectableField> DateSelectorGroup<F, SystemCalendar> {
    /// Binds the three fields with the default configuration.
    pub fn create(month: F, day: F, year: F) -> Self {
        Self::with_calendar(month, day, year, SystemCalendar)
    }
}

impl<F: SelectableField, C: CalendarSource> DateSelectorGroup<F, C> {
    pub fn with_calendar(month: F, day: F, year: F, calendar: C) -> Self {
        let mut group = DateSelectorGroup {
            month,
            day,
            year,
            config: DateSelectorConfig::default(),
            calendar,
            rebuilding: false,
        };
        group.rebuild();
        group
    }

    /// Replaces the configuration and rebuilds every field.
    pub fn set_properties(&mut self, config: DateSelectorConfig) {
        self.config = config;
        self.rebuild();
    }

    pub fn config(&self) -> &DateSelectorConfig {
        &self.config
    }

    pub fn field(&self, field: DateField) -> &F {
        match field {
            DateField::Month => &self.month,
            DateField::Day => &self.day,
            DateField::Year => &self.year,
        }
    }

    fn field_mut(&mut self, field: DateField) -> &mut F {
        match field {
            DateField::Month => &mut self.month,
            DateField::Day => &mut self.day,
            DateField::Year => &mut self.year,
        }
    }

    /// Selects `index` in `field`. Month and year changes regenerate the
    /// day list.
    pub fn select(&mut self, field: DateField, index: usize) {
        self.field_mut(field).set_selected_index(index);
        if matches!(field, DateField::Month | DateField::Year) {
            self.on_month_or_year_changed();
        }
    }

    /// Selects the real entry labelled `label`. The placeholder never
    /// matches. Returns false if no entry matches.
    pub fn select_label(&mut self, field: DateField, label: &str) -> bool {
        let target = self.field(field);
        let position = (1..target.item_count()).find(|&i| target.label(i) == Some(label));
        match position {
            Some(index) => {
                self.select(field, index);
                true
            }
            None => false,
        }
    }

    pub fn on_selection_changed(
        &mut self,
        field: DateField,
        listener: SelectionListener,
    ) -> ListenerId {
        self.field_mut(field).on_selection_changed(listener)
    }

    pub fn remove_selection_changed_listener(&mut self, field: DateField, id: ListenerId) -> bool {
        self.field_mut(field).remove_selection_changed_listener(id)
    }

    /// The year parsed from the year field, or the calendar's current year.
    pub fn effective_year(&self) -> i32 {
        self.year
            .selected_label()
            .and_then(parse_int)
            .unwrap_or_else(|| self.calendar.current_year())
    }

    /// Number of real day entries, excluding the placeholder.
    pub fn day_count(&self) -> usize {
        self.day.item_count().saturating_sub(1)
    }

    pub fn selected(&self) -> SelectedDate {
        let index_of = |field: &F| match field.selected_index() {
            0 => None,
            i => u32::try_from(i).ok(),
        };
        let year = match self.year.selected_index() {
            0 => None,
            _ => self.year.selected_label().and_then(parse_int),
        };
        SelectedDate {
            month: index_of(&self.month),
            day: index_of(&self.day),
            year,
        }
    }

    fn on_month_or_year_changed(&mut self) {
        if self.rebuilding {
            return;
        }
        self.recompute_days();
    }

    fn rebuild(&mut self) {
        self.rebuilding = true;
        for field in DateField::ALL {
            self.field_mut(field).set_silent(true);
        }

        for field in DateField::ALL {
            self.field_mut(field).clear();
        }
        self.month.append(self.config.placeholders.month.clone());
        self.day.append(self.config.placeholders.day.clone());
        self.year.append(self.config.placeholders.year.clone());

        let month_names = match self.config.month_labels {
            MonthLabelMode::Numeric => (1..=12).map(|m| m.to_string()).collect(),
            MonthLabelMode::WordedFull => self.calendar.full_month_names(),
            MonthLabelMode::WordedShort => self.calendar.short_month_names(),
        };
        for name in month_names.into_iter().filter(|n| !n.is_empty()) {
            self.month.append(name);
        }

        for d in 1..=DEFAULT_DAY_COUNT {
            self.day.append(d.to_string());
        }

        let current = self.calendar.current_year();
        let YearRange { before, after } = self.config.year_range;
        for i in (before..=after).take(MAX_YEAR_LABELS) {
            let offset = match self.config.year_order {
                YearOrder::Ascending => Some(i),
                YearOrder::Descending => i.checked_neg(),
            };
            // years outside i32 are skipped
            if let Some(year) = offset.and_then(|o| current.checked_add(o)) {
                self.year.append(year.to_string());
            }
        }

        for field in DateField::ALL {
            self.field_mut(field).set_silent(false);
        }
        self.rebuilding = false;

        debug!(
            months = self.month.item_count() - 1,
            years = self.year.item_count() - 1,
            "rebuilt date selector"
        );
    }

    fn recompute_days(&mut self) {
        let previous = self.day.selected_index();
        let year = self.effective_year();
        let days = days_in_month(self.month.selected_index(), year);

        self.day.set_silent(true);
        self.day.clear();
        self.day.append(self.config.placeholders.day.clone());
        for d in 1..=days {
            self.day.append(d.to_string());
        }
        let last = self.day.item_count() - 1;
        self.day.set_selected_index(previous.min(last));
        self.day.set_silent(false);

        debug!(
            month = self.month.selected_index(),
            year,
            days,
            day = self.day.selected_index(),
            "recomputed day list"
        );
    }
}

impl<F: SelectableField + fmt::Debug, C: fmt::Debug> fmt::Debug for DateSelectorGroup<F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateSelectorGroup")
            .field("month", &self.month)
            .field("day", &self.day)
            .field("year", &self.year)
            .field("config", &self.config)
            .field("calendar", &self.calendar)
            .finish()
    }
}
