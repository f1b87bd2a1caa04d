//! Calendar widget state and its control directives.
//!
//! The calendar keeps a view position (year and zero-based month), an optional selected date,
//! a list of highlighted dates and a map of events keyed by [`DateKey`]. External callers
//! change it only through [`CalendarDirectives`], applied by [`CalendarState::apply`].
//!
//! Directive order is fixed:
//! 1. `navigateToToday` short-circuits everything else
//! 2. `year`, then `month`
//! 3. `highlightDates` replaces the highlight list
//! 4. `selectDate`
//! 5. a single highlighted date also becomes the selected date
//! 6. `addEvent` selects the event's date and moves the view to its month
//! 7. `removeEvent` selects the event's date

use crate::constants::DATE_KEY_FORMAT;
use crate::validation::{if_present, parse_date, require_text, validate_range, validate_time, Validate};
use crate::{CrmError, CrmResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Handle used by the bridge layer to reach the mounted calendar.
pub type SharedCalendar = Rc<RefCell<CalendarState>>;

const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;
const MONTH_RANGE: std::ops::RangeInclusive<u32> = 0..=11;

/// A calendar day in canonical `YYYY-MM-DD` form.
///
/// Parsing is strict: month and day must be zero-padded, so the rendered key always equals the
/// text it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month, matching the calendar's view position.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date("date", s).map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Red,
    Purple,
    Orange,
    Teal,
}

/// An entry shown on a calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub color: EventColor,
}

/// `addEvent` directive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCalendarEvent {
    pub date: DateKey,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
}

impl Validate for NewCalendarEvent {
    fn validate(&self) -> CrmResult<()> {
        require_text("addEvent.event", &self.event)?;
        if_present(&self.time, |t| validate_time("addEvent.time", t))
    }
}

/// `removeEvent` directive: drops every event on `date` whose text matches `event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventRef {
    pub date: DateKey,
    pub event: String,
}

impl Validate for EventRef {
    fn validate(&self) -> CrmResult<()> {
        require_text("removeEvent.event", &self.event)
    }
}

/// One `calendarControl` call. Every directive is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CalendarDirectives {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Zero-based: 0 is January.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_dates: Option<Vec<DateKey>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_date: Option<DateKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_event: Option<NewCalendarEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_event: Option<EventRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_today: Option<bool>,
}

impl Validate for CalendarDirectives {
    fn validate(&self) -> CrmResult<()> {
        if_present(&self.year, |y| validate_range("year", *y, YEAR_RANGE))?;
        if_present(&self.month, |m| validate_range("month", *m, MONTH_RANGE))?;
        if_present(&self.add_event, NewCalendarEvent::validate)?;
        if_present(&self.remove_event, EventRef::validate)
    }
}

/// State behind the calendar widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarState {
    year: i32,
    month: u32,
    selected_date: Option<DateKey>,
    highlight_dates: Vec<DateKey>,
    events: BTreeMap<DateKey, Vec<CalendarEvent>>,
}

impl CalendarState {
    /// Creates a calendar showing the month of `today` with `today` selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month0(),
            selected_date: Some(DateKey::new(today)),
            highlight_dates: Vec::new(),
            events: BTreeMap::new(),
        }
    }

    pub fn into_shared(self) -> SharedCalendar {
        Rc::new(RefCell::new(self))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month currently in view.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn selected_date(&self) -> Option<DateKey> {
        self.selected_date
    }

    pub fn highlight_dates(&self) -> &[DateKey] {
        &self.highlight_dates
    }

    /// Every date that currently has at least one event.
    pub fn events(&self) -> &BTreeMap<DateKey, Vec<CalendarEvent>> {
        &self.events
    }

    /// Events on `date`, in the order they were added. Empty when the date has none.
    pub fn events_for_date(&self, date: &DateKey) -> &[CalendarEvent] {
        self.events.get(date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Validates `directives` as a whole and then applies them in the fixed order.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::InvalidInput` if any directive is invalid. Nothing is applied in that
    /// case.
    pub fn apply(&mut self, directives: &CalendarDirectives, today: NaiveDate) -> CrmResult<()> {
        directives.validate()?;

        if directives.navigate_to_today == Some(true) {
            self.show(DateKey::new(today));
            self.selected_date = Some(DateKey::new(today));
            tracing::debug!(date = %DateKey::new(today), "calendar navigated to today");
            return Ok(());
        }

        if let Some(year) = directives.year {
            self.year = year;
        }
        if let Some(month) = directives.month {
            self.month = month;
        }

        if let Some(dates) = &directives.highlight_dates {
            self.highlight_dates = dates.clone();
        }
        if let Some(date) = directives.select_date {
            self.selected_date = Some(date);
        }
        if let Some([only]) = directives.highlight_dates.as_deref() {
            self.selected_date = Some(*only);
        }

        if let Some(new_event) = &directives.add_event {
            self.add_event(new_event);
        }
        if let Some(event_ref) = &directives.remove_event {
            self.remove_event(event_ref);
        }

        Ok(())
    }

    fn show(&mut self, date: DateKey) {
        self.year = date.year();
        self.month = date.month0();
    }

    fn add_event(&mut self, new_event: &NewCalendarEvent) {
        let event = CalendarEvent {
            event: new_event.event.trim().to_string(),
            time: new_event.time.clone(),
            color: new_event.color.unwrap_or_default(),
        };
        tracing::debug!(date = %new_event.date, event = %event.event, "calendar event added");
        self.events.entry(new_event.date).or_default().push(event);
        self.selected_date = Some(new_event.date);
        self.show(new_event.date);
    }

    fn remove_event(&mut self, event_ref: &EventRef) {
        let text = event_ref.event.trim();
        if let Some(events) = self.events.get_mut(&event_ref.date) {
            let before = events.len();
            events.retain(|e| e.event != text);
            tracing::debug!(
                date = %event_ref.date,
                removed = before - events.len(),
                "calendar events removed"
            );
            if events.is_empty() {
                self.events.remove(&event_ref.date);
            }
        }
        self.selected_date = Some(event_ref.date);
    }
}
