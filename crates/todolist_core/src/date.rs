//! Page header date, e.g. `Wednesday, 14 October`.

use chrono::{Local, NaiveDate};

const HEADER_DATE_FORMAT: &str = "%A, %-d %B";

/// Formats `date` as `"<Weekday>, <Day> <Month>"` with English names.
pub fn format_header_date(date: NaiveDate) -> String {
    date.format(HEADER_DATE_FORMAT).to_string()
}

/// Header date for the current local day.
pub fn today_header() -> String {
    format_header_date(Local::now().date_naive())
}
