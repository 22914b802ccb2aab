// Call record domain model
use chrono::{Datelike, Month, NaiveDate};

/// Status value marking a cancelled attention.
pub const CANCELLED_STATUS: &str = "anulada";

/// Status value marking a completed attention.
pub const FINISHED_STATUS: &str = "finalizada";

const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%d/%m/%Y"];

/// One row of the source file, with its two derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub given_by: String,
    pub physician: Option<String>,
    pub date: String,
    pub status: String,
    pub consultation_type: String,
    pub month: Option<Month>,
    pub is_cancelled: u8,
}

impl Record {
    pub fn new(
        given_by: String,
        physician: Option<String>,
        date: String,
        status: String,
        consultation_type: String,
    ) -> Self {
        let month = parse_month(&date);
        let is_cancelled = u8::from(status == CANCELLED_STATUS);
        Self {
            given_by,
            physician,
            date,
            status,
            consultation_type,
            month,
            is_cancelled,
        }
    }

    /// Full month name of the record date, if the date parsed.
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.map(|m| m.name())
    }

    /// True when the record month matches `selected` by name.
    /// Records without a month never match.
    pub fn in_month(&self, selected: &str) -> bool {
        self.month_name() == Some(selected)
    }

    pub fn is_finished(&self) -> bool {
        self.status == FINISHED_STATUS
    }
}

/// Best-effort day-month-year parse. Any trailing time component is ignored.
pub fn parse_month(date: &str) -> Option<Month> {
    let day_part = date.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day_part, fmt).ok())
        .and_then(|d| Month::try_from(d.month() as u8).ok())
}
