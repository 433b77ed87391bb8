use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format of countdown dates, both as typed and as stored.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Special Day";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountdownError {
    #[error("'{input}' is not a YYYY-MM-DD date")]
    InvalidDate { input: String },

    #[error("{date} is in the past")]
    InPast { date: NaiveDate },
}

pub fn parse_countdown_date(input: &str) -> Result<NaiveDate, CountdownError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        CountdownError::InvalidDate {
            input: input.trim().to_string(),
        }
    })
}

/// One event a user is counting down to.
///
/// `date` stays a string so a hand-edited entry with a bad date does not make
/// the whole file unreadable; such entries are skipped when checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub title: String,
    pub date: String,
}

/// Where a countdown stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Upcoming { days: i64 },
    Today,
    Passed { days: i64 },
}

impl Countdown {
    /// Validates `date` against `today`. A blank title becomes [`DEFAULT_TITLE`].
    pub fn new(title: &str, date: &str, today: NaiveDate) -> Result<Self, CountdownError> {
        let target = parse_countdown_date(date)?;
        if target < today {
            return Err(CountdownError::InPast { date: target });
        }

        let title = match title.trim() {
            "" => DEFAULT_TITLE,
            title => title,
        };
        Ok(Self {
            title: title.to_string(),
            date: target.format(DATE_FORMAT).to_string(),
        })
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        parse_countdown_date(&self.date).ok()
    }

    /// `None` if the stored date does not parse.
    pub fn status(&self, today: NaiveDate) -> Option<CountdownStatus> {
        let days = (self.target_date()? - today).num_days();
        Some(match days {
            0 => CountdownStatus::Today,
            d if d > 0 => CountdownStatus::Upcoming { days: d },
            d => CountdownStatus::Passed { days: -d },
        })
    }
}
