use chrono::{Datelike, Local, Months, NaiveDate};
use serde::Serialize;

use crate::clients::errors::{Error, Result};

/// Calendar month whose playlist gets rolled up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    /// English full month name, e.g. `March`
    pub month: String,
    /// Four digit year
    pub year: i32,
}

impl Period {
    /// The calendar month before `date`.
    pub fn preceding(date: NaiveDate) -> Result<Self> {
        let previous = date
            .checked_sub_months(Months::new(1))
            .ok_or(Error::DateOutOfRange(date))?;
        Ok(Period {
            month: previous.format("%B").to_string(),
            year: previous.year(),
        })
    }

    /// The month before today, local time.
    pub fn current() -> Result<Self> {
        Self::preceding(Local::now().date_naive())
    }

    /// `March 2024`
    pub fn source_playlist_name(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    /// `MARCH`
    pub fn month_playlist_name(&self) -> String {
        self.month.to_uppercase()
    }

    /// `2024`
    pub fn year_playlist_name(&self) -> String {
        self.year.to_string()
    }
}
