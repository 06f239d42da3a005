use crate::error::{Result, TallyError};
use chrono::{Local, NaiveDate};
use std::cell::Cell;
use std::rc::Rc;

/// Day keys in the history are always formatted with this pattern.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

pub fn parse_day(day: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(day, DAY_FORMAT).map_err(|_| TallyError::InvalidDay(day.to_string()))
}

/// Source of the current calendar day.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// The local calendar date of the machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a date until told otherwise.
///
/// Clones share the same date, so a test can keep one handle and move the
/// day forward while the tracker owns the other.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Rc::new(Cell::new(date)),
        }
    }

    pub fn from_day(day: &str) -> Result<Self> {
        Ok(Self::new(parse_day(day)?))
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    pub fn set_day(&self, day: &str) -> Result<()> {
        self.set(parse_day(day)?);
        Ok(())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}
