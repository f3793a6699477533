// libs/scheduling-cell/src/services/calendar.rs
use chrono::{Datelike, Duration, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::Appointment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

/// One grid cell: a calendar day and the appointments scheduled on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub appointments: Vec<Appointment>,
    /// Populated in day view only: hour-of-day binning, minute-level
    /// sub-binning is not performed.
    pub hours: Vec<HourBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u32,
    pub appointments: Vec<Appointment>,
}

pub struct CalendarGridBuilder;

impl CalendarGridBuilder {
    pub fn new() -> Self {
        Self
    }

    /// The inclusive date range a view covers, used to scope store reads.
    pub fn grid_range(&self, reference: NaiveDate, view: CalendarView) -> (NaiveDate, NaiveDate) {
        match view {
            CalendarView::Month => {
                let first = first_of_month(reference);
                let last = last_of_month(reference);
                let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
                let end = last + Duration::days((6 - last.weekday().num_days_from_sunday()) as i64);
                (start, end)
            }
            CalendarView::Week => {
                let start =
                    reference - Duration::days(reference.weekday().num_days_from_sunday() as i64);
                (start, start + Duration::days(6))
            }
            CalendarView::Day => (reference, reference),
        }
    }

    /// Pure function of (reference, view, appointments, today); `today` only
    /// drives the `is_today` flag, never bucket membership.
    pub fn build_grid(
        &self,
        reference: NaiveDate,
        view: CalendarView,
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> Vec<DayBucket> {
        let (start, end) = self.grid_range(reference, view);
        let with_hours = view == CalendarView::Day;

        let mut buckets = Vec::new();
        let mut date = start;
        while date <= end {
            buckets.push(self.day_bucket(date, reference, appointments, today, with_hours));
            date += Duration::days(1);
        }

        buckets
    }

    fn day_bucket(
        &self,
        date: NaiveDate,
        reference: NaiveDate,
        appointments: &[Appointment],
        today: NaiveDate,
        with_hours: bool,
    ) -> DayBucket {
        // Source-collection order is preserved inside each bucket.
        let day_appointments: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.scheduled_date == date)
            .cloned()
            .collect();

        let hours = if with_hours {
            (0..24)
                .map(|hour| HourBucket {
                    hour,
                    appointments: day_appointments
                        .iter()
                        .filter(|a| a.scheduled_time.hour() == hour)
                        .cloned()
                        .collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        DayBucket {
            date,
            is_current_month: date.year() == reference.year() && date.month() == reference.month(),
            is_today: date == today,
            appointments: day_appointments,
            hours,
        }
    }
}

impl Default for CalendarGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn first_of_month(reference: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1).unwrap_or(reference)
}

fn last_of_month(reference: NaiveDate) -> NaiveDate {
    let (year, month) = if reference.month() == 12 {
        (reference.year() + 1, 1)
    } else {
        (reference.year(), reference.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first_of_next| first_of_next - Duration::days(1))
        .unwrap_or(reference)
}
