use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, Utc};

use shared_models::Availability;
use shared_utils::date_format::format_month_year;

/// Six full weeks.
pub const GRID_DAYS: usize = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub availability: Vec<&'a Availability>,
}

impl CalendarDay<'_> {
    pub fn total_blocks(&self) -> usize {
        self.availability.iter().map(|a| a.total_blocks()).sum()
    }

    pub fn available_blocks(&self) -> usize {
        self.availability.iter().map(|a| a.free_blocks()).sum()
    }

    pub fn booked_blocks(&self) -> usize {
        self.availability.iter().map(|a| a.booked_blocks()).sum()
    }

    /// `"3/4 disponibles"`, or empty for days without blocks.
    pub fn summary(&self) -> String {
        let total = self.total_blocks();
        if total == 0 {
            return String::new();
        }
        format!("{}/{} disponibles", self.available_blocks(), total)
    }
}

/// Month view over a doctor's availability, rendered in a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    month_start: NaiveDate,
    selected: Option<NaiveDate>,
    offset: FixedOffset,
}

impl AvailabilityCalendar {
    pub fn new(today: NaiveDate, offset: FixedOffset) -> Self {
        Self {
            month_start: first_of_month(today),
            selected: None,
            offset,
        }
    }

    pub fn starting_at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::new(local_date(&now, &offset), offset)
    }

    pub fn year(&self) -> i32 {
        self.month_start.year()
    }

    pub fn month(&self) -> u32 {
        self.month_start.month()
    }

    /// e.g. `"octubre de 2025"`
    pub fn month_title(&self) -> String {
        format_month_year(self.year(), self.month())
    }

    pub fn previous_month(&mut self) {
        if let Some(previous) = self.month_start.checked_sub_months(Months::new(1)) {
            self.month_start = previous;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.month_start.checked_add_months(Months::new(1)) {
            self.month_start = next;
        }
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.month_start = first_of_month(today);
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == Some(date)
    }

    /// The grid starts on the Sunday on or before the first of the month.
    pub fn days<'a>(&self, availability: &'a [Availability], today: NaiveDate) -> Vec<CalendarDay<'a>> {
        let lead = u64::from(self.month_start.weekday().num_days_from_sunday());
        let grid_start = self
            .month_start
            .checked_sub_days(Days::new(lead))
            .unwrap_or(self.month_start);
        let by_day = group_by_day(availability, &self.offset);

        grid_start
            .iter_days()
            .take(GRID_DAYS)
            .map(|date| CalendarDay {
                date,
                is_current_month: date.month() == self.month() && date.year() == self.year(),
                is_today: date == today,
                availability: by_day.get(&date).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

pub fn local_date(value: &DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    value.with_timezone(offset).date_naive()
}

/// Buckets availability by the local day it starts on, keeping input order
/// within each day.
pub fn group_by_day<'a>(
    availability: &'a [Availability],
    offset: &FixedOffset,
) -> BTreeMap<NaiveDate, Vec<&'a Availability>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Availability>> = BTreeMap::new();
    for slot in availability {
        groups
            .entry(local_date(&slot.start_at, offset))
            .or_default()
            .push(slot);
    }
    groups
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::AppointmentBlock;

    fn utc(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn with_blocks(id: i64, start: &str, booked: &[bool]) -> Availability {
        let start_at = utc(start);
        let blocks = booked
            .iter()
            .enumerate()
            .map(|(i, is_booked)| AppointmentBlock {
                id: id * 10 + i as i64,
                availability_id: id,
                block_number: i as u32 + 1,
                start_at: start_at + chrono::Duration::hours(i as i64),
                end_at: start_at + chrono::Duration::hours(i as i64 + 1),
                is_booked: *is_booked,
            })
            .collect::<Vec<_>>();
        Availability {
            id,
            doctor_id: 1,
            start_at,
            end_at: start_at + chrono::Duration::hours(booked.len() as i64),
            slots: 1,
            blocks,
        }
    }

    #[test]
    fn grid_starts_on_sunday() {
        // 1 October 2025 is a Wednesday.
        let calendar = AvailabilityCalendar::new(date(2025, 10, 14), offset());
        let days = calendar.days(&[], date(2025, 10, 14));

        assert_eq!(days.len(), GRID_DAYS);
        assert_eq!(days[0].date, date(2025, 9, 28));
        assert!(!days[0].is_current_month);
        assert_eq!(days[3].date, date(2025, 10, 1));
        assert!(days[3].is_current_month);
        assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
        assert_eq!(days[41].date, date(2025, 11, 8));
    }

    #[test]
    fn month_starting_on_sunday_has_no_lead() {
        let calendar = AvailabilityCalendar::new(date(2026, 2, 10), offset());
        let days = calendar.days(&[], date(2026, 2, 10));
        assert_eq!(days[0].date, date(2026, 2, 1));
    }

    #[test]
    fn availability_lands_on_its_local_day() {
        // 01:30Z on the 15th is still the 14th in UTC-3.
        let availability = vec![
            with_blocks(1, "2025-10-15T01:00:00Z", &[false, true]),
            with_blocks(2, "2025-10-14T12:00:00Z", &[false, false]),
        ];
        let calendar = AvailabilityCalendar::new(date(2025, 10, 1), offset());
        let days = calendar.days(&availability, date(2025, 10, 1));

        let the_14th = days.iter().find(|d| d.date == date(2025, 10, 14)).unwrap();
        assert_eq!(the_14th.availability.len(), 2);
        assert_eq!(the_14th.total_blocks(), 4);
        assert_eq!(the_14th.available_blocks(), 3);
        assert_eq!(the_14th.booked_blocks(), 1);
        assert_eq!(the_14th.summary(), "3/4 disponibles");

        let the_15th = days.iter().find(|d| d.date == date(2025, 10, 15)).unwrap();
        assert!(the_15th.availability.is_empty());
        assert_eq!(the_15th.summary(), "");
    }

    #[test]
    fn month_navigation() {
        let mut calendar = AvailabilityCalendar::new(date(2025, 1, 31), offset());
        calendar.previous_month();
        assert_eq!((calendar.year(), calendar.month()), (2024, 12));
        calendar.next_month();
        calendar.next_month();
        assert_eq!((calendar.year(), calendar.month()), (2025, 2));
        assert_eq!(calendar.month_title(), "febrero de 2025");

        calendar.go_to_today(date(2025, 10, 3));
        assert_eq!(calendar.month_title(), "octubre de 2025");
    }

    #[test]
    fn selecting_a_day() {
        let mut calendar = AvailabilityCalendar::starting_at(utc("2025-10-14T15:00:00Z"), offset());
        assert_eq!(calendar.selected(), None);
        calendar.select_day(date(2025, 10, 20));
        assert!(calendar.is_selected(date(2025, 10, 20)));
        assert!(!calendar.is_selected(date(2025, 10, 21)));
    }

    #[test]
    fn grouping_by_day() {
        let availability = vec![
            with_blocks(1, "2025-10-14T12:00:00Z", &[false]),
            with_blocks(2, "2025-10-16T12:00:00Z", &[false]),
            with_blocks(3, "2025-10-14T18:00:00Z", &[true]),
        ];
        let groups = group_by_day(&availability, &offset());
        assert_eq!(groups.len(), 2);
        let ids: Vec<i64> = groups[&date(2025, 10, 14)].iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
