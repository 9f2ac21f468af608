use crate::error::CalendarError;
use crate::period::last_day_of_month;
use chrono::{Datelike, NaiveDate};
use std::iter::FusedIterator;

/// Iterates one date per calendar day from `start` to `end`, both inclusive.
///
/// An inverted range (`start > end`) yields nothing.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) => {
                let remaining = ((self.end - next).num_days() + 1) as usize;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for DateRange {}
impl FusedIterator for DateRange {}

/// Splits `[from, to]` into one `(start, end)` pair per calendar month touched,
/// clipped to the range at both ends.
pub fn month_spans(
    mut from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<(NaiveDate, NaiveDate)>, CalendarError> {
    if to < from {
        return Err(CalendarError::InvertedRange { start: from, end: to });
    }

    let mut spans = Vec::new();
    loop {
        let end_date = std::cmp::min(last_day_of_month(from)?, to);
        spans.push((from, end_date));

        if end_date == to {
            break;
        }
        from = end_date.succ_opt().ok_or(CalendarError::OutOfRange(end_date))?;
    }

    Ok(spans)
}

/// Splits `[from, to]` into one `(start, end)` pair per calendar year touched,
/// clipped to the range at both ends.
pub fn year_spans(
    mut from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<(NaiveDate, NaiveDate)>, CalendarError> {
    if to < from {
        return Err(CalendarError::InvertedRange { start: from, end: to });
    }

    let mut spans = Vec::new();
    loop {
        let year_end = NaiveDate::from_ymd_opt(from.year(), 12, 31)
            .ok_or(CalendarError::OutOfRange(from))?;
        let end_date = std::cmp::min(year_end, to);
        spans.push((from, end_date));

        if end_date == to {
            break;
        }
        from = end_date.succ_opt().ok_or(CalendarError::OutOfRange(end_date))?;
    }

    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let days: Vec<_> = DateRange::new(date(2024, 2, 27), date(2024, 3, 1)).collect();
        assert_eq!(
            days,
            vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_date_range_single_day_and_inverted() {
        assert_eq!(DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).count(), 1);
        assert_eq!(DateRange::new(date(2024, 1, 2), date(2024, 1, 1)).count(), 0);
    }

    #[test]
    fn test_date_range_len() {
        let mut range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(range.len(), 366);
        range.next();
        assert_eq!(range.len(), 365);
    }

    #[test]
    fn test_month_spans_clip_to_range() {
        let spans = month_spans(date(2024, 1, 15), date(2024, 3, 10)).unwrap();
        assert_eq!(
            spans,
            vec![
                (date(2024, 1, 15), date(2024, 1, 31)),
                (date(2024, 2, 1), date(2024, 2, 29)),
                (date(2024, 3, 1), date(2024, 3, 10)),
            ]
        );
    }

    #[test]
    fn test_month_spans_cross_year() {
        let spans = month_spans(date(2023, 12, 20), date(2024, 1, 5)).unwrap();
        assert_eq!(
            spans,
            vec![
                (date(2023, 12, 20), date(2023, 12, 31)),
                (date(2024, 1, 1), date(2024, 1, 5)),
            ]
        );
    }

    #[test]
    fn test_year_spans() {
        let spans = year_spans(date(2022, 6, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(
            spans,
            vec![
                (date(2022, 6, 1), date(2022, 12, 31)),
                (date(2023, 1, 1), date(2023, 12, 31)),
                (date(2024, 1, 1), date(2024, 2, 1)),
            ]
        );
    }

    #[test]
    fn test_spans_reject_inverted_range() {
        assert!(month_spans(date(2024, 2, 1), date(2024, 1, 1)).is_err());
        assert!(year_spans(date(2024, 2, 1), date(2024, 1, 1)).is_err());
    }
}
