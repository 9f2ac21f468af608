use core_types::{Bucket, DatedAmount};

/// Returns the source records that `bucket` summarizes, in their original order.
///
/// Buckets from one aggregation never overlap, so drilling into each of them
/// partitions the in-range records.
pub fn drill_down<'a>(records: &'a [DatedAmount], bucket: &Bucket) -> Vec<&'a DatedAmount> {
    records.iter().filter(|r| bucket.contains(r.date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate_time_series;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_drill_down_returns_records_behind_a_week() {
        let records = vec![
            DatedAmount::new(date(2024, 3, 9), dec!(5)),
            DatedAmount::new(date(2024, 3, 2), dec!(1)),
            DatedAmount::new(date(2024, 3, 8), dec!(2)),
            DatedAmount::new(date(2024, 3, 3), dec!(0)),
        ];
        let buckets = aggregate_time_series(&records, date(2024, 3, 2), date(2024, 3, 17)).unwrap();

        let first_week = drill_down(&records, &buckets[0]);
        assert_eq!(first_week.len(), 3);
        assert_eq!(first_week[0].date, date(2024, 3, 2));
        assert_eq!(first_week[2].amount, dec!(0));

        let second_week = drill_down(&records, &buckets[1]);
        assert_eq!(second_week, vec![&records[0]]);
        assert!(drill_down(&records, &buckets[2]).is_empty());
    }
}
