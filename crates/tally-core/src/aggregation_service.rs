//! Window aggregation for the income dashboard.
//!
//! All boundaries are evaluated on the wall clock of the zone carried by
//! `now`; transaction instants are converted into that zone before they are
//! compared or bucketed.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use tally_domain::{sum_amounts, Transaction, ViewMode};

use crate::labels::CalendarLabels;

/// One fixed calendar slot of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub total: f64,
}

impl Bucket {
    fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            total: 0.0,
        }
    }
}

/// Everything the dashboard derives for a single view mode.
#[derive(Debug, Clone)]
pub struct Aggregate<Tz: TimeZone> {
    pub view_mode: ViewMode,
    pub window_start: DateTime<Tz>,
    pub filtered: Vec<Transaction>,
    pub total: f64,
    pub buckets: Vec<Bucket>,
}

impl<Tz: TimeZone> Aggregate<Tz> {
    pub fn bucket_sum(&self) -> f64 {
        self.buckets.iter().map(|bucket| bucket.total).sum()
    }

    /// Largest bucket total, used to scale chart bars.
    pub fn peak(&self) -> f64 {
        self.buckets
            .iter()
            .map(|bucket| bucket.total)
            .fold(0.0, f64::max)
    }
}

pub struct AggregationService;

impl AggregationService {
    /// Start of the active window: Jan 1st, the 1st of the month, or the most
    /// recent Sunday, each at 00:00:00 local time.
    pub fn window_start<Tz: TimeZone>(view_mode: ViewMode, now: &DateTime<Tz>) -> DateTime<Tz> {
        let today = now.date_naive();
        let start_date = match view_mode {
            ViewMode::Year => today.with_ordinal(1).unwrap_or(today),
            ViewMode::Month => today.with_day(1).unwrap_or(today),
            ViewMode::Week => {
                let since_sunday = today.weekday().num_days_from_sunday() as i64;
                today - Duration::days(since_sunday)
            }
        };
        local_midnight(&now.timezone(), start_date)
    }

    /// Transactions dated at or after `window_start`. There is no upper bound.
    pub fn filter_window<Tz: TimeZone>(
        transactions: &[Transaction],
        window_start: &DateTime<Tz>,
    ) -> Vec<Transaction> {
        let start = window_start.with_timezone(&Utc);
        transactions
            .iter()
            .filter(|txn| txn.date >= start)
            .cloned()
            .collect()
    }

    /// Groups amounts into calendar buckets for charting.
    ///
    /// Year and week modes match on month or weekday only, so records from
    /// other years (or weeks) land in the same slot as current ones. Month
    /// mode is the only one that checks the calendar month and year.
    pub fn bucketize<Tz: TimeZone>(
        transactions: &[Transaction],
        view_mode: ViewMode,
        now: &DateTime<Tz>,
        labels: &CalendarLabels,
    ) -> Vec<Bucket> {
        let zone = now.timezone();
        match view_mode {
            ViewMode::Year => {
                let mut buckets: Vec<Bucket> =
                    labels.months.iter().map(|name| Bucket::empty(*name)).collect();
                for txn in transactions {
                    let local = txn.date.with_timezone(&zone);
                    buckets[local.month0() as usize].total += txn.amount;
                }
                buckets
            }
            ViewMode::Week => {
                let mut buckets: Vec<Bucket> = labels
                    .weekdays
                    .iter()
                    .map(|name| Bucket::empty(*name))
                    .collect();
                for txn in transactions {
                    let local = txn.date.with_timezone(&zone);
                    buckets[local.weekday().num_days_from_sunday() as usize].total += txn.amount;
                }
                buckets
            }
            ViewMode::Month => {
                let days = days_in_month(now.year(), now.month());
                let mut buckets: Vec<Bucket> = (1..=days)
                    .map(|day| Bucket::empty(day.to_string()))
                    .collect();
                for txn in transactions {
                    let local = txn.date.with_timezone(&zone);
                    if local.year() != now.year() || local.month() != now.month() {
                        continue;
                    }
                    if let Some(bucket) = buckets.get_mut(local.day0() as usize) {
                        bucket.total += txn.amount;
                    }
                }
                buckets
            }
        }
    }

    /// Recomputes the whole view from the full transaction list.
    ///
    /// The chart is fed the window-filtered subset, so for week and year
    /// modes the bucket totals add up to `total`.
    pub fn aggregate<Tz: TimeZone>(
        transactions: &[Transaction],
        view_mode: ViewMode,
        now: &DateTime<Tz>,
        labels: &CalendarLabels,
    ) -> Aggregate<Tz> {
        let window_start = Self::window_start(view_mode, now);
        let filtered = Self::filter_window(transactions, &window_start);
        let total = sum_amounts(&filtered);
        let buckets = Self::bucketize(&filtered, view_mode, now, labels);
        Aggregate {
            view_mode,
            window_start,
            filtered,
            total,
            buckets,
        }
    }
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&midnight)
        .earliest()
        // midnight skipped by a DST transition
        .or_else(|| {
            zone.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| zone.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        brt().with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn txn(description: &str, amount: f64, when: DateTime<FixedOffset>) -> Transaction {
        Transaction::new(description, amount, when.with_timezone(&Utc))
    }

    #[test]
    fn window_start_per_mode() {
        // Thursday
        let now = at(2025, 6, 19, 15, 30, 0);

        assert_eq!(
            AggregationService::window_start(ViewMode::Year, &now),
            at(2025, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            AggregationService::window_start(ViewMode::Month, &now),
            at(2025, 6, 1, 0, 0, 0)
        );
        assert_eq!(
            AggregationService::window_start(ViewMode::Week, &now),
            at(2025, 6, 15, 0, 0, 0)
        );
    }

    #[test]
    fn week_starts_today_when_today_is_sunday() {
        let now = at(2025, 6, 15, 9, 0, 0);
        assert_eq!(
            AggregationService::window_start(ViewMode::Week, &now),
            at(2025, 6, 15, 0, 0, 0)
        );
    }

    #[test]
    fn week_window_can_cross_month_and_year() {
        // Thursday 2026-01-01 → Sunday 2025-12-28
        let now = at(2026, 1, 1, 12, 0, 0);
        assert_eq!(
            AggregationService::window_start(ViewMode::Week, &now),
            at(2025, 12, 28, 0, 0, 0)
        );
    }

    #[test]
    fn month_filter_includes_first_instant_and_excludes_prior_month() {
        let now = at(2025, 6, 19, 15, 30, 0);
        let first = txn("first", 10.0, at(2025, 6, 1, 0, 0, 0));
        let prior = txn("prior", 99.0, at(2025, 5, 31, 23, 59, 59));
        let later = txn("later", 5.0, at(2025, 6, 19, 8, 0, 0));

        let agg = AggregationService::aggregate(
            &[first.clone(), prior, later.clone()],
            ViewMode::Month,
            &now,
            &CalendarLabels::ENGLISH,
        );

        assert_eq!(agg.filtered, vec![first, later]);
        assert_eq!(agg.total, 15.0);
    }

    #[test]
    fn filter_uses_local_wall_clock_not_utc() {
        let now = at(2025, 6, 19, 15, 30, 0);
        // 2025-06-01 01:00 UTC is still May 31st in UTC-3.
        let late_may_local = Transaction::new(
            "late",
            40.0,
            Utc.with_ymd_and_hms(2025, 6, 1, 1, 0, 0).unwrap(),
        );

        let agg = AggregationService::aggregate(
            &[late_may_local],
            ViewMode::Month,
            &now,
            &CalendarLabels::ENGLISH,
        );

        assert!(agg.filtered.is_empty());
        assert_eq!(agg.total, 0.0);
    }

    #[test]
    fn week_buckets_land_on_weekday_index() {
        // Thursday; Monday and Thursday of the same week.
        let now = at(2025, 6, 19, 18, 0, 0);
        let txns = vec![
            txn("Monday gig", 120.0, at(2025, 6, 16, 10, 0, 0)),
            txn("Thursday tip", 30.0, at(2025, 6, 19, 9, 0, 0)),
        ];

        let agg =
            AggregationService::aggregate(&txns, ViewMode::Week, &now, &CalendarLabels::ENGLISH);

        let totals: Vec<f64> = agg.buckets.iter().map(|b| b.total).collect();
        assert_eq!(totals, vec![0.0, 120.0, 0.0, 0.0, 30.0, 0.0, 0.0]);
        assert_eq!(agg.total, 150.0);
        assert_eq!(agg.buckets[1].label, "Mon");
    }

    #[test]
    fn year_buckets_sum_to_total_within_the_year() {
        let now = at(2025, 9, 10, 12, 0, 0);
        let txns = vec![
            txn("jan", 100.0, at(2025, 1, 3, 12, 0, 0)),
            txn("mar", 250.5, at(2025, 3, 15, 12, 0, 0)),
            txn("sep", 49.5, at(2025, 9, 9, 12, 0, 0)),
        ];

        let agg =
            AggregationService::aggregate(&txns, ViewMode::Year, &now, &CalendarLabels::ENGLISH);

        assert_eq!(agg.buckets.len(), 12);
        assert_eq!(agg.total, 400.0);
        assert_eq!(agg.bucket_sum(), agg.total);
        assert_eq!(agg.buckets[2].total, 250.5);
        assert_eq!(agg.peak(), 250.5);
    }

    #[test]
    fn year_bucketize_collapses_records_from_other_years() {
        let now = at(2025, 9, 10, 12, 0, 0);
        let txns = vec![
            txn("this march", 10.0, at(2025, 3, 1, 12, 0, 0)),
            txn("old march", 7.0, at(2019, 3, 20, 12, 0, 0)),
        ];

        let buckets =
            AggregationService::bucketize(&txns, ViewMode::Year, &now, &CalendarLabels::ENGLISH);

        assert_eq!(buckets[2].total, 17.0);
    }

    #[test]
    fn week_bucketize_collapses_records_from_other_weeks() {
        let now = at(2025, 6, 19, 18, 0, 0);
        let txns = vec![
            txn("this monday", 10.0, at(2025, 6, 16, 12, 0, 0)),
            txn("older monday", 5.0, at(2025, 1, 6, 12, 0, 0)),
        ];

        let buckets =
            AggregationService::bucketize(&txns, ViewMode::Week, &now, &CalendarLabels::ENGLISH);

        assert_eq!(buckets[1].total, 15.0);
    }

    #[test]
    fn month_bucketize_ignores_other_months_and_years() {
        let now = at(2024, 2, 20, 12, 0, 0);
        let txns = vec![
            txn("leap day", 29.0, at(2024, 2, 29, 12, 0, 0)),
            txn("first", 1.0, at(2024, 2, 1, 0, 0, 0)),
            txn("last year", 500.0, at(2023, 2, 1, 12, 0, 0)),
            txn("march", 300.0, at(2024, 3, 1, 12, 0, 0)),
        ];

        let buckets =
            AggregationService::bucketize(&txns, ViewMode::Month, &now, &CalendarLabels::ENGLISH);

        assert_eq!(buckets.len(), 29);
        assert_eq!(buckets[0].label, "1");
        assert_eq!(buckets[0].total, 1.0);
        assert_eq!(buckets[28].total, 29.0);
        let sum: f64 = buckets.iter().map(|b| b.total).sum();
        assert_eq!(sum, 30.0);
    }

    #[test]
    fn empty_list_produces_zero_buckets() {
        let now = at(2025, 4, 10, 12, 0, 0);
        for mode in ViewMode::ALL {
            let agg = AggregationService::aggregate(&[], mode, &now, &CalendarLabels::ENGLISH);
            assert_eq!(agg.total, 0.0);
            assert!(agg.buckets.iter().all(|b| b.total == 0.0));
        }
        let month = AggregationService::aggregate(
            &[],
            ViewMode::Month,
            &now,
            &CalendarLabels::ENGLISH,
        );
        assert_eq!(month.buckets.len(), 30);
    }

    #[test]
    fn labels_follow_locale() {
        let now = at(2025, 4, 10, 12, 0, 0);
        let buckets =
            AggregationService::bucketize(&[], ViewMode::Week, &now, &CalendarLabels::PORTUGUESE);
        let names: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(names, vec!["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"]);
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }
}
