//! Series cadence detection and date stepping.

use chrono::{Months, NaiveDate, TimeDelta};

/// The spacing between consecutive observations of a series.
///
/// Forecast dates must advance by the same period as the history they extend;
/// the cadence is inferred from the median gap between observed dates, so
/// occasional missing periods do not skew it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cadence {
    /// Consecutive days.
    Daily,
    /// Seven-day spacing.
    Weekly,
    /// Calendar months (the synthesized year+month axis lands here).
    #[default]
    Monthly,
}

impl Cadence {
    /// Infers the cadence from ascending observation dates.
    ///
    /// Fewer than two dates give no gaps to measure; monthly is the default,
    /// matching the year+month input convention.
    #[must_use]
    pub fn detect(dates: &[NaiveDate]) -> Self {
        let mut gaps: Vec<i64> = dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days())
            .collect();
        if gaps.is_empty() {
            return Self::default();
        }
        gaps.sort_unstable();
        let median = gaps[gaps.len() / 2];

        if median >= 21 {
            Self::Monthly
        } else if median >= 5 {
            Self::Weekly
        } else {
            Self::Daily
        }
    }

    /// The date `steps` periods after `date`.
    #[must_use]
    pub fn advance(self, date: NaiveDate, steps: u32) -> NaiveDate {
        match self {
            Self::Daily => date + TimeDelta::days(i64::from(steps)),
            Self::Weekly => date + TimeDelta::weeks(i64::from(steps)),
            Self::Monthly => date + Months::new(steps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn first_of_month_dates_detect_as_monthly() {
        let dates = vec![d(2023, 11, 1), d(2023, 12, 1), d(2024, 1, 1), d(2024, 2, 1)];
        assert_eq!(Cadence::detect(&dates), Cadence::Monthly);
    }

    #[test]
    fn monthly_detection_survives_a_gap() {
        // One missing month produces a single 61-day gap; the median holds.
        let dates = vec![d(2024, 1, 1), d(2024, 2, 1), d(2024, 4, 1), d(2024, 5, 1)];
        assert_eq!(Cadence::detect(&dates), Cadence::Monthly);
    }

    #[test]
    fn daily_and_weekly_spacings_detect() {
        let daily = vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)];
        assert_eq!(Cadence::detect(&daily), Cadence::Daily);

        let weekly = vec![d(2024, 1, 1), d(2024, 1, 8), d(2024, 1, 15)];
        assert_eq!(Cadence::detect(&weekly), Cadence::Weekly);
    }

    #[test]
    fn monthly_advance_keeps_the_day_anchor() {
        assert_eq!(Cadence::Monthly.advance(d(2024, 11, 1), 3), d(2025, 2, 1));
        // Clamped at short month ends, like calendar arithmetic should.
        assert_eq!(Cadence::Monthly.advance(d(2024, 1, 31), 1), d(2024, 2, 29));
    }

    #[test]
    fn daily_advance_steps_by_days() {
        assert_eq!(Cadence::Daily.advance(d(2024, 2, 28), 2), d(2024, 3, 1));
    }
}
