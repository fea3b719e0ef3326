//! Percentages and progress bands used by every progress bar.

use serde::{Deserialize, Serialize};

/// Rounded `done / total` in percent, clamped to 100. Zero when `total` is 0.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percent(done: i64, total: i64) -> u8 {
    if total <= 0 || done <= 0 {
        return 0;
    }
    let pct = (done as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u8
}

/// Relative change from `previous` to `current`, in whole percent.
///
/// 100 when `previous` is zero and `current` is positive, 0 when both are zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn change_vs(previous: i64, current: i64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    ((current - previous) as f64 / previous as f64 * 100.0).round() as i64
}

/// Color band of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    None,
    Low,
    Medium,
    High,
    Done,
}

impl ProgressBand {
    #[must_use]
    pub const fn for_percent(percent: u8) -> Self {
        match percent {
            0 => Self::None,
            1..30 => Self::Low,
            30..70 => Self::Medium,
            70..100 => Self::High,
            _ => Self::Done,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Done => "done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(5, 0, 0)]
    #[case(0, 10, 0)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(25, 25, 100)]
    #[case(30, 25, 100)]
    fn percent_rounds_and_clamps(#[case] done: i64, #[case] total: i64, #[case] expected: u8) {
        assert_eq!(percent(done, total), expected);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 4, 100)]
    #[case(4, 4, 0)]
    #[case(4, 6, 50)]
    #[case(4, 1, -75)]
    #[case(3, 4, 33)]
    fn change_against_previous(#[case] previous: i64, #[case] current: i64, #[case] expected: i64) {
        assert_eq!(change_vs(previous, current), expected);
    }

    #[rstest]
    #[case(0, ProgressBand::None)]
    #[case(1, ProgressBand::Low)]
    #[case(29, ProgressBand::Low)]
    #[case(30, ProgressBand::Medium)]
    #[case(69, ProgressBand::Medium)]
    #[case(70, ProgressBand::High)]
    #[case(99, ProgressBand::High)]
    #[case(100, ProgressBand::Done)]
    fn band_thresholds(#[case] pct: u8, #[case] band: ProgressBand) {
        assert_eq!(ProgressBand::for_percent(pct), band);
    }
}
