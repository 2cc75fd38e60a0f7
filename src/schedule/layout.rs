use serde::Serialize;

use super::range::TimeRange;

pub const DEFAULT_PIXELS_PER_HOUR: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridBox {
    pub top_offset_px: f64,
    pub height_px: f64,
}

/// Position of `range` in a day grid starting at `window_start_hour`.
/// Nothing is clipped; ranges outside the window get offsets outside it.
pub fn project(range: &TimeRange, window_start_hour: u32, pixels_per_hour: f64) -> GridBox {
    let offset_minutes = range.minutes_since_midnight() - i64::from(window_start_hour) * 60;
    GridBox {
        top_offset_px: offset_minutes as f64 / 60.0 * pixels_per_hour,
        height_px: range.duration_minutes() as f64 / 60.0 * pixels_per_hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::range::at;
    use chrono::NaiveDate;

    fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeRange {
        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        TimeRange::new(at(day, h1, m1), at(day, h2, m2)).unwrap()
    }

    #[test]
    fn projects_into_window() {
        let b = project(&range(10, 30, 11, 15), 10, 80.0);
        assert_eq!(b.top_offset_px, 40.0);
        assert_eq!(b.height_px, 60.0);
    }

    #[test]
    fn full_day_grid() {
        let b = project(&range(2, 0, 4, 30), 0, DEFAULT_PIXELS_PER_HOUR);
        assert_eq!(b.top_offset_px, 160.0);
        assert_eq!(b.height_px, 200.0);
    }

    #[test]
    fn before_window_is_negative() {
        let b = project(&range(9, 0, 9, 30), 10, 80.0);
        assert_eq!(b.top_offset_px, -80.0);
        assert_eq!(b.height_px, 40.0);
    }
}
