use std::{fmt, str::FromStr};

use serde::Serialize;

use super::{error::ScheduleError, range::TimeRange};

pub const DEFAULT_COLOR: &str = "#8B5CF6";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chair {
    pub id: i32,
    pub name: String,
    work_start_hour: u32,
    work_end_hour: u32,
}

impl Chair {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        work_start_hour: u32,
        work_end_hour: u32,
    ) -> Result<Self, ScheduleError> {
        if work_start_hour >= work_end_hour || work_end_hour > 23 {
            return Err(ScheduleError::InvalidWorkingHours {
                start: work_start_hour,
                end: work_end_hour,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            work_start_hour,
            work_end_hour,
        })
    }

    pub fn work_start_hour(&self) -> u32 {
        self.work_start_hour
    }

    pub fn work_end_hour(&self) -> u32 {
        self.work_end_hour
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// `#RRGGBB`, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Default for Color {
    fn default() -> Self {
        Color(DEFAULT_COLOR.to_string())
    }
}

impl FromStr for Color {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let valid = hex.len() == 7
            && hex.starts_with('#')
            && hex[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ScheduleError::InvalidColor(s.to_string()));
        }
        Ok(Color(hex.to_ascii_uppercase()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub chair_id: i32,
    pub artist_id: String,
    range: TimeRange,
    pub client_name: String,
    pub service: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub color: Option<Color>,
}

impl Appointment {
    /// Appointments are laid out on a single day grid, so the range may not
    /// cross midnight.
    pub fn new(
        id: impl Into<String>,
        chair_id: i32,
        artist_id: impl Into<String>,
        range: TimeRange,
        client_name: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        if !range.is_single_day() {
            return Err(ScheduleError::MultiDay);
        }
        Ok(Self {
            id: id.into(),
            chair_id,
            artist_id: artist_id.into(),
            range,
            client_name: client_name.into(),
            service: None,
            price: None,
            description: None,
            color: None,
        })
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn display_color(&self) -> Color {
        self.color.clone().unwrap_or_default()
    }
}

/// Derived per query; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub hour: u32,
    pub occupant_count: u32,
    pub capacity: u32,
}

impl Slot {
    pub fn available(&self) -> u32 {
        self.capacity.saturating_sub(self.occupant_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::range::at;
    use chrono::NaiveDate;

    #[test]
    fn chair_working_hours_must_be_ordered() {
        assert!(Chair::new(1, "Chair 1", 10, 18).is_ok());
        assert_eq!(
            Chair::new(1, "Chair 1", 18, 10),
            Err(ScheduleError::InvalidWorkingHours { start: 18, end: 10 })
        );
        assert!(Chair::new(1, "Chair 1", 10, 10).is_err());
        assert!(Chair::new(1, "Chair 1", 0, 24).is_err());
    }

    #[test]
    fn colors_parse_hex_only() {
        assert_eq!("#8b5cf6".parse::<Color>().unwrap().to_string(), "#8B5CF6");
        assert!("8B5CF6".parse::<Color>().is_err());
        assert!("#8B5CF".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
        assert_eq!(Color::default().to_string(), DEFAULT_COLOR);
    }

    #[test]
    fn appointments_stay_on_one_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let next = day.succ_opt().unwrap();
        let late = TimeRange::new(at(day, 23, 0), at(next, 0, 30)).unwrap();
        assert_eq!(
            Appointment::new("a", 1, "x", late, "Ann"),
            Err(ScheduleError::MultiDay)
        );
        let until_midnight = TimeRange::new(at(day, 23, 0), at(next, 0, 0)).unwrap();
        let appo = Appointment::new("a", 1, "x", until_midnight, "Ann").unwrap();
        assert_eq!(appo.display_color(), Color::default());
    }
}
