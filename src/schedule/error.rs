use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid time range: {start} is not before {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("invalid duration of {0} minutes")]
    InvalidDuration(i64),
    #[error("invalid hour {0}")]
    InvalidHour(u32),
    #[error("invalid working hours {start}:00-{end}:00")]
    InvalidWorkingHours { start: u32, end: u32 },
    #[error("appointment must start and end on the same day")]
    MultiDay,
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
    #[error("chair {chair_id} is already booked by appointment {appointment_id}")]
    ChairConflict {
        chair_id: i32,
        appointment_id: String,
    },
    #[error("requested time is outside the working hours of chair {chair_id}")]
    OutOfWorkingHours { chair_id: i32 },
    #[error("booking for chair {requested} checked against chair {chair_id}")]
    ChairMismatch { chair_id: i32, requested: i32 },
}

impl ScheduleError {
    /// Stable identifier reported to clients as `err_kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::InvalidRange { .. } | ScheduleError::InvalidDuration(_) => {
                "invalid_range"
            }
            ScheduleError::InvalidHour(_) => "invalid_hour",
            ScheduleError::InvalidWorkingHours { .. } => "invalid_working_hours",
            ScheduleError::MultiDay => "multi_day",
            ScheduleError::InvalidColor(_) => "invalid_color",
            ScheduleError::ChairConflict { .. } => "chair_conflict",
            ScheduleError::OutOfWorkingHours { .. } => "out_of_working_hours",
            ScheduleError::ChairMismatch { .. } => "other",
        }
    }
}
