use anyhow::bail;
use chrono::FixedOffset;
use serde::Deserialize;

use crate::{
    schedule::TimeRange,
    utils::{parse_date_clock, parse_time_str},
};

/// When a booking happens: either explicit bounds, or the booking form's
/// date, start time and duration in minutes.
#[derive(Deserialize, Default)]
pub struct BookingTime {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i64>,
}

impl BookingTime {
    pub fn to_range(&self, studio: &FixedOffset) -> anyhow::Result<TimeRange> {
        if let (Some(start), Some(end)) = (&self.start_time, &self.end_time) {
            let start = parse_time_str(start, studio)?;
            let end = parse_time_str(end, studio)?;
            return Ok(TimeRange::new(start, end)?);
        }
        match (&self.date, &self.time, self.duration) {
            (Some(date), Some(time), Some(duration)) => {
                Ok(TimeRange::with_duration(parse_date_clock(date, time)?, duration)?)
            }
            _ => bail!("Either start_time and end_time or date, time and duration are required"),
        }
    }
}

#[derive(Deserialize)]
pub struct SearchDayRequest {
    pub login_token: Option<String>,
    pub date: String,
    pub chair_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct ViewAppointRequest {
    pub login_token: Option<String>,
    pub id: String,
}

#[derive(Deserialize)]
pub struct CheckAppointRequest {
    pub login_token: Option<String>,
    pub chair_id: i32,
    pub artist_id: Option<String>,
    /// Id of the appointment being edited.
    pub replacing: Option<String>,
    #[serde(flatten)]
    pub when: BookingTime,
}

#[derive(Deserialize)]
pub struct AppointRequest {
    pub login_token: String,
    pub chair_id: i32,
    pub artist_id: String,
    pub client_name: String,
    #[serde(flatten)]
    pub when: BookingTime,
    pub service: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct ModifyAppointRequest {
    pub id: String,
    #[serde(flatten)]
    pub appoint: AppointRequest,
}

#[derive(Deserialize)]
pub struct CancelAppointRequest {
    pub login_token: String,
    pub id: String,
}
