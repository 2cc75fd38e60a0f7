use std::convert::TryFrom;

use crate::schedule::{Appointment, ScheduleError, TimeRange};
use crate::schema::appointments;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable, Clone)]
#[table_name = "appointments"]
pub struct AppointmentData {
    pub id: String,
    pub chair_id: i32,
    pub artist_id: String,
    pub client_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub service: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[table_name = "appointments"]
#[changeset_options(treat_none_as_null = "true")]
pub struct UpdateAppointment {
    pub chair_id: i32,
    pub artist_id: String,
    pub client_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub service: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl TryFrom<&AppointmentData> for Appointment {
    type Error = ScheduleError;

    fn try_from(data: &AppointmentData) -> Result<Self, Self::Error> {
        let range = TimeRange::new(data.start_time, data.end_time)?;
        let mut appo = Appointment::new(
            data.id.clone(),
            data.chair_id,
            data.artist_id.clone(),
            range,
            data.client_name.clone(),
        )?;
        appo.service = data.service.clone();
        appo.price = data.price;
        appo.description = data.description.clone();
        // a stored colour that no longer parses falls back to the default
        appo.color = data.color.as_deref().and_then(|c| c.parse().ok());
        Ok(appo)
    }
}

/// Rows that cannot form a valid appointment are logged and skipped.
pub fn to_appointment(row: &AppointmentData) -> Option<Appointment> {
    match Appointment::try_from(row) {
        Ok(appo) => Some(appo),
        Err(err) => {
            tracing::warn!(appointment = %row.id, error = %err, "skipping malformed appointment");
            None
        }
    }
}

pub fn to_schedule(rows: &[AppointmentData]) -> Vec<Appointment> {
    rows.iter().filter_map(to_appointment).collect()
}
