use std::convert::TryFrom;

use crate::schedule::{Chair, ScheduleError};

#[derive(Queryable)]
pub struct ChairData {
    pub id: i32,
    pub name: String,
    pub start_hour: i32,
    pub end_hour: i32,
}

impl TryFrom<ChairData> for Chair {
    type Error = ScheduleError;

    fn try_from(data: ChairData) -> Result<Self, Self::Error> {
        let invalid = || ScheduleError::InvalidWorkingHours {
            start: data.start_hour.max(0) as u32,
            end: data.end_hour.max(0) as u32,
        };
        let start = u32::try_from(data.start_hour).map_err(|_| invalid())?;
        let end = u32::try_from(data.end_hour).map_err(|_| invalid())?;
        Chair::new(data.id, data.name.clone(), start, end)
    }
}
