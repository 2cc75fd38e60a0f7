use serde::Deserialize;

#[derive(Deserialize)]
pub struct StudioSlotsRequest {
    pub date: String,
}

#[derive(Deserialize)]
pub struct ChairSlotsRequest {
    pub date: String,
    pub chair_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct DayGridRequest {
    pub login_token: Option<String>,
    pub date: String,
    pub window_start_hour: Option<u32>,
    pub pixels_per_hour: Option<f64>,
}

#[derive(Deserialize)]
pub struct DaySummaryRequest {
    pub login_token: Option<String>,
    pub date: String,
}
