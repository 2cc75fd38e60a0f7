use serde::Serialize;

#[derive(Default, Serialize, Debug, PartialEq)]
pub struct AppointItem {
    pub id: String,
    pub chair_id: i32,
    pub artist_id: String,
    pub artist_name: String,
    pub client_name: String,
    pub service: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub color: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Default, Serialize)]
pub struct SearchDayResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub appointments: Vec<AppointItem>,
}

#[derive(Default, Serialize)]
pub struct ViewAppointResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub appointment: Option<AppointItem>,
}

#[derive(Default, Serialize)]
pub struct CheckAppointResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    /// Same-artist bookings overlapping the request on other chairs.
    pub artist_overlaps: Vec<String>,
}

#[derive(Default, Serialize)]
pub struct AppointResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub id: String,
}

crate::impl_err_response! {
    SearchDayResponse,
    ViewAppointResponse,
    CheckAppointResponse,
    AppointResponse,
}
