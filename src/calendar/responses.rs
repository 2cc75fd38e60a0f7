use serde::Serialize;

use crate::{appointments::AppointItem, schedule::studio::StudioSlot};

#[derive(Default, Serialize)]
pub struct StudioSlotsResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub capacity: u32,
    pub slots: Vec<StudioSlot>,
}

#[derive(Default, Serialize)]
pub struct ChairSlotItem {
    pub hour: u32,
    pub occupant_count: u32,
    pub capacity: u32,
    pub free: bool,
}

#[derive(Default, Serialize)]
pub struct ChairSlotsItem {
    pub chair_id: i32,
    pub name: String,
    pub slots: Vec<ChairSlotItem>,
}

#[derive(Default, Serialize)]
pub struct ChairSlotsResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub chairs: Vec<ChairSlotsItem>,
}

#[derive(Default, Serialize)]
pub struct GridBoxItem {
    pub top_offset_px: f64,
    pub height_px: f64,
    pub appointment: AppointItem,
}

#[derive(Default, Serialize)]
pub struct GridColumn {
    pub chair_id: i32,
    pub name: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub boxes: Vec<GridBoxItem>,
}

#[derive(Default, Serialize)]
pub struct DayGridResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub window_start_hour: u32,
    pub pixels_per_hour: f64,
    pub columns: Vec<GridColumn>,
}

#[derive(Default, Serialize)]
pub struct DaySummaryResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub count: usize,
    /// Only reported to staff.
    pub revenue: Option<f64>,
}

crate::impl_err_response! {
    StudioSlotsResponse,
    ChairSlotsResponse,
    DayGridResponse,
    DaySummaryResponse,
}
