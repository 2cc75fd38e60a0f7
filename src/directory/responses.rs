use serde::Serialize;

#[derive(Default, Serialize)]
pub struct SearchChairItem {
    pub id: i32,
    pub name: String,
    pub start_hour: u32,
    pub end_hour: u32,
}

#[derive(Default, Serialize)]
pub struct SearchChairResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub chairs: Vec<SearchChairItem>,
}

#[derive(Default, Serialize)]
pub struct SearchArtistItem {
    pub id: String,
    pub name: String,
}

#[derive(Default, Serialize)]
pub struct SearchArtistResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub artists: Vec<SearchArtistItem>,
}

#[derive(Default, Serialize)]
pub struct AddArtistResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub id: String,
}

crate::impl_err_response! {
    SearchChairResponse,
    SearchArtistResponse,
    AddArtistResponse,
}
