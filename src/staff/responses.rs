use serde::Serialize;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub login_token: String,
    pub role: String,
}

#[derive(Default, Serialize)]
pub struct ViewProfileResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub artist_id: String,
    pub artist_name: String,
}

#[derive(Default, Serialize)]
pub struct SearchProfileItem {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub artist_id: String,
    pub artist_name: String,
}

#[derive(Default, Serialize)]
pub struct SearchProfileResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
    pub profiles: Vec<SearchProfileItem>,
}

crate::impl_err_response! {
    LoginResponse,
    ViewProfileResponse,
    SearchProfileResponse,
}
