use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub preferred_role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct ViewProfileRequest {
    pub login_token: String,
}

/// An empty `artist_id` unlinks the profile from its artist.
#[derive(Deserialize)]
pub struct ModifyProfileRequest {
    pub login_token: String,
    pub display_name: Option<String>,
    pub artist_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ModifyPasswordRequest {
    pub login_token: String,
    pub password_old: String,
    pub password_new: String,
}

#[derive(Deserialize)]
pub struct SearchProfileRequest {
    pub login_token: String,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}
