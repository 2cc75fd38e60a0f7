use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchChairRequest {}

#[derive(Deserialize)]
pub struct SearchArtistRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct AddArtistRequest {
    pub login_token: String,
    pub name: String,
}
