use crate::schema::profiles;

#[derive(Queryable, Insertable)]
#[table_name = "profiles"]
pub struct ProfileData {
    pub id: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub artist_id: Option<String>,
    pub role: String,
}

/// `Some(None)` clears a nullable column, `None` leaves it untouched.
#[derive(AsChangeset, Default)]
#[table_name = "profiles"]
pub struct UpdateProfile {
    pub display_name: Option<Option<String>>,
    pub artist_id: Option<Option<String>>,
}
